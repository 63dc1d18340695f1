pub struct DefaultConfig;

impl DefaultConfig {
    pub fn create_default_config_file() -> String {
        r#"[server]
host = "0.0.0.0"
port = 8080

[model]
name = "gemini-1.5-flash"
base_url = "https://generativelanguage.googleapis.com"
timeout_secs = 30
max_retries = 0

[generation.question]
temperature = 0.7
top_k = 40
top_p = 0.95
max_output_tokens = 100
response_format = "text"

[generation.answer_check]
temperature = 0.7
top_k = 40
top_p = 0.95
max_output_tokens = 200
response_format = "json"
"#
        .to_string()
    }
}
