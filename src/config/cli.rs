use clap::{Args, builder::BoolishValueParser};

/// Command-line overrides; these win over files and `BLOGDESK__*` variables.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigOverrides {
    /// Override the API base URL (for example `https://blog.example.com/api`).
    #[arg(long = "api-url", env = "BLOGDESK_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the per-request timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the search debounce window.
    #[arg(long = "search-debounce-ms", value_name = "MILLIS", global = true)]
    pub search_debounce_ms: Option<u64>,

    /// Override the posts list page size.
    #[arg(long = "page-size", value_name = "COUNT", global = true)]
    pub page_size: Option<u32>,
}
