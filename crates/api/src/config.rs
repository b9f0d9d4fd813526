use threadnote_labeler::LabelerConfig;
use threadnote_mail::MailConfig;

/// Server configuration loaded from environment variables.
///
/// Read once at startup and passed explicitly to the collaborators that
/// need it; nothing reads the environment after boot.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mail provider API (participant lookup).
    pub mail: MailConfig,
    /// Completion service (label suggestion).
    pub labeler: LabelerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `MAIL_API_BASE_URL`       | `https://api.nylas.com`    |
    /// | `MAIL_API_TOKEN`          | required                   |
    /// | `COMPLETION_API_BASE_URL` | `https://api.openai.com`   |
    /// | `COMPLETION_API_KEY`      | required                   |
    /// | `COMPLETION_MODEL`        | `gpt-3.5-turbo-instruct`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let mail = MailConfig {
            base_url: std::env::var("MAIL_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.nylas.com".into()),
            auth_token: std::env::var("MAIL_API_TOKEN").expect("MAIL_API_TOKEN must be set"),
            connect_timeout_secs: 60,
            request_timeout_secs: 90,
        };

        let labeler = LabelerConfig {
            base_url: std::env::var("COMPLETION_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            api_key: std::env::var("COMPLETION_API_KEY").expect("COMPLETION_API_KEY must be set"),
            model: std::env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo-instruct".into()),
            max_tokens: 200,
            request_timeout_secs: 60,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            mail,
            labeler,
        }
    }
}
