use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    /// Session token lifetime in seconds.
    pub session_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_submit_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Outbound mail (transactional-mail HTTP API). Missing key disables mail.
    pub mail_api_url: String,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    pub mail_sender_name: String,
    /// Admins notified about new submissions.
    pub admin_emails: Vec<String>,

    // Decision-document service. Missing URL disables generation.
    pub document_service_url: Option<String>,
    pub document_service_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            session_ttl: env::var("SESSION_TTL")
                .unwrap_or_else(|_| "3600".to_string()) // default 1 hour
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_submit_per_min: env::var("RATE_SUBMIT_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string()),
            mail_api_key: env::var("MAIL_API_KEY").ok().filter(|key| !key.is_empty()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@leavedesk.local".to_string()),
            mail_sender_name: env::var("MAIL_SENDER_NAME")
                .unwrap_or_else(|_| "Leave Desk".to_string()),
            admin_emails: env::var("ADMIN_EMAILS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(str::to_owned)
                .collect(),

            document_service_url: env::var("DOCUMENT_SERVICE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            document_service_token: env::var("DOCUMENT_SERVICE_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        }
    }
}
