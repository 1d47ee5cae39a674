use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    #[serde(default = "default_app_name")]
    pub(crate) app_name: String,
    pub(crate) database_url: String,
    #[serde(default = "default_max_connections")]
    pub(crate) database_max_connections: u32,
    #[serde(default = "default_timeout_secs")]
    pub(crate) database_timeout_secs: u64,
    pub(crate) secret: String,
    #[serde(default = "default_algorithm")]
    pub(crate) token_algorithm: String,
    #[serde(default = "default_token_ttl")]
    pub(crate) access_token_expire_minutes: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub(crate) bcrypt_cost: u32,
    #[serde(default = "default_log_level")]
    pub(crate) log_level: String,
    #[serde(default = "default_port")]
    pub(crate) port: u16,
    #[serde(default = "default_cors_origins")]
    pub(crate) cors_origins: String,
    #[serde(default)]
    pub(crate) session_fallback: bool,
}

fn default_app_name() -> String {
    "Car Management System".into()
}

fn default_max_connections() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_algorithm() -> String {
    "HS256".into()
}

fn default_token_ttl() -> i64 {
    30
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_log_level() -> String {
    "info".into()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> String {
    "*".into()
}

/// `None` means any origin is allowed.
pub(crate) fn parse_origins(origins: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        None
    } else {
        Some(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_keys() {
        let config = config::Config::builder()
            .set_override("database_url", "postgres://localhost/cars")
            .unwrap()
            .set_override("secret", "hunter2")
            .unwrap()
            .build()
            .unwrap();

        let args = config.try_deserialize::<Args>().unwrap();

        assert_eq!(args.token_algorithm, "HS256");
        assert_eq!(args.access_token_expire_minutes, 30);
        assert_eq!(args.port, 8000);
        assert!(!args.session_fallback);
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), None);
        assert_eq!(parse_origins(""), None);
        assert_eq!(
            parse_origins("http://localhost:5173, https://cars.example.com"),
            Some(vec![
                "http://localhost:5173".to_string(),
                "https://cars.example.com".to_string()
            ])
        );
    }
}
