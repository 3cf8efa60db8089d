use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub puzzles_file: String,
    pub analytics_endpoint: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            puzzles_file: env::var("PUZZLES_FILE").unwrap_or_else(|_| "./puzzles.json".to_string()),
            analytics_endpoint: env::var("ANALYTICS_ENDPOINT").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
