use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// JSON array of articles supplied by the external corpus loader.
    pub news_data_path: PathBuf,
    /// Single-record user state file, written through on every mutation.
    pub user_data_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let news_data_path = env::var("NEWS_DATA_PATH")
            .unwrap_or_else(|_| "data/sample_news.json".to_string())
            .into();
        let user_data_path = env::var("USER_DATA_PATH")
            .unwrap_or_else(|_| "user_data/user_profile.json".to_string())
            .into();

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            news_data_path,
            user_data_path,
        })
    }
}
