use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::forms::DEFAULT_LIST_LIMIT;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Database name; the file is `<data_dir>/<db_name>.db`.
    pub db_name: String,
    /// Maximum number of forms returned by a listing.
    pub list_limit: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.db_name))
    }

    /// Checks settings that clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.db_name.trim().is_empty() {
            return Err(Error::Config("database name cannot be empty".to_string()));
        }
        if self.list_limit == 0 {
            return Err(Error::Config("list limit must be at least 1".to_string()));
        }
        self.socket_addr()
            .map_err(|e| Error::Config(format!("invalid bind address '{}:{}': {e}", self.host, self.port)))?;
        Ok(())
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            db_name: "formforge".to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}
