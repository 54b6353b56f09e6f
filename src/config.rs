use std::path::PathBuf;
use std::sync::LazyLock;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Process-wide configuration, loaded once at startup.
///
/// Values come from the environment with the `PORTAL_` prefix
/// (e.g. `PORTAL_DATABASE_URL`), merged over the defaults below.
/// `main` calls `dotenvy::dotenv()` first, so a `.env` file works too.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| match Config::load() {
    Ok(cfg) => cfg,
    Err(e) => panic!("invalid configuration: {e}"),
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub upload_dir: PathBuf,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:portal.db".to_string(),
            // The monolith keeps 80/443; the gateway sits next to it on 8081.
            listen_addr: "0.0.0.0:8081".to_string(),
            upload_dir: PathBuf::from("storage/files"),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("PORTAL_"))
            .extract()
    }
}
