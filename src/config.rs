use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================================
// Server Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

// ============================================================
// Explorer Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ExplorerConfig {
    #[serde(default = "default_explorer_url")]
    pub base_url: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: default_explorer_url(),
        }
    }
}

fn default_explorer_url() -> String {
    "https://blockstream.info/api".to_string()
}

// ============================================================
// Storage Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_pdf_path")]
    pub pdf_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            pdf_path: default_pdf_path(),
        }
    }
}

fn default_log_path() -> String {
    "wallet_logs.csv".to_string()
}

fn default_pdf_path() -> String {
    "btc_wallet_report.pdf".to_string()
}

// ============================================================
// UI Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_address")]
    pub default_address: String,
    #[serde(default = "default_premium_url")]
    pub premium_report_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_address: default_address(),
            premium_report_url: default_premium_url(),
        }
    }
}

fn default_address() -> String {
    "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_string()
}

fn default_premium_url() -> String {
    "https://yourdomain.com/premium-report".to_string()
}

// ============================================================
// Admin Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin")]
    pub username: String,
    #[serde(default = "default_admin")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin(),
            password: default_admin(),
        }
    }
}

fn default_admin() -> String {
    "ADMIN".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: &str) -> eyre::Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> eyre::Result<()> {
        let base = &self.explorer.base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(eyre::eyre!("Invalid explorer base_url '{}'", base));
        }
        if self.storage.log_path.trim().is_empty() {
            return Err(eyre::eyre!("storage.log_path must not be empty"));
        }
        if self.storage.pdf_path.trim().is_empty() {
            return Err(eyre::eyre!("storage.pdf_path must not be empty"));
        }
        if self.admin.username.is_empty() || self.admin.password.is_empty() {
            return Err(eyre::eyre!("admin credentials must not be empty"));
        }
        Ok(())
    }
}
