use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: Option<u32>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Id of the system-default harvest tree substituted when a fruit
    /// record is created without an explicit tree reference. Kept as
    /// configuration rather than a compiled constant (§9).
    #[serde(default = "default_tree_id")]
    pub default_tree_id: String,

    /// Timeout in seconds applied to reads and simple mutations (§5)
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Timeout in seconds applied to shipment add/remove-item operations (§5)
    #[serde(default = "default_item_timeout_secs")]
    pub item_timeout_secs: u64,

    /// Timeout in seconds applied to finalize and receive operations (§5)
    #[serde(default = "default_finalize_timeout_secs")]
    pub finalize_timeout_secs: u64,
}

fn default_max_connections() -> Option<u32> {
    Some(10)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tree_id() -> String {
    "6SRlQ8zX9vJ2mN5P6Q7R8S9T001".to_string()
}

fn default_read_timeout_secs() -> u64 {
    10
}

fn default_item_timeout_secs() -> u64 {
    15
}

fn default_finalize_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables, falling back to a
    /// `.env` file if one is present in the working directory.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .set_default("database_url", "")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("default_tree_id", default_tree_id())?
            .set_default("read_timeout_secs", 10)?
            .set_default("item_timeout_secs", 15)?
            .set_default("finalize_timeout_secs", 30)?
            .add_source(config::Environment::default());

        builder.build()?.try_deserialize::<Config>()
    }
}
