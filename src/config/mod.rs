pub mod duration;
pub mod loader;
pub mod schema;

pub use duration::parse_duration;
pub use loader::{ConfigError, load_config, load_config_from};
pub use schema::{Config, ConfigSummary, DEFAULT_PORT};
