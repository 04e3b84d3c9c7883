mod loader;

pub use loader::{CollisionPolicy, Config, ModuleConfig, DEFAULT_CONFIG_NAMES};
