// lib/src/config/mod.rs

pub mod config_defaults;
pub mod config_structs;

use std::path::Path;

use ::config::{Config, Environment, File};
use tracing::debug;

pub use config_defaults::*;
pub use config_structs::{AppConfig, DatabaseConfig, LabConfig, ServerConfig};

use crate::errors::Result;

/// Loads settings from, in increasing priority: built-in defaults, an optional
/// `healthify.{toml,yaml,json}` in the working directory, the file at `path`
/// (which must exist when given), and `HEALTHIFY__SECTION__KEY` variables.
pub fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    build_app_config(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn build_app_config(path: Option<&Path>, env: Environment) -> Result<AppConfig> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
    if let Some(path) = path {
        debug!("Reading configuration from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }
    let config = builder.add_source(env).build()?;
    Ok(config.try_deserialize::<AppConfig>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn should_fall_back_to_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database.url, "sqlite://healthify.db");
        assert_eq!(config.server.patient_port, 3001);
        assert_eq!(config.server.doctor_port, 3002);
        assert_eq!(config.server.admin_port, 3003);
        assert_eq!(config.lab.default_staff_id, "L101");
    }

    #[test]
    fn should_layer_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nadmin_port = 4003\n\n[lab]\ndefault_staff_id = \"L7\"").unwrap();

        let config = load_app_config(Some(&path)).unwrap();
        assert_eq!(config.server.admin_port, 4003);
        assert_eq!(config.server.patient_port, 3001);
        assert_eq!(config.lab.default_staff_id, "L7");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn should_let_environment_override_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\npatient_port = 4001\nadmin_port = 4003").unwrap();

        let mut vars = ::config::Map::new();
        vars.insert("HEALTHIFY__SERVER__PATIENT_PORT".to_string(), "5001".to_string());
        vars.insert("HEALTHIFY__DATABASE__URL".to_string(), "sqlite://from-env.db".to_string());
        vars.insert("UNRELATED__SERVER__DOCTOR_PORT".to_string(), "9".to_string());

        let config = build_app_config(Some(&path), environment().source(Some(vars))).unwrap();
        assert_eq!(config.server.patient_port, 5001);
        assert_eq!(config.server.admin_port, 4003);
        assert_eq!(config.server.doctor_port, 3002);
        assert_eq!(config.database.url, "sqlite://from-env.db");
    }

    #[test]
    fn should_fail_on_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_app_config(Some(&missing)).is_err());
    }
}
