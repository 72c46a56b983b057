//! src/configuration.rs
use std::path::PathBuf;

use serde_aux::field_attributes::deserialize_number_from_string;

const APP_ENVIRONMENT: &str = "APP_ENVIRONMENT";

/// Possible runtime Environments for application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Please use either `local` or `production`.",
                other
            )),
        }
    }
}

/// 2 config groups: where to listen; where the importer output lives.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub reader: ReaderSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    // Env overrides arrive as strings.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Where the importer's build output is read from.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct ReaderSettings {
    /// Relative paths are resolved against the working directory.
    pub base_directory: PathBuf,
    /// Reject names that resolve outside `base_directory`.
    #[serde(default)]
    pub enforce_containment: bool,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path: PathBuf = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine current directory: {e}"))
    })?;
    let configuration_directory: PathBuf = base_path.join("configuration");

    // Detect running environment and default to "local"
    let environment: Environment =
        Environment::try_from(std::env::var(APP_ENVIRONMENT).unwrap_or_else(|_| "local".into()))
            .map_err(config::ConfigError::Message)?;
    let environment_file: String = format!("{}.yaml", environment.as_str());

    let settings: config::Config = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_file),
        ))
        // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
