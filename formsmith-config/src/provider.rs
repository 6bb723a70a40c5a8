//! Configuration provider using Figment

use crate::{
    defaults::ConfigDefaults,
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    error::ConfigError,
    form_config::FormConfig,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde_json::{Map, Value};
use tracing::{debug, info, trace};

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "FORMSMITH_";

/// Loads [`FormConfig`] from every configuration source.
///
/// Sources are merged in precedence order, later sources override earlier ones:
/// 1. Builtin defaults
/// 2. Discovered configuration files (global, then project)
/// 3. `FORMSMITH_` environment variables
/// 4. Explicit overrides passed to [`ConfigProvider::with_overrides`]
///
/// Nothing is cached; each call to [`ConfigProvider::load`] reads fresh.
#[derive(Debug, Default, Clone)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    overrides: Option<Value>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific file discovery, e.g. with explicit directories
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Values applied on top of every other source
    pub fn with_overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Load the merged configuration
    pub fn load(&self) -> ConfigResult<FormConfig> {
        debug!("Loading form configuration");

        let figment = self.build_figment();
        let values: Map<String, Value> = figment.extract().map_err(ConfigError::from)?;
        Self::validate(&values)?;

        info!("Loaded form configuration with {} top-level keys", values.len());
        Ok(FormConfig::from(values))
    }

    /// The sections the form helper reads must stay tables
    fn validate(values: &Map<String, Value>) -> ConfigResult<()> {
        for section in ["defaults", "templates"] {
            if let Some(value) = values.get(section) {
                if !value.is_object() {
                    return Err(ConfigError::InvalidValue {
                        key: section.to_string(),
                        message: format!("expected a table, found {value}"),
                    });
                }
            }
        }
        Ok(())
    }

    fn build_figment(&self) -> Figment {
        let mut figment = ConfigDefaults::figment();

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(Self::file_provider(&config_file));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(ref overrides) = self.overrides {
            figment = figment.merge(Serialized::defaults(overrides.clone()));
        }

        figment
    }

    fn file_provider(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}

/// Load configuration from all default sources
pub fn load_configuration() -> ConfigResult<FormConfig> {
    ConfigProvider::new().load()
}
