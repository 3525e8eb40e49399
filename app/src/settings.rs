use config::{Config, ConfigError, Environment, File};
use infrastructure::{DbusConfig, MonitoringConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub monitoring: MonitoringConfig,
    pub dbus: DbusConfig,
    pub heater: HeaterSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config.toml").required(false))
            .add_source(Environment::default().separator("_").list_separator(","));

        let s = builder.build()?;
        s.try_deserialize()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HeaterSettings {
    //Custom names accepted for the water heater relay, compared
    //case-insensitively
    pub relay_labels: Vec<String>,
    pub poll_interval_seconds: u64,
    //Raw /Ac/ActiveIn/Source codes considered an external supply.
    //Anything else keeps the heater off.
    pub external_sources: Vec<i32>,
    //Highest relay slot number to scan during discovery
    pub max_relays: u8,
}

impl Default for HeaterSettings {
    fn default() -> Self {
        Self {
            relay_labels: vec!["AC Water Heater".to_owned(), "AC WH".to_owned()],
            poll_interval_seconds: 5,
            external_sources: vec![1, 3, 4],
            max_relays: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_accept_both_spellings() {
        let settings = HeaterSettings::default();

        assert!(settings.relay_labels.contains(&"AC Water Heater".to_owned()));
        assert!(settings.relay_labels.contains(&"AC WH".to_owned()));
    }

    #[test]
    fn test_default_external_sources_are_grid_and_shore() {
        let settings = HeaterSettings::default();

        assert_eq!(settings.external_sources, vec![1, 3, 4]);
    }
}
