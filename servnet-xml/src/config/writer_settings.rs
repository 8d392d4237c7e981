use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{SettingsError, TimeUnit};

/// defines behaviors for a service network emission
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ServiceNetworkWriterSettings {
    pub output_directory: PathBuf,
    pub file_name: String,
    /// locale hint carried through from the embedding application;
    /// unused by the emitter itself.
    pub country_name: String,
}

impl Default for ServiceNetworkWriterSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            file_name: String::from("servicenetwork.xml"),
            country_name: String::new(),
        }
    }
}

impl TryFrom<&String> for ServiceNetworkWriterSettings {
    type Error = SettingsError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        read_settings_file(f)
    }
}

/// defines behaviors for a routed services emission
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RoutedServicesWriterSettings {
    pub output_directory: PathBuf,
    pub file_name: String,
    /// locale hint carried through from the embedding application;
    /// unused by the emitter itself.
    pub country_name: String,
    /// time unit frequency based trips are written against.
    pub trip_frequency_time_unit: TimeUnit,
    /// when set, a routed service dropped for having no trips is logged
    /// rather than discarded silently.
    pub log_services_without_trips: bool,
}

impl Default for RoutedServicesWriterSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            file_name: String::from("routedservices.xml"),
            country_name: String::new(),
            trip_frequency_time_unit: TimeUnit::Hour,
            log_services_without_trips: false,
        }
    }
}

impl TryFrom<&String> for RoutedServicesWriterSettings {
    type Error = SettingsError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        read_settings_file(f)
    }
}

fn read_settings_file<T: serde::de::DeserializeOwned>(f: &String) -> Result<T, SettingsError> {
    if f.ends_with(".toml") {
        let s = std::fs::read_to_string(f)
            .map_err(|e| SettingsError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        toml::from_str(&s)
            .map_err(|e| SettingsError::ConfigurationError(format!("failure decoding {f}: {e}")))
    } else if f.ends_with(".json") {
        let s = std::fs::read_to_string(f)
            .map_err(|e| SettingsError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        serde_json::from_str(&s)
            .map_err(|e| SettingsError::ConfigurationError(format!("failure decoding {f}: {e}")))
    } else {
        Err(SettingsError::ConfigurationError(format!(
            "unsupported file type: {f}"
        )))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RoutedServicesWriterSettings::default();
        assert_eq!(settings.file_name, "routedservices.xml");
        assert_eq!(settings.trip_frequency_time_unit, TimeUnit::Hour);
        assert!(!settings.log_services_without_trips);
    }

    #[test]
    fn test_decode_json_settings() {
        let raw = r#"{
            "output_directory": "/tmp/out",
            "file_name": "rs.xml",
            "country_name": "",
            "trip_frequency_time_unit": "minute",
            "log_services_without_trips": true
        }"#;
        let settings: RoutedServicesWriterSettings =
            serde_json::from_str(raw).expect("settings decode");
        assert_eq!(settings.trip_frequency_time_unit, TimeUnit::Minute);
        assert!(settings.log_services_without_trips);
    }
}
