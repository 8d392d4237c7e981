mod settings_error;
mod time_unit;
mod writer_settings;

pub use settings_error::SettingsError;
pub use time_unit::TimeUnit;
pub use writer_settings::{RoutedServicesWriterSettings, ServiceNetworkWriterSettings};
