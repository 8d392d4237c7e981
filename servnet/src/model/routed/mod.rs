mod routed_layer;
mod routed_service;
mod trip_frequency;
mod trip_schedule;

pub use routed_layer::{RoutedModeServices, RoutedServices, RoutedServicesLayer};
pub use routed_service::{RoutedService, RoutedServiceTripInfo};
pub use trip_frequency::RoutedTripFrequency;
pub use trip_schedule::{RelativeLegTiming, RoutedTripDeparture, RoutedTripSchedule};
