use super::{RoutedTripFrequency, RoutedTripSchedule};

/// a named transit line: a container of frequency based and/or schedule
/// based trips, belonging to exactly one mode group.
#[derive(Debug, Clone, Default)]
pub struct RoutedService {
    pub source_id: String,
    pub external_id: Option<String>,
    pub name: Option<String>,
    pub name_description: Option<String>,
    pub service_description: Option<String>,
    pub trips: RoutedServiceTripInfo,
}

impl RoutedService {
    pub fn new(source_id: &str, external_id: Option<&str>) -> RoutedService {
        RoutedService {
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            ..Default::default()
        }
    }
}

/// the two disjoint trip collections of a routed service.
#[derive(Debug, Clone, Default)]
pub struct RoutedServiceTripInfo {
    pub frequency_trips: Vec<RoutedTripFrequency>,
    pub schedule_trips: Vec<RoutedTripSchedule>,
}

impl RoutedServiceTripInfo {
    pub fn has_trips(&self) -> bool {
        !self.frequency_trips.is_empty() || !self.schedule_trips.is_empty()
    }

    pub fn number_of_trips(&self) -> usize {
        self.frequency_trips.len() + self.schedule_trips.len()
    }
}
