use crate::model::service::ServiceLegSegmentId;

/// a trip defined by a fixed headway over an ordered leg segment path.
/// the frequency is stored in the canonical trips-per-hour unit.
///
/// a trip whose leg segment references failed to resolve keeps its
/// frequency but loses its path (`clear_legs`); such a degraded trip is
/// observable through [`RoutedTripFrequency::has_path`].
#[derive(Debug, Clone)]
pub struct RoutedTripFrequency {
    pub source_id: String,
    pub external_id: Option<String>,
    leg_segments: Vec<ServiceLegSegmentId>,
    pub frequency_per_hour: f64,
}

impl RoutedTripFrequency {
    pub fn new(
        source_id: &str,
        external_id: Option<&str>,
        frequency_per_hour: f64,
    ) -> RoutedTripFrequency {
        RoutedTripFrequency {
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            leg_segments: vec![],
            frequency_per_hour,
        }
    }

    pub fn add_leg_segment(&mut self, leg_segment: ServiceLegSegmentId) {
        self.leg_segments.push(leg_segment);
    }

    pub fn clear_legs(&mut self) {
        self.leg_segments.clear();
    }

    pub fn has_path(&self) -> bool {
        !self.leg_segments.is_empty()
    }

    pub fn number_of_leg_segments(&self) -> usize {
        self.leg_segments.len()
    }

    pub fn first_leg_segment(&self) -> Option<ServiceLegSegmentId> {
        self.leg_segments.first().copied()
    }

    pub fn last_leg_segment(&self) -> Option<ServiceLegSegmentId> {
        self.leg_segments.last().copied()
    }

    pub fn leg_segments(&self) -> &[ServiceLegSegmentId] {
        &self.leg_segments
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cleared_trip_keeps_frequency_but_loses_path() {
        let mut trip = RoutedTripFrequency::new("t1", None, 3.0);
        trip.add_leg_segment(ServiceLegSegmentId(0));
        trip.add_leg_segment(ServiceLegSegmentId(1));
        assert!(trip.has_path());
        assert_eq!(trip.number_of_leg_segments(), 2);

        trip.clear_legs();
        assert!(!trip.has_path());
        assert_eq!(trip.number_of_leg_segments(), 0);
        assert_eq!(trip.first_leg_segment(), None);
        assert_eq!(trip.frequency_per_hour, 3.0);
    }
}
