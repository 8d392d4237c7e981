use std::collections::BTreeMap;

use chrono::{Duration, NaiveTime};

use crate::model::service::ServiceLegSegmentId;

/// a single departure of a schedule based trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedTripDeparture {
    pub source_id: String,
    pub external_id: Option<String>,
    pub time: NaiveTime,
}

/// the duration and dwell time of traversing one leg segment within a
/// scheduled trip. entry order is the stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeLegTiming {
    pub leg_segment: ServiceLegSegmentId,
    pub duration: Duration,
    pub dwell_time: Duration,
}

/// a trip defined by explicit departure clock times plus per-leg
/// relative timings along an ordered leg segment path.
#[derive(Debug, Clone)]
pub struct RoutedTripSchedule {
    pub source_id: String,
    pub external_id: Option<String>,
    /// dwell time applied to timing entries that do not carry their own.
    pub default_dwell_time: Duration,
    departures: Vec<RoutedTripDeparture>,
    timings: Vec<RelativeLegTiming>,
}

impl RoutedTripSchedule {
    pub fn new(
        source_id: &str,
        external_id: Option<&str>,
        default_dwell_time: Duration,
    ) -> RoutedTripSchedule {
        RoutedTripSchedule {
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            default_dwell_time,
            departures: vec![],
            timings: vec![],
        }
    }

    pub fn add_departure(&mut self, departure: RoutedTripDeparture) {
        self.departures.push(departure);
    }

    /// appends a timing entry; the order of calls is the stop sequence.
    pub fn add_timing(&mut self, timing: RelativeLegTiming) {
        self.timings.push(timing);
    }

    /// drops the whole timing sequence. a partial stop sequence has no
    /// corridor semantics, so a failed entry discards all of them.
    pub fn clear_timings(&mut self) {
        self.timings.clear();
    }

    pub fn departures(&self) -> &[RoutedTripDeparture] {
        &self.departures
    }

    pub fn timings(&self) -> &[RelativeLegTiming] {
        &self.timings
    }

    pub fn timing(&self, index: usize) -> Option<&RelativeLegTiming> {
        self.timings.get(index)
    }

    pub fn has_departures(&self) -> bool {
        !self.departures.is_empty()
    }

    pub fn has_timings(&self) -> bool {
        !self.timings.is_empty()
    }

    /// the dwell time occurring most often across the timing entries.
    /// ties resolve to the smallest duration so the result is stable.
    pub fn most_common_dwell_time(&self) -> Option<Duration> {
        let mut counts: BTreeMap<Duration, usize> = BTreeMap::new();
        for timing in &self.timings {
            *counts.entry(timing.dwell_time).or_insert(0) += 1;
        }
        let mut best: Option<(Duration, usize)> = None;
        for (dwell, count) in counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((dwell, count)),
            }
        }
        best.map(|(dwell, _)| dwell)
    }

    /// updates the default dwell time to the most common dwell across
    /// the timing entries. run immediately before serialization so the
    /// emitted per-leg dwell fields compact against the freshest value.
    pub fn recompute_default_dwell_time(&mut self) -> Duration {
        if let Some(dwell) = self.most_common_dwell_time() {
            self.default_dwell_time = dwell;
        }
        self.default_dwell_time
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn timing(dwell_seconds: i64) -> RelativeLegTiming {
        RelativeLegTiming {
            leg_segment: ServiceLegSegmentId(0),
            duration: Duration::minutes(3),
            dwell_time: Duration::seconds(dwell_seconds),
        }
    }

    #[test]
    fn test_most_common_dwell_time_counts_entries() {
        let mut schedule = RoutedTripSchedule::new("t1", None, Duration::zero());
        schedule.add_timing(timing(30));
        schedule.add_timing(timing(30));
        schedule.add_timing(timing(60));
        assert_eq!(
            schedule.most_common_dwell_time(),
            Some(Duration::seconds(30))
        );
        assert_eq!(
            schedule.recompute_default_dwell_time(),
            Duration::seconds(30)
        );
        assert_eq!(schedule.default_dwell_time, Duration::seconds(30));
    }

    #[test]
    fn test_most_common_dwell_time_tie_picks_smallest() {
        let mut schedule = RoutedTripSchedule::new("t1", None, Duration::zero());
        schedule.add_timing(timing(60));
        schedule.add_timing(timing(30));
        assert_eq!(
            schedule.most_common_dwell_time(),
            Some(Duration::seconds(30))
        );
    }

    #[test]
    fn test_recompute_without_timings_keeps_default() {
        let mut schedule = RoutedTripSchedule::new("t1", None, Duration::seconds(10));
        assert_eq!(schedule.most_common_dwell_time(), None);
        assert_eq!(
            schedule.recompute_default_dwell_time(),
            Duration::seconds(10)
        );
    }
}
