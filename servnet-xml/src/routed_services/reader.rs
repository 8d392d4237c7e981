use std::collections::HashSet;

use chrono::Duration;
use minidom::Element;

use servnet::diagnostic::Diagnostics;
use servnet::model::physical::{ModeId, PhysicalNetwork};
use servnet::model::routed::{
    RelativeLegTiming, RoutedService, RoutedServices, RoutedServicesLayer, RoutedTripDeparture,
    RoutedTripFrequency, RoutedTripSchedule,
};
use servnet::model::service::{ServiceNetwork, ServiceNetworkLayer};
use servnet::model::{EntityKind, IdIndex};

use crate::config::TimeUnit;
use crate::document::{parse_hms, parse_time, schema, split_refs, ElementExt};

use super::RoutedServicesIoError;

/// builds the routed services from a parsed document tree.
///
/// requires the service network to be fully parsed first: leg segment
/// references resolve against the entries the service network reader
/// registered into the session's identifier index.
pub fn read_routed_services(
    root: &Element,
    physical: &PhysicalNetwork,
    service_network: &ServiceNetwork,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<RoutedServices, RoutedServicesIoError> {
    if root.name() != schema::ROUTED_SERVICES {
        return Err(RoutedServicesIoError::UnexpectedRoot {
            expected: schema::ROUTED_SERVICES.to_string(),
            found: root.name().to_string(),
        });
    }
    let source_id = root.try_attribute(schema::ATTR_ID)?;
    let external_id = root.attribute(schema::ATTR_EXTERNAL_ID);
    let parent_reference = root.try_attribute(schema::ATTR_PARENT_SERVICE_NETWORK)?;
    if parent_reference != service_network.source_id {
        return Err(RoutedServicesIoError::ParentServiceNetworkMismatch {
            routed: source_id,
            reference: parent_reference,
            loaded: service_network.source_id.clone(),
        });
    }

    let mut routed = RoutedServices::new(&source_id, external_id.as_deref(), &parent_reference);
    if let Some(layers_element) = root.only_child(schema::SERVICE_LAYERS) {
        for layer_element in layers_element.children_named(schema::SERVICE_LAYER) {
            let layer = read_layer(layer_element, physical, service_network, index, diagnostics)?;
            routed.add_layer(layer);
        }
    }
    Ok(routed)
}

fn read_layer(
    element: &Element,
    physical: &PhysicalNetwork,
    service_network: &ServiceNetwork,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<RoutedServicesLayer, RoutedServicesIoError> {
    let source_id = element.try_attribute(schema::ATTR_ID)?;
    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let parent_reference = element
        .non_blank_attribute(schema::ATTR_SERVICE_LAYER_REF)
        .ok_or_else(|| RoutedServicesIoError::UnknownServiceLayer {
            layer: source_id.clone(),
            reference: String::new(),
        })?;
    let parent_layer = index.resolve_service_layer(&parent_reference).ok_or_else(|| {
        RoutedServicesIoError::UnknownServiceLayer {
            layer: source_id.clone(),
            reference: parent_reference.clone(),
        }
    })?;
    let service_layer = service_network.layer(parent_layer)?;

    let mut layer = RoutedServicesLayer::new(&source_id, external_id.as_deref(), parent_layer);
    for services_element in element.children_named(schema::SERVICES) {
        let mode = resolve_group_mode(
            services_element,
            &source_id,
            service_layer,
            physical,
            index,
            diagnostics,
        )?;
        let group = layer.services_for_mode_mut(mode);
        for service_element in services_element.children_named(schema::SERVICE) {
            if let Some(service) = read_service(service_element, index, diagnostics) {
                group.services.push(service);
            }
        }
    }
    Ok(layer)
}

/// a group may omit its mode reference only when the parent layer
/// supports exactly one mode, which is then adopted implicitly.
fn resolve_group_mode(
    element: &Element,
    layer_source_id: &str,
    service_layer: &ServiceNetworkLayer,
    physical: &PhysicalNetwork,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<ModeId, RoutedServicesIoError> {
    match element.non_blank_attribute(schema::ATTR_MODE_REF) {
        Some(reference) => {
            let mode =
                index
                    .resolve_mode(&reference)
                    .ok_or_else(|| RoutedServicesIoError::UnknownMode {
                        layer: layer_source_id.to_string(),
                        reference: reference.clone(),
                    })?;
            if !service_layer.supports(mode) {
                return Err(RoutedServicesIoError::UnsupportedMode {
                    layer: layer_source_id.to_string(),
                    mode: reference,
                });
            }
            Ok(mode)
        }
        None => match service_layer.supported_modes.as_slice() {
            [sole_mode] => {
                let mode = physical.mode(*sole_mode)?;
                diagnostics.info(
                    EntityKind::RoutedServicesLayer,
                    layer_source_id,
                    format!(
                        "services group without mode reference adopted sole supported mode '{}'",
                        mode.source_id
                    ),
                );
                Ok(*sole_mode)
            }
            _ => Err(RoutedServicesIoError::MissingMode {
                layer: layer_source_id.to_string(),
            }),
        },
    }
}

fn read_service(
    element: &Element,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Option<RoutedService> {
    let Some(source_id) = element.non_blank_attribute(schema::ATTR_ID) else {
        diagnostics.warn(
            EntityKind::RoutedService,
            "",
            "routed service without id skipped",
        );
        return None;
    };
    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let mut service = RoutedService::new(&source_id, external_id.as_deref());
    service.name = element.non_blank_attribute(schema::ATTR_NAME);
    service.name_description = element.non_blank_attribute(schema::ATTR_NAME_DESCRIPTION);
    service.service_description = element.non_blank_attribute(schema::ATTR_SERVICE_DESCRIPTION);

    if let Some(trips_element) = element.only_child(schema::TRIPS) {
        for trip_element in trips_element.children_named(schema::TRIP) {
            read_trip(trip_element, &mut service, index, diagnostics);
        }
    }
    Some(service)
}

/// exactly one of frequency or schedule must be present on a trip;
/// anything else skips the trip.
fn read_trip(
    element: &Element,
    service: &mut RoutedService,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) {
    let Some(source_id) = element.non_blank_attribute(schema::ATTR_ID) else {
        diagnostics.warn(EntityKind::RoutedTrip, "", "trip without id skipped");
        return;
    };
    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let frequency_element = element.only_child(schema::FREQUENCY);
    let schedule_element = element.only_child(schema::SCHEDULE);
    match (frequency_element, schedule_element) {
        (Some(frequency_element), None) => {
            if let Some(trip) = read_frequency_trip(
                frequency_element,
                &source_id,
                external_id.as_deref(),
                index,
                diagnostics,
            ) {
                service.trips.frequency_trips.push(trip);
            }
        }
        (None, Some(schedule_element)) => {
            if let Some(trip) = read_schedule_trip(
                schedule_element,
                &source_id,
                external_id.as_deref(),
                index,
                diagnostics,
            ) {
                service.trips.schedule_trips.push(trip);
            }
        }
        _ => {
            diagnostics.warn(
                EntityKind::RoutedTrip,
                source_id,
                "trip must carry exactly one of frequency or schedule, skipped",
            );
        }
    }
}

fn read_frequency_trip(
    element: &Element,
    source_id: &str,
    external_id: Option<&str>,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Option<RoutedTripFrequency> {
    let unit = match element.non_blank_attribute(schema::ATTR_TIME_UNIT) {
        Some(value) => match value.parse::<TimeUnit>() {
            Ok(unit) => unit,
            Err(_) => {
                diagnostics.warn(
                    EntityKind::RoutedTrip,
                    source_id,
                    format!("unrecognized frequency time unit '{}', trip skipped", value),
                );
                return None;
            }
        },
        None => TimeUnit::Hour,
    };
    let raw_value = element.text();
    let Ok(value) = raw_value.trim().parse::<f64>() else {
        diagnostics.warn(
            EntityKind::RoutedTrip,
            source_id,
            format!("frequency '{}' is not a number, trip skipped", raw_value.trim()),
        );
        return None;
    };
    // a frequency is trips-per-time, so the unit conversion runs in the
    // inverse direction of a duration conversion
    let frequency_per_hour = value * unit.per_hour_factor();
    if frequency_per_hour <= 0.0 {
        diagnostics.warn(
            EntityKind::RoutedTrip,
            source_id,
            "non-positive frequency, trip skipped",
        );
        return None;
    }

    let mut trip = RoutedTripFrequency::new(source_id, external_id, frequency_per_hour);
    let references = element
        .non_blank_attribute(schema::ATTR_LEG_SEGMENT_REFS)
        .map(|value| split_refs(&value))
        .unwrap_or_default();
    if references.is_empty() {
        diagnostics.warn(
            EntityKind::RoutedTrip,
            source_id,
            "frequency trip without leg segment references retained without path",
        );
        return Some(trip);
    }
    for reference in references {
        match index.resolve_leg_segment(&reference) {
            Some(leg_segment) => trip.add_leg_segment(leg_segment),
            None => {
                // known degradation: the trip stays, its path does not
                diagnostics.warn(
                    EntityKind::RoutedTrip,
                    source_id,
                    format!(
                        "unknown leg segment '{}', frequency trip retained without path",
                        reference
                    ),
                );
                trip.clear_legs();
                break;
            }
        }
    }
    Some(trip)
}

fn read_schedule_trip(
    element: &Element,
    source_id: &str,
    external_id: Option<&str>,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Option<RoutedTripSchedule> {
    let mut schedule = RoutedTripSchedule::new(source_id, external_id, Duration::zero());

    // departures come first and parse independently of the leg timings
    if let Some(departures_element) = element.only_child(schema::DEPARTURES) {
        let mut seen: HashSet<String> = HashSet::new();
        for departure_element in departures_element.children_named(schema::DEPARTURE) {
            let Some(departure_id) = departure_element.non_blank_attribute(schema::ATTR_ID) else {
                diagnostics.warn(
                    EntityKind::RoutedTripDeparture,
                    "",
                    "departure without id skipped",
                );
                continue;
            };
            if !seen.insert(departure_id.clone()) {
                diagnostics.warn(
                    EntityKind::RoutedTripDeparture,
                    departure_id,
                    "duplicate departure id skipped",
                );
                continue;
            }
            let time = departure_element
                .non_blank_attribute(schema::ATTR_TIME)
                .and_then(|value| parse_time(&value));
            let Some(time) = time else {
                diagnostics.warn(
                    EntityKind::RoutedTripDeparture,
                    departure_id,
                    "departure without a valid time skipped",
                );
                continue;
            };
            schedule.add_departure(RoutedTripDeparture {
                source_id: departure_id,
                external_id: departure_element.attribute(schema::ATTR_EXTERNAL_ID),
                time,
            });
        }
    }
    if !schedule.has_departures() {
        diagnostics.warn(
            EntityKind::RoutedTrip,
            source_id,
            "schedule trip without departures skipped",
        );
        return None;
    }

    if let Some(timings_element) = element.only_child(schema::RELATIVE_TIMINGS) {
        // the schema declares a default here but the parsing layer does
        // not fill it in; apply zero explicitly when absent
        let default_dwell = timings_element
            .non_blank_attribute(schema::ATTR_DWELL_TIME)
            .and_then(|value| parse_hms(&value))
            .unwrap_or_else(Duration::zero);
        schedule.default_dwell_time = default_dwell;

        for timing_element in timings_element.children_named(schema::TIMING_LEG) {
            match read_timing(timing_element, default_dwell, index) {
                Ok(timing) => schedule.add_timing(timing),
                Err(message) => {
                    // a partial stop sequence has no corridor semantics
                    diagnostics.warn(
                        EntityKind::RoutedTrip,
                        source_id,
                        format!("{}, relative timings discarded", message),
                    );
                    schedule.clear_timings();
                    break;
                }
            }
        }
    }
    if !schedule.has_timings() {
        diagnostics.warn(
            EntityKind::RoutedTrip,
            source_id,
            "schedule trip retained without a relative timing path",
        );
    }
    Some(schedule)
}

fn read_timing(
    element: &Element,
    default_dwell: Duration,
    index: &IdIndex,
) -> Result<RelativeLegTiming, String> {
    let reference = element
        .non_blank_attribute(schema::ATTR_LEG_SEGMENT_REF)
        .ok_or_else(|| "timing without leg segment reference".to_string())?;
    let leg_segment = index
        .resolve_leg_segment(&reference)
        .ok_or_else(|| format!("timing references unknown leg segment '{}'", reference))?;
    let duration = element
        .non_blank_attribute(schema::ATTR_DURATION)
        .and_then(|value| parse_hms(&value))
        .ok_or_else(|| format!("timing over '{}' without a valid duration", reference))?;
    let dwell_time = match element.non_blank_attribute(schema::ATTR_DWELL_TIME) {
        Some(value) => parse_hms(&value)
            .ok_or_else(|| format!("timing over '{}' with invalid dwell time", reference))?,
        None => default_dwell,
    };
    Ok(RelativeLegTiming {
        leg_segment,
        duration,
        dwell_time,
    })
}
