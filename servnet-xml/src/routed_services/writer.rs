use minidom::{Element, Node};

use servnet::diagnostic::Diagnostics;
use servnet::model::physical::PhysicalNetwork;
use servnet::model::routed::{
    RoutedModeServices, RoutedService, RoutedServices, RoutedServicesLayer, RoutedTripFrequency,
    RoutedTripSchedule,
};
use servnet::model::service::ServiceNetwork;
use servnet::model::EntityKind;

use crate::config::RoutedServicesWriterSettings;
use crate::document::{format_hms, format_time, schema};
use crate::id_policy::persisted_id;

use super::RoutedServicesIoError;

/// emits the routed services as a document tree mirroring the input
/// format, in persisted-identifier order.
///
/// schedule trips have their default dwell time recomputed to the most
/// common dwell across their timings immediately before emission, and
/// per-leg dwell fields equal to that default are omitted. services
/// without any trips are dropped from output.
pub fn write_routed_services(
    routed: &mut RoutedServices,
    service_network: &ServiceNetwork,
    physical: &PhysicalNetwork,
    settings: &RoutedServicesWriterSettings,
    diagnostics: &mut Diagnostics,
) -> Result<Element, RoutedServicesIoError> {
    // compact per-leg dwell times against the freshest default
    for layer in routed.layers_mut() {
        for group in layer.services_by_mode_mut() {
            for service in &mut group.services {
                for schedule in &mut service.trips.schedule_trips {
                    schedule.recompute_default_dwell_time();
                }
            }
        }
    }

    let mut root = Element::builder(schema::ROUTED_SERVICES)
        .attr(
            schema::ATTR_ID,
            persisted_id(EntityKind::RoutedServices, &routed.source_id, 0, diagnostics),
        )
        .attr(
            schema::ATTR_PARENT_SERVICE_NETWORK,
            routed.parent_service_network.clone(),
        );
    if let Some(external_id) = &routed.external_id {
        root = root.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }

    let mut layers: Vec<(String, &RoutedServicesLayer)> = routed
        .layers()
        .iter()
        .enumerate()
        .map(|(position, layer)| {
            (
                persisted_id(
                    EntityKind::RoutedServicesLayer,
                    &layer.source_id,
                    position,
                    diagnostics,
                ),
                layer,
            )
        })
        .collect();
    layers.sort_by(|a, b| a.0.cmp(&b.0));

    let mut layers_element = Element::builder(schema::SERVICE_LAYERS);
    for (layer_id, layer) in layers {
        layers_element = layers_element.append(write_layer(
            layer_id,
            layer,
            service_network,
            physical,
            settings,
            diagnostics,
        )?);
    }
    root = root.append(layers_element.build());
    Ok(root.build())
}

fn write_layer(
    layer_id: String,
    layer: &RoutedServicesLayer,
    service_network: &ServiceNetwork,
    physical: &PhysicalNetwork,
    settings: &RoutedServicesWriterSettings,
    diagnostics: &mut Diagnostics,
) -> Result<Element, RoutedServicesIoError> {
    let parent_layer = service_network.layer(layer.parent_layer)?;
    let mut builder = Element::builder(schema::SERVICE_LAYER)
        .attr(schema::ATTR_ID, layer_id)
        .attr(
            schema::ATTR_SERVICE_LAYER_REF,
            persisted_id(
                EntityKind::ServiceNetworkLayer,
                &parent_layer.source_id,
                parent_layer.id.0,
                diagnostics,
            ),
        );
    if let Some(external_id) = &layer.external_id {
        builder = builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }

    let mut groups: Vec<(String, &RoutedModeServices)> = layer
        .services_by_mode()
        .iter()
        .map(|group| {
            physical
                .mode(group.mode)
                .map(|mode| (mode.source_id.clone(), group))
        })
        .collect::<Result<_, _>>()?;
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    for (mode_reference, group) in groups {
        let mut group_builder =
            Element::builder(schema::SERVICES).attr(schema::ATTR_MODE_REF, mode_reference);

        let mut services: Vec<(String, &RoutedService)> = group
            .services
            .iter()
            .enumerate()
            .map(|(position, service)| {
                (
                    persisted_id(
                        EntityKind::RoutedService,
                        &service.source_id,
                        position,
                        diagnostics,
                    ),
                    service,
                )
            })
            .collect();
        services.sort_by(|a, b| a.0.cmp(&b.0));

        for (service_id, service) in services {
            if !service.trips.has_trips() {
                // an empty service carries no operational meaning
                if settings.log_services_without_trips {
                    diagnostics.warn(
                        EntityKind::RoutedService,
                        service_id,
                        "routed service without trips dropped from output",
                    );
                }
                continue;
            }
            group_builder = group_builder.append(write_service(
                service_id,
                service,
                service_network,
                settings,
                diagnostics,
            )?);
        }
        builder = builder.append(group_builder.build());
    }
    Ok(builder.build())
}

fn write_service(
    service_id: String,
    service: &RoutedService,
    service_network: &ServiceNetwork,
    settings: &RoutedServicesWriterSettings,
    diagnostics: &mut Diagnostics,
) -> Result<Element, RoutedServicesIoError> {
    let mut builder = Element::builder(schema::SERVICE).attr(schema::ATTR_ID, service_id);
    if let Some(external_id) = &service.external_id {
        builder = builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }
    if let Some(name) = &service.name {
        builder = builder.attr(schema::ATTR_NAME, name.clone());
    }
    if let Some(name_description) = &service.name_description {
        builder = builder.attr(schema::ATTR_NAME_DESCRIPTION, name_description.clone());
    }
    if let Some(service_description) = &service.service_description {
        builder = builder.attr(schema::ATTR_SERVICE_DESCRIPTION, service_description.clone());
    }

    let mut trips: Vec<(String, Element)> = Vec::new();
    for (position, trip) in service.trips.frequency_trips.iter().enumerate() {
        let trip_id = persisted_id(EntityKind::RoutedTrip, &trip.source_id, position, diagnostics);
        let element =
            write_frequency_trip(trip_id.clone(), trip, service_network, settings, diagnostics)?;
        trips.push((trip_id, element));
    }
    let offset = service.trips.frequency_trips.len();
    for (position, trip) in service.trips.schedule_trips.iter().enumerate() {
        let trip_id = persisted_id(
            EntityKind::RoutedTrip,
            &trip.source_id,
            offset + position,
            diagnostics,
        );
        let element =
            write_schedule_trip(trip_id.clone(), trip, service_network, diagnostics)?;
        trips.push((trip_id, element));
    }
    trips.sort_by(|a, b| a.0.cmp(&b.0));

    let mut trips_element = Element::builder(schema::TRIPS);
    for (_, element) in trips {
        trips_element = trips_element.append(element);
    }
    Ok(builder.append(trips_element.build()).build())
}

fn write_frequency_trip(
    trip_id: String,
    trip: &RoutedTripFrequency,
    service_network: &ServiceNetwork,
    settings: &RoutedServicesWriterSettings,
    diagnostics: &mut Diagnostics,
) -> Result<Element, RoutedServicesIoError> {
    let unit = settings.trip_frequency_time_unit;
    let value = trip.frequency_per_hour / unit.per_hour_factor();
    let mut frequency_builder = Element::builder(schema::FREQUENCY)
        .attr(schema::ATTR_TIME_UNIT, unit.to_string())
        .append(Node::Text(value.to_string()));
    if trip.has_path() {
        let references: Vec<String> = trip
            .leg_segments()
            .iter()
            .map(|handle| {
                service_network.leg_segment(*handle).map(|segment| {
                    persisted_id(
                        EntityKind::ServiceLegSegment,
                        &segment.source_id,
                        segment.id.0,
                        diagnostics,
                    )
                })
            })
            .collect::<Result<_, _>>()?;
        frequency_builder =
            frequency_builder.attr(schema::ATTR_LEG_SEGMENT_REFS, references.join(","));
    }
    let mut builder = Element::builder(schema::TRIP).attr(schema::ATTR_ID, trip_id);
    if let Some(external_id) = &trip.external_id {
        builder = builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }
    Ok(builder.append(frequency_builder.build()).build())
}

fn write_schedule_trip(
    trip_id: String,
    trip: &RoutedTripSchedule,
    service_network: &ServiceNetwork,
    diagnostics: &mut Diagnostics,
) -> Result<Element, RoutedServicesIoError> {
    let mut schedule_builder = Element::builder(schema::SCHEDULE);

    let mut departures: Vec<(String, &servnet::model::routed::RoutedTripDeparture)> = trip
        .departures()
        .iter()
        .enumerate()
        .map(|(position, departure)| {
            (
                persisted_id(
                    EntityKind::RoutedTripDeparture,
                    &departure.source_id,
                    position,
                    diagnostics,
                ),
                departure,
            )
        })
        .collect();
    departures.sort_by(|a, b| a.0.cmp(&b.0));

    let mut departures_element = Element::builder(schema::DEPARTURES);
    for (departure_id, departure) in departures {
        let mut departure_builder = Element::builder(schema::DEPARTURE)
            .attr(schema::ATTR_ID, departure_id)
            .attr(schema::ATTR_TIME, format_time(departure.time));
        if let Some(external_id) = &departure.external_id {
            departure_builder =
                departure_builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
        }
        departures_element = departures_element.append(departure_builder.build());
    }
    schedule_builder = schedule_builder.append(departures_element.build());

    if trip.has_timings() {
        let default_dwell = trip.default_dwell_time;
        let mut timings_element = Element::builder(schema::RELATIVE_TIMINGS)
            .attr(schema::ATTR_DWELL_TIME, format_hms(default_dwell));
        // timing order is the stop sequence, never sorted
        for timing in trip.timings() {
            let segment = service_network.leg_segment(timing.leg_segment)?;
            let mut timing_builder = Element::builder(schema::TIMING_LEG)
                .attr(
                    schema::ATTR_LEG_SEGMENT_REF,
                    persisted_id(
                        EntityKind::ServiceLegSegment,
                        &segment.source_id,
                        segment.id.0,
                        diagnostics,
                    ),
                )
                .attr(schema::ATTR_DURATION, format_hms(timing.duration));
            if timing.dwell_time != default_dwell {
                timing_builder =
                    timing_builder.attr(schema::ATTR_DWELL_TIME, format_hms(timing.dwell_time));
            }
            timings_element = timings_element.append(timing_builder.build());
        }
        schedule_builder = schedule_builder.append(timings_element.build());
    }

    let mut builder = Element::builder(schema::TRIP).attr(schema::ATTR_ID, trip_id);
    if let Some(external_id) = &trip.external_id {
        builder = builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }
    Ok(builder.append(schedule_builder.build()).build())
}
