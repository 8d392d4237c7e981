use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// enumerates the entity types addressable through the identifier index
/// and reported on by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Mode,
    NetworkLayer,
    Node,
    LinkSegment,
    ServiceNetwork,
    ServiceNetworkLayer,
    ServiceNode,
    ServiceLeg,
    ServiceLegSegment,
    RoutedServices,
    RoutedServicesLayer,
    RoutedService,
    RoutedTrip,
    RoutedTripDeparture,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Mode => "mode",
            EntityKind::NetworkLayer => "network layer",
            EntityKind::Node => "node",
            EntityKind::LinkSegment => "link segment",
            EntityKind::ServiceNetwork => "service network",
            EntityKind::ServiceNetworkLayer => "service network layer",
            EntityKind::ServiceNode => "service node",
            EntityKind::ServiceLeg => "service leg",
            EntityKind::ServiceLegSegment => "service leg segment",
            EntityKind::RoutedServices => "routed services",
            EntityKind::RoutedServicesLayer => "routed services layer",
            EntityKind::RoutedService => "routed service",
            EntityKind::RoutedTrip => "routed trip",
            EntityKind::RoutedTripDeparture => "routed trip departure",
        };
        write!(f, "{}", name)
    }
}
