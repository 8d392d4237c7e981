mod leg_direction;
mod leg_segment;
mod service_layer;
mod service_leg;
mod service_network;
mod service_node;

pub use leg_direction::LegDirection;
pub use leg_segment::{ServiceLegSegment, ServiceLegSegmentId};
pub use service_layer::{ServiceLayerId, ServiceNetworkLayer};
pub use service_leg::{ServiceLeg, ServiceLegId};
pub use service_network::ServiceNetwork;
pub use service_node::{ServiceNode, ServiceNodeId};
