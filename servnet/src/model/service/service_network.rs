use itertools::Itertools;

use crate::model::{
    physical::{LinkSegmentId, ModeId, NetworkLayerId, NodeId, PhysicalNetwork},
    EntityKind, ModelError,
};

use super::{
    LegDirection, ServiceLayerId, ServiceLeg, ServiceLegId, ServiceLegSegment,
    ServiceLegSegmentId, ServiceNetworkLayer, ServiceNode, ServiceNodeId,
};

/// the service network graph: service nodes, legs and directional leg
/// segments layered over a physical network.
///
/// entities live in network-wide arenas addressed by stable integer
/// handles; each belongs to exactly one layer, which tracks membership.
/// creation goes through the `add_*` builders below so that handles stay
/// dense and layer membership stays consistent; entities are destroyed
/// only by dropping the whole graph.
#[derive(Debug, Clone)]
pub struct ServiceNetwork {
    pub source_id: String,
    pub external_id: Option<String>,
    /// document id of the physical network this graph is layered over.
    pub parent_network: String,
    nodes: Vec<ServiceNode>,
    legs: Vec<ServiceLeg>,
    leg_segments: Vec<ServiceLegSegment>,
    layers: Vec<ServiceNetworkLayer>,
}

impl ServiceNetwork {
    pub fn new(source_id: &str, external_id: Option<&str>, parent_network: &str) -> ServiceNetwork {
        ServiceNetwork {
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            parent_network: parent_network.to_string(),
            nodes: vec![],
            legs: vec![],
            leg_segments: vec![],
            layers: vec![],
        }
    }

    pub fn add_layer(
        &mut self,
        source_id: &str,
        external_id: Option<&str>,
        parent_layer: NetworkLayerId,
        supported_modes: Vec<ModeId>,
    ) -> ServiceLayerId {
        let id = ServiceLayerId(self.layers.len());
        self.layers.push(ServiceNetworkLayer {
            id,
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            parent_layer,
            supported_modes,
            nodes: vec![],
            legs: vec![],
            leg_segments: vec![],
        });
        id
    }

    pub fn add_node(
        &mut self,
        layer: ServiceLayerId,
        source_id: &str,
        external_id: Option<&str>,
        physical_node: NodeId,
    ) -> Result<ServiceNodeId, ModelError> {
        let id = ServiceNodeId(self.nodes.len());
        let layer = self.layer_mut(layer)?;
        layer.nodes.push(id);
        self.nodes.push(ServiceNode {
            id,
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            physical_node,
        });
        Ok(id)
    }

    pub fn add_leg(
        &mut self,
        layer: ServiceLayerId,
        source_id: &str,
        external_id: Option<&str>,
        node_a: ServiceNodeId,
        node_b: ServiceNodeId,
    ) -> Result<ServiceLegId, ModelError> {
        let id = ServiceLegId(self.legs.len());
        let layer = self.layer_mut(layer)?;
        layer.legs.push(id);
        self.legs.push(ServiceLeg {
            id,
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            node_a,
            node_b,
            segments: [None, None],
        });
        Ok(id)
    }

    /// attaches a directional segment to `leg`. fails when the leg
    /// already carries a segment for that direction.
    pub fn add_leg_segment(
        &mut self,
        layer: ServiceLayerId,
        source_id: &str,
        external_id: Option<&str>,
        leg: ServiceLegId,
        direction: LegDirection,
        link_segments: Vec<LinkSegmentId>,
    ) -> Result<ServiceLegSegmentId, ModelError> {
        let id = ServiceLegSegmentId(self.leg_segments.len());
        let leg_entry = self
            .legs
            .get_mut(leg.0)
            .ok_or(ModelError::UnknownHandle {
                kind: EntityKind::ServiceLeg,
                index: leg.0,
            })?;
        if leg_entry.segments[direction.index()].is_some() {
            return Err(ModelError::DuplicateLegDirection {
                leg: leg_entry.source_id.clone(),
                direction,
            });
        }
        leg_entry.segments[direction.index()] = Some(id);
        let layer = self.layer_mut(layer)?;
        layer.leg_segments.push(id);
        self.leg_segments.push(ServiceLegSegment {
            id,
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            leg,
            direction,
            link_segments,
        });
        Ok(id)
    }

    /// structural validation run once all segments of a leg are attached:
    /// distinct endpoints, every segment attached to this leg, non-empty
    /// link segment chains, and chain contiguity within the physical
    /// network. a failure here means the source data violated the
    /// one-segment-per-direction graph shape and the enclosing layer
    /// cannot be trusted.
    pub fn validate_leg(
        &self,
        leg: ServiceLegId,
        physical: &PhysicalNetwork,
    ) -> Result<(), ModelError> {
        let leg = self.leg(leg)?;
        if leg.node_a == leg.node_b {
            let node = self.node(leg.node_a)?;
            return Err(ModelError::LegEndpointsNotDistinct {
                leg: leg.source_id.clone(),
                node: node.source_id.clone(),
            });
        }
        for segment_id in leg.segments() {
            let segment = self.leg_segment(segment_id)?;
            if segment.leg != leg.id {
                return Err(ModelError::SegmentLegMismatch {
                    segment: segment.source_id.clone(),
                    leg: leg.source_id.clone(),
                });
            }
            if segment.link_segments.is_empty() {
                return Err(ModelError::EmptyLegSegmentPath {
                    segment: segment.source_id.clone(),
                });
            }
            for (prev, next) in segment.link_segments.iter().tuple_windows() {
                let prev = physical.link_segment(*prev)?;
                let next = physical.link_segment(*next)?;
                if prev.downstream != next.upstream {
                    return Err(ModelError::DiscontiguousLegSegmentPath {
                        segment: segment.source_id.clone(),
                        at: next.source_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn node(&self, id: ServiceNodeId) -> Result<&ServiceNode, ModelError> {
        self.nodes.get(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::ServiceNode,
            index: id.0,
        })
    }

    pub fn leg(&self, id: ServiceLegId) -> Result<&ServiceLeg, ModelError> {
        self.legs.get(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::ServiceLeg,
            index: id.0,
        })
    }

    pub fn leg_segment(&self, id: ServiceLegSegmentId) -> Result<&ServiceLegSegment, ModelError> {
        self.leg_segments
            .get(id.0)
            .ok_or(ModelError::UnknownHandle {
                kind: EntityKind::ServiceLegSegment,
                index: id.0,
            })
    }

    pub fn layer(&self, id: ServiceLayerId) -> Result<&ServiceNetworkLayer, ModelError> {
        self.layers.get(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::ServiceNetworkLayer,
            index: id.0,
        })
    }

    fn layer_mut(&mut self, id: ServiceLayerId) -> Result<&mut ServiceNetworkLayer, ModelError> {
        self.layers.get_mut(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::ServiceNetworkLayer,
            index: id.0,
        })
    }

    pub fn layers(&self) -> &[ServiceNetworkLayer] {
        &self.layers
    }

    pub fn nodes(&self) -> &[ServiceNode] {
        &self.nodes
    }

    pub fn leg_segments(&self) -> &[ServiceLegSegment] {
        &self.leg_segments
    }
}
