use std::collections::HashMap;

use super::{
    physical::{LinkSegmentId, ModeId, NetworkLayerId, NodeId, PhysicalNetwork},
    service::{ServiceLayerId, ServiceLegSegmentId, ServiceNodeId},
    EntityKind, ModelError,
};

/// per-session mapping from `(entity kind, document id)` to the resolved
/// integer handle.
///
/// built once from the already-loaded physical network, extended
/// incrementally while the service network parses so that routed
/// services parsing can resolve the leg segments created earlier in the
/// same session, and discarded with the session. resolution is
/// case-sensitive and exact; an unresolved reference is surfaced as
/// `None`, never defaulted.
#[derive(Debug, Default)]
pub struct IdIndex {
    entries: HashMap<(EntityKind, String), usize>,
}

impl IdIndex {
    pub fn new() -> IdIndex {
        IdIndex {
            entries: HashMap::new(),
        }
    }

    /// snapshot of the physical entities referenced by service network
    /// documents: modes, layers, nodes and directed link segments. the
    /// network itself is left untouched.
    pub fn for_physical_network(network: &PhysicalNetwork) -> Result<IdIndex, ModelError> {
        let mut index = IdIndex::new();
        for mode in network.modes() {
            index.register(EntityKind::Mode, &mode.source_id, mode.id.0)?;
        }
        for layer in network.layers() {
            index.register(EntityKind::NetworkLayer, &layer.source_id, layer.id.0)?;
        }
        for node in network.nodes() {
            index.register(EntityKind::Node, &node.source_id, node.id.0)?;
        }
        for link_segment in network.link_segments() {
            index.register(
                EntityKind::LinkSegment,
                &link_segment.source_id,
                link_segment.id.0,
            )?;
        }
        Ok(index)
    }

    pub fn register(
        &mut self,
        kind: EntityKind,
        source_id: &str,
        handle: usize,
    ) -> Result<(), ModelError> {
        let previous = self.entries.insert((kind, source_id.to_string()), handle);
        if previous.is_some() {
            return Err(ModelError::DuplicateSourceId {
                kind,
                source_id: source_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn resolve(&self, kind: EntityKind, source_id: &str) -> Option<usize> {
        self.entries.get(&(kind, source_id.to_string())).copied()
    }

    pub fn resolve_mode(&self, source_id: &str) -> Option<ModeId> {
        self.resolve(EntityKind::Mode, source_id).map(ModeId)
    }

    pub fn resolve_network_layer(&self, source_id: &str) -> Option<NetworkLayerId> {
        self.resolve(EntityKind::NetworkLayer, source_id)
            .map(NetworkLayerId)
    }

    pub fn resolve_node(&self, source_id: &str) -> Option<NodeId> {
        self.resolve(EntityKind::Node, source_id).map(NodeId)
    }

    pub fn resolve_link_segment(&self, source_id: &str) -> Option<LinkSegmentId> {
        self.resolve(EntityKind::LinkSegment, source_id)
            .map(LinkSegmentId)
    }

    pub fn resolve_service_layer(&self, source_id: &str) -> Option<ServiceLayerId> {
        self.resolve(EntityKind::ServiceNetworkLayer, source_id)
            .map(ServiceLayerId)
    }

    pub fn resolve_service_node(&self, source_id: &str) -> Option<ServiceNodeId> {
        self.resolve(EntityKind::ServiceNode, source_id)
            .map(ServiceNodeId)
    }

    pub fn resolve_leg_segment(&self, source_id: &str) -> Option<ServiceLegSegmentId> {
        self.resolve(EntityKind::ServiceLegSegment, source_id)
            .map(ServiceLegSegmentId)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
