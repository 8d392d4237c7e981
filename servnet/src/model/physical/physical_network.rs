use crate::model::{EntityKind, ModelError};

use super::{
    LinkSegment, LinkSegmentId, Mode, ModeId, NetworkLayer, NetworkLayerId, Node, NodeId,
};

/// read-only snapshot of the already-loaded physical road network. the
/// service network and routed services parsers resolve references into
/// this structure but never mutate it.
///
/// entities live in network-wide arenas addressed by their integer
/// handles; layers keep membership lists into those arenas.
#[derive(Debug, Clone, Default)]
pub struct PhysicalNetwork {
    pub source_id: String,
    modes: Vec<Mode>,
    nodes: Vec<Node>,
    link_segments: Vec<LinkSegment>,
    layers: Vec<NetworkLayer>,
}

impl PhysicalNetwork {
    pub fn new(source_id: &str) -> PhysicalNetwork {
        PhysicalNetwork {
            source_id: source_id.to_string(),
            ..Default::default()
        }
    }

    pub fn add_mode(&mut self, source_id: &str, name: &str) -> ModeId {
        let id = ModeId(self.modes.len());
        self.modes.push(Mode {
            id,
            source_id: source_id.to_string(),
            name: name.to_string(),
        });
        id
    }

    pub fn add_layer(&mut self, source_id: &str, supported_modes: Vec<ModeId>) -> NetworkLayerId {
        let id = NetworkLayerId(self.layers.len());
        self.layers.push(NetworkLayer {
            id,
            source_id: source_id.to_string(),
            supported_modes,
            nodes: vec![],
            link_segments: vec![],
        });
        id
    }

    pub fn add_node(&mut self, layer: NetworkLayerId, source_id: &str) -> Result<NodeId, ModelError> {
        let id = NodeId(self.nodes.len());
        let layer = self.layer_mut(layer)?;
        layer.nodes.push(id);
        self.nodes.push(Node {
            id,
            source_id: source_id.to_string(),
        });
        Ok(id)
    }

    pub fn add_link_segment(
        &mut self,
        layer: NetworkLayerId,
        source_id: &str,
        upstream: NodeId,
        downstream: NodeId,
    ) -> Result<LinkSegmentId, ModelError> {
        let id = LinkSegmentId(self.link_segments.len());
        let layer = self.layer_mut(layer)?;
        layer.link_segments.push(id);
        self.link_segments.push(LinkSegment {
            id,
            source_id: source_id.to_string(),
            upstream,
            downstream,
        });
        Ok(id)
    }

    pub fn mode(&self, id: ModeId) -> Result<&Mode, ModelError> {
        self.modes.get(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::Mode,
            index: id.0,
        })
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, ModelError> {
        self.nodes.get(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::Node,
            index: id.0,
        })
    }

    pub fn link_segment(&self, id: LinkSegmentId) -> Result<&LinkSegment, ModelError> {
        self.link_segments
            .get(id.0)
            .ok_or(ModelError::UnknownHandle {
                kind: EntityKind::LinkSegment,
                index: id.0,
            })
    }

    pub fn layer(&self, id: NetworkLayerId) -> Result<&NetworkLayer, ModelError> {
        self.layers.get(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::NetworkLayer,
            index: id.0,
        })
    }

    fn layer_mut(&mut self, id: NetworkLayerId) -> Result<&mut NetworkLayer, ModelError> {
        self.layers.get_mut(id.0).ok_or(ModelError::UnknownHandle {
            kind: EntityKind::NetworkLayer,
            index: id.0,
        })
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn link_segments(&self) -> &[LinkSegment] {
        &self.link_segments
    }

    pub fn layers(&self) -> &[NetworkLayer] {
        &self.layers
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_layer_membership_tracks_insertions() {
        let mut network = PhysicalNetwork::new("net1");
        let bus = network.add_mode("bus", "bus");
        let layer = network.add_layer("nl1", vec![bus]);
        let a = network.add_node(layer, "n1").expect("layer exists");
        let b = network.add_node(layer, "n2").expect("layer exists");
        let ls = network
            .add_link_segment(layer, "ls1", a, b)
            .expect("layer exists");

        let layer = network.layer(layer).expect("layer exists");
        assert_eq!(layer.nodes, vec![a, b]);
        assert_eq!(layer.link_segments, vec![ls]);
        assert!(layer.supports(bus));
        assert_eq!(network.link_segment(ls).expect("segment exists").upstream, a);
    }

    #[test]
    fn test_unknown_handle_is_an_error() {
        let network = PhysicalNetwork::new("net1");
        let result = network.node(NodeId(3));
        assert!(matches!(
            result,
            Err(ModelError::UnknownHandle {
                kind: EntityKind::Node,
                index: 3
            })
        ));
    }
}
