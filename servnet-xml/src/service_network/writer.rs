use std::collections::HashMap;

use minidom::Element;

use servnet::diagnostic::Diagnostics;
use servnet::model::physical::PhysicalNetwork;
use servnet::model::service::{
    LegDirection, ServiceNetwork, ServiceNetworkLayer, ServiceNodeId,
};
use servnet::model::EntityKind;

use crate::document::schema;
use crate::id_policy::persisted_id;

use super::ServiceNetworkIoError;

/// emits the service network graph as a document tree mirroring the
/// input format. entities are written sorted by their persisted
/// identifier, so emitting an unchanged graph twice yields an identical
/// tree.
pub fn write_service_network(
    network: &ServiceNetwork,
    physical: &PhysicalNetwork,
    diagnostics: &mut Diagnostics,
) -> Result<Element, ServiceNetworkIoError> {
    let mut root = Element::builder(schema::SERVICE_NETWORK)
        .attr(
            schema::ATTR_ID,
            persisted_id(EntityKind::ServiceNetwork, &network.source_id, 0, diagnostics),
        )
        .attr(schema::ATTR_PARENT_NETWORK, network.parent_network.clone());
    if let Some(external_id) = &network.external_id {
        root = root.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }

    let mut layers: Vec<(String, &ServiceNetworkLayer)> = network
        .layers()
        .iter()
        .map(|layer| {
            (
                persisted_id(
                    EntityKind::ServiceNetworkLayer,
                    &layer.source_id,
                    layer.id.0,
                    diagnostics,
                ),
                layer,
            )
        })
        .collect();
    layers.sort_by(|a, b| a.0.cmp(&b.0));
    for (layer_id, layer) in layers {
        root = root.append(write_layer(layer_id, layer, network, physical, diagnostics)?);
    }
    Ok(root.build())
}

fn write_layer(
    layer_id: String,
    layer: &ServiceNetworkLayer,
    network: &ServiceNetwork,
    physical: &PhysicalNetwork,
    diagnostics: &mut Diagnostics,
) -> Result<Element, ServiceNetworkIoError> {
    let parent_layer = physical.layer(layer.parent_layer)?;
    let mut builder = Element::builder(schema::SERVICE_NETWORK_LAYER)
        .attr(schema::ATTR_ID, layer_id)
        .attr(schema::ATTR_PARENT_LAYER, parent_layer.source_id.clone());
    if let Some(external_id) = &layer.external_id {
        builder = builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
    }

    // persisted node ids double as the leg endpoint references below,
    // so assign them once
    let mut node_ids: HashMap<ServiceNodeId, String> = HashMap::new();
    let mut nodes = Vec::new();
    for node_handle in layer.nodes() {
        let node = network.node(*node_handle)?;
        let id = persisted_id(EntityKind::ServiceNode, &node.source_id, node.id.0, diagnostics);
        node_ids.insert(node.id, id.clone());
        nodes.push((id, node));
    }
    nodes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut nodes_element = Element::builder(schema::SERVICE_NODES);
    for (id, node) in nodes {
        let physical_node = physical.node(node.physical_node)?;
        let mut node_builder = Element::builder(schema::SERVICE_NODE)
            .attr(schema::ATTR_ID, id)
            .attr(schema::ATTR_NODE_REF, physical_node.source_id.clone());
        if let Some(external_id) = &node.external_id {
            node_builder = node_builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
        }
        nodes_element = nodes_element.append(node_builder.build());
    }
    builder = builder.append(nodes_element.build());

    let mut legs = Vec::new();
    for leg_handle in layer.legs() {
        let leg = network.leg(*leg_handle)?;
        let id = persisted_id(EntityKind::ServiceLeg, &leg.source_id, leg.id.0, diagnostics);
        legs.push((id, leg));
    }
    legs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut legs_element = Element::builder(schema::SERVICE_LEGS);
    for (id, leg) in legs {
        let node_a = node_ids
            .get(&leg.node_a)
            .cloned()
            .unwrap_or_else(|| leg.node_a.0.to_string());
        let node_b = node_ids
            .get(&leg.node_b)
            .cloned()
            .unwrap_or_else(|| leg.node_b.0.to_string());
        let mut leg_builder = Element::builder(schema::LEG)
            .attr(schema::ATTR_ID, id)
            .attr(schema::ATTR_NODE_A_REF, node_a)
            .attr(schema::ATTR_NODE_B_REF, node_b);
        if let Some(external_id) = &leg.external_id {
            leg_builder = leg_builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
        }
        // direction order is fixed, A->B first
        for direction in LegDirection::both() {
            if let Some(segment_handle) = leg.segment(direction) {
                let segment = network.leg_segment(segment_handle)?;
                let segment_id = persisted_id(
                    EntityKind::ServiceLegSegment,
                    &segment.source_id,
                    segment.id.0,
                    diagnostics,
                );
                let references: Vec<String> = segment
                    .link_segments
                    .iter()
                    .map(|link_segment| {
                        physical
                            .link_segment(*link_segment)
                            .map(|entry| entry.source_id.clone())
                    })
                    .collect::<Result<_, _>>()?;
                let mut segment_builder = Element::builder(schema::LEG_SEGMENT)
                    .attr(schema::ATTR_ID, segment_id)
                    .attr(schema::ATTR_DIRECTION, direction_value(direction))
                    .attr(schema::ATTR_LINK_SEGMENT_REFS, references.join(","));
                if let Some(external_id) = &segment.external_id {
                    segment_builder =
                        segment_builder.attr(schema::ATTR_EXTERNAL_ID, external_id.clone());
                }
                leg_builder = leg_builder.append(segment_builder.build());
            }
        }
        legs_element = legs_element.append(leg_builder.build());
    }
    builder = builder.append(legs_element.build());
    Ok(builder.build())
}

fn direction_value(direction: LegDirection) -> &'static str {
    match direction {
        LegDirection::AToB => schema::DIRECTION_A_TO_B,
        LegDirection::BToA => schema::DIRECTION_B_TO_A,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::service_network::read_service_network;
    use servnet::model::IdIndex;

    fn physical_fixture() -> PhysicalNetwork {
        let mut physical = PhysicalNetwork::new("net1");
        let bus = physical.add_mode("bus", "bus");
        let layer = physical.add_layer("nl1", vec![bus]);
        let n1 = physical.add_node(layer, "n1").unwrap();
        let n2 = physical.add_node(layer, "n2").unwrap();
        physical.add_link_segment(layer, "lsp1", n1, n2).unwrap();
        physical.add_link_segment(layer, "lsp2", n2, n1).unwrap();
        physical
    }

    fn network_fixture(physical: &PhysicalNetwork) -> ServiceNetwork {
        let mut network = ServiceNetwork::new("sn1", None, "net1");
        let layer = network.add_layer(
            "snl1",
            None,
            physical.layers()[0].id,
            physical.layers()[0].supported_modes.clone(),
        );
        // out of lexical order on purpose
        let s2 = network
            .add_node(layer, "s2", None, physical.nodes()[1].id)
            .unwrap();
        let s1 = network
            .add_node(layer, "s1", None, physical.nodes()[0].id)
            .unwrap();
        let leg = network.add_leg(layer, "l1", None, s1, s2).unwrap();
        network
            .add_leg_segment(
                layer,
                "ls1",
                None,
                leg,
                LegDirection::AToB,
                vec![physical.link_segments()[0].id],
            )
            .unwrap();
        network
            .add_leg_segment(
                layer,
                "ls2",
                None,
                leg,
                LegDirection::BToA,
                vec![physical.link_segments()[1].id],
            )
            .unwrap();
        network
    }

    #[test]
    fn test_emission_is_deterministic_and_sorted() {
        let physical = physical_fixture();
        let network = network_fixture(&physical);
        let mut diagnostics = Diagnostics::new();
        let first = write_service_network(&network, &physical, &mut diagnostics).unwrap();
        let second = write_service_network(&network, &physical, &mut diagnostics).unwrap();
        assert_eq!(first, second);

        // nodes come out sorted by persisted id despite insertion order
        let layer = first.children().next().expect("one layer");
        let nodes: Vec<String> = layer
            .children()
            .find(|child| child.name() == schema::SERVICE_NODES)
            .expect("nodes container")
            .children()
            .map(|node| node.attr(schema::ATTR_ID).unwrap_or_default().to_string())
            .collect();
        assert_eq!(nodes, vec!["s1", "s2"]);
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let physical = physical_fixture();
        let network = network_fixture(&physical);
        let mut diagnostics = Diagnostics::new();
        let emitted = write_service_network(&network, &physical, &mut diagnostics).unwrap();

        let mut index = IdIndex::for_physical_network(&physical).unwrap();
        let reparsed =
            read_service_network(&emitted, &physical, &mut index, &mut diagnostics).unwrap();
        let re_emitted = write_service_network(&reparsed, &physical, &mut diagnostics).unwrap();
        assert_eq!(emitted, re_emitted);
    }

    #[test]
    fn test_missing_ids_synthesize_with_diagnostic() {
        let physical = physical_fixture();
        let mut network = ServiceNetwork::new("sn1", None, "net1");
        let layer = network.add_layer(
            "snl1",
            None,
            physical.layers()[0].id,
            physical.layers()[0].supported_modes.clone(),
        );
        network
            .add_node(layer, "", None, physical.nodes()[0].id)
            .unwrap();

        let mut diagnostics = Diagnostics::new();
        let emitted = write_service_network(&network, &physical, &mut diagnostics).unwrap();
        let layer_element = emitted.children().next().expect("one layer");
        let node = layer_element
            .children()
            .find(|child| child.name() == schema::SERVICE_NODES)
            .expect("nodes container")
            .children()
            .next()
            .expect("one node");
        assert_eq!(node.attr(schema::ATTR_ID), Some("0"));
        assert_eq!(diagnostics.warnings().count(), 1);
    }
}
