use minidom::Element;

use servnet::diagnostic::Diagnostics;
use servnet::model::physical::PhysicalNetwork;
use servnet::model::service::{LegDirection, ServiceLayerId, ServiceNetwork};
use servnet::model::{EntityKind, IdIndex};

use crate::document::{schema, split_refs, ElementExt};

use super::ServiceNetworkIoError;

/// builds the service network graph from a parsed document tree.
///
/// the identifier index must already hold the physical network snapshot
/// (see [`IdIndex::for_physical_network`]); every entity created here is
/// registered into it so that routed services parsing can resolve the
/// leg segments later in the same session.
pub fn read_service_network(
    root: &Element,
    physical: &PhysicalNetwork,
    index: &mut IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<ServiceNetwork, ServiceNetworkIoError> {
    if root.name() != schema::SERVICE_NETWORK {
        return Err(ServiceNetworkIoError::UnexpectedRoot {
            expected: schema::SERVICE_NETWORK.to_string(),
            found: root.name().to_string(),
        });
    }
    let source_id = root.try_attribute(schema::ATTR_ID)?;
    let external_id = root.attribute(schema::ATTR_EXTERNAL_ID);
    let parent_reference = root.try_attribute(schema::ATTR_PARENT_NETWORK)?;
    if parent_reference != physical.source_id {
        return Err(ServiceNetworkIoError::ParentNetworkMismatch {
            network: source_id,
            reference: parent_reference,
            loaded: physical.source_id.clone(),
        });
    }

    let mut network = ServiceNetwork::new(&source_id, external_id.as_deref(), &parent_reference);
    for layer_element in root.children_named(schema::SERVICE_NETWORK_LAYER) {
        read_layer(layer_element, physical, &mut network, index, diagnostics)?;
    }
    Ok(network)
}

fn read_layer(
    element: &Element,
    physical: &PhysicalNetwork,
    network: &mut ServiceNetwork,
    index: &mut IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<(), ServiceNetworkIoError> {
    let source_id = element.try_attribute(schema::ATTR_ID)?;
    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let parent_reference = element
        .non_blank_attribute(schema::ATTR_PARENT_LAYER)
        .ok_or_else(|| ServiceNetworkIoError::UnknownParentLayer {
            layer: source_id.clone(),
            reference: String::new(),
        })?;
    let parent_layer = index.resolve_network_layer(&parent_reference).ok_or_else(|| {
        ServiceNetworkIoError::UnknownParentLayer {
            layer: source_id.clone(),
            reference: parent_reference.clone(),
        }
    })?;
    // the layer supports what its physical parent supports
    let supported_modes = physical.layer(parent_layer)?.supported_modes.clone();

    let layer = network.add_layer(
        &source_id,
        external_id.as_deref(),
        parent_layer,
        supported_modes,
    );
    index.register(EntityKind::ServiceNetworkLayer, &source_id, layer.0)?;

    if let Some(nodes_element) = element.only_child(schema::SERVICE_NODES) {
        for node_element in nodes_element.children_named(schema::SERVICE_NODE) {
            read_service_node(node_element, layer, network, index, diagnostics)?;
        }
    }
    if let Some(legs_element) = element.only_child(schema::SERVICE_LEGS) {
        for leg_element in legs_element.children_named(schema::LEG) {
            read_leg(
                leg_element,
                layer,
                &source_id,
                physical,
                network,
                index,
                diagnostics,
            )?;
        }
    }
    Ok(())
}

/// a single service node failing to resolve is tolerable: leg
/// construction over the missing node fails gracefully later.
fn read_service_node(
    element: &Element,
    layer: ServiceLayerId,
    network: &mut ServiceNetwork,
    index: &mut IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<(), ServiceNetworkIoError> {
    let Some(source_id) = element.non_blank_attribute(schema::ATTR_ID) else {
        diagnostics.warn(
            EntityKind::ServiceNode,
            "",
            "service node without id skipped",
        );
        return Ok(());
    };
    let Some(node_reference) = element.non_blank_attribute(schema::ATTR_NODE_REF) else {
        diagnostics.warn(
            EntityKind::ServiceNode,
            source_id,
            "service node without physical node reference skipped",
        );
        return Ok(());
    };
    let Some(physical_node) = index.resolve_node(&node_reference) else {
        diagnostics.warn(
            EntityKind::ServiceNode,
            source_id,
            format!("unknown physical node '{}', service node skipped", node_reference),
        );
        return Ok(());
    };
    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let id = network.add_node(layer, &source_id, external_id.as_deref(), physical_node)?;
    index.register(EntityKind::ServiceNode, &source_id, id.0)?;
    Ok(())
}

fn read_leg(
    element: &Element,
    layer: ServiceLayerId,
    layer_source_id: &str,
    physical: &PhysicalNetwork,
    network: &mut ServiceNetwork,
    index: &mut IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<(), ServiceNetworkIoError> {
    let Some(source_id) = element.non_blank_attribute(schema::ATTR_ID) else {
        diagnostics.warn(EntityKind::ServiceLeg, "", "service leg without id skipped");
        return Ok(());
    };
    let node_a = element.non_blank_attribute(schema::ATTR_NODE_A_REF);
    let node_b = element.non_blank_attribute(schema::ATTR_NODE_B_REF);
    let (Some(node_a_reference), Some(node_b_reference)) = (node_a, node_b) else {
        diagnostics.warn(
            EntityKind::ServiceLeg,
            source_id,
            "service leg with missing endpoint reference skipped",
        );
        return Ok(());
    };
    let node_a = index.resolve_service_node(&node_a_reference);
    let node_b = index.resolve_service_node(&node_b_reference);
    let (Some(node_a), Some(node_b)) = (node_a, node_b) else {
        diagnostics.warn(
            EntityKind::ServiceLeg,
            source_id,
            format!(
                "service leg endpoints '{}','{}' not both known, leg skipped",
                node_a_reference, node_b_reference
            ),
        );
        return Ok(());
    };

    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let leg = network.add_leg(layer, &source_id, external_id.as_deref(), node_a, node_b)?;
    index.register(EntityKind::ServiceLeg, &source_id, leg.0)?;

    let segment_elements: Vec<&Element> = element.children_named(schema::LEG_SEGMENT).collect();
    // one segment per direction: a third declaration means the source
    // data is corrupt, not merely incomplete
    if segment_elements.len() > 2 {
        return Err(ServiceNetworkIoError::TooManyLegSegments {
            leg: source_id,
            layer: layer_source_id.to_string(),
        });
    }
    for segment_element in segment_elements {
        read_leg_segment(segment_element, layer, layer_source_id, leg, network, index, diagnostics)?;
    }

    network
        .validate_leg(leg, physical)
        .map_err(|source| ServiceNetworkIoError::InvalidLeg {
            layer: layer_source_id.to_string(),
            source,
        })?;
    Ok(())
}

fn read_leg_segment(
    element: &Element,
    layer: ServiceLayerId,
    layer_source_id: &str,
    leg: servnet::model::service::ServiceLegId,
    network: &mut ServiceNetwork,
    index: &mut IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<(), ServiceNetworkIoError> {
    let Some(source_id) = element.non_blank_attribute(schema::ATTR_ID) else {
        diagnostics.warn(
            EntityKind::ServiceLegSegment,
            "",
            "leg segment without id skipped",
        );
        return Ok(());
    };
    let direction = match element
        .non_blank_attribute(schema::ATTR_DIRECTION)
        .as_deref()
    {
        Some(schema::DIRECTION_A_TO_B) => LegDirection::AToB,
        Some(schema::DIRECTION_B_TO_A) => LegDirection::BToA,
        other => {
            diagnostics.warn(
                EntityKind::ServiceLegSegment,
                source_id,
                format!("missing or unrecognized direction '{}'", other.unwrap_or("")),
            );
            return Ok(());
        }
    };
    let Some(reference_list) = element.non_blank_attribute(schema::ATTR_LINK_SEGMENT_REFS) else {
        diagnostics.warn(
            EntityKind::ServiceLegSegment,
            source_id,
            "blank link segment reference list, leg segment skipped",
        );
        return Ok(());
    };
    // each entry resolves independently; one failure rejects the list
    let mut link_segments = Vec::new();
    for reference in split_refs(&reference_list) {
        match index.resolve_link_segment(&reference) {
            Some(link_segment) => link_segments.push(link_segment),
            None => {
                diagnostics.warn(
                    EntityKind::ServiceLegSegment,
                    source_id,
                    format!("unknown link segment '{}', leg segment skipped", reference),
                );
                return Ok(());
            }
        }
    }

    let external_id = element.attribute(schema::ATTR_EXTERNAL_ID);
    let id = network
        .add_leg_segment(
            layer,
            &source_id,
            external_id.as_deref(),
            leg,
            direction,
            link_segments,
        )
        .map_err(|source| ServiceNetworkIoError::InvalidLeg {
            layer: layer_source_id.to_string(),
            source,
        })?;
    index.register(EntityKind::ServiceLegSegment, &source_id, id.0)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn physical_fixture() -> PhysicalNetwork {
        let mut physical = PhysicalNetwork::new("net1");
        let bus = physical.add_mode("bus", "bus");
        let layer = physical.add_layer("nl1", vec![bus]);
        let n1 = physical.add_node(layer, "n1").unwrap();
        let n2 = physical.add_node(layer, "n2").unwrap();
        let n3 = physical.add_node(layer, "n3").unwrap();
        physical.add_link_segment(layer, "lsp1", n1, n2).unwrap();
        physical.add_link_segment(layer, "lsp2", n2, n1).unwrap();
        physical.add_link_segment(layer, "lsp3", n2, n3).unwrap();
        physical
    }

    fn parse(
        xml: &str,
        physical: &PhysicalNetwork,
    ) -> (
        Result<ServiceNetwork, ServiceNetworkIoError>,
        IdIndex,
        Diagnostics,
    ) {
        let root: Element = xml.parse().expect("fixture parses");
        let mut index = IdIndex::for_physical_network(physical).unwrap();
        let mut diagnostics = Diagnostics::new();
        let result = read_service_network(&root, physical, &mut index, &mut diagnostics);
        (result, index, diagnostics)
    }

    const VALID: &str = r#"<servicenetwork id="sn1" parentnetwork="net1">
        <servicenetworklayer id="snl1" parentlayer="nl1">
            <servicenodes>
                <servicenode id="s1" noderef="n1"/>
                <servicenode id="s2" noderef="n2"/>
            </servicenodes>
            <servicelegs>
                <leg id="l1" nodearef="s1" nodebref="s2">
                    <legsegment id="ls1" direction="a_to_b" linksegmentrefs="lsp1"/>
                    <legsegment id="ls2" direction="b_to_a" linksegmentrefs="lsp2"/>
                </leg>
            </servicelegs>
        </servicenetworklayer>
    </servicenetwork>"#;

    #[test]
    fn test_valid_network_parses_and_registers() {
        let physical = physical_fixture();
        let (result, index, diagnostics) = parse(VALID, &physical);
        let network = result.expect("parse succeeds");
        assert!(diagnostics.is_empty());

        let layer = &network.layers()[0];
        assert_eq!(layer.nodes().len(), 2);
        assert_eq!(layer.legs().len(), 1);
        assert_eq!(layer.leg_segments().len(), 2);

        // leg direction invariant
        let leg = network.leg(layer.legs()[0]).unwrap();
        assert!(leg.segment(LegDirection::AToB).is_some());
        assert!(leg.segment(LegDirection::BToA).is_some());
        assert_eq!(leg.number_of_segments(), 2);

        // created entities resolve through the session index
        assert!(index.resolve_service_node("s1").is_some());
        assert!(index.resolve_leg_segment("ls2").is_some());

        // referential integrity: every physical link segment resolves
        for segment in network.leg_segments() {
            assert!(!segment.link_segments.is_empty());
            for link_segment in &segment.link_segments {
                assert!(physical.link_segment(*link_segment).is_ok());
            }
        }
    }

    #[test]
    fn test_unknown_parent_network_is_fatal() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="other"/>"#;
        let (result, _, _) = parse(xml, &physical);
        assert!(matches!(
            result,
            Err(ServiceNetworkIoError::ParentNetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_parent_layer_is_fatal() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="net1">
            <servicenetworklayer id="snl1" parentlayer="nl9"/>
        </servicenetwork>"#;
        let (result, _, _) = parse(xml, &physical);
        assert!(matches!(
            result,
            Err(ServiceNetworkIoError::UnknownParentLayer { .. })
        ));
    }

    #[test]
    fn test_unknown_physical_node_skips_service_node() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="net1">
            <servicenetworklayer id="snl1" parentlayer="nl1">
                <servicenodes>
                    <servicenode id="s1" noderef="n9"/>
                    <servicenode id="s2" noderef="n2"/>
                </servicenodes>
            </servicenetworklayer>
        </servicenetwork>"#;
        let (result, index, diagnostics) = parse(xml, &physical);
        let network = result.expect("parse continues past the bad node");
        assert_eq!(network.layers()[0].nodes().len(), 1);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert!(index.resolve_service_node("s1").is_none());
    }

    #[test]
    fn test_leg_with_unknown_endpoint_is_skipped() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="net1">
            <servicenetworklayer id="snl1" parentlayer="nl1">
                <servicenodes>
                    <servicenode id="s1" noderef="n1"/>
                </servicenodes>
                <servicelegs>
                    <leg id="l1" nodearef="s1" nodebref="s9"/>
                </servicelegs>
            </servicenetworklayer>
        </servicenetwork>"#;
        let (result, _, diagnostics) = parse(xml, &physical);
        let network = result.expect("parse continues past the bad leg");
        assert!(network.layers()[0].legs().is_empty());
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_three_leg_segments_fail_the_layer_parse() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="net1">
            <servicenetworklayer id="snl1" parentlayer="nl1">
                <servicenodes>
                    <servicenode id="s1" noderef="n1"/>
                    <servicenode id="s2" noderef="n2"/>
                </servicenodes>
                <servicelegs>
                    <leg id="l1" nodearef="s1" nodebref="s2">
                        <legsegment id="ls1" direction="a_to_b" linksegmentrefs="lsp1"/>
                        <legsegment id="ls2" direction="b_to_a" linksegmentrefs="lsp2"/>
                        <legsegment id="ls3" direction="a_to_b" linksegmentrefs="lsp1"/>
                    </leg>
                </servicelegs>
            </servicenetworklayer>
        </servicenetwork>"#;
        let (result, _, _) = parse(xml, &physical);
        assert!(matches!(
            result,
            Err(ServiceNetworkIoError::TooManyLegSegments { .. })
        ));
    }

    #[test]
    fn test_duplicate_direction_fails_the_layer_parse() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="net1">
            <servicenetworklayer id="snl1" parentlayer="nl1">
                <servicenodes>
                    <servicenode id="s1" noderef="n1"/>
                    <servicenode id="s2" noderef="n2"/>
                </servicenodes>
                <servicelegs>
                    <leg id="l1" nodearef="s1" nodebref="s2">
                        <legsegment id="ls1" direction="a_to_b" linksegmentrefs="lsp1"/>
                        <legsegment id="ls2" direction="a_to_b" linksegmentrefs="lsp1"/>
                    </leg>
                </servicelegs>
            </servicenetworklayer>
        </servicenetwork>"#;
        let (result, _, _) = parse(xml, &physical);
        assert!(matches!(result, Err(ServiceNetworkIoError::InvalidLeg { .. })));
    }

    #[test]
    fn test_unresolved_link_segment_skips_the_segment_only() {
        let physical = physical_fixture();
        let xml = r#"<servicenetwork id="sn1" parentnetwork="net1">
            <servicenetworklayer id="snl1" parentlayer="nl1">
                <servicenodes>
                    <servicenode id="s1" noderef="n1"/>
                    <servicenode id="s2" noderef="n2"/>
                </servicenodes>
                <servicelegs>
                    <leg id="l1" nodearef="s1" nodebref="s2">
                        <legsegment id="ls1" direction="a_to_b" linksegmentrefs="lsp1,lsp9"/>
                        <legsegment id="ls2" direction="b_to_a" linksegmentrefs="lsp2"/>
                    </leg>
                </servicelegs>
            </servicenetworklayer>
        </servicenetwork>"#;
        let (result, _, diagnostics) = parse(xml, &physical);
        let network = result.expect("parse continues past the bad segment");
        let leg = network.leg(network.layers()[0].legs()[0]).unwrap();
        assert!(leg.segment(LegDirection::AToB).is_none());
        assert!(leg.segment(LegDirection::BToA).is_some());
        assert_eq!(diagnostics.warnings().count(), 1);
    }
}
