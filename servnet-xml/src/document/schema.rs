//! element and attribute names of the service network and routed
//! services schema family.

// service network document
pub const SERVICE_NETWORK: &str = "servicenetwork";
pub const SERVICE_NETWORK_LAYER: &str = "servicenetworklayer";
pub const SERVICE_NODES: &str = "servicenodes";
pub const SERVICE_NODE: &str = "servicenode";
pub const SERVICE_LEGS: &str = "servicelegs";
pub const LEG: &str = "leg";
pub const LEG_SEGMENT: &str = "legsegment";

// routed services document
pub const ROUTED_SERVICES: &str = "routedservices";
pub const SERVICE_LAYERS: &str = "servicelayers";
pub const SERVICE_LAYER: &str = "servicelayer";
pub const SERVICES: &str = "services";
pub const SERVICE: &str = "service";
pub const TRIPS: &str = "trips";
pub const TRIP: &str = "trip";
pub const FREQUENCY: &str = "frequency";
pub const SCHEDULE: &str = "schedule";
pub const DEPARTURES: &str = "departures";
pub const DEPARTURE: &str = "departure";
pub const RELATIVE_TIMINGS: &str = "reltimings";
pub const TIMING_LEG: &str = "leg";

// shared attributes
pub const ATTR_ID: &str = "id";
pub const ATTR_EXTERNAL_ID: &str = "externalid";

// service network attributes
pub const ATTR_PARENT_NETWORK: &str = "parentnetwork";
pub const ATTR_PARENT_LAYER: &str = "parentlayer";
pub const ATTR_NODE_REF: &str = "noderef";
pub const ATTR_NODE_A_REF: &str = "nodearef";
pub const ATTR_NODE_B_REF: &str = "nodebref";
pub const ATTR_DIRECTION: &str = "direction";
pub const ATTR_LINK_SEGMENT_REFS: &str = "linksegmentrefs";
pub const DIRECTION_A_TO_B: &str = "a_to_b";
pub const DIRECTION_B_TO_A: &str = "b_to_a";

// routed services attributes
pub const ATTR_PARENT_SERVICE_NETWORK: &str = "parentservicenetwork";
pub const ATTR_SERVICE_LAYER_REF: &str = "servicelayerref";
pub const ATTR_MODE_REF: &str = "moderef";
pub const ATTR_NAME: &str = "name";
pub const ATTR_NAME_DESCRIPTION: &str = "namedescription";
pub const ATTR_SERVICE_DESCRIPTION: &str = "servicedescription";
pub const ATTR_LEG_SEGMENT_REFS: &str = "legsegmentrefs";
pub const ATTR_LEG_SEGMENT_REF: &str = "legsegmentref";
pub const ATTR_TIME_UNIT: &str = "timeunit";
pub const ATTR_TIME: &str = "time";
pub const ATTR_DURATION: &str = "duration";
pub const ATTR_DWELL_TIME: &str = "dwelltime";
