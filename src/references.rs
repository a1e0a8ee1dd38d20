// 🔗 Cross-Reference Resolver
//
// Which fields point at which type is declared once, as data. Resolution
// runs over the complete catalog, so load order never matters; it produces
// edges for reporting and anomalies for anything that doesn't resolve.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::anomalies::{Anomaly, AnomalyCategory, Severity};
use crate::catalog::Catalog;
use crate::object_types::ConfigType;

// ============================================================================
// REFERENCE SPECS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSpec {
    pub source: ConfigType,
    pub label: &'static str,
    pub path: &'static str,
    pub target: ConfigType,
}

const fn field_ref(
    source: ConfigType,
    label: &'static str,
    path: &'static str,
    target: ConfigType,
) -> ReferenceSpec {
    ReferenceSpec { source, label, path, target }
}

pub const CREDIT_RULE_LABEL: &str = "Credit Rule";

pub const REFERENCE_SPECS: &[ReferenceSpec] = &[
    field_ref(
        ConfigType::HolidayCreditRule,
        "Contributing Shift",
        "WSACreditCalculator.WSACreditCalculator.@ContributingShiftName",
        ConfigType::ContributingShiftRule,
    ),
    field_ref(
        ConfigType::HolidayCreditRule,
        "Alternate Rule",
        "WSAEligibilityDeterminer.WSAEligibilityDeterminer.@AlternateHolidayCreditRuleName",
        ConfigType::HolidayCreditRule,
    ),
    field_ref(
        ConfigType::HolidayCreditRule,
        "Credit Pay Code",
        "WSACreditCalculator.WSACreditCalculator.CreditPayCodeNames.SimpleValue",
        ConfigType::PayCode,
    ),
    field_ref(
        ConfigType::HolidayCreditRule,
        "OT Limit Pay Code",
        "@OvertimeLimitPayCodeName",
        ConfigType::PayCode,
    ),
    field_ref(
        ConfigType::HolidayCreditRule,
        "Day OT Limit Pay Code",
        "@DayOvertimeLimitPayCodeName",
        ConfigType::PayCode,
    ),
    field_ref(
        ConfigType::HolidayProfile,
        "Default Credit Rule",
        "HolidayProfileDataSet.APIHolidayProfileDataSet.DataMembers.APIHolidayProfileData.@DefaultCreditRuleName",
        ConfigType::HolidayCreditRule,
    ),
    field_ref(
        ConfigType::HolidayProfile,
        CREDIT_RULE_LABEL,
        "HolidayProfileDataSet.APIHolidayProfileDataSet.DataMembers.APIHolidayProfileData.Entries.APIHolidayProfileDataEntry.@CreditRuleName",
        ConfigType::HolidayCreditRule,
    ),
    field_ref(
        ConfigType::HolidayProfile,
        "Holiday",
        "HolidayProfileDataSet.APIHolidayProfileDataSet.DataMembers.APIHolidayProfileData.Entries.APIHolidayProfileDataEntry.@HolidayName",
        ConfigType::Holiday,
    ),
    field_ref(
        ConfigType::ContributingShiftRule,
        "Contributing Pay Code Rule",
        "@ContributingPayCodeRuleName",
        ConfigType::ContributingPayCodeRule,
    ),
    field_ref(
        ConfigType::ContributingPayCodeRule,
        "Pay Code",
        "PayCodeNames.SimpleValue",
        ConfigType::PayCode,
    ),
    field_ref(
        ConfigType::BalanceCascade,
        "Accrual Code",
        "@AccrualCode",
        ConfigType::AccrualCode,
    ),
    field_ref(
        ConfigType::BalanceCascade,
        "Date Pattern",
        "@DatePattern",
        ConfigType::DatePattern,
    ),
    field_ref(
        ConfigType::BalanceCascade,
        "Payout To Pay Code",
        "BalanceCascadeItems.WSABalanceCascadeItem.@PayoutToPayCode",
        ConfigType::PayCode,
    ),
    field_ref(
        ConfigType::BalanceCascade,
        "Transfer To Accrual",
        "BalanceCascadeItems.WSABalanceCascadeItem.@TransferToAccrualCode",
        ConfigType::AccrualCode,
    ),
    field_ref(
        ConfigType::BalanceCascadeGroup,
        "Cascade",
        "SelectedBalanceCascades.WSASelectedBalanceCascades.@Name",
        ConfigType::BalanceCascade,
    ),
    field_ref(
        ConfigType::Limit,
        "Date Pattern",
        "@DatePattern",
        ConfigType::DatePattern,
    ),
    field_ref(
        ConfigType::DatePattern,
        "Offset Date",
        "@OffsetDateName",
        ConfigType::CustomDate,
    ),
    field_ref(
        ConfigType::CustomDate,
        "Reference Custom Date",
        "@ReferenceCustomDate",
        ConfigType::CustomDate,
    ),
    field_ref(
        ConfigType::EmploymentTerm,
        "Holiday Profile",
        "Versions.EmploymentTermVersion.@HolidayProfile",
        ConfigType::HolidayProfile,
    ),
    field_ref(
        ConfigType::EmploymentTerm,
        "Accrual Profile",
        "Versions.EmploymentTermVersion.@AccrualProfile",
        ConfigType::AccrualProfile,
    ),
    field_ref(
        ConfigType::AccrualPolicy,
        "Accrual Code",
        "EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.@AccrualCode",
        ConfigType::AccrualCode,
    ),
    field_ref(
        ConfigType::AccrualPolicy,
        "Payout Pay Code",
        "EffectiveAccrualPolicies.WSAEffectiveAccrualPolicy.@AccrualPayoutPayCode",
        ConfigType::PayCode,
    ),
    field_ref(
        ConfigType::AccrualProfile,
        "Accrual Policy",
        "AccrualPolicies.AccrualPolicyName",
        ConfigType::AccrualPolicy,
    ),
    field_ref(
        ConfigType::AccrualProfile,
        "Cascade Group",
        "@BalanceCascadeGroupName",
        ConfigType::BalanceCascadeGroup,
    ),
];

/// Types whose objects root the dependency tree sheet
pub const TREE_ROOTS: [ConfigType; 2] = [ConfigType::EmploymentTerm, ConfigType::HolidayProfile];

// ============================================================================
// GRAPH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub config_type: ConfigType,
    pub name: String,
}

impl NodeId {
    pub fn new(config_type: ConfigType, name: &str) -> Self {
        NodeId {
            config_type,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.config_type, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    pub source: NodeId,
    pub label: &'static str,
    pub target: NodeId,
}

/// Resolved references; edges are sorted so every query is ordered
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    edges: Vec<Edge>,
    outgoing: BTreeMap<NodeId, Vec<usize>>,
    incoming: BTreeMap<NodeId, Vec<usize>>,
}

impl ReferenceGraph {
    pub fn from_edges(mut edges: Vec<Edge>) -> Self {
        edges.sort();
        edges.dedup();

        let mut outgoing: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
        let mut incoming: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.source.clone()).or_default().push(idx);
            incoming.entry(edge.target.clone()).or_default().push(idx);
        }

        ReferenceGraph {
            edges,
            outgoing,
            incoming,
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn outgoing(&self, node: &NodeId) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(node)
            .into_iter()
            .flatten()
            .map(|&idx| &self.edges[idx])
    }

    pub fn incoming(&self, node: &NodeId) -> impl Iterator<Item = &Edge> {
        self.incoming
            .get(node)
            .into_iter()
            .flatten()
            .map(|&idx| &self.edges[idx])
    }

    /// Distinct successors, ignoring labels
    fn successors(&self, node: &NodeId) -> BTreeSet<&NodeId> {
        self.outgoing(node).map(|e| &e.target).collect()
    }

    // ========================================================================
    // CYCLES
    // ========================================================================

    /// Every cycle reachable through a back edge, each exactly once
    ///
    /// Members are rotated so the smallest node comes first.
    pub fn find_cycles(&self) -> Vec<Vec<NodeId>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Active,
            Done,
        }

        fn visit<'g>(
            graph: &'g ReferenceGraph,
            node: &'g NodeId,
            marks: &mut HashMap<&'g NodeId, Mark>,
            stack: &mut Vec<&'g NodeId>,
            found: &mut BTreeSet<Vec<NodeId>>,
        ) {
            marks.insert(node, Mark::Active);
            stack.push(node);

            for next in graph.successors(node) {
                match marks.get(next) {
                    Some(Mark::Active) => {
                        if let Some(start) = stack.iter().position(|n| *n == next) {
                            found.insert(canonical_cycle(&stack[start..]));
                        }
                    }
                    Some(Mark::Done) => {}
                    None => visit(graph, next, marks, stack, found),
                }
            }

            stack.pop();
            marks.insert(node, Mark::Done);
        }

        let mut marks: HashMap<&NodeId, Mark> = HashMap::new();
        let mut found: BTreeSet<Vec<NodeId>> = BTreeSet::new();
        let mut stack = Vec::new();

        for node in self.outgoing.keys() {
            if !marks.contains_key(node) {
                visit(self, node, &mut marks, &mut stack, &mut found);
            }
        }

        found.into_iter().collect()
    }

    // ========================================================================
    // DEPENDENCY TREE
    // ========================================================================

    /// Depth-first expansion from `root` for display
    ///
    /// A node already on the current path is emitted with `TreeNote::Cycle`
    /// and not expanded; a node expanded earlier under the same root is
    /// emitted with `TreeNote::SeeAbove`.
    pub fn dependency_tree(&self, root: &NodeId) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut path: Vec<&NodeId> = Vec::new();
        let mut expanded: HashSet<&NodeId> = HashSet::new();
        self.expand(root, root, "", 0, &mut path, &mut expanded, &mut rows);
        rows
    }

    #[allow(clippy::too_many_arguments)]
    fn expand<'g>(
        &'g self,
        root: &NodeId,
        node: &'g NodeId,
        via: &'static str,
        depth: usize,
        path: &mut Vec<&'g NodeId>,
        expanded: &mut HashSet<&'g NodeId>,
        rows: &mut Vec<TreeRow>,
    ) {
        let note = if path.contains(&node) {
            TreeNote::Cycle
        } else if expanded.contains(node) {
            TreeNote::SeeAbove
        } else {
            TreeNote::None
        };

        rows.push(TreeRow {
            root: root.clone(),
            depth,
            via: via.to_string(),
            node: node.clone(),
            note,
        });

        if note != TreeNote::None {
            return;
        }

        expanded.insert(node);
        path.push(node);
        for edge in self.outgoing(node) {
            self.expand(root, &edge.target, edge.label, depth + 1, path, expanded, rows);
        }
        path.pop();
    }
}

fn canonical_cycle(members: &[&NodeId]) -> Vec<NodeId> {
    let start = members
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    members[start..]
        .iter()
        .chain(members[..start].iter())
        .map(|n| (*n).clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeNote {
    None,
    Cycle,
    SeeAbove,
}

impl TreeNote {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeNote::None => "",
            TreeNote::Cycle => "cycle",
            TreeNote::SeeAbove => "see above",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub root: NodeId,
    pub depth: usize,
    /// Label of the edge that led here; empty for the root
    pub via: String,
    pub node: NodeId,
    pub note: TreeNote,
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolve every declared reference against the complete catalog
pub fn resolve(catalog: &Catalog) -> (ReferenceGraph, Vec<Anomaly>) {
    resolve_with(catalog, REFERENCE_SPECS)
}

pub fn resolve_with(catalog: &Catalog, specs: &[ReferenceSpec]) -> (ReferenceGraph, Vec<Anomaly>) {
    let mut edges = Vec::new();
    let mut anomalies = Vec::new();
    let mut into_unexported = 0usize;

    for spec in specs {
        for object in catalog.objects_of(spec.source) {
            // The same target named in many entries is one reference
            let targets: BTreeSet<String> = object.texts(spec.path).into_iter().collect();

            for target in targets {
                if catalog.contains(spec.target, &target) {
                    edges.push(Edge {
                        source: NodeId::new(spec.source, &object.name),
                        label: spec.label,
                        target: NodeId::new(spec.target, &target),
                    });
                    continue;
                }

                let (description, recommendation) = if catalog.has_type(spec.target) {
                    (
                        format!(
                            "{} '{}' field '{}' references missing {} '{}'",
                            spec.source, object.name, spec.label, spec.target, target
                        ),
                        format!(
                            "Export the {} '{}' or correct the {} reference",
                            spec.target, target, spec.label
                        ),
                    )
                } else {
                    into_unexported += 1;
                    (
                        format!(
                            "{} '{}' field '{}' references {} '{}', but target type not exported",
                            spec.source, object.name, spec.label, spec.target, target
                        ),
                        format!("Include the {} export to resolve this reference", spec.target),
                    )
                };

                anomalies.push(
                    Anomaly::new(
                        AnomalyCategory::MissingReference,
                        Severity::High,
                        Some(spec.source),
                        vec![object.name.clone(), target.clone()],
                        description,
                    )
                    .with_recommendation(recommendation),
                );
            }
        }
    }

    if into_unexported > 0 {
        tracing::warn!(
            count = into_unexported,
            "references point into types that were not exported"
        );
    }

    let graph = ReferenceGraph::from_edges(edges);

    for cycle in graph.find_cycles() {
        let mut chain: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        chain.push(cycle[0].to_string());
        anomalies.push(
            Anomaly::new(
                AnomalyCategory::NamingMismatch,
                Severity::High,
                Some(cycle[0].config_type),
                cycle.iter().map(|n| n.name.clone()).collect(),
                format!("Reference cycle: {}", chain.join(" -> ")),
            )
            .with_recommendation("Break the cycle; one of these references points at the wrong object"),
        );
    }

    tracing::info!(
        edges = graph.edges().len(),
        anomalies = anomalies.len(),
        "references resolved"
    );

    (graph, anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ConfigObject;
    use serde_json::{json, Value};

    fn object(config_type: ConfigType, fields: Value) -> ConfigObject {
        let map = fields.as_object().cloned().unwrap();
        let name = map["@Name"].as_str().unwrap().to_string();
        ConfigObject::new(config_type, &name, map)
    }

    fn custom_date(name: &str, reference: &str) -> ConfigObject {
        object(
            ConfigType::CustomDate,
            json!({"@Name": name, "@ReferenceCustomDate": reference}),
        )
    }

    fn node(config_type: ConfigType, name: &str) -> NodeId {
        NodeId::new(config_type, name)
    }

    #[test]
    fn test_every_spec_path_is_unique_per_source_and_label() {
        let mut seen = BTreeSet::new();
        for spec in REFERENCE_SPECS {
            assert!(seen.insert((spec.source, spec.label)), "duplicate {:?}", spec);
        }
    }

    #[test]
    fn test_resolves_forward_references() {
        // Limit listed before the date pattern it points at
        let (catalog, _) = Catalog::from_objects(vec![
            object(ConfigType::Limit, json!({"@Name": "HOL Max", "@DatePattern": "Annual"})),
            object(ConfigType::DatePattern, json!({"@Name": "Annual"})),
        ]);

        let (graph, anomalies) = resolve(&catalog);

        assert!(anomalies.is_empty());
        assert_eq!(graph.edges().len(), 1);
        let edge = &graph.edges()[0];
        assert_eq!(edge.source, node(ConfigType::Limit, "HOL Max"));
        assert_eq!(edge.target, node(ConfigType::DatePattern, "Annual"));
        assert_eq!(edge.label, "Date Pattern");
    }

    #[test]
    fn test_dangling_reference_yields_one_anomaly() {
        let (catalog, _) = Catalog::from_objects(vec![
            object(
                ConfigType::ContributingShiftRule,
                json!({"@Name": "FORFEIT LABOR DAY", "@ContributingPayCodeRuleName": "H-FORFEIT GONE"}),
            ),
            object(ConfigType::ContributingPayCodeRule, json!({"@Name": "H-FORFEIT LABOR"})),
        ]);

        let (graph, anomalies) = resolve(&catalog);

        assert!(graph.edges().is_empty());
        assert_eq!(anomalies.len(), 1);
        let anomaly = &anomalies[0];
        assert_eq!(anomaly.category, AnomalyCategory::MissingReference);
        assert_eq!(anomaly.affected, vec!["FORFEIT LABOR DAY", "H-FORFEIT GONE"]);
        assert!(anomaly.description.contains("Contributing Pay Code Rule"));
    }

    #[test]
    fn test_reference_into_unexported_type_is_still_reported() {
        let (catalog, _) = Catalog::from_objects(vec![object(
            ConfigType::Limit,
            json!({"@Name": "HOL Max", "@DatePattern": "Does Not Exist"}),
        )]);

        let (graph, anomalies) = resolve(&catalog);

        assert!(graph.edges().is_empty());
        assert_eq!(anomalies.len(), 1);
        let anomaly = &anomalies[0];
        assert_eq!(anomaly.category, AnomalyCategory::MissingReference);
        assert_eq!(anomaly.affected, vec!["HOL Max", "Does Not Exist"]);
        assert!(anomaly.description.contains("target type not exported"));
    }

    #[test]
    fn test_repeated_reference_from_one_object_collapses() {
        let (catalog, _) = Catalog::from_objects(vec![object(
            ConfigType::HolidayProfile,
            json!({
                "@Name": "Non Exempt FT",
                "HolidayProfileDataSet": {"APIHolidayProfileDataSet": {"DataMembers": {"APIHolidayProfileData": {
                    "Entries": {"APIHolidayProfileDataEntry": [
                        {"@HolidayName": "Labor Day", "@CreditRuleName": "Missing Rule"},
                        {"@HolidayName": "Memorial Day", "@CreditRuleName": "Missing Rule"}
                    ]}
                }}}}
            }),
        ),
        object(ConfigType::HolidayCreditRule, json!({"@Name": "Other"})),
        object(ConfigType::Holiday, json!({"@Name": "Labor Day"})),
        object(ConfigType::Holiday, json!({"@Name": "Memorial Day"}))]);

        let (graph, anomalies) = resolve(&catalog);

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected, vec!["Non Exempt FT", "Missing Rule"]);
    }

    #[test]
    fn test_case_sensitive_match() {
        let (catalog, _) = Catalog::from_objects(vec![
            object(ConfigType::Limit, json!({"@Name": "L", "@DatePattern": "annual"})),
            object(ConfigType::DatePattern, json!({"@Name": "Annual"})),
        ]);
        let (_, anomalies) = resolve(&catalog);
        assert_eq!(anomalies.len(), 1);
    }

    #[test]
    fn test_empty_reference_values_are_ignored() {
        let (catalog, _) = Catalog::from_objects(vec![
            object(ConfigType::Limit, json!({"@Name": "L", "@DatePattern": "  "})),
            object(ConfigType::DatePattern, json!({"@Name": "Annual"})),
        ]);
        let (graph, anomalies) = resolve(&catalog);
        assert!(anomalies.is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_two_node_cycle_reported_once() {
        let (catalog, _) = Catalog::from_objects(vec![
            custom_date("A", "B"),
            custom_date("B", "A"),
        ]);

        let (graph, anomalies) = resolve(&catalog);

        assert_eq!(graph.find_cycles().len(), 1);
        let cycles: Vec<&Anomaly> = anomalies
            .iter()
            .filter(|a| a.description.starts_with("Reference cycle"))
            .collect();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].category, AnomalyCategory::NamingMismatch);
        assert_eq!(cycles[0].affected, vec!["A", "B"]);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let (catalog, _) = Catalog::from_objects(vec![custom_date("Loop", "Loop")]);
        let (graph, _) = resolve(&catalog);
        assert_eq!(graph.find_cycles(), vec![vec![node(ConfigType::CustomDate, "Loop")]]);
    }

    #[test]
    fn test_canonical_rotation() {
        let (catalog, _) = Catalog::from_objects(vec![
            custom_date("C", "A"),
            custom_date("A", "B"),
            custom_date("B", "C"),
        ]);
        let (graph, _) = resolve(&catalog);
        let cycles = graph.find_cycles();
        assert_eq!(cycles.len(), 1);
        let names: Vec<&str> = cycles[0].iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dependency_tree_stops_at_cycle() {
        let (catalog, _) = Catalog::from_objects(vec![
            custom_date("A", "B"),
            custom_date("B", "A"),
        ]);
        let (graph, _) = resolve(&catalog);

        let rows = graph.dependency_tree(&node(ConfigType::CustomDate, "A"));

        let shape: Vec<(usize, &str, TreeNote)> = rows
            .iter()
            .map(|r| (r.depth, r.node.name.as_str(), r.note))
            .collect();
        assert_eq!(
            shape,
            vec![
                (0, "A", TreeNote::None),
                (1, "B", TreeNote::None),
                (2, "A", TreeNote::Cycle),
            ]
        );
    }

    #[test]
    fn test_dependency_tree_marks_shared_subtrees() {
        let (catalog, _) = Catalog::from_objects(vec![
            object(ConfigType::BalanceCascadeGroup, json!({
                "@Name": "Group",
                "SelectedBalanceCascades": {"WSASelectedBalanceCascades": [{"@Name": "C1"}, {"@Name": "C2"}]}
            })),
            object(ConfigType::BalanceCascade, json!({"@Name": "C1", "@DatePattern": "Annual"})),
            object(ConfigType::BalanceCascade, json!({"@Name": "C2", "@DatePattern": "Annual"})),
            object(ConfigType::DatePattern, json!({"@Name": "Annual"})),
        ]);
        let (graph, anomalies) = resolve(&catalog);
        assert!(anomalies.is_empty());

        let rows = graph.dependency_tree(&node(ConfigType::BalanceCascadeGroup, "Group"));

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2].node.name, "Annual");
        assert_eq!(rows[2].note, TreeNote::None);
        assert_eq!(rows[4].node.name, "Annual");
        assert_eq!(rows[4].note, TreeNote::SeeAbove);
        assert_eq!(rows[1].via, "Cascade");
    }

    #[test]
    fn test_incoming_edges() {
        let (catalog, _) = Catalog::from_objects(vec![
            object(ConfigType::Limit, json!({"@Name": "L1", "@DatePattern": "Annual"})),
            object(ConfigType::Limit, json!({"@Name": "L2", "@DatePattern": "Annual"})),
            object(ConfigType::DatePattern, json!({"@Name": "Annual"})),
        ]);
        let (graph, _) = resolve(&catalog);
        let sources: Vec<&str> = graph
            .incoming(&node(ConfigType::DatePattern, "Annual"))
            .map(|e| e.source.name.as_str())
            .collect();
        assert_eq!(sources, vec!["L1", "L2"]);
    }
}
