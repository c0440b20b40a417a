//! Structural validation. Run this before simulating a workflow.
//!
//! Checks run in two phases:
//! 1. Node-set checks (start cardinality, end presence, labels, and with the
//!    strict edge policy, id uniqueness and edge endpoints).  Every failure is
//!    collected, and any failure stops validation after this phase.
//! 2. Graph checks (no edges into start, no cycle reachable from start, every
//!    node reachable from start).  The first failure is returned on its own.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{EdgePolicy, ValidatorConfig};
use crate::error::StructuralError;
use crate::graph::Adjacency;
use crate::models::{Edge, Node};

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Verdict of a validation pass.  `valid` is `true` exactly when `errors`
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<StructuralError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<StructuralError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The user-facing error messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

// ---------------------------------------------------------------------------
// WorkflowValidator
// ---------------------------------------------------------------------------

/// Stateless validator.  Construct with a config, then call
/// [`WorkflowValidator::validate`] as often as needed.
#[derive(Debug, Clone, Default)]
pub struct WorkflowValidator {
    config: ValidatorConfig,
}

impl WorkflowValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn validate(&self, nodes: &[Node], edges: &[Edge]) -> ValidationResult {
        let errors = self.check_node_set(nodes, edges);
        if !errors.is_empty() {
            warn!(count = errors.len(), "workflow failed node-set checks");
            return ValidationResult::from_errors(errors);
        }

        match check_graph(nodes, edges) {
            Some(err) => {
                warn!(error = %err, "workflow failed graph checks");
                ValidationResult::from_errors(vec![err])
            }
            None => {
                info!("workflow is structurally valid");
                ValidationResult::ok()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Phase 1: collected checks
    // -----------------------------------------------------------------------

    fn check_node_set(&self, nodes: &[Node], edges: &[Edge]) -> Vec<StructuralError> {
        let mut errors = Vec::new();

        let start_count = nodes.iter().filter(|n| n.kind.is_start()).count();
        if start_count == 0 {
            debug!("no start node");
            errors.push(StructuralError::MissingStartNode);
        } else if start_count > 1 {
            debug!(start_count, "more than one start node");
            errors.push(StructuralError::MultipleStartNodes(start_count));
        }

        if !nodes.iter().any(|n| n.kind.is_end()) {
            debug!("no end node");
            errors.push(StructuralError::MissingEndNode);
        }

        let unlabeled: Vec<String> = nodes
            .iter()
            .filter(|n| n.is_unlabeled())
            .map(|n| n.id.clone())
            .collect();
        if !unlabeled.is_empty() {
            debug!(?unlabeled, "nodes without a label");
            errors.push(StructuralError::MissingLabels(unlabeled));
        }

        if self.config.edge_policy == EdgePolicy::Strict {
            errors.extend(check_edge_integrity(nodes, edges));
        }

        errors
    }
}

/// Validate with the default (lenient) configuration.
pub fn validate(nodes: &[Node], edges: &[Edge]) -> ValidationResult {
    WorkflowValidator::default().validate(nodes, edges)
}

/// Duplicate ids, then dangling edge endpoints, in input order.
fn check_edge_integrity(nodes: &[Node], edges: &[Edge]) -> Vec<StructuralError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    for node in nodes {
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            errors.push(StructuralError::DuplicateNodeId(node.id.clone()));
        }
    }

    for edge in edges {
        for (node_id, side) in [(&edge.source, "source"), (&edge.target, "target")] {
            if !seen.contains(node_id.as_str()) {
                debug!(edge = %edge.describe(), node_id = %node_id, side, "dangling edge");
                errors.push(StructuralError::UnknownNodeReference {
                    edge: edge.describe(),
                    node_id: node_id.clone(),
                    side,
                });
            }
        }
    }

    errors
}

// ---------------------------------------------------------------------------
// Phase 2: first failure wins
// ---------------------------------------------------------------------------

/// Runs only once phase 1 has passed, so exactly one start node exists.
fn check_graph(nodes: &[Node], edges: &[Edge]) -> Option<StructuralError> {
    let start = nodes.iter().find(|n| n.kind.is_start())?;
    let adjacency = Adjacency::build(nodes, edges);

    if !adjacency.incoming(&start.id).is_empty() {
        debug!(start = %start.id, "start node has incoming edges");
        return Some(StructuralError::StartHasIncoming);
    }

    if adjacency.has_cycle_from(&start.id) {
        debug!(start = %start.id, "cycle reachable from start");
        return Some(StructuralError::CycleDetected);
    }

    let reachable: HashSet<&str> = adjacency.bfs_order(&start.id).into_iter().collect();
    let unreachable: Vec<String> = nodes
        .iter()
        .filter(|n| !reachable.contains(n.id.as_str()))
        .map(|n| n.display_name().to_owned())
        .collect();
    if !unreachable.is_empty() {
        debug!(?unreachable, "nodes unreachable from start");
        return Some(StructuralError::Unreachable(unreachable));
    }

    None
}
