//! Engine-level error types.
//!
//! Structural problems with a workflow are *not* errors in the `Result`
//! sense: they are collected as [`StructuralError`] values inside a
//! [`crate::ValidationResult`] so they can be shown to the user as a list.
//! [`EngineError`] is reserved for input that cannot be turned into a
//! workflow at all.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A structural problem found while validating a workflow graph.
///
/// The `Display` text is the user-facing message, and the value serialises
/// as that text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    // ------ Collected together ------
    /// No node of kind `start`.
    #[error("Workflow must contain one Start Node.")]
    MissingStartNode,

    /// More than one node of kind `start`.
    #[error("Workflow should contain only one Start Node.")]
    MultipleStartNodes(usize),

    /// No node of kind `end`.
    #[error("Workflow must contain at least one End Node.")]
    MissingEndNode,

    /// Nodes (by id) whose label is blank.
    #[error("Every node must have a title/label. Missing on: {}", .0.join(", "))]
    MissingLabels(Vec<String>),

    /// Two or more nodes share the same ID (strict edge policy only).
    #[error("Duplicate node id: '{0}'")]
    DuplicateNodeId(String),

    /// An edge references a node ID that doesn't exist (strict edge policy only).
    #[error("Edge '{edge}' references unknown node '{node_id}' ({side} side)")]
    UnknownNodeReference {
        edge: String,
        node_id: String,
        side: &'static str,
    },

    // ------ First failure wins ------
    /// The start node is the target of at least one edge.
    #[error("Start Node must not have incoming connections. Please remove incoming edges to Start.")]
    StartHasIncoming,

    /// A cycle is reachable from the start node.
    #[error("Workflow contains a cycle. Please remove cyclic edges.")]
    CycleDetected,

    /// Nodes (by display name) that cannot be reached from start.
    #[error("Some nodes are unreachable from Start: {}", .0.join(", "))]
    Unreachable(Vec<String>),
}

impl Serialize for StructuralError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a transport document could not be loaded.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not JSON, or a node/edge has the wrong shape.
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level object lacks a `nodes` or `edges` array.
    #[error("Invalid workflow JSON: missing '{0}' array")]
    MissingKey(&'static str),
}

/// Errors produced by the engine crate.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The workflow document could not be read.
    #[error("invalid workflow document: {0}")]
    Document(#[from] DocumentError),

    /// The result could not be encoded for output.
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_messages_join_with_commas() {
        let err = StructuralError::MissingLabels(vec!["a".into(), "b".into()]);
        assert_eq!(
            err.to_string(),
            "Every node must have a title/label. Missing on: a, b"
        );
    }

    #[test]
    fn structural_error_serialises_as_its_message() {
        let json = serde_json::to_string(&StructuralError::CycleDetected).expect("serialise");
        assert_eq!(json, "\"Workflow contains a cycle. Please remove cyclic edges.\"");
    }

    #[test]
    fn document_errors_keep_the_import_messages() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(DocumentError::Parse(parse)
            .to_string()
            .starts_with("Failed to parse JSON: "));
        assert_eq!(
            DocumentError::MissingKey("nodes").to_string(),
            "Invalid workflow JSON: missing 'nodes' array"
        );
    }
}
