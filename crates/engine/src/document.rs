//! The `{ "nodes": [...], "edges": [...] }` transport document.
//!
//! This is the shape workflows are exported in and imported from.  Loading
//! checks for both top-level arrays before decoding the typed nodes and
//! edges, so a file that is valid JSON but not a workflow gets a clear error.
//! Nodes saved by the canvas editor nest their label and attributes under a
//! `data` object; those are lifted onto the node before decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocumentError, EngineError};
use crate::models::{Edge, Node};
use crate::simulator::{run_simulation, SimulationResult};
use crate::validator::{validate, ValidationResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl WorkflowDocument {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    /// - [`DocumentError::Parse`] if the text is not JSON or a node/edge is malformed.
    /// - [`DocumentError::MissingKey`] if `nodes` or `edges` is absent or not an array.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let mut raw: Value = serde_json::from_str(text)?;

        for key in ["nodes", "edges"] {
            if !raw.get(key).is_some_and(Value::is_array) {
                return Err(DocumentError::MissingKey(key));
            }
        }

        lift_node_data(&mut raw);
        Ok(serde_json::from_value(raw)?)
    }

    /// Pretty-printed JSON, as written by an export.
    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(EngineError::Encode)
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.nodes, &self.edges)
    }

    pub fn simulate(&self) -> SimulationResult {
        run_simulation(&self.nodes, &self.edges)
    }
}

/// Move every key of a node's `data` object onto the node.  Keys already
/// present at the top level win.
fn lift_node_data(raw: &mut Value) {
    let Some(nodes) = raw.get_mut("nodes").and_then(Value::as_array_mut) else {
        return;
    };

    for node in nodes {
        let Some(fields) = node.as_object_mut() else {
            continue;
        };
        let Some(Value::Object(data)) = fields.remove("data") else {
            continue;
        };
        for (key, value) in data {
            fields.entry(key).or_insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;
    use pretty_assertions::assert_eq;

    const ONBOARDING: &str = r##"{
        "nodes": [
            { "id": "1", "type": "start", "label": "Start Onboarding", "position": { "x": 250, "y": 50 } },
            { "id": "2", "type": "task", "label": "Collect Documents", "assignee": "HR Admin" },
            { "id": "3", "type": "end", "label": "End", "endMessage": "All Done" }
        ],
        "edges": [
            { "id": "e1-2", "source": "1", "target": "2", "animated": true, "style": { "stroke": "#94a3b8" } },
            { "id": "e2-3", "source": "2", "target": "3", "animated": true }
        ]
    }"##;

    #[test]
    fn loads_and_round_trips() {
        let doc = WorkflowDocument::from_json(ONBOARDING).expect("load");
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.edges[0].hints["style"]["stroke"], "#94a3b8");

        let written = doc.to_json_pretty().expect("write");
        let reloaded = WorkflowDocument::from_json(&written).expect("reload");
        assert_eq!(reloaded, doc);
        assert!(reloaded.validate().valid);
    }

    const CANVAS_EXPORT: &str = r##"{
        "nodes": [
            {
                "id": "1", "type": "start", "position": { "x": 250, "y": 50 },
                "width": 180, "height": 60,
                "data": { "label": "Start Onboarding", "meta": { "dept": "HR" } }
            },
            {
                "id": "2", "type": "approval", "position": { "x": 250, "y": 200 },
                "data": { "label": "Manager Approval", "approverRole": "Manager", "autoApproveThreshold": 500 }
            },
            {
                "id": "3", "type": "end", "position": { "x": 650, "y": 200 },
                "data": { "label": "End", "endMessage": "All Done", "isSummary": true }
            }
        ],
        "edges": [
            { "id": "e1-2", "source": "1", "target": "2", "animated": true, "sourceHandle": null },
            { "id": "e2-3", "source": "2", "target": "3", "animated": true }
        ]
    }"##;

    #[test]
    fn canvas_export_keeps_labels_and_attributes() {
        let doc = WorkflowDocument::from_json(CANVAS_EXPORT).expect("load");

        let labels: Vec<&str> = doc.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Start Onboarding", "Manager Approval", "End"]);
        assert_eq!(
            doc.nodes[1].kind,
            NodeKind::Approval {
                approver_role: Some("Manager".into()),
                auto_approve_threshold: Some(500.0),
            }
        );
        assert_eq!(
            doc.nodes[2].kind,
            NodeKind::End {
                end_message: Some("All Done".into()),
                is_summary: true,
            }
        );
        assert!(doc.validate().valid);

        let written = doc.to_json_pretty().expect("write");
        let reloaded = WorkflowDocument::from_json(&written).expect("reload");
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn top_level_fields_win_over_data() {
        let text = r#"{
            "nodes": [{ "id": "1", "type": "start", "label": "Outer", "data": { "label": "Inner" } }],
            "edges": []
        }"#;
        let doc = WorkflowDocument::from_json(text).expect("load");
        assert_eq!(doc.nodes[0].label, "Outer");
    }

    #[test]
    fn missing_edges_key_is_rejected() {
        let err = WorkflowDocument::from_json(r#"{ "nodes": [] }"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingKey("edges")));
    }

    #[test]
    fn non_array_nodes_is_rejected() {
        let err = WorkflowDocument::from_json(r#"{ "nodes": {}, "edges": [] }"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingKey("nodes")));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = WorkflowDocument::from_json("not json").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn simulate_walks_the_document() {
        let doc = WorkflowDocument::from_json(ONBOARDING).expect("load");
        let ids: Vec<String> = doc.simulate().logs.into_iter().map(|l| l.node_id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
