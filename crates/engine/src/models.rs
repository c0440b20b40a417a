//! Core domain models for the workflow engine.
//!
//! These types are the source of truth for what a workflow looks like
//! in memory.  They serialise to/from the `{ nodes, edges }` transport
//! document handled by [`crate::document`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// The typed role of a step, together with the attributes only that role owns.
///
/// Serialised as an internally tagged `"type"` field so a node reads as
/// `{ "id": "2", "type": "task", "label": "...", "assignee": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NodeKind {
    /// Single entry point of the workflow.
    Start {
        /// Free-form key/value metadata.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        meta: BTreeMap<String, String>,
    },
    /// A manual step performed by a person.
    Task {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        assignee: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_date: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        custom_fields: BTreeMap<String, String>,
    },
    /// A sign-off gate.
    Approval {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        approver_role: Option<String>,
        /// Amounts at or below this value would be approved without a human.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auto_approve_threshold: Option<f64>,
    },
    /// A step backed by an entry in the automation catalog.
    Automated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action_id: Option<String>,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        action_params: Map<String, Value>,
    },
    /// A terminal step.  A workflow may have several.
    End {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_message: Option<String>,
        #[serde(default)]
        is_summary: bool,
    },
}

impl NodeKind {
    /// Lower-case type name, as it appears in the transport format.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Start { .. } => "start",
            NodeKind::Task { .. } => "task",
            NodeKind::Approval { .. } => "approval",
            NodeKind::Automated { .. } => "automated",
            NodeKind::End { .. } => "end",
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, NodeKind::Start { .. })
    }

    pub fn is_end(&self) -> bool {
        matches!(self, NodeKind::End { .. })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Canvas coordinates.  Carried for round-trip fidelity only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single step in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier within this workflow (referenced by edges).
    pub id: String,
    /// Display title.  Required: a blank label fails validation.
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Build a node of any kind.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            position: None,
            kind,
        }
    }

    pub fn start(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeKind::Start { meta: BTreeMap::new() })
    }

    pub fn task(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            label,
            NodeKind::Task {
                assignee: None,
                due_date: None,
                custom_fields: BTreeMap::new(),
            },
        )
    }

    /// An approval gate always names the approving role and its threshold.
    pub fn approval(
        id: impl Into<String>,
        label: impl Into<String>,
        approver_role: impl Into<String>,
        auto_approve_threshold: f64,
    ) -> Self {
        Self::new(
            id,
            label,
            NodeKind::Approval {
                approver_role: Some(approver_role.into()),
                auto_approve_threshold: Some(auto_approve_threshold),
            },
        )
    }

    /// An automated step always references a catalog action.
    pub fn automated(
        id: impl Into<String>,
        label: impl Into<String>,
        action_id: impl Into<String>,
        action_params: Map<String, Value>,
    ) -> Self {
        Self::new(
            id,
            label,
            NodeKind::Automated {
                action_id: Some(action_id.into()),
                action_params,
            },
        )
    }

    pub fn end(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            label,
            NodeKind::End {
                end_message: None,
                is_summary: false,
            },
        )
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `true` when the label is missing or whitespace only.
    pub fn is_unlabeled(&self) -> bool {
        self.label.trim().is_empty()
    }

    /// The label, or the id when the label is blank.
    pub fn display_name(&self) -> &str {
        if self.is_unlabeled() {
            &self.id
        } else {
            &self.label
        }
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// Directed edge from one node to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// Rendering hints (`animated`, `style`, ...).  Ignored by the engine.
    #[serde(flatten)]
    pub hints: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            hints: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Human-readable name used in error messages.
    pub fn describe(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}->{}", self.source, self.target),
        }
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn task_node_serialises_with_type_tag_and_camel_case_fields() {
        let mut node = Node::task("2", "Collect Documents");
        if let NodeKind::Task { assignee, due_date, .. } = &mut node.kind {
            *assignee = Some("HR Admin".into());
            *due_date = Some("2026-11-01".into());
        }

        let value = serde_json::to_value(&node).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": "2",
                "label": "Collect Documents",
                "type": "task",
                "assignee": "HR Admin",
                "dueDate": "2026-11-01",
            })
        );
    }

    #[test]
    fn missing_label_deserialises_as_blank() {
        let node: Node = serde_json::from_value(json!({ "id": "x", "type": "end" })).expect("parse");
        assert!(node.is_unlabeled());
        assert_eq!(node.display_name(), "x");
        assert!(node.kind.is_end());
    }

    #[test]
    fn approval_constructor_fills_required_attributes() {
        let node = Node::approval("a", "Manager sign-off", "Manager", 500.0);
        assert_eq!(
            node.kind,
            NodeKind::Approval {
                approver_role: Some("Manager".into()),
                auto_approve_threshold: Some(500.0),
            }
        );
        assert_eq!(node.kind.to_string(), "approval");
    }

    #[test]
    fn edge_keeps_unknown_rendering_hints() {
        let raw = json!({
            "id": "e1-2",
            "source": "1",
            "target": "2",
            "animated": true,
            "style": { "stroke": "#94a3b8" }
        });
        let edge: Edge = serde_json::from_value(raw.clone()).expect("parse");
        assert_eq!(edge.hints.get("animated"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&edge).expect("serialise"), raw);
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let result: Result<Node, _> =
            serde_json::from_value(json!({ "id": "x", "type": "webhook", "label": "X" }));
        assert!(result.is_err());
    }
}
