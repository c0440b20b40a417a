//! The onboarding workflow new canvases start with.

use engine::{Edge, Node, NodeKind, WorkflowDocument};
use serde_json::json;

pub fn onboarding() -> WorkflowDocument {
    let nodes = vec![
        Node::start("1", "Start Onboarding").with_position(250.0, 50.0),
        Node::new(
            "2",
            "Collect Documents",
            NodeKind::Task {
                assignee: Some("HR Admin".into()),
                due_date: None,
                custom_fields: Default::default(),
            },
        )
        .with_position(250.0, 200.0),
        Node::new(
            "3",
            "End",
            NodeKind::End {
                end_message: Some("All Done".into()),
                is_summary: false,
            },
        )
        .with_position(650.0, 200.0),
    ];

    let edges = [("e1-2", "1", "2"), ("e2-3", "2", "3")]
        .into_iter()
        .map(|(id, source, target)| {
            let mut edge = Edge::new(source, target).with_id(id);
            edge.hints.insert("animated".into(), json!(true));
            edge.hints.insert("style".into(), json!({ "stroke": "#94a3b8" }));
            edge
        })
        .collect();

    WorkflowDocument::new(nodes, edges)
}
