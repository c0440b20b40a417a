//! Text rendering for validation verdicts, simulation traces, and catalog
//! parameter warnings.

use std::fmt::Write as _;

use catalog::{missing_params, AutomationCatalog, CatalogError};
use engine::{NodeKind, SimulationResult, ValidationResult, WorkflowDocument};

pub fn render_validation(result: &ValidationResult) -> String {
    let mut out = String::new();
    if result.valid {
        out.push_str("✅ Validation passed\n");
    } else {
        out.push_str("❌ Validation failed\n");
        for message in result.messages() {
            let _ = writeln!(out, "  - {message}");
        }
    }
    out
}

pub fn render_trace(result: &SimulationResult) -> String {
    if !result.valid {
        return render_validation(&ValidationResult::from_errors(result.errors.clone()));
    }

    let mut out = String::from("✅ Validation passed\nExecution log:\n");
    for log in &result.logs {
        let _ = writeln!(
            out,
            "  {:>3}. [{}] {} ({}) {}",
            log.step_id,
            log.timestamp.format("%H:%M:%S"),
            log.node_label,
            log.status,
            log.message,
        );
    }
    out
}

/// One warning per automated step whose action is unset, unknown to the
/// catalog, or missing required parameters.
pub async fn param_warnings(
    doc: &WorkflowDocument,
    catalog: &dyn AutomationCatalog,
) -> Result<Vec<String>, CatalogError> {
    let mut warnings = Vec::new();

    for node in &doc.nodes {
        let NodeKind::Automated { action_id, action_params } = &node.kind else {
            continue;
        };
        let name = node.display_name();

        let Some(action_id) = action_id.as_deref().filter(|id| !id.trim().is_empty()) else {
            warnings.push(format!("Automated step '{name}' has no action selected"));
            continue;
        };

        match catalog.find(action_id).await? {
            None => warnings.push(format!(
                "Automated step '{name}' references unknown action '{action_id}'"
            )),
            Some(action) => {
                let missing = missing_params(&action, action_params);
                if !missing.is_empty() {
                    warnings.push(format!(
                        "Automated step '{name}' ({}) is missing: {}",
                        action.label,
                        missing.join(", ")
                    ));
                }
            }
        }
    }

    Ok(warnings)
}
