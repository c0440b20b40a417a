//! Action descriptors and parameter completeness.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry: an automation an automated step can invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationAction {
    pub id: String,
    pub label: String,
    /// Names of the parameters the action requires, in display order.
    pub params: Vec<String>,
}

impl AutomationAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>, params: &[&str]) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Required parameters of `action` that are absent from `params`, null, or a
/// blank string.  Order follows `action.params`.
pub fn missing_params<'a>(action: &'a AutomationAction, params: &Map<String, Value>) -> Vec<&'a str> {
    action
        .params
        .iter()
        .filter(|name| match params.get(name.as_str()) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_absent_null_and_blank_params_in_catalog_order() {
        let action = AutomationAction::new("send_email", "Send Email", &["to", "subject", "body"]);
        let params = json!({ "body": "  ", "subject": null, "extra": 1 });
        let params = params.as_object().cloned().unwrap_or_default();
        assert_eq!(missing_params(&action, &params), vec!["to", "subject", "body"]);
    }

    #[test]
    fn non_string_values_count_as_filled() {
        let action = AutomationAction::new("update_hrms", "Update HR System", &["employee_id", "field", "value"]);
        let params = json!({ "employee_id": 42, "field": "title", "value": false });
        let params = params.as_object().cloned().unwrap_or_default();
        assert!(missing_params(&action, &params).is_empty());
    }
}
