//! Input gate domain types

use serde::{Deserialize, Serialize};

/// One outstanding manual-approval checkpoint within a running build
///
/// Only `id` is needed to resolve the gate; the remaining fields are what
/// the pipeline plugin reports for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingInputAction {
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub proceed_text: Option<String>,
}

impl PendingInputAction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: None,
            proceed_text: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pending_actions() {
        let actions: Vec<PendingInputAction> = serde_json::from_str(
            r#"[{"id":"Approve","proceedText":"Proceed","message":"Deploy?","inputs":[]}]"#,
        )
        .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].id, "Approve");
        assert_eq!(actions[0].proceed_text.as_deref(), Some("Proceed"));
    }
}
