//! Per-call configuration records.
//!
//! Both records are optional at context creation and default to "no
//! effect". They are plain data: the pipeline reads them, collaborators
//! outside the core honor them.

use serde::{Deserialize, Serialize};

/// Overrides applied to a single outgoing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOverrides {
    /// Force the call onto a particular chain instead of the wallet's
    /// currently selected one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Send from this account instead of the wallet's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

/// Behavioral options for a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Skip the user-confirmation surface for this call.
    ///
    /// Intended for requests the surrounding application has already
    /// confirmed through its own UI.
    #[serde(default)]
    pub silent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_effect() {
        let overrides = SendOverrides::default();
        assert!(overrides.chain_id.is_none());
        assert!(overrides.account.is_none());

        let options = RequestOptions::default();
        assert!(!options.silent);
    }

    #[test]
    fn overrides_deserialize_from_partial_json() {
        let overrides: SendOverrides = serde_json::from_str(r#"{"chain_id": 137}"#).unwrap();
        assert_eq!(overrides.chain_id, Some(137));
        assert!(overrides.account.is_none());

        let options: RequestOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.silent);
    }
}
