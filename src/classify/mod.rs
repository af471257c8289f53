pub mod revert;
pub mod rules;

use serde_json::Value;

use self::revert::RevertCodeTable;
use self::rules::ErrorRule;
use crate::diagnostics::{DiagnosticSink, TracingSink};

/// Literal returned verbatim when the wallet holder declined to sign.
/// Callers compare against it to tell user cancellation from real failure.
pub const USER_DENIED_SIGNATURE: &str = "User denied message signature";

pub const INSUFFICIENT_ALLOWANCE_MSG: &str =
    "Insufficient allowance. Please set a reasonable spending cap.";
pub const INSUFFICIENT_FUNDS_MSG: &str =
    "Insufficient funds for this transaction. Please check your balance.";
pub const RPC_UNAVAILABLE_MSG: &str = "Unfortunately, the RPC service is unavailable.";
pub const NETWORK_UNSTABLE_MSG: &str =
    "Network unstable. Please refresh the page or change the RPC endpoint and try again.";
pub const GENERAL_ERROR_MSG: &str = "Unfortunately, something went wrong.";

const REVERT_MARKER_CODE: &str = "code=";
const REVERT_MARKER_FROM: &str = "\"from\"";
const RPC_MARKER_EVENT: &str = "event=";
const RPC_MARKER_NO_REASON: &str = "Transaction reverted without a reason string";
const TRANSIENT_FETCH: &str = "Failed to fetch";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    UserCancelled,
    InsufficientAllowance,
    InsufficientFunds,
    RpcUnavailable,
    NetworkUnstable,
    ContractRevert,
    KnownOperational,
    Unknown,
}

/// A classified error: the message is displayed to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub message: String,
}

/// Classifies raw wallet/RPC/contract errors into display messages.
///
/// The rule and revert tables are read-only borrows, so callers can
/// substitute alternate tables per call without any global state.
pub struct Classifier<'a> {
    rules: &'a [ErrorRule],
    revert_codes: &'a RevertCodeTable,
    default_message: Option<&'a str>,
    sink: &'a dyn DiagnosticSink,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self {
            rules: rules::default_rules(),
            revert_codes: revert::default_revert_codes(),
            default_message: None,
            sink: &TracingSink,
        }
    }
}

impl<'a> Classifier<'a> {
    pub fn new(
        rules: &'a [ErrorRule],
        revert_codes: &'a RevertCodeTable,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            rules,
            revert_codes,
            default_message: None,
            sink,
        }
    }

    /// Message returned when no strategy matches, in place of the
    /// generic fallback (which also captures a diagnostic).
    pub fn with_default_message(mut self, message: &'a str) -> Self {
        self.default_message = Some(message);
        self
    }

    /// Resolve an error to a displayable message.
    ///
    /// Returns `None` only when there is nothing to classify (a falsy
    /// error value). Never panics and never re-throws: callers need no
    /// exception handling beyond catching the original failure.
    pub fn classify(&self, error: &Value) -> Option<String> {
        self.classify_detailed(error).map(|c| c.message)
    }

    pub fn classify_detailed(&self, error: &Value) -> Option<Classification> {
        if is_falsy(error) {
            return None;
        }
        tracing::error!(target: "staking_dapp_display::classify", %error, "caught error");
        let raw = raw_error_message(error);
        Some(self.classify_message(&raw))
    }

    /// Classify a plain message string.
    pub fn classify_str(&self, message: &str) -> Option<String> {
        self.classify(&Value::String(message.to_owned()))
    }

    /// The ordered strategy chain, first match wins. The ordering is
    /// policy: overlapping matches resolve toward the most actionable
    /// message (an allowance problem the user can fix beats the
    /// catch-all network symptom).
    fn classify_message(&self, raw: &str) -> Classification {
        let steps: [fn(&Self, &str) -> Option<Classification>; 7] = [
            Self::match_rules,
            Self::match_revert_code,
            Self::match_user_denied,
            Self::match_insufficient_allowance,
            Self::match_rpc_unavailable,
            Self::match_insufficient_funds,
            Self::match_call_exception,
        ];
        for step in steps {
            if let Some(classified) = step(self, raw) {
                return classified;
            }
        }
        if let Some(message) = self.default_message {
            return Classification {
                category: Category::KnownOperational,
                message: message.to_owned(),
            };
        }
        self.unclassified(raw)
    }

    fn match_rules(&self, raw: &str) -> Option<Classification> {
        self.rules
            .iter()
            .find(|rule| raw.contains(rule.pattern.as_str()))
            .map(|rule| Classification {
                category: Category::KnownOperational,
                message: rule.message.clone(),
            })
    }

    fn match_revert_code(&self, raw: &str) -> Option<Classification> {
        // Low-level call failures are captured for review even when no
        // code key matches; the return value is independent of capture.
        if raw.contains(REVERT_MARKER_CODE) || raw.contains(REVERT_MARKER_FROM) {
            self.sink
                .capture(&format!("Call contract error revert, need review: {raw}"));
        }
        let (_, reason) = self.revert_codes.match_reverted(raw)?;
        Some(Classification {
            category: Category::ContractRevert,
            message: reason.to_owned(),
        })
    }

    fn match_user_denied(&self, raw: &str) -> Option<Classification> {
        raw.contains(USER_DENIED_SIGNATURE).then(|| Classification {
            category: Category::UserCancelled,
            message: USER_DENIED_SIGNATURE.to_owned(),
        })
    }

    fn match_insufficient_allowance(&self, raw: &str) -> Option<Classification> {
        raw.contains("insufficient allowance").then(|| Classification {
            category: Category::InsufficientAllowance,
            message: INSUFFICIENT_ALLOWANCE_MSG.to_owned(),
        })
    }

    fn match_rpc_unavailable(&self, raw: &str) -> Option<Classification> {
        (raw.contains(RPC_MARKER_EVENT) || raw.contains(RPC_MARKER_NO_REASON)).then(|| {
            Classification {
                category: Category::RpcUnavailable,
                message: RPC_UNAVAILABLE_MSG.to_owned(),
            }
        })
    }

    fn match_insufficient_funds(&self, raw: &str) -> Option<Classification> {
        raw.contains("insufficient funds for transfer")
            .then(|| Classification {
                category: Category::InsufficientFunds,
                message: INSUFFICIENT_FUNDS_MSG.to_owned(),
            })
    }

    fn match_call_exception(&self, raw: &str) -> Option<Classification> {
        raw.contains("CALL_EXCEPTION").then(|| Classification {
            category: Category::NetworkUnstable,
            message: NETWORK_UNSTABLE_MSG.to_owned(),
        })
    }

    fn unclassified(&self, raw: &str) -> Classification {
        // Transient fetch failures are suppressed from capture to keep
        // the diagnostic channel free of noise.
        if !raw.contains(TRANSIENT_FETCH) {
            self.sink
                .capture(&format!("Unknown error, need review: {raw}"));
        }
        Classification {
            category: Category::Unknown,
            message: GENERAL_ERROR_MSG.to_owned(),
        }
    }
}

/// Classify an error with the bundled tables and the tracing sink.
pub fn parse_error(error: &Value) -> Option<String> {
    Classifier::default().classify(error)
}

/// Extract the raw message from a provider error shape.
///
/// Provider error shapes vary by wallet and RPC backend; the first
/// present, non-empty candidate wins, checked in order:
/// `error.data.message`, `error.message`, `error.error`, then the error
/// itself. Strings are used as-is; other present values are stringified.
pub fn raw_error_message(error: &Value) -> String {
    let candidates = [
        error.pointer("/data/message"),
        error.get("message"),
        error.get("error"),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Some(text) = candidate_text(candidate) {
            return text;
        }
    }
    candidate_text(error).unwrap_or_default()
}

fn candidate_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The JS notion of falsy the original contract was written against.
fn is_falsy(error: &Value) -> bool {
    match error {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct BufferSink {
        captured: Mutex<Vec<String>>,
    }

    impl BufferSink {
        fn messages(&self) -> Vec<String> {
            self.captured.lock().unwrap().clone()
        }
    }

    impl DiagnosticSink for BufferSink {
        fn capture(&self, message: &str) {
            self.captured.lock().unwrap().push(message.to_owned());
        }
    }

    fn classifier(sink: &BufferSink) -> Classifier<'_> {
        Classifier::new(rules::default_rules(), revert::default_revert_codes(), sink)
    }

    #[test]
    fn falsy_errors_classify_to_none() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        assert_eq!(c.classify(&Value::Null), None);
        assert_eq!(c.classify(&serde_json::json!("")), None);
        assert_eq!(c.classify(&serde_json::json!(false)), None);
        assert_eq!(c.classify(&serde_json::json!(0)), None);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn allowance_takes_precedence_over_call_exception() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        assert_eq!(
            c.classify_str("insufficient allowance for spender").unwrap(),
            INSUFFICIENT_ALLOWANCE_MSG
        );
        assert_eq!(
            c.classify_str("insufficient allowance; CALL_EXCEPTION").unwrap(),
            INSUFFICIENT_ALLOWANCE_MSG
        );
    }

    #[test]
    fn user_denied_signature_is_returned_verbatim() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        assert_eq!(
            c.classify_str("User denied message signature").unwrap(),
            USER_DENIED_SIGNATURE
        );
        let detailed = c
            .classify_detailed(&serde_json::json!("MetaMask: User denied message signature."))
            .unwrap();
        assert_eq!(detailed.category, Category::UserCancelled);
    }

    #[test]
    fn revert_code_maps_through_a_caller_supplied_table() {
        let sink = BufferSink::default();
        let table = RevertCodeTable::from_json(r#"{"1000": "Not registered"}"#).unwrap();
        let c = Classifier::new(&[], &table, &sink);
        assert_eq!(
            c.classify(&serde_json::json!({"message": "reverted: 1000"}))
                .unwrap(),
            "Not registered"
        );
        assert!(sink.messages().is_empty(), "no low-level markers present");
    }

    #[test]
    fn revert_markers_capture_even_without_a_code_match() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        let raw = r#"call failed, code=UNPREDICTABLE_GAS_LIMIT, tx {"from": "0xabc"}"#;
        let message = c.classify_str(raw).unwrap();
        // No code key matches, so the chain falls through to the generic
        // fallback, which captures a second diagnostic.
        assert_eq!(message, GENERAL_ERROR_MSG);
        let captured = sink.messages();
        assert_eq!(captured.len(), 2);
        assert!(captured[0].starts_with("Call contract error revert"));
        assert!(captured[0].contains(raw));
    }

    #[test]
    fn revert_markers_capture_alongside_a_code_match() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        let message = c
            .classify_str("execution reverted: S001, code=CALL_FAILED")
            .unwrap();
        assert_eq!(message, "Staking amount is below the minimum requirement");
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn rpc_markers_classify_as_unavailable() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        assert_eq!(
            c.classify_str("missing revert data (event=\"call\")").unwrap(),
            RPC_UNAVAILABLE_MSG
        );
        assert_eq!(
            c.classify_str("Transaction reverted without a reason string")
                .unwrap(),
            RPC_UNAVAILABLE_MSG
        );
    }

    #[test]
    fn insufficient_funds_and_call_exception_have_fixed_messages() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        assert_eq!(
            c.classify_str("err: insufficient funds for transfer").unwrap(),
            INSUFFICIENT_FUNDS_MSG
        );
        assert_eq!(
            c.classify_str("missing response [CALL_EXCEPTION]").unwrap(),
            NETWORK_UNSTABLE_MSG
        );
    }

    #[test]
    fn transient_fetch_failures_are_not_captured() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        assert_eq!(c.classify_str("Failed to fetch").unwrap(), GENERAL_ERROR_MSG);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn novel_errors_capture_exactly_once_with_the_raw_string() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        let raw = "some completely novel error xyz";
        assert_eq!(c.classify_str(raw).unwrap(), GENERAL_ERROR_MSG);
        let captured = sink.messages();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].contains(raw));
    }

    #[test]
    fn classification_is_idempotent() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        let error = serde_json::json!({"data": {"message": "exceed rate limit"}});
        let first = c.classify(&error);
        let second = c.classify(&error);
        assert_eq!(first, second);
        assert_eq!(first.unwrap(), "You have exceeded the query rate limit.");
    }

    #[test]
    fn rule_table_outranks_every_other_strategy() {
        let sink = BufferSink::default();
        let c = classifier(&sink);
        // "Not registered" rule wins over the user-denied literal later
        // in the same message.
        assert_eq!(
            c.classify_str("Not registered; User denied message signature")
                .unwrap(),
            "Your address has not been registered yet."
        );
    }

    #[test]
    fn default_message_replaces_the_generic_fallback() {
        let sink = BufferSink::default();
        let c = classifier(&sink).with_default_message("Claim failed.");
        let detailed = c.classify_detailed(&serde_json::json!("mystery")).unwrap();
        assert_eq!(detailed.message, "Claim failed.");
        assert_eq!(detailed.category, Category::KnownOperational);
        assert!(sink.messages().is_empty(), "default short-circuits capture");
    }

    #[test]
    fn raw_message_extraction_prefers_nested_data() {
        let error = serde_json::json!({
            "data": {"message": "deep"},
            "message": "middle",
            "error": "shallow"
        });
        assert_eq!(raw_error_message(&error), "deep");

        let error = serde_json::json!({"message": "middle", "error": "shallow"});
        assert_eq!(raw_error_message(&error), "middle");

        let error = serde_json::json!({"error": "shallow"});
        assert_eq!(raw_error_message(&error), "shallow");

        assert_eq!(raw_error_message(&serde_json::json!("plain")), "plain");
    }

    #[test]
    fn raw_message_extraction_skips_empty_and_null_candidates() {
        let error = serde_json::json!({
            "data": {"message": ""},
            "message": null,
            "error": "usable"
        });
        assert_eq!(raw_error_message(&error), "usable");
    }

    #[test]
    fn raw_message_extraction_stringifies_structural_candidates() {
        let error = serde_json::json!({"message": -32_000});
        assert_eq!(raw_error_message(&error), "-32000");

        let error = serde_json::json!({"code": 4001});
        assert_eq!(raw_error_message(&error), r#"{"code":4001}"#);
    }

    #[test]
    fn wallet_connection_rules_classify_missing_provider() {
        let sink = BufferSink::default();
        let c = Classifier::new(
            rules::wallet_connection_rules(),
            revert::default_revert_codes(),
            &sink,
        );
        assert_eq!(
            c.classify_str("No Ethereum provider was found on window.ethereum.")
                .unwrap(),
            "Please install a wallet browser extension."
        );
    }

    #[test]
    fn category_names_serialize_snake_case() {
        assert_eq!(Category::UserCancelled.as_ref(), "user_cancelled");
        assert_eq!(Category::ContractRevert.to_string(), "contract_revert");
        assert_eq!(
            "rpc_unavailable".parse::<Category>().ok(),
            Some(Category::RpcUnavailable)
        );
    }
}
