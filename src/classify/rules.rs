use std::sync::LazyLock;

use serde::Serialize;

/// An ordered `(pattern, message)` pair. The pattern is matched by
/// substring containment against the raw error message; the first
/// matching rule in a table wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRule {
    pub pattern: String,
    pub message: String,
}

impl ErrorRule {
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Operational errors raised by the network's query and staking surfaces.
/// Order matters: earlier entries shadow later ones for overlapping
/// messages.
const DEFAULT_RULES: &[(&str, &str)] = &[
    (
        "apply pending changes first",
        "There are pending stake or commission changes not yet finalized by the indexer.",
    ),
    ("Not registered", "Your address has not been registered yet."),
    ("exceed daily", "You have exceeded your daily query limit."),
    (
        "invalid project id",
        "Please check the deployment id or the indexer's health.",
    ),
    ("exceed rate limit", "You have exceeded the query rate limit."),
    ("invalid request", "The request is invalid."),
    (
        "user rejected transaction",
        "The transaction has been rejected.",
    ),
    (
        "network does not support ENS",
        "The address is invalid or ENS is not supported on this network.",
    ),
];

const WALLET_CONNECTION_RULES: &[(&str, &str)] = &[(
    "No Ethereum provider was found on window.ethereum.",
    "Please install a wallet browser extension.",
)];

fn build(table: &[(&str, &str)]) -> Vec<ErrorRule> {
    table
        .iter()
        .map(|(pattern, message)| ErrorRule::new(*pattern, *message))
        .collect()
}

static DEFAULT: LazyLock<Vec<ErrorRule>> = LazyLock::new(|| build(DEFAULT_RULES));
static WALLET_CONNECTION: LazyLock<Vec<ErrorRule>> =
    LazyLock::new(|| build(WALLET_CONNECTION_RULES));

/// The standard rule table applied by the default classifier.
pub fn default_rules() -> &'static [ErrorRule] {
    &DEFAULT
}

/// Rules for wallet-connection failures, kept separate so connection
/// flows can classify against them alone.
pub fn wallet_connection_rules() -> &'static [ErrorRule] {
    &WALLET_CONNECTION
}
