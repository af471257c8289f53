use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::Error;

/// Revert codes published with the network contracts, mapped to
/// human-readable reasons.
const BUNDLED_CODES: &str = include_str!("revert_codes.json");

/// Read-only map from a fixed-width contract revert code to the reason
/// shown to the user.
#[derive(Debug, Clone, Default)]
pub struct RevertCodeTable {
    codes: BTreeMap<String, String>,
}

impl RevertCodeTable {
    /// Build a table from a JSON object of `{"CODE": "reason"}` entries.
    /// Empty codes are rejected — an empty code would match every message.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let codes: BTreeMap<String, String> = serde_json::from_str(json)?;
        if codes.keys().any(|code| code.is_empty()) {
            return Err(Error::Table {
                reason: "revert codes must be non-empty".into(),
            });
        }
        Ok(Self { codes })
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Find the first code whose `reverted: <CODE>` form appears in the
    /// raw message. Codes are checked in lexicographic order.
    pub fn match_reverted(&self, raw: &str) -> Option<(&str, &str)> {
        self.codes.iter().find_map(|(code, reason)| {
            raw.contains(&format!("reverted: {code}"))
                .then(|| (code.as_str(), reason.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes
            .iter()
            .map(|(code, reason)| (code.as_str(), reason.as_str()))
    }
}

static BUNDLED: LazyLock<RevertCodeTable> = LazyLock::new(|| {
    // The bundled table is validated by tests; a load failure only
    // disables revert-code mapping, it cannot fail classification.
    RevertCodeTable::from_json(BUNDLED_CODES).unwrap_or_default()
});

/// The revert-code table bundled with the crate, loaded once per process.
pub fn default_revert_codes() -> &'static RevertCodeTable {
    &BUNDLED
}
