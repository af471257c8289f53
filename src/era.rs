use serde::{Deserialize, Serialize};

/// Index of a reward/staking era on the indexing network.
pub type EraIndex = u32;

/// An era-stamped snapshot as produced by the upstream query layer.
///
/// `value` is effective as of the era the snapshot was recorded in;
/// `value_after` takes effect one era later when a pending change exists.
/// Either field may be absent — a missing snapshot is an expected state,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EraValue<T> {
    /// Era the snapshot was recorded in.
    pub era: EraIndex,
    /// Value effective as of `era`.
    #[serde(default)]
    pub value: Option<T>,
    /// Value that becomes effective at era `era + 1`, if a change is pending.
    #[serde(default)]
    pub value_after: Option<T>,
}

/// The wire form of an era snapshot: amounts arrive as JSON numbers,
/// decimal strings, `0x` hex strings, or serialized big-number objects.
pub type RawEraValue = EraValue<serde_json::Value>;

impl<T> EraValue<T> {
    /// Apply a caller-supplied, possibly failing conversion to both value
    /// fields. Unit conversion stays out of the resolver itself.
    pub fn map<U>(&self, f: impl Fn(&T) -> Option<U>) -> EraValue<U> {
        EraValue {
            era: self.era,
            value: self.value.as_ref().and_then(&f),
            value_after: self.value_after.as_ref().and_then(&f),
        }
    }
}

/// A resolved, display-ready era value pair.
///
/// `after` is strictly a forward-looking projection tied to the next era
/// boundary; when present it is never already in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentEraValue<T> {
    pub current: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<T>,
}

impl<T> CurrentEraValue<T> {
    /// Post-resolution display scaling (decimal formatting, percentages).
    pub fn map<U>(self, f: impl Fn(T) -> U) -> CurrentEraValue<U> {
        CurrentEraValue {
            current: f(self.current),
            after: self.after.map(f),
        }
    }

    /// Sort-comparator support: a missing `after` means "no scheduled
    /// change" and must sort as equal to `current`, never as zero.
    pub fn after_or_current(&self) -> &T {
        self.after.as_ref().unwrap_or(&self.current)
    }

    pub fn has_pending_change(&self) -> bool {
        self.after.is_some()
    }
}

/// Resolve an era-stamped snapshot against the network's current era.
///
/// With no current era (era data not yet loaded) the pending value's
/// applicability cannot be determined, so `after` is left out. Once the
/// current era has advanced past the snapshot's era, the pending value has
/// crossed the boundary and becomes `current`. An `after` equal to
/// `current` is normalized away so the UI never renders a redundant
/// "next era" row. Never panics; missing fields degrade to `T::default()`.
pub fn parse_raw_era_value<T>(
    snapshot: &EraValue<T>,
    current_era: Option<EraIndex>,
) -> CurrentEraValue<T>
where
    T: Clone + Default + PartialEq,
{
    let recorded = snapshot.value.clone();
    let pending = snapshot.value_after.clone();

    let Some(current_era) = current_era else {
        return CurrentEraValue {
            current: recorded.unwrap_or_default(),
            after: None,
        };
    };

    if snapshot.era < current_era {
        return CurrentEraValue {
            current: pending.or(recorded).unwrap_or_default(),
            after: None,
        };
    }

    let current = recorded.unwrap_or_default();
    let after = pending.filter(|p| *p != current);
    CurrentEraValue { current, after }
}

/// Standard token-amount conversion used by the display layer.
pub fn convert_raw_era_value(raw: &RawEraValue) -> EraValue<u128> {
    raw.map(parse_big_amount)
}

/// Parse a wire-format amount into a `u128`.
///
/// Accepts a JSON number, a decimal string, a `0x` hex string, or the
/// serialized big-number object shape `{"type": "BigNumber", "hex": "0x…"}`.
/// Anything else, including overflow, is `None`.
pub fn parse_big_amount(value: &serde_json::Value) -> Option<u128> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(u128::from),
        serde_json::Value::String(s) => parse_amount_str(s),
        serde_json::Value::Object(obj) => {
            if obj.get("type").and_then(|t| t.as_str()) != Some("BigNumber") {
                return None;
            }
            obj.get("hex")
                .and_then(|h| h.as_str())
                .and_then(parse_amount_str)
        }
        _ => None,
    }
}

fn parse_amount_str(s: &str) -> Option<u128> {
    match s.strip_prefix("0x") {
        Some(hex) => u128::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}
