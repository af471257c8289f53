#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod classify;
pub mod deployment;
pub mod diagnostics;
pub mod era;
pub mod error;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use classify::revert::{RevertCodeTable, default_revert_codes};
pub use classify::rules::{ErrorRule, default_rules, wallet_connection_rules};
pub use classify::{
    Category, Classification, Classifier, GENERAL_ERROR_MSG, USER_DENIED_SIGNATURE,
    parse_error, raw_error_message,
};
pub use deployment::DeploymentMetadata;
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use era::{
    CurrentEraValue, EraIndex, EraValue, RawEraValue, convert_raw_era_value, parse_big_amount,
    parse_raw_era_value,
};
pub use error::Error;
