/// Side-effect port for diagnostic capture.
///
/// The classifier reports raw messages that operators should review
/// (unrecognized errors, low-level call failures) through this trait so
/// hosts can route them to their telemetry backend and tests can assert
/// on capture calls without one.
pub trait DiagnosticSink: Sync {
    fn capture(&self, message: &str);
}

/// Default sink — forwards captures to the `tracing` subscriber.
///
/// The crate never installs a subscriber; the host application decides
/// where (or whether) these records go.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn capture(&self, message: &str) {
        tracing::error!(target: "staking_dapp_display::diagnostics", "{message}");
    }
}
