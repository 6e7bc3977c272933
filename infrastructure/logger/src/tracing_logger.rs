use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// [`Logger`] port backed by `tracing`; all events share one target so they
/// can be filtered with `RUST_LOG=product_catalogue=debug`.
pub struct TracingLogger;

const TARGET: &str = "product_catalogue";

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: TARGET, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: TARGET, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: TARGET, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: TARGET, "{}", message);
    }
}
