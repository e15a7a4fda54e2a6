//! User feedback routed into the log

use streakline_core::UserFeedback;
use tracing::{error, info, warn};

/// Surfaces user-facing messages as log events under the
/// `streakline::feedback` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl UserFeedback for TracingFeedback {
    fn success(&self, message: &str) {
        info!(target: "streakline::feedback", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: "streakline::feedback", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "streakline::feedback", "{message}");
    }
}
