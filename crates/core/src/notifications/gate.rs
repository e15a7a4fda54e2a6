//! Notification permission state machine
//!
//! ```text
//! Unsupported (terminal)
//! Undetermined --request--> Granted | Denied
//! Denied --(changed outside the app, seen on refresh)--> Granted
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use streakline_domain::constants::{
    NOTIFICATIONS_ENABLED_MESSAGE, NOTIFICATIONS_REQUIRED_MESSAGE,
    NOTIFICATIONS_UNSUPPORTED_MESSAGE, PERMISSION_REQUEST_FAILED_MESSAGE,
};
use streakline_domain::{impl_domain_enum_conversions, PlatformPermission};
use tracing::{info, instrument, warn};

use super::ports::{NotificationPlatform, UserFeedback};

/// Whether notifications may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Unsupported,
    Undetermined,
    Granted,
    Denied,
}

impl_domain_enum_conversions!(PermissionState {
    Unsupported => "unsupported",
    Undetermined => "undetermined",
    Granted => "granted",
    Denied => "denied",
});

impl From<PlatformPermission> for PermissionState {
    fn from(permission: PlatformPermission) -> Self {
        match permission {
            PlatformPermission::Granted => Self::Granted,
            PlatformPermission::Denied => Self::Denied,
            PlatformPermission::Default => Self::Undetermined,
        }
    }
}

/// Tracks platform notification permission and asks for it when needed
///
/// Permission problems are surfaced through [`UserFeedback`] once per state;
/// asking again while still denied stays quiet until the state changes.
pub struct NotificationGate {
    platform: Arc<dyn NotificationPlatform>,
    feedback: Arc<dyn UserFeedback>,
    state: RwLock<PermissionState>,
    reported: Mutex<Option<PermissionState>>,
}

impl NotificationGate {
    /// Inspect the platform and start in the matching state
    pub fn new(platform: Arc<dyn NotificationPlatform>, feedback: Arc<dyn UserFeedback>) -> Self {
        let state = inspect(platform.as_ref());
        info!(%state, "Notification gate initialised");
        Self { platform, feedback, state: RwLock::new(state), reported: Mutex::new(None) }
    }

    pub fn state(&self) -> PermissionState {
        *self.state.read()
    }

    pub fn is_granted(&self) -> bool {
        self.state() == PermissionState::Granted
    }

    /// Re-read the platform permission to pick up changes made outside the
    /// app. `Unsupported` never changes.
    pub fn refresh(&self) -> PermissionState {
        let mut state = self.state.write();
        if *state == PermissionState::Unsupported {
            return *state;
        }

        let observed = inspect(self.platform.as_ref());
        if observed != *state {
            info!(from = %*state, to = %observed, "Notification permission changed");
            *state = observed;
            *self.reported.lock() = None;
        }
        observed
    }

    /// Make sure permission is granted, prompting the user if it is still
    /// undetermined.
    ///
    /// Safe to call repeatedly: a granted or denied gate never prompts again.
    /// Outcomes are reported through [`UserFeedback`]; nothing is returned as
    /// an error.
    #[instrument(skip(self))]
    pub async fn request_permission(&self) -> PermissionState {
        match self.refresh() {
            PermissionState::Granted => return PermissionState::Granted,
            PermissionState::Unsupported => {
                self.report_once(PermissionState::Unsupported, |feedback| {
                    feedback.error(NOTIFICATIONS_UNSUPPORTED_MESSAGE)
                });
                return PermissionState::Unsupported;
            }
            PermissionState::Denied => {
                self.report_once(PermissionState::Denied, |feedback| {
                    feedback.warning(NOTIFICATIONS_REQUIRED_MESSAGE)
                });
                return PermissionState::Denied;
            }
            PermissionState::Undetermined => {}
        }

        match self.platform.request_permission().await {
            Ok(answer) => {
                let next = PermissionState::from(answer);
                *self.state.write() = next;
                info!(%answer, state = %next, "Notification permission answered");

                if next == PermissionState::Granted {
                    self.report_once(next, |feedback| feedback.success(NOTIFICATIONS_ENABLED_MESSAGE));
                } else {
                    self.report_once(next, |feedback| feedback.warning(NOTIFICATIONS_REQUIRED_MESSAGE));
                }
                next
            }
            Err(err) => {
                warn!(error = %err, "Notification permission request failed");
                self.feedback.error(PERMISSION_REQUEST_FAILED_MESSAGE);
                self.state()
            }
        }
    }

    fn report_once(&self, state: PermissionState, report: impl FnOnce(&dyn UserFeedback)) {
        let mut reported = self.reported.lock();
        if *reported != Some(state) {
            report(self.feedback.as_ref());
            *reported = Some(state);
        }
    }
}

fn inspect(platform: &dyn NotificationPlatform) -> PermissionState {
    if platform.is_supported() {
        PermissionState::from(platform.permission())
    } else {
        PermissionState::Unsupported
    }
}
