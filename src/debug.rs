//! Development-only debugger wait hook
//!
//! When both the `listener.allow_debugger_wait` setting and the project's
//! `_DebugRazorSnapshot_` property (`true`, any case) ask for it, event
//! processing pauses until a debugger attaches or the wait times out.
//! Disabled by default and kept out of the snapshot pipeline itself.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::ListenerConfig;
use crate::project::{ProjectPropertyView, properties};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct DebuggerWait {
    enabled: bool,
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for DebuggerWait {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DebuggerWait {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            timeout: Duration::ZERO,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn from_settings(config: &ListenerConfig) -> Self {
        Self {
            enabled: config.allow_debugger_wait,
            timeout: config.debugger_wait_timeout(),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn is_requested(&self, project: &dyn ProjectPropertyView) -> bool {
        self.enabled
            && project
                .property(properties::DEBUG_WAIT)
                .eq_ignore_ascii_case("true")
    }

    /// Returns whether a debugger is attached when the wait ends
    pub async fn maybe_wait(&self, project: &dyn ProjectPropertyView) -> bool {
        if !self.is_requested(project) {
            return false;
        }

        info!(pid = std::process::id(), "Waiting for debugger to attach");
        // A timeout too large to represent means no deadline
        let deadline = Instant::now().checked_add(self.timeout);
        while !is_debugger_attached() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!(timeout = ?self.timeout, "No debugger attached, continuing");
                return false;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        true
    }
}

/// Whether a tracer is attached to this process
#[cfg(target_os = "linux")]
pub fn is_debugger_attached() -> bool {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find_map(|line| line.strip_prefix("TracerPid:"))
                .map(|pid| pid.trim() != "0")
        })
        .unwrap_or(false)
}

#[cfg(not(target_os = "linux"))]
pub fn is_debugger_attached() -> bool {
    false
}
