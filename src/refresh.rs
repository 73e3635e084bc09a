//! Refresh status state machine.
//!
//! `Idle -> Checking -> {Updated, Error}`, and back to `Checking` on the next
//! tick or out-of-cycle check. Only one check may be outstanding at a time.

use chrono::{DateTime, Local};

use crate::error::FetchError;
use crate::types::Snapshot;
use crate::view::{Applied, Dashboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Idle,
    Checking,
    Updated,
    Error,
}

/// What settling a check did to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied(Applied),
    Failed,
}

impl Outcome {
    /// Whether the "new data" banner should be shown.
    pub fn is_new_data(self) -> bool {
        self == Outcome::Applied(Applied::Changed)
    }
}

#[derive(Debug, Clone)]
pub struct RefreshController {
    status: RefreshStatus,
    last_check: Option<DateTime<Local>>,
    in_flight: bool,
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshController {
    pub fn new() -> Self {
        Self {
            status: RefreshStatus::Idle,
            last_check: None,
            in_flight: false,
        }
    }

    pub fn status(&self) -> RefreshStatus {
        self.status
    }

    pub fn last_check(&self) -> Option<DateTime<Local>> {
        self.last_check
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Enter `Checking`. Returns `false` if a check is already outstanding.
    pub fn begin_check(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.status = RefreshStatus::Checking;
        true
    }

    /// Settle the outstanding check against `dashboard`.
    ///
    /// On failure the dashboard is left untouched.
    pub fn settle(
        &mut self,
        result: Result<Snapshot, FetchError>,
        dashboard: &mut Dashboard,
        now: DateTime<Local>,
    ) -> Outcome {
        self.in_flight = false;
        self.last_check = Some(now);
        match result {
            Ok(snapshot) => {
                let applied = dashboard.apply_snapshot(snapshot);
                self.status = RefreshStatus::Updated;
                Outcome::Applied(applied)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Feed check failed");
                self.status = RefreshStatus::Error;
                Outcome::Failed
            }
        }
    }
}
