//! Location/connectivity acquisition state machine.
//!
//! One cycle is: sample connectivity (best effort), request foreground
//! permission, then request a fix. Every shell answer carries the
//! [`CycleId`] it was issued under; answers for anything but the latest
//! cycle are dropped, so a superseded cycle can never write a final state.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::capabilities::{Fix, LocationError, NetworkResult, PermissionStatus};
use crate::error::AcquisitionError;

/// Generation token of one acquisition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleId(pub u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle-{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LocationState {
    #[default]
    Loading,
    Error {
        message: String,
    },
    Ready {
        latitude: f64,
        longitude: f64,
        span_lat: f64,
        span_lon: f64,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

/// Fixed map zoom applied to every successful fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub lat: f64,
    pub lon: f64,
}

/// What the app must do after a permission answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionStep {
    RequestFix,
    Failed(AcquisitionError),
    Stale,
}

/// Outcome of applying a fix answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStep {
    Ready,
    Failed(AcquisitionError),
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct LocationController {
    state: LocationState,
    connectivity: ConnectivityState,
    generation: u64,
    in_flight: Option<CycleId>,
}

impl LocationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    pub const fn connectivity(&self) -> ConnectivityState {
        self.connectivity
    }

    pub const fn in_flight(&self) -> Option<CycleId> {
        self.in_flight
    }

    /// Starts a new cycle, superseding any cycle still in flight.
    ///
    /// Location and connectivity are reset; prior values are discarded.
    pub fn begin_cycle(&mut self) -> CycleId {
        self.generation += 1;
        let cycle = CycleId(self.generation);
        if let Some(previous) = self.in_flight.replace(cycle) {
            debug!(%previous, %cycle, "superseding in-flight acquisition cycle");
        }
        self.state = LocationState::Loading;
        self.connectivity = ConnectivityState::Unknown;
        info!(%cycle, "acquisition cycle started");
        cycle
    }

    /// Drops the screen's state and orphans any in-flight cycle. The
    /// generation counter keeps counting so late answers stay stale.
    pub fn deactivate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.state = LocationState::Loading;
        self.connectivity = ConnectivityState::Unknown;
    }

    #[must_use]
    pub fn is_current(&self, cycle: CycleId) -> bool {
        self.in_flight == Some(cycle)
    }

    /// Connectivity is a side annotation: it never touches `LocationState`
    /// and a failed check leaves it `Unknown`. Returns whether it applied.
    pub fn apply_connectivity(&mut self, cycle: CycleId, result: NetworkResult) -> bool {
        if cycle.0 != self.generation {
            debug!(%cycle, "discarding stale connectivity sample");
            return false;
        }
        match result {
            Ok(network) => {
                self.connectivity = if network.is_online() {
                    ConnectivityState::Connected
                } else {
                    ConnectivityState::Disconnected
                };
            }
            Err(e) => {
                warn!(%cycle, error = %e, "connectivity check failed");
                self.connectivity = ConnectivityState::Unknown;
            }
        }
        true
    }

    pub fn apply_permission(
        &mut self,
        cycle: CycleId,
        result: Result<PermissionStatus, LocationError>,
    ) -> PermissionStep {
        if !self.is_current(cycle) {
            debug!(%cycle, "discarding stale permission answer");
            return PermissionStep::Stale;
        }
        let failure = match result {
            Ok(PermissionStatus::Granted) => return PermissionStep::RequestFix,
            Ok(PermissionStatus::Denied) => AcquisitionError::PermissionDenied,
            Err(e) => AcquisitionError::from(e),
        };
        self.fail(cycle, &failure);
        PermissionStep::Failed(failure)
    }

    pub fn apply_fix(
        &mut self,
        cycle: CycleId,
        result: Result<Fix, LocationError>,
        span: Span,
    ) -> FixStep {
        if !self.is_current(cycle) {
            debug!(%cycle, "discarding stale location fix");
            return FixStep::Stale;
        }
        let failure = match result.map_err(AcquisitionError::from).and_then(validate_fix) {
            Ok(fix) => {
                self.state = LocationState::Ready {
                    latitude: fix.latitude,
                    longitude: fix.longitude,
                    span_lat: span.lat,
                    span_lon: span.lon,
                };
                self.in_flight = None;
                info!(%cycle, "acquisition cycle ready");
                return FixStep::Ready;
            }
            Err(failure) => failure,
        };
        self.fail(cycle, &failure);
        FixStep::Failed(failure)
    }

    fn fail(&mut self, cycle: CycleId, failure: &AcquisitionError) {
        warn!(%cycle, error = ?failure, "acquisition cycle failed");
        self.state = LocationState::Error {
            message: failure.to_string(),
        };
        self.in_flight = None;
    }
}

fn validate_fix(fix: Fix) -> Result<Fix, AcquisitionError> {
    if !fix.latitude.is_finite() || !fix.longitude.is_finite() {
        return Err(AcquisitionError::fetch_failed("coordinate is not finite"));
    }
    if !(-90.0..=90.0).contains(&fix.latitude) {
        return Err(AcquisitionError::fetch_failed(format!(
            "latitude {} is out of range",
            fix.latitude
        )));
    }
    if !(-180.0..=180.0).contains(&fix.longitude) {
        return Err(AcquisitionError::fetch_failed(format!(
            "longitude {} is out of range",
            fix.longitude
        )));
    }
    Ok(fix)
}
