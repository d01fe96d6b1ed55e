use serde::{Deserialize, Serialize};

use crate::capabilities::{
    Fix, LocationError, NetworkResult, OrientationLock, OrientationResult, PermissionStatus,
    SessionResult, SubscriptionId, ViewportResult,
};
use crate::catalog::CatalogRecord;
use crate::config::Config;
use crate::location::CycleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Menu,
    Map,
    Video,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum Event {
    // Shell -> core
    Configure(Config),
    ScreenActivated(Screen),
    ScreenDeactivated(Screen),
    RetryLocation,
    LockOrientation(OrientationLock),
    NoticeDismissed,
    SignOutRequested,

    // Capability callbacks
    #[serde(skip)]
    ConnectivitySampled {
        cycle: CycleId,
        result: NetworkResult,
    },
    #[serde(skip)]
    PermissionResolved {
        cycle: CycleId,
        result: Result<PermissionStatus, LocationError>,
    },
    #[serde(skip)]
    FixResolved {
        cycle: CycleId,
        result: Result<Fix, LocationError>,
    },
    #[serde(skip)]
    RotationChanged {
        subscription: SubscriptionId,
        result: OrientationResult,
    },
    #[serde(skip)]
    ViewportChanged {
        subscription: SubscriptionId,
        result: ViewportResult,
    },
    #[serde(skip)]
    ViewportMeasured {
        subscription: SubscriptionId,
        result: ViewportResult,
    },
    #[serde(skip)]
    OrientationLockResolved {
        lock: OrientationLock,
        result: OrientationResult,
    },
    #[serde(skip)]
    CatalogLoaded(crux_http::Result<crux_http::Response<Vec<CatalogRecord>>>),
    #[serde(skip)]
    SignOutResolved(SessionResult),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::ScreenActivated(_) => "screen_activated",
            Self::ScreenDeactivated(_) => "screen_deactivated",
            Self::RetryLocation => "retry_location",
            Self::LockOrientation(_) => "lock_orientation",
            Self::NoticeDismissed => "notice_dismissed",
            Self::SignOutRequested => "sign_out_requested",
            Self::ConnectivitySampled { .. } => "connectivity_sampled",
            Self::PermissionResolved { .. } => "permission_resolved",
            Self::FixResolved { .. } => "fix_resolved",
            Self::RotationChanged { .. } => "rotation_changed",
            Self::ViewportChanged { .. } => "viewport_changed",
            Self::ViewportMeasured { .. } => "viewport_measured",
            Self::OrientationLockResolved { .. } => "orientation_lock_resolved",
            Self::CatalogLoaded(_) => "catalog_loaded",
            Self::SignOutResolved(_) => "sign_out_resolved",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::RetryLocation
                | Self::LockOrientation(_)
                | Self::NoticeDismissed
                | Self::SignOutRequested
        )
    }
}
