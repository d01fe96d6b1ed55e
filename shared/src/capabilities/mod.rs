mod http;
mod location;
mod network;
mod orientation;
mod session;
mod viewport;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::http::{Http, HttpError, ValidatedUrl};
pub use self::location::{
    Accuracy, Fix, Location, LocationError, LocationOperation, LocationOutput, LocationResult,
    PermissionStatus,
};
pub use self::network::{Network, NetworkError, NetworkOperation, NetworkResult, NetworkState};
pub use self::orientation::{
    Orientation, OrientationError, OrientationLock, OrientationOperation, OrientationOutput,
    OrientationResult, RawOrientation,
};
pub use self::session::{Session, SessionError, SessionOperation, SessionResult};
pub use self::viewport::{
    Viewport, ViewportDimensions, ViewportError, ViewportOperation, ViewportOutput,
    ViewportResult,
};

// Crux's built-in Render capability covers view updates as-is.
pub use crux_core::render::Render;

use crate::event::Event;

/// Handle for a listener registered in the shell. Released with the
/// matching `Unsubscribe` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub location: Location<Event>,
    pub network: Network<Event>,
    pub orientation: Orientation<Event>,
    pub viewport: Viewport<Event>,
    pub session: Session<Event>,
}
