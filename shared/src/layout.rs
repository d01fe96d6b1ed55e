//! Orientation-driven layout derivation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capabilities::{OrientationLock, RawOrientation, SubscriptionId, ViewportDimensions};
use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationState {
    #[default]
    Portrait,
    Landscape,
}

impl OrientationState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl From<RawOrientation> for OrientationState {
    fn from(raw: RawOrientation) -> Self {
        match raw {
            RawOrientation::LandscapeLeft | RawOrientation::LandscapeRight => Self::Landscape,
            RawOrientation::PortraitUp | RawOrientation::PortraitDown | RawOrientation::Unknown => {
                Self::Portrait
            }
        }
    }
}

/// Presentation geometry derived from orientation and viewport. Never
/// stored; build it with [`DerivedLayout::derive`] whenever it is read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedLayout {
    pub content_height: f64,
}

impl DerivedLayout {
    #[must_use]
    pub fn derive(
        orientation: OrientationState,
        viewport: ViewportDimensions,
        config: &LayoutConfig,
    ) -> Self {
        let content_height = match orientation {
            OrientationState::Landscape => {
                (viewport.height - config.landscape_chrome_height).max(0.0)
            }
            OrientationState::Portrait => config.portrait_content_height,
        };
        Self { content_height }
    }
}

/// Live orientation and viewport state for one video screen.
///
/// Rotation and dimension events arrive on independent subscriptions with
/// no relative ordering, so each handler only writes its own field.
#[derive(Debug, Clone, Default)]
pub struct OrientationEngine {
    orientation: OrientationState,
    viewport: ViewportDimensions,
    viewport_notified: bool,
    lock: OrientationLock,
    rotation_subscription: Option<SubscriptionId>,
    viewport_subscription: Option<SubscriptionId>,
}

impl OrientationEngine {
    pub const fn orientation(&self) -> OrientationState {
        self.orientation
    }

    pub const fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    pub const fn lock(&self) -> OrientationLock {
        self.lock
    }

    pub const fn is_active(&self) -> bool {
        self.rotation_subscription.is_some()
    }

    pub fn attach(&mut self, rotation: SubscriptionId, viewport: SubscriptionId) {
        *self = Self {
            rotation_subscription: Some(rotation),
            viewport_subscription: Some(viewport),
            ..Self::default()
        };
    }

    /// Hands back both subscription handles for release and resets the
    /// engine. Returns `None` for handles that were never taken.
    pub fn detach(&mut self) -> (Option<SubscriptionId>, Option<SubscriptionId>) {
        let handles = (
            self.rotation_subscription.take(),
            self.viewport_subscription.take(),
        );
        *self = Self::default();
        handles
    }

    /// Applies a rotation event delivered under `subscription`. Events from
    /// a released or superseded listener are ignored.
    pub fn on_rotation(&mut self, subscription: SubscriptionId, raw: RawOrientation) -> bool {
        if self.rotation_subscription != Some(subscription) {
            debug!(%subscription, "ignoring rotation from inactive subscription");
            return false;
        }
        self.orientation = OrientationState::from(raw);
        true
    }

    pub fn on_viewport_change(
        &mut self,
        subscription: SubscriptionId,
        dimensions: ViewportDimensions,
    ) -> bool {
        if self.viewport_subscription != Some(subscription) {
            debug!(%subscription, "ignoring dimensions from inactive subscription");
            return false;
        }
        self.viewport = dimensions;
        self.viewport_notified = true;
        true
    }

    /// Seeds the viewport from the one-off `Measure` query. A change
    /// notification that already arrived is newer and wins.
    pub fn on_viewport_measured(
        &mut self,
        subscription: SubscriptionId,
        dimensions: ViewportDimensions,
    ) -> bool {
        if self.viewport_subscription != Some(subscription) || self.viewport_notified {
            return false;
        }
        self.viewport = dimensions;
        true
    }

    /// Optimistically applies a lock before the shell confirms it.
    pub fn request_lock(&mut self, lock: OrientationLock) {
        self.lock = lock;
        match lock {
            OrientationLock::Portrait => self.orientation = OrientationState::Portrait,
            OrientationLock::Landscape => self.orientation = OrientationState::Landscape,
            OrientationLock::Unlocked => {}
        }
    }

    #[must_use]
    pub fn layout(&self, config: &LayoutConfig) -> DerivedLayout {
        DerivedLayout::derive(self.orientation, self.viewport, config)
    }

    #[must_use]
    pub fn layout_height(&self, config: &LayoutConfig) -> f64 {
        self.layout(config).content_height
    }
}
