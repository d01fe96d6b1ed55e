use serde::{Deserialize, Serialize};

use crate::capabilities::SubscriptionId;
use crate::catalog::CatalogRecord;
use crate::config::Config;
use crate::error::{AppError, Notice};
use crate::event::Screen;
use crate::layout::OrientationEngine;
use crate::location::{LocationController, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    ReplaceWithLogin,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuModel {
    pub loading: bool,
    pub items: Vec<CatalogRecord>,
}

/// Per-process core state. Each screen's slice is rebuilt on activation and
/// dropped on deactivation; nothing here is persisted.
#[derive(Debug, Default)]
pub struct Model {
    pub config: Config,
    pub location: LocationController,
    pub orientation: OrientationEngine,
    pub menu: MenuModel,
    pub notice: Option<Notice>,
    pub navigation: Option<Navigation>,
    pub last_error: Option<AppError>,
    notice_origin: Option<Screen>,
    next_subscription: u64,
}

impl Model {
    pub fn allocate_subscription(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        SubscriptionId(self.next_subscription)
    }

    #[must_use]
    pub fn span(&self) -> Span {
        Span {
            lat: self.config.span_lat,
            lon: self.config.span_lon,
        }
    }

    /// Records a failure for diagnostics only.
    pub fn report(&mut self, error: AppError) {
        self.last_error = Some(error);
    }

    /// Records a failure raised by `origin` and, when it is user-facing,
    /// raises the blocking notice on behalf of that screen.
    pub fn alert(&mut self, origin: Screen, error: AppError, notice: Notice) {
        if error.is_surfaced() {
            self.notice = Some(notice);
            self.notice_origin = Some(origin);
        }
        self.report(error);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.notice_origin = None;
    }

    /// Drops the notice if `origin` raised it, so it does not outlive the
    /// screen it belongs to.
    pub fn dismiss_notice_from(&mut self, origin: Screen) {
        if self.notice_origin == Some(origin) {
            self.dismiss_notice();
        }
    }
}
