use serde::{Deserialize, Serialize};

use crate::capabilities::OrientationLock;
use crate::error::Notice;
use crate::layout::OrientationState;
use crate::location::{ConnectivityState, LocationState};
use crate::model::{Model, Navigation};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapView {
    Loading {
        message: String,
    },
    Error {
        message: String,
        can_retry: bool,
    },
    Ready {
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
        latitude_text: String,
        longitude_text: String,
        connectivity: ConnectivityBanner,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectivityBanner {
    pub state: ConnectivityState,
    pub text: String,
}

impl From<ConnectivityState> for ConnectivityBanner {
    fn from(state: ConnectivityState) -> Self {
        let text = match state {
            ConnectivityState::Connected => "Connected to the internet",
            ConnectivityState::Disconnected => "No internet connection",
            ConnectivityState::Unknown => "Checking connection...",
        };
        Self {
            state,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VideoView {
    pub orientation: OrientationState,
    pub orientation_label: String,
    pub width: f64,
    pub height: f64,
    pub content_height: f64,
    pub embed_url: String,
    pub lock: OrientationLock,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MenuItemView {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub price_text: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuView {
    Loading,
    Ready { items: Vec<MenuItemView> },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub map: MapView,
    pub video: VideoView,
    pub menu: MenuView,
    pub notice: Option<Notice>,
    pub navigation: Option<Navigation>,
}

impl ViewModel {
    #[must_use]
    pub fn build(model: &Model) -> Self {
        Self {
            map: map_view(model),
            video: video_view(model),
            menu: menu_view(model),
            notice: model.notice.clone(),
            navigation: model.navigation,
        }
    }
}

fn map_view(model: &Model) -> MapView {
    match model.location.state() {
        LocationState::Loading => MapView::Loading {
            message: "Getting your location...".into(),
        },
        LocationState::Error { message } => MapView::Error {
            message: message.clone(),
            can_retry: true,
        },
        LocationState::Ready {
            latitude,
            longitude,
            span_lat,
            span_lon,
        } => MapView::Ready {
            latitude: *latitude,
            longitude: *longitude,
            latitude_delta: *span_lat,
            longitude_delta: *span_lon,
            latitude_text: format!("{latitude:.6}"),
            longitude_text: format!("{longitude:.6}"),
            connectivity: model.location.connectivity().into(),
        },
    }
}

fn video_view(model: &Model) -> VideoView {
    let engine = &model.orientation;
    let viewport = engine.viewport();
    let orientation = engine.orientation();
    VideoView {
        orientation,
        orientation_label: orientation.as_str().to_uppercase(),
        width: viewport.width.round(),
        height: viewport.height.round(),
        content_height: engine.layout_height(&model.config.layout),
        embed_url: model.config.video_embed_url(),
        lock: engine.lock(),
    }
}

fn menu_view(model: &Model) -> MenuView {
    if model.menu.loading {
        return MenuView::Loading;
    }
    MenuView::Ready {
        items: model
            .menu
            .items
            .iter()
            .map(|record| MenuItemView {
                id: record.id,
                title: record.title.clone(),
                category: record.category.clone(),
                price_text: record.price_text(),
                image_url: record.image_url.clone(),
            })
            .collect(),
    }
}
