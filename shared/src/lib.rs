#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod location;
pub mod model;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{Config, LayoutConfig};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{AcquisitionError, AppError, ErrorKind, ErrorSeverity, Notice};
pub use event::{Event, Screen};
pub use layout::{DerivedLayout, OrientationEngine, OrientationState};
pub use location::{ConnectivityState, CycleId, LocationController, LocationState};
pub use model::{Model, Navigation};
pub use view::{MapView, MenuView, VideoView, ViewModel};
