use tracing::{debug, info, instrument, warn};

use crate::capabilities::{
    Capabilities, OrientationLock, OrientationOutput, ViewportDimensions, ViewportOutput,
    ViewportResult,
};
use crate::catalog::decode_catalog;
use crate::error::{AppError, ErrorKind, Notice};
use crate::event::{Event, Screen};
use crate::location::{FixStep, PermissionStep};
use crate::model::{MenuModel, Model, Navigation};
use crate::view::ViewModel;

#[derive(Default)]
pub struct App;

impl App {
    /// Runs one acquisition cycle from the top. Any cycle still in flight
    /// is superseded; its late answers are discarded.
    #[instrument(skip_all)]
    fn acquire(model: &mut Model, caps: &Capabilities) {
        let cycle = model.location.begin_cycle();

        caps.network
            .get_network_state(move |result| Event::ConnectivitySampled { cycle, result });
        caps.location
            .request_foreground_permission(move |result| Event::PermissionResolved {
                cycle,
                result,
            });
    }

    fn activate_video(model: &mut Model, caps: &Capabilities) {
        Self::release_video(model, caps);

        let rotation = model.allocate_subscription();
        let viewport = model.allocate_subscription();
        model.orientation.attach(rotation, viewport);

        caps.orientation.subscribe(rotation, move |result| Event::RotationChanged {
            subscription: rotation,
            result,
        });
        caps.viewport.subscribe(viewport, move |result| Event::ViewportChanged {
            subscription: viewport,
            result,
        });
        caps.viewport.measure(move |result| Event::ViewportMeasured {
            subscription: viewport,
            result,
        });
        debug!(%rotation, %viewport, "orientation listeners registered");
    }

    fn release_video(model: &mut Model, caps: &Capabilities) {
        let was_active = model.orientation.is_active();
        let (rotation, viewport) = model.orientation.detach();
        if let Some(subscription) = rotation {
            caps.orientation.unsubscribe(subscription);
        }
        if let Some(subscription) = viewport {
            caps.viewport.unsubscribe(subscription);
        }
        if was_active {
            caps.orientation.lock(OrientationLock::Unlocked, |result| {
                Event::OrientationLockResolved {
                    lock: OrientationLock::Unlocked,
                    result,
                }
            });
        }
    }

    fn fetch_catalog(model: &mut Model, caps: &Capabilities) {
        match model.config.catalog_endpoint() {
            Ok(endpoint) => {
                debug!(host = endpoint.host(), "fetching catalog");
                model.menu.loading = true;
                caps.http
                    .get(endpoint.as_str())
                    .expect_json()
                    .send(Event::CatalogLoaded);
            }
            Err(e) => {
                model.menu.loading = false;
                model.report(AppError::new(ErrorKind::Configuration, e.to_string()));
                warn!(error = %e, "catalog endpoint rejected");
            }
        }
    }

    fn viewport_dimensions(result: ViewportResult) -> Option<ViewportDimensions> {
        match result {
            Ok(ViewportOutput::Dimensions(dimensions)) => Some(dimensions),
            Ok(ViewportOutput::Released) => None,
            Err(e) => {
                warn!(error = %e, "viewport provider error");
                None
            }
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), user = event.is_user_initiated(), "update");

        match event {
            Event::Configure(config) => match config.validate() {
                Ok(()) => {
                    info!("configuration applied");
                    model.config = config;
                }
                Err(e) => {
                    warn!(error = %e, "configuration rejected");
                    model.report(AppError::new(ErrorKind::Configuration, e.to_string()));
                }
            },

            Event::ScreenActivated(Screen::Map) => Self::acquire(model, caps),
            Event::ScreenActivated(Screen::Video) => Self::activate_video(model, caps),
            Event::ScreenActivated(Screen::Menu) => {
                model.navigation = None;
                Self::fetch_catalog(model, caps);
            }

            Event::ScreenDeactivated(Screen::Map) => {
                model.location.deactivate();
                model.dismiss_notice_from(Screen::Map);
            }
            Event::ScreenDeactivated(Screen::Video) => Self::release_video(model, caps),
            Event::ScreenDeactivated(Screen::Menu) => model.menu = MenuModel::default(),

            Event::RetryLocation => Self::acquire(model, caps),

            Event::ConnectivitySampled { cycle, result } => {
                if !model.location.apply_connectivity(cycle, result) {
                    return;
                }
            }

            Event::PermissionResolved { cycle, result } => {
                match model.location.apply_permission(cycle, result) {
                    PermissionStep::RequestFix => {
                        let accuracy = model.config.fix_accuracy;
                        caps.location.get_current_fix(accuracy, move |result| {
                            Event::FixResolved { cycle, result }
                        });
                    }
                    PermissionStep::Failed(failure) => {
                        model.alert(Screen::Map, AppError::from(&failure), failure.notice());
                    }
                    PermissionStep::Stale => return,
                }
            }

            Event::FixResolved { cycle, result } => {
                let span = model.span();
                match model.location.apply_fix(cycle, result, span) {
                    FixStep::Ready => {}
                    FixStep::Failed(failure) => {
                        model.alert(Screen::Map, AppError::from(&failure), failure.notice());
                    }
                    FixStep::Stale => return,
                }
            }

            Event::RotationChanged {
                subscription,
                result,
            } => match result {
                Ok(OrientationOutput::Changed(raw)) => {
                    if !model.orientation.on_rotation(subscription, raw) {
                        return;
                    }
                }
                Ok(_) => return,
                Err(e) => {
                    warn!(%subscription, error = %e, "rotation listener error");
                    return;
                }
            },

            Event::ViewportChanged {
                subscription,
                result,
            } => {
                let applied = Self::viewport_dimensions(result).is_some_and(|dimensions| {
                    model.orientation.on_viewport_change(subscription, dimensions)
                });
                if !applied {
                    return;
                }
            }

            Event::ViewportMeasured {
                subscription,
                result,
            } => {
                let applied = Self::viewport_dimensions(result).is_some_and(|dimensions| {
                    model.orientation.on_viewport_measured(subscription, dimensions)
                });
                if !applied {
                    return;
                }
            }

            Event::LockOrientation(lock) => {
                model.orientation.request_lock(lock);
                caps.orientation.lock(lock, move |result| {
                    Event::OrientationLockResolved { lock, result }
                });
            }

            Event::OrientationLockResolved { lock, result } => {
                // The optimistic value stays; a rejected lock is only logged.
                match result {
                    Ok(OrientationOutput::LockApplied(applied)) if applied != lock => {
                        warn!(?lock, ?applied, "shell applied a different rotation lock");
                    }
                    Ok(_) => debug!(?lock, "rotation lock applied"),
                    Err(e) => {
                        warn!(?lock, error = %e, "rotation lock request failed");
                        model.report(AppError::new(ErrorKind::OrientationLock, e.to_string()));
                    }
                }
                return;
            }

            Event::CatalogLoaded(result) => {
                model.menu.loading = false;
                match decode_catalog(result) {
                    Ok(items) => {
                        info!(count = items.len(), "catalog loaded");
                        model.menu.items = items;
                    }
                    Err(e) => {
                        warn!(error = %e, "catalog request failed");
                        model.menu.items.clear();
                        model.alert(
                            Screen::Menu,
                            AppError::from(&e),
                            Notice::new("Error", "Could not load products"),
                        );
                    }
                }
            }

            Event::SignOutRequested => {
                caps.session.sign_out(Event::SignOutResolved);
                return;
            }

            Event::SignOutResolved(result) => match result {
                Ok(()) => {
                    info!("signed out");
                    model.navigation = Some(Navigation::ReplaceWithLogin);
                }
                Err(e) => {
                    warn!(error = %e, "sign-out failed");
                    model.alert(
                        Screen::Menu,
                        AppError::from(&e),
                        Notice::new("Error", "Could not sign out"),
                    );
                }
            },

            Event::NoticeDismissed => model.dismiss_notice(),
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::build(model)
    }
}
