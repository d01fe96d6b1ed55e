#![allow(dead_code)]

use crux_core::testing::{AppTester, Update};
use crux_core::Request;
use crux_http::protocol::HttpRequest;
use shared::capabilities::{
    LocationOperation, NetworkOperation, OrientationOperation, SessionOperation,
    ViewportOperation,
};
use shared::{App, Effect, Event, Model};

/// Shell requests raised by one or more updates, sorted by capability.
#[derive(Default)]
pub struct Pending {
    pub location: Vec<Request<LocationOperation>>,
    pub network: Vec<Request<NetworkOperation>>,
    pub orientation: Vec<Request<OrientationOperation>>,
    pub viewport: Vec<Request<ViewportOperation>>,
    pub session: Vec<Request<SessionOperation>>,
    pub http: Vec<Request<HttpRequest>>,
    pub renders: usize,
}

impl Pending {
    pub fn take_location(
        &mut self,
        matches: impl Fn(&LocationOperation) -> bool,
    ) -> Option<Request<LocationOperation>> {
        let index = self.location.iter().position(|r| matches(&r.operation))?;
        Some(self.location.remove(index))
    }

    pub fn take_orientation(
        &mut self,
        matches: impl Fn(&OrientationOperation) -> bool,
    ) -> Option<Request<OrientationOperation>> {
        let index = self.orientation.iter().position(|r| matches(&r.operation))?;
        Some(self.orientation.remove(index))
    }

    pub fn take_viewport(
        &mut self,
        matches: impl Fn(&ViewportOperation) -> bool,
    ) -> Option<Request<ViewportOperation>> {
        let index = self.viewport.iter().position(|r| matches(&r.operation))?;
        Some(self.viewport.remove(index))
    }

    fn absorb(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Location(request) => self.location.push(request),
                Effect::Network(request) => self.network.push(request),
                Effect::Orientation(request) => self.orientation.push(request),
                Effect::Viewport(request) => self.viewport.push(request),
                Effect::Session(request) => self.session.push(request),
                Effect::Http(request) => self.http.push(request),
                Effect::Render(_) => self.renders += 1,
            }
        }
    }
}

/// Applies an update's effects and replays every event it produced until
/// the core goes quiet.
pub fn settle(
    app: &AppTester<App, Effect>,
    update: Update<Effect, Event>,
    model: &mut Model,
) -> Pending {
    let mut pending = Pending::default();
    let mut queue = vec![update];
    while let Some(update) = queue.pop() {
        pending.absorb(update.effects);
        for event in update.events {
            queue.push(app.update(event, model));
        }
    }
    pending
}

pub fn send(app: &AppTester<App, Effect>, event: Event, model: &mut Model) -> Pending {
    let update = app.update(event, model);
    settle(app, update, model)
}
