mod common;

use assert_matches::assert_matches;
use common::{send, settle};
use crux_core::testing::AppTester;
use shared::capabilities::{
    Fix, LocationError, LocationOperation, LocationOutput, NetworkError, NetworkState,
    PermissionStatus,
};
use shared::{
    App, ConnectivityState, Effect, Event, LocationState, MapView, Model, Notice, Screen,
};

fn granted() -> Result<LocationOutput, LocationError> {
    Ok(LocationOutput::Permission(PermissionStatus::Granted))
}

fn fix(latitude: f64, longitude: f64) -> Result<LocationOutput, LocationError> {
    Ok(LocationOutput::Fix(Fix {
        latitude,
        longitude,
        accuracy_m: Some(12.0),
    }))
}

fn is_permission(op: &LocationOperation) -> bool {
    matches!(op, LocationOperation::RequestForegroundPermission)
}

fn is_fix(op: &LocationOperation) -> bool {
    matches!(op, LocationOperation::GetCurrentFix { .. })
}

#[test]
fn granted_permission_and_fix_end_ready() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    assert_eq!(model.location.state(), &LocationState::Loading);
    assert_eq!(pending.network.len(), 1, "connectivity is sampled every cycle");
    assert!(pending.renders > 0);

    let mut permission = pending.take_location(is_permission).expect("permission request");
    let update = app.resolve(&mut permission, granted()).expect("resolve permission");
    let mut pending = settle(&app, update, &mut model);

    let mut fix_request = pending.take_location(is_fix).expect("fix request");
    assert_matches!(
        fix_request.operation,
        LocationOperation::GetCurrentFix { accuracy: shared::capabilities::Accuracy::High }
    );
    let update = app
        .resolve(&mut fix_request, fix(37.7749, -122.4194))
        .expect("resolve fix");
    settle(&app, update, &mut model);

    assert_eq!(
        model.location.state(),
        &LocationState::Ready {
            latitude: 37.7749,
            longitude: -122.4194,
            span_lat: 0.01,
            span_lon: 0.01,
        }
    );
    assert_eq!(model.notice, None);
    assert_matches!(app.view(&model).map, MapView::Ready { .. });
}

#[test]
fn denied_permission_never_requests_a_fix() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut permission = pending.take_location(is_permission).expect("permission request");
    let update = app
        .resolve(
            &mut permission,
            Ok(LocationOutput::Permission(PermissionStatus::Denied)),
        )
        .expect("resolve permission");
    let pending = settle(&app, update, &mut model);

    assert!(pending.location.is_empty(), "fix provider must not be invoked");
    assert_eq!(
        model.location.state(),
        &LocationState::Error {
            message: "permission denied".into()
        }
    );
    assert_eq!(
        model.notice,
        Some(Notice::new(
            "Permission Denied",
            "The app needs access to your location to work"
        ))
    );
    assert_matches!(
        app.view(&model).map,
        MapView::Error { can_retry: true, .. }
    );
}

#[test]
fn fix_failure_is_retriable() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut permission = pending.take_location(is_permission).unwrap();
    let mut pending = settle(&app, app.resolve(&mut permission, granted()).unwrap(), &mut model);
    let mut fix_request = pending.take_location(is_fix).unwrap();
    let update = app
        .resolve(&mut fix_request, Err(LocationError::Timeout))
        .unwrap();
    settle(&app, update, &mut model);

    assert_eq!(
        model.location.state(),
        &LocationState::Error {
            message: "location fetch failed".into()
        }
    );
    assert_eq!(
        model.notice.as_ref().map(|n| n.message.as_str()),
        Some("Could not get your location")
    );

    send(&app, Event::NoticeDismissed, &mut model);
    assert_eq!(model.notice, None);

    let mut pending = send(&app, Event::RetryLocation, &mut model);
    assert_eq!(model.location.state(), &LocationState::Loading);
    let mut permission = pending.take_location(is_permission).unwrap();
    let mut pending = settle(&app, app.resolve(&mut permission, granted()).unwrap(), &mut model);
    let mut fix_request = pending.take_location(is_fix).unwrap();
    settle(
        &app,
        app.resolve(&mut fix_request, fix(48.8566, 2.3522)).unwrap(),
        &mut model,
    );

    assert_matches!(
        model.location.state(),
        LocationState::Ready { latitude, .. } if *latitude == 48.8566
    );
}

#[test]
fn retry_supersedes_in_flight_cycle() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    // Cycle A gets as far as a pending fix request.
    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut permission_a = pending.take_location(is_permission).unwrap();
    let mut pending_a = settle(&app, app.resolve(&mut permission_a, granted()).unwrap(), &mut model);
    let mut fix_a = pending_a.take_location(is_fix).unwrap();

    // Cycle B starts before A resolves.
    let mut pending_b = send(&app, Event::RetryLocation, &mut model);
    let mut permission_b = pending_b.take_location(is_permission).unwrap();

    // A's fix lands late and must be ignored.
    settle(&app, app.resolve(&mut fix_a, fix(1.0, 1.0)).unwrap(), &mut model);
    assert_eq!(model.location.state(), &LocationState::Loading);

    let mut pending_b = settle(&app, app.resolve(&mut permission_b, granted()).unwrap(), &mut model);
    let mut fix_b = pending_b.take_location(is_fix).unwrap();
    settle(&app, app.resolve(&mut fix_b, fix(2.0, 3.0)).unwrap(), &mut model);

    assert_eq!(
        model.location.state(),
        &LocationState::Ready {
            latitude: 2.0,
            longitude: 3.0,
            span_lat: 0.01,
            span_lon: 0.01,
        }
    );
}

#[test]
fn second_acquisition_after_first_resolves_ends_in_single_state() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut permission = pending.take_location(is_permission).unwrap();
    let mut pending = settle(&app, app.resolve(&mut permission, granted()).unwrap(), &mut model);
    let mut first_fix = pending.take_location(is_fix).unwrap();
    settle(&app, app.resolve(&mut first_fix, fix(5.0, 5.0)).unwrap(), &mut model);
    assert_matches!(model.location.state(), LocationState::Ready { .. });

    let mut pending = send(&app, Event::RetryLocation, &mut model);
    let mut permission = pending.take_location(is_permission).unwrap();
    let update = app
        .resolve(
            &mut permission,
            Ok(LocationOutput::Permission(PermissionStatus::Denied)),
        )
        .unwrap();
    settle(&app, update, &mut model);

    assert_eq!(
        model.location.state(),
        &LocationState::Error {
            message: "permission denied".into()
        }
    );
}

#[test]
fn connectivity_failure_leaves_acquisition_ready() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut network = pending.network.pop().expect("network request");
    let update = app
        .resolve(
            &mut network,
            Err(NetworkError::Unavailable {
                message: "radio off".into(),
            }),
        )
        .unwrap();
    settle(&app, update, &mut model);
    assert_eq!(model.location.state(), &LocationState::Loading);
    assert_eq!(model.location.connectivity(), ConnectivityState::Unknown);
    assert_eq!(model.notice, None);

    let mut permission = pending.take_location(is_permission).unwrap();
    let mut pending = settle(&app, app.resolve(&mut permission, granted()).unwrap(), &mut model);
    let mut fix_request = pending.take_location(is_fix).unwrap();
    settle(&app, app.resolve(&mut fix_request, fix(10.0, 20.0)).unwrap(), &mut model);

    assert_matches!(model.location.state(), LocationState::Ready { .. });
    assert_eq!(model.location.connectivity(), ConnectivityState::Unknown);
}

#[test]
fn connectivity_banner_reflects_sample() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut network = pending.network.pop().unwrap();
    let update = app
        .resolve(
            &mut network,
            Ok(NetworkState {
                is_connected: true,
                is_internet_reachable: false,
            }),
        )
        .unwrap();
    settle(&app, update, &mut model);

    let mut permission = pending.take_location(is_permission).unwrap();
    let mut pending = settle(&app, app.resolve(&mut permission, granted()).unwrap(), &mut model);
    let mut fix_request = pending.take_location(is_fix).unwrap();
    settle(&app, app.resolve(&mut fix_request, fix(10.0, 20.0)).unwrap(), &mut model);

    let MapView::Ready { connectivity, .. } = app.view(&model).map else {
        panic!("map should be ready");
    };
    assert_eq!(connectivity.state, ConnectivityState::Disconnected);
}

#[test]
fn deactivation_discards_late_results() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut permission = pending.take_location(is_permission).unwrap();
    send(&app, Event::ScreenDeactivated(Screen::Map), &mut model);

    let pending = settle(&app, app.resolve(&mut permission, granted()).unwrap(), &mut model);
    assert!(pending.location.is_empty());
    assert_eq!(model.location.state(), &LocationState::Loading);
    assert_eq!(model.location.in_flight(), None);
}

#[test]
fn leaving_the_map_drops_its_notice() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::ScreenActivated(Screen::Map), &mut model);
    let mut permission = pending.take_location(is_permission).unwrap();
    let update = app
        .resolve(
            &mut permission,
            Ok(LocationOutput::Permission(PermissionStatus::Denied)),
        )
        .unwrap();
    settle(&app, update, &mut model);
    assert!(model.notice.is_some());

    send(&app, Event::ScreenDeactivated(Screen::Map), &mut model);
    assert_eq!(model.notice, None);
    assert_eq!(app.view(&model).notice, None);
}

#[test]
fn leaving_the_map_keeps_other_screens_notices() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut pending = send(&app, Event::SignOutRequested, &mut model);
    let mut request = pending.session.remove(0);
    let update = app
        .resolve(
            &mut request,
            Err(shared::capabilities::SessionError::SignOutFailed {
                message: "offline".into(),
            }),
        )
        .unwrap();
    settle(&app, update, &mut model);

    send(&app, Event::ScreenDeactivated(Screen::Map), &mut model);
    assert_eq!(
        model.notice,
        Some(Notice::new("Error", "Could not sign out"))
    );
}
