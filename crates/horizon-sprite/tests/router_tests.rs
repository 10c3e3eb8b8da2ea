//! Integration tests for routing host touches to buttons.

use std::sync::{Arc, Mutex};

use horizon_sprite::{
    ButtonScene, ButtonStatus, EventKind, MovePolicy, Point, Size, SpriteButton, Touch, TouchId,
    TouchPhase, TouchRouter, TouchSet,
};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_sprite=trace")
        .with_test_writer()
        .try_init();
}

fn at(id: u64, x: f32, y: f32) -> TouchSet {
    TouchSet::single(Touch::new(id, Point::new(x, y)))
}

#[test]
fn test_reentry_through_router() {
    setup();
    let mut scene = ButtonScene::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut button = SpriteButton::default()
        .with_size(Size::new(10.0, 10.0))
        .with_move_policy(MovePolicy::Reentry);
    for kind in [EventKind::TouchesBegan, EventKind::TouchesEnded] {
        let log = log.clone();
        button.add_listener(horizon_sprite::EventListener::new(kind, move |_, event| {
            log.lock().unwrap().push(event.kind);
        }));
    }
    let id = scene.insert(button);
    let mut router = TouchRouter::new();

    router.route(&mut scene, TouchPhase::Began, &at(1, 0.0, 0.0), None);
    router.route(&mut scene, TouchPhase::Moved, &at(1, 30.0, 0.0), None);
    router.route(&mut scene, TouchPhase::Moved, &at(1, 2.0, 0.0), None);
    router.route(&mut scene, TouchPhase::Ended, &at(1, 2.0, 0.0), None);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            EventKind::TouchesBegan,
            EventKind::TouchesEnded,
            EventKind::TouchesBegan,
            EventKind::TouchesEnded,
        ]
    );
    assert_eq!(scene.button(id).map(SpriteButton::status), Some(ButtonStatus::Normal));
    assert_eq!(router.active_touches(), 0);
}

#[test]
fn test_top_button_receives_touch() {
    setup();
    let mut scene = ButtonScene::new();
    let make = |z: f32| {
        SpriteButton::default()
            .with_size(Size::new(10.0, 10.0))
            .with_z_position(z)
            .with_move_policy(MovePolicy::AlwaysHeld)
    };
    let below = scene.insert(make(0.0));
    let above = scene.insert(make(5.0));
    let mut router = TouchRouter::new();

    assert_eq!(router.route(&mut scene, TouchPhase::Began, &at(4, 1.0, 1.0), None), vec![above]);
    assert_eq!(router.binding(TouchId(4)), Some(above));
    assert_eq!(scene.button(below).map(SpriteButton::status), Some(ButtonStatus::Normal));

    router.route(&mut scene, TouchPhase::Cancelled, &at(4, 1.0, 1.0), None);
    assert_eq!(scene.button(above).map(SpriteButton::status), Some(ButtonStatus::Normal));
    assert_eq!(router.binding(TouchId(4)), None);
}

#[test]
fn test_unconfigured_and_disabled_buttons_are_skipped() {
    setup();
    let mut scene = ButtonScene::new();
    scene.insert(SpriteButton::default().with_size(Size::new(10.0, 10.0)));
    let disabled = scene.insert(
        SpriteButton::default()
            .with_size(Size::new(10.0, 10.0))
            .with_move_policy(MovePolicy::ReleaseOut),
    );
    scene.button_mut(disabled).unwrap().disable();

    let mut router = TouchRouter::new();
    assert!(router.route(&mut scene, TouchPhase::Began, &at(1, 0.0, 0.0), None).is_empty());

    scene.button_mut(disabled).unwrap().enable();
    assert_eq!(router.route(&mut scene, TouchPhase::Began, &at(1, 0.0, 0.0), None), vec![disabled]);
}
