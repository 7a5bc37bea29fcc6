//! Input - primary pointer and tilt sampling.

use bevy::input::touch::{Touch, Touches};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::resources::{PointerState, TiltInput};

/// Sample the primary pointer into [`PointerState`].
///
/// An active touch takes priority over the mouse. The first finger down stays the
/// primary pointer until it lifts. The camera ray is built from the first active
/// camera.
pub fn read_pointer_input(
    mut pointer: ResMut<PointerState>,
    mut primary: Local<Option<u64>>,
    touches: Option<Res<Touches>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
) {
    let touch = touches
        .as_deref()
        .and_then(|touches| primary_touch(touches, &mut primary));
    let (just_pressed, held, screen_position) = match (touch, mouse.as_deref()) {
        (Some(touch), _) => touch,
        (None, Some(mouse)) => {
            let cursor = windows.iter().next().and_then(Window::cursor_position);
            let (just_pressed, held) = mouse_buttons(mouse);
            (just_pressed, held, cursor)
        }
        (None, None) => (false, false, None),
    };

    let ray = screen_position.and_then(|position| {
        cameras
            .iter()
            .find(|(camera, _)| camera.is_active)
            .and_then(|(camera, transform)| camera.viewport_to_world(transform, position).ok())
    });

    pointer.just_pressed = just_pressed;
    pointer.held = held;
    pointer.screen_position = screen_position;
    pointer.ray = ray;
}

/// Primary touch as `(just_pressed, held, position)`.
fn primary_touch(
    touches: &Touches,
    primary: &mut Option<u64>,
) -> Option<(bool, bool, Option<Vec2>)> {
    if primary.is_none() {
        *primary = touches.iter_just_pressed().next().map(Touch::id);
    }
    let id = (*primary)?;

    if let Some(touch) = touches.get_pressed(id) {
        return Some((touches.just_pressed(id), true, Some(touch.position())));
    }

    // Lifted or canceled
    *primary = None;
    let position = touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
        .find(|touch| touch.id() == id)
        .map(Touch::position);
    Some((touches.just_pressed(id), false, position))
}

/// Left button as `(just_pressed, held)`.
fn mouse_buttons(mouse: &ButtonInput<MouseButton>) -> (bool, bool) {
    let just_pressed = mouse.just_pressed(MouseButton::Left);
    let held = mouse.pressed(MouseButton::Left) && !mouse.just_released(MouseButton::Left);
    (just_pressed, held)
}

/// Desktop stand-in for the accelerometer.
///
/// Arrow up tilts to +1 g, arrow down to -1 g. The tilt is only written when an
/// arrow key changes state, so hosts with a real accelerometer keep theirs.
pub fn read_keyboard_tilt(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut tilt: ResMut<TiltInput>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    const ARROWS: [KeyCode; 2] = [KeyCode::ArrowUp, KeyCode::ArrowDown];
    if !keyboard.any_just_pressed(ARROWS) && !keyboard.any_just_released(ARROWS) {
        return;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    tilt.acceleration.y = y;
}
