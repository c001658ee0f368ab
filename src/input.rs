//! Keyboard sampling for the flight loop.
//!
//! Raw key state is folded once per frame into a [`FlightInput`] snapshot that
//! the movement and fire systems read. Opposing directional keys cancel to
//! zero rather than favouring either side, and the snapshot is rebuilt from
//! scratch every frame so a missed release can never wedge an axis.
//!
//! | Action   | Keys                      |
//! |----------|---------------------------|
//! | Steer    | WASD or arrow keys        |
//! | Boost    | either Shift              |
//! | Fire     | Space                     |

use bevy::prelude::*;

/// Per-frame input snapshot consumed by the ship controller.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FlightInput {
    /// Steering axis, each component in {-1, 0, 1}. +X is right, +Y is up.
    pub axis: Vec2,
    pub boost: bool,
    pub fire: bool,
}

impl FlightInput {
    pub fn is_steering(&self) -> bool {
        self.axis != Vec2::ZERO
    }
}

/// Fold four directional key states into a steering axis.
pub fn steering_axis(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let x = (right as i8 - left as i8) as f32;
    let y = (up as i8 - down as i8) as f32;
    Vec2::new(x, y)
}

/// Rebuild the [`FlightInput`] snapshot from the keyboard. Runs first in the
/// per-frame chain; everything downstream sees one consistent frame of input.
pub fn sample_flight_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<FlightInput>) {
    let left = keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft);
    let right = keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight);
    let up = keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp);
    let down = keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown);

    *input = FlightInput {
        axis: steering_axis(left, right, up, down),
        boost: keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight),
        fire: keys.pressed(KeyCode::Space),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        assert_eq!(steering_axis(true, true, false, false), Vec2::ZERO);
        assert_eq!(steering_axis(false, false, true, true), Vec2::ZERO);
    }

    #[test]
    fn single_keys_map_to_unit_axes() {
        assert_eq!(steering_axis(true, false, false, false), Vec2::new(-1.0, 0.0));
        assert_eq!(steering_axis(false, true, false, false), Vec2::new(1.0, 0.0));
        assert_eq!(steering_axis(false, false, true, false), Vec2::new(0.0, 1.0));
        assert_eq!(steering_axis(false, false, false, true), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn snapshot_rebuilds_from_keyboard_each_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<FlightInput>();
        app.add_systems(Update, sample_flight_input);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyD);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();

        let input = *app.world().resource::<FlightInput>();
        assert_eq!(input.axis, Vec2::new(1.0, 0.0));
        assert!(input.fire);
        assert!(!input.boost);

        // Release everything; the next frame must read fully neutral.
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release_all();
        app.update();
        assert_eq!(*app.world().resource::<FlightInput>(), FlightInput::default());
    }
}
