use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use terradrive_input::DriveInput;

/// Tuning of the kinematic car model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    pub throttle_accel: f32,
    pub reverse_accel: f32,
    /// Linear drag coefficient applied against velocity.
    pub drag: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    pub turn_rate: f32,
    /// Turn multiplier at standstill; grows by `|v| / turn_speed_divisor`.
    pub turn_base: f32,
    pub turn_speed_divisor: f32,
    /// Fraction of the gap to target height closed per frame.
    pub ground_blend: f32,
    /// Body height above the ground sample.
    pub ride_height: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            throttle_accel: 6.0,
            reverse_accel: 3.0,
            drag: 0.5,
            min_velocity: -6.0,
            max_velocity: 28.0,
            turn_rate: 1.2,
            turn_base: 0.8,
            turn_speed_divisor: 10.0,
            ground_blend: 0.1,
            ride_height: 0.45,
        }
    }
}

/// Position, heading and speed of the car, plus its eased render height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub x: f32,
    pub z: f32,
    /// Rotation about +Y in radians; 0 faces +Z.
    pub heading: f32,
    pub velocity: f32,
    /// Rendered height, eased toward the ground each frame.
    pub y: f32,
}

impl VehicleState {
    /// Acceleration for the given input at the current velocity.
    pub fn acceleration(&self, input: DriveInput, params: &VehicleParams) -> f32 {
        let throttle = if input.forward { params.throttle_accel } else { 0.0 };
        let reverse = if input.reverse { params.reverse_accel } else { 0.0 };
        throttle - reverse - params.drag * self.velocity
    }

    /// Integrate one step of kinematics. Height is left to [`Self::settle`].
    pub fn step(&self, input: DriveInput, dt: f32, params: &VehicleParams) -> VehicleState {
        let accel = self.acceleration(input, params);
        let velocity = (self.velocity + accel * dt).clamp(params.min_velocity, params.max_velocity);
        let turn = params.turn_rate
            * dt
            * (params.turn_base + velocity.abs() / params.turn_speed_divisor);
        let heading = self.heading + input.steer() * turn;
        let (sin, cos) = heading.sin_cos();
        VehicleState {
            x: self.x + sin * velocity * dt,
            z: self.z + cos * velocity * dt,
            heading,
            velocity,
            y: self.y,
        }
    }

    /// Ease the rendered height toward `ground + ride_height`.
    pub fn settle(&mut self, ground: f32, params: &VehicleParams) {
        let target = ground + params.ride_height;
        self.y += (target - self.y) * params.ground_blend;
    }

    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.heading.sin_cos();
        Vec3::new(sin, 0.0, cos)
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// XZ position used as the streaming viewpoint.
    pub fn viewpoint(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Speedometer value as shown on the HUD.
    pub fn speed_readout(&self) -> i32 {
        (self.velocity * 10.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> DriveInput {
        DriveInput {
            forward: true,
            ..DriveInput::default()
        }
    }

    #[test]
    fn throttle_from_rest() {
        let params = VehicleParams::default();
        let s = VehicleState::default();
        assert_eq!(s.acceleration(forward(), &params), 6.0);
        let next = s.step(forward(), 1.0, &params);
        assert_eq!(next.velocity, 6.0);
        assert_eq!(next.heading, 0.0);
        assert_eq!(next.x, 0.0);
        assert_eq!(next.z, 6.0);
    }

    #[test]
    fn drag_caps_speed_below_clamp() {
        let params = VehicleParams::default();
        let s = VehicleState {
            velocity: 28.0,
            ..VehicleState::default()
        };
        assert_eq!(s.acceleration(forward(), &params), -8.0);
        let next = s.step(forward(), 1.0, &params);
        assert_eq!(next.velocity, 20.0);

        // Held throttle settles at throttle / drag = 12.
        let mut s = VehicleState::default();
        for _ in 0..2000 {
            s = s.step(forward(), 0.05, &params);
        }
        assert!((s.velocity - 12.0).abs() < 1e-3);
    }

    #[test]
    fn velocity_is_clamped() {
        let params = VehicleParams::default();
        let fast = VehicleState {
            velocity: 40.0,
            ..VehicleState::default()
        };
        assert_eq!(fast.step(DriveInput::default(), 0.05, &params).velocity, 28.0);

        let backwards = VehicleState {
            velocity: -20.0,
            ..VehicleState::default()
        };
        assert_eq!(
            backwards.step(DriveInput::default(), 0.05, &params).velocity,
            -6.0
        );
    }

    #[test]
    fn reverse_from_rest() {
        let params = VehicleParams::default();
        let input = DriveInput {
            reverse: true,
            ..DriveInput::default()
        };
        let next = VehicleState::default().step(input, 1.0, &params);
        assert_eq!(next.velocity, -3.0);
        assert_eq!(next.z, -3.0);
    }

    #[test]
    fn steering_scales_with_speed() {
        let params = VehicleParams::default();
        let left = DriveInput {
            left: true,
            ..DriveInput::default()
        };
        let still = VehicleState::default().step(left, 1.0, &params);
        assert!((still.heading - 0.96).abs() < 1e-6);

        let moving = VehicleState {
            velocity: 10.0,
            ..VehicleState::default()
        };
        // Velocity after drag: 10 - 5 = 5, turn = 1.2 * (0.8 + 0.5).
        let turned = moving.step(left, 1.0, &params);
        assert!((turned.heading - 1.56).abs() < 1e-6);

        let right = DriveInput {
            right: true,
            ..DriveInput::default()
        };
        assert!(still.step(right, 1.0, &params).heading < still.heading);

        let both = DriveInput {
            left: true,
            right: true,
            ..DriveInput::default()
        };
        assert_eq!(VehicleState::default().step(both, 1.0, &params).heading, 0.0);
    }

    #[test]
    fn moves_along_heading() {
        let params = VehicleParams::default();
        let s = VehicleState {
            heading: std::f32::consts::FRAC_PI_2,
            velocity: 10.0,
            ..VehicleState::default()
        };
        let next = s.step(DriveInput::default(), 0.1, &params);
        // v = 10 - 0.5 = 9.5 after drag; travels +x.
        assert!((next.x - 0.95).abs() < 1e-5);
        assert!(next.z.abs() < 1e-5);
    }

    #[test]
    fn settle_eases_toward_ground() {
        let params = VehicleParams::default();
        let mut s = VehicleState::default();
        s.settle(2.0, &params);
        assert!((s.y - 0.245).abs() < 1e-6);
        for _ in 0..300 {
            s.settle(2.0, &params);
        }
        assert!((s.y - 2.45).abs() < 1e-4);
    }

    #[test]
    fn step_keeps_height() {
        let params = VehicleParams::default();
        let s = VehicleState {
            y: 3.0,
            ..VehicleState::default()
        };
        assert_eq!(s.step(forward(), 0.05, &params).y, 3.0);
    }

    #[test]
    fn speed_readout_rounds() {
        let s = VehicleState {
            velocity: 12.345,
            ..VehicleState::default()
        };
        assert_eq!(s.speed_readout(), 123);
        assert_eq!(s.forward(), Vec3::new(0.0, 0.0, 1.0));
    }
}
