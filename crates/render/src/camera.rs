use glam::{Quat, Vec3};

/// Third-person camera that trails the vehicle.
///
/// Each frame the eye eases toward `offset` rotated by the vehicle heading;
/// the camera looks at the vehicle lifted by `look_lift`.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub offset: Vec3,
    pub look_lift: f32,
    pub follow: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 3.2, 6.0),
            target: Vec3::ZERO,
            offset: Vec3::new(0.0, 2.6, 6.0),
            look_lift: 0.6,
            follow: 0.12,
        }
    }
}

impl ChaseCamera {
    /// Where the eye wants to be for a vehicle at `position` facing `heading`.
    pub fn desired_eye(&self, position: Vec3, heading: f32) -> Vec3 {
        position + Quat::from_rotation_y(heading) * self.offset
    }

    pub fn follow(&mut self, position: Vec3, heading: f32) {
        let desired = self.desired_eye(position, heading);
        self.eye = self.eye.lerp(desired, self.follow);
        self.target = position + Vec3::Y * self.look_lift;
    }

    /// Jump straight to the resting position.
    pub fn snap(&mut self, position: Vec3, heading: f32) {
        self.eye = self.desired_eye(position, heading);
        self.target = position + Vec3::Y * self.look_lift;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}
