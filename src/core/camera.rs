use glam::{EulerRot, Mat4, Quat, Vec3};

// Projection shared by every camera mode.
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 50_000.0;

/// Initial eye position, looking at the origin.
pub const CAMERA_EYE: [f32; 3] = [0.0, -160.0, 800.0];

// Orbit bounds and input scaling.
pub const ORBIT_MIN_DISTANCE: f32 = 200.0;
pub const ORBIT_MAX_DISTANCE: f32 = 1500.0;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per dragged pixel
pub const ORBIT_ZOOM_SPEED: f32 = 0.5; // world units per wheel delta unit
pub const ORBIT_PITCH_LIMIT: f32 = 1.54; // keep off the poles

/// Orbit camera around a fixed target. Owns aspect so a viewport resize is
/// a single call; all matrix math is pure and host-testable.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    pub aspect: f32,
}

impl OrbitCamera {
    /// Derive the spherical state that reproduces `eye` looking at `target`.
    pub fn from_eye(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let rel = eye - target;
        let distance = rel.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let pitch = (rel.y / rel.length().max(f32::EPSILON)).asin();
        let yaw = rel.x.atan2(rel.z);
        Self {
            yaw,
            pitch,
            distance,
            target,
            aspect,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_ROTATE_SPEED;
        self.pitch =
            (self.pitch + dy_px * ORBIT_ROTATE_SPEED).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    pub fn zoom(&mut self, wheel_delta: f32) {
        self.distance = (self.distance + wheel_delta * ORBIT_ZOOM_SPEED)
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            CAMERA_FOV_DEG.to_radians(),
            self.aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }
}

/// View matrix for a sensor-driven camera: fixed eye, orientation from the
/// device quaternion.
pub fn oriented_view_matrix(eye: Vec3, orientation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(orientation, eye).inverse()
}

/// Map device-orientation angles (radians) plus the screen rotation to a
/// world-space camera quaternion. `alpha` is yaw about the world Z axis,
/// `beta` front-back tilt, `gamma` left-right tilt; the fixed -90 degree X
/// rotation moves the device frame (screen up) into the camera frame
/// (looking down -Z).
pub fn orientation_quat(alpha: f32, beta: f32, gamma: f32, screen: f32) -> Quat {
    let device = Quat::from_euler(EulerRot::YXZ, alpha, beta, -gamma);
    let camera_up = Quat::from_axis_angle(Vec3::X, -std::f32::consts::FRAC_PI_2);
    let screen_adjust = Quat::from_axis_angle(Vec3::Z, -screen);
    device * camera_up * screen_adjust
}
