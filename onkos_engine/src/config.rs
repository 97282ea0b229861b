/// Application and backend configuration

use glam::Vec3;
use crate::error::{NativeError, Result};
use crate::engine_bail;

/// Camera placement and projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 3.0, -6.0),
            target: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::Y,
            fov_y_radians: std::f32::consts::FRAC_PI_4,
            near: 0.01,
            far: 100.0,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Application name (used as the log source prefix of the demo)
    pub app_name: String,
    /// Back buffer width in pixels
    pub width: u32,
    /// Back buffer height in pixels
    pub height: u32,
    /// Render target clear color (RGBA)
    pub clear_color: [f32; 4],
    /// Vertical blanks to wait on present (0 = immediate)
    pub sync_interval: u32,
    pub camera: CameraConfig,
    /// Stop after this many frames (`None` = run until the caller stops)
    pub max_frames: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Onkos Application".to_string(),
            width: 1280,
            height: 720,
            clear_color: [0.0, 0.125, 0.3, 1.0],
            sync_interval: 0,
            camera: CameraConfig::default(),
            max_frames: None,
        }
    }
}

impl AppConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Reject configurations the frame orchestrator cannot render with
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            engine_bail!("onkos::AppConfig", "Back buffer size must be non-zero (got {}x{})",
                self.width, self.height);
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            engine_bail!("onkos::AppConfig", "Invalid clip planes: near={} far={}",
                self.camera.near, self.camera.far);
        }
        if self.camera.fov_y_radians <= 0.0 || self.camera.fov_y_radians >= std::f32::consts::PI {
            engine_bail!("onkos::AppConfig", "Invalid vertical field of view: {}",
                self.camera.fov_y_radians);
        }
        Ok(())
    }
}

/// Configuration of the headless recording backend
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessDeviceConfig {
    /// Reported by `Device::is_ready`
    pub ready: bool,
    /// Every buffer allocation fails with this status when set
    pub fail_allocations_with: Option<NativeError>,
    pub back_buffer_width: u32,
    pub back_buffer_height: u32,
}

impl Default for HeadlessDeviceConfig {
    fn default() -> Self {
        Self {
            ready: true,
            fail_allocations_with: None,
            back_buffer_width: 1280,
            back_buffer_height: 720,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
