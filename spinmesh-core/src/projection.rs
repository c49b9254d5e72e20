/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::config::ViewportConfig;

/// A point projected into screen space.
///
/// `x` grows rightward and `y` downward from the top-left corner; `depth`
/// is the normalized device depth, -1 at the near plane and 1 at the far
/// plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Perspective camera on the +Z axis looking at the origin
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75.0_f32.to_radians(),
            aspect: aspect_ratio(width, height),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn from_config(config: &ViewportConfig, width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, config.clamped_initial_distance()),
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            ..Self::new(width, height)
        }
    }

    /// Recompute the aspect ratio for a new drawing size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Distance from the camera to the origin along Z
    pub fn distance(&self) -> f32 {
        self.position.z
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.position.z = distance;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined projection * view * model matrix
    pub fn mvp(&self, model_matrix: &Matrix4<f32>) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix() * model_matrix
    }

    /// Project a 3D point to 2D screen space using a precomputed MVP matrix.
    ///
    /// Returns `None` for points at or behind the near plane. Points outside
    /// the view frustum sideways are still returned so that lines crossing
    /// the screen edge can be clipped by the rasterizer.
    pub fn project(
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero or negative w (behind the camera)
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if depth < -1.0 {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some(ScreenPoint {
            x: screen_x,
            y: screen_y,
            depth,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Width over height, with zero dimensions treated as one pixel
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
