/// The interactive viewport: one mesh, one camera, one surface
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::ViewportConfig;
use crate::damping::damp;
use crate::error::{SurfaceError, ViewportError};
use crate::geometry::Mesh;
use crate::input::{DragState, InputHandler, InputState, InputTuning};
use crate::projection::Camera;
use crate::scene::{Frame, WireStyle};
use crate::surface::Surface;
use crate::transform::{RotationState, Transform};

/// Owns the whole scene and its input state.
///
/// Input handlers only move targets; [`Viewport::tick`] eases the current
/// rotation and zoom toward them and draws.
pub struct Viewport<S: Surface> {
    config: ViewportConfig,
    mesh: Mesh,
    camera: Camera,
    width: u32,
    height: u32,
    rotation: RotationState,
    input: InputState,
    surface: S,
    frames: u64,
}

impl<S: Surface> Viewport<S> {
    /// Build a viewport around an existing mesh and bind the surface to
    /// the initial size.
    pub fn new(
        config: ViewportConfig,
        mesh: Mesh,
        mut surface: S,
        width: u32,
        height: u32,
    ) -> Result<Self, ViewportError> {
        config.validate()?;

        let camera = Camera::from_config(&config, width, height);
        let tuning = InputTuning {
            rotation_sensitivity: config.rotation_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
        };
        let input = InputState::new(tuning, camera.distance());
        surface.resize(width, height);

        info!(
            "viewport ready: {} triangles, {}x{}, camera at z={}",
            mesh.triangle_count(),
            width,
            height,
            camera.distance()
        );

        Ok(Self {
            config,
            mesh,
            camera,
            width,
            height,
            rotation: RotationState::zero(),
            input,
            surface,
            frames: 0,
        })
    }

    /// Generate the random mesh described by `config` and build a viewport
    /// around it. A configured seed takes precedence over `rng`.
    pub fn generate<R: Rng + ?Sized>(
        config: ViewportConfig,
        rng: &mut R,
        surface: S,
        width: u32,
        height: u32,
    ) -> Result<Self, ViewportError> {
        config.validate()?;

        let mesh = match config.seed {
            Some(seed) => {
                let mut seeded = StdRng::seed_from_u64(seed);
                Mesh::random(config.triangle_count, config.half_extent, &mut seeded)
            }
            None => Mesh::random(config.triangle_count, config.half_extent, rng),
        };

        Self::new(config, mesh, surface, width, height)
    }

    /// Adopt a new size: aspect ratio, projection and drawing target.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.camera.set_viewport(width, height);
        self.surface.resize(width, height);
        debug!("resized to {width}x{height} (aspect {:.3})", self.camera.aspect);
    }

    /// Flip the surface in or out of fullscreen. A refused request is
    /// logged and otherwise ignored.
    pub fn toggle_fullscreen(&mut self) {
        let result = if self.surface.is_fullscreen() {
            self.surface.exit_fullscreen()
        } else {
            self.surface.request_fullscreen()
        };

        if let Err(e) = result {
            warn!("fullscreen toggle failed: {e}");
        }
    }

    /// Advance one display frame: ease rotation and zoom toward their
    /// targets, then draw.
    pub fn tick(&mut self, elapsed: Duration) -> Result<(), SurfaceError> {
        let mode = self.config.damping;
        let rotation_factor = mode.effective_factor(self.config.rotation_damping, elapsed);
        let zoom_factor = mode.effective_factor(self.config.zoom_damping, elapsed);

        let target_zoom = self.input.target_zoom();
        let distance = damp(self.camera.distance(), target_zoom, zoom_factor);
        self.camera.set_distance(distance);

        let target = self.input.target_rotation();
        self.rotation.x = damp(self.rotation.x, target.x, rotation_factor);
        self.rotation.y = damp(self.rotation.y, target.y, rotation_factor);

        self.frames += 1;
        self.draw()
    }

    /// Draw the current state without advancing it
    pub fn draw(&mut self) -> Result<(), SurfaceError> {
        let frame = Frame {
            mesh: &self.mesh,
            camera: &self.camera,
            model: Transform::rotation_matrix(&self.rotation),
            width: self.width,
            height: self.height,
            style: WireStyle {
                wire: self.config.wire_color,
                background: self.config.background,
            },
        };
        self.surface.draw(&frame)
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn target_rotation(&self) -> RotationState {
        self.input.target_rotation()
    }

    pub fn zoom(&self) -> f32 {
        self.camera.distance()
    }

    pub fn target_zoom(&self) -> f32 {
        self.input.target_zoom()
    }

    pub fn drag_state(&self) -> DragState {
        self.input.drag_state()
    }

    /// Frames drawn through [`Viewport::tick`]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: Surface> InputHandler for Viewport<S> {
    fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.input.pointer_down(x, y);
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer_move(x, y);
    }

    fn on_pointer_up(&mut self) {
        self.input.release();
    }

    fn on_pointer_leave(&mut self) {
        self.input.release();
    }

    fn on_wheel(&mut self, delta_y: f32) {
        self.input.wheel(delta_y);
    }

    fn on_double_click(&mut self) {
        self.toggle_fullscreen();
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.resize(width, height);
    }
}
