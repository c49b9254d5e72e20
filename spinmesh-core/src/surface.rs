/// The drawing target a viewport renders into
use crate::error::SurfaceError;
use crate::scene::Frame;

/// A host's drawing target: a canvas, a terminal, or a test double.
pub trait Surface {
    /// Match the drawing target to a new viewport size. Called once at
    /// startup and on every resize; must be idempotent.
    fn resize(&mut self, width: u32, height: u32);

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError>;

    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), SurfaceError>;

    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError>;
}

/// A surface that remembers what it was asked to do
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub sizes: Vec<(u32, u32)>,
    pub frames: usize,
    pub last_segments: usize,
    pub last_distance: f32,
    pub fullscreen: bool,
    pub deny_fullscreen: bool,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        self.frames += 1;
        self.last_segments = frame.segments().len();
        self.last_distance = frame.camera.distance();
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), SurfaceError> {
        if self.deny_fullscreen {
            return Err(SurfaceError::FullscreenDenied("not allowed".into()));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.fullscreen = false;
        Ok(())
    }
}
