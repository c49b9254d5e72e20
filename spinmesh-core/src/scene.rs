/// A single frame of the scene, ready for a surface to draw
use nalgebra::Matrix4;

use crate::config::Rgb;
use crate::geometry::Mesh;
use crate::projection::{Camera, ScreenPoint};

/// Colours of the wireframe and the cleared background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireStyle {
    pub wire: Rgb,
    pub background: Rgb,
}

/// One projected mesh edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// Everything a surface needs to draw one frame
pub struct Frame<'a> {
    pub mesh: &'a Mesh,
    pub camera: &'a Camera,
    pub model: Matrix4<f32>,
    pub width: u32,
    pub height: u32,
    pub style: WireStyle,
}

impl Frame<'_> {
    /// Project every triangle edge to screen space.
    ///
    /// Edges with an endpoint behind the camera are dropped; shared edges
    /// are not deduplicated since the triangles are independent.
    pub fn segments(&self) -> Vec<Segment> {
        let mvp = self.camera.mvp(&self.model);
        let mut segments = Vec::with_capacity(self.mesh.triangle_count() * 3);

        for triangle in self.mesh.triangles() {
            let projected = triangle
                .vertices
                .map(|v| Camera::project(&mvp, &v, self.width, self.height));

            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                if let (Some(from), Some(to)) = (projected[a], projected[b]) {
                    segments.push(Segment { from, to });
                }
            }
        }

        segments
    }
}
