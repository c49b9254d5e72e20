/// spinmesh core library - the host-agnostic interactive viewport
///
/// This library owns the randomly generated triangle mesh, the camera and
/// the input state, and eases rotation and zoom toward their targets once
/// per frame. Hosts supply a [`Surface`] to draw into and feed
/// [`InputEvent`]s from whatever windowing they have.

pub mod config;
pub mod damping;
pub mod error;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use config::{Rgb, ViewportConfig};
pub use damping::DampingMode;
pub use error::{ConfigError, MeshError, SurfaceError, ViewportError};
pub use geometry::{Mesh, Triangle};
pub use input::{DragState, InputEvent, InputHandler};
pub use projection::{Camera, ScreenPoint};
pub use scene::{Frame, Segment, WireStyle};
pub use surface::Surface;
pub use transform::{RotationState, Transform};
pub use viewport::Viewport;
