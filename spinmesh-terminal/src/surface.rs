/// Terminal drawing target for the viewport
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use spinmesh_core::{Frame, Surface, SurfaceError};
use std::io::Write;

use crate::renderer::{AsciiRenderer, CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Rows reserved for the status line outside fullscreen
pub const HUD_ROWS: u16 = 1;

/// Draws frames into a terminal-like writer.
///
/// Windowed mode keeps a status line on the top row; fullscreen hands every
/// row to the wireframe.
pub struct TerminalSurface<W: Write> {
    out: W,
    renderer: AsciiRenderer,
    fullscreen: bool,
    status: String,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            renderer: AsciiRenderer::new(0, 0),
            fullscreen: false,
            status: String::new(),
        }
    }

    /// Text for the status line, shown outside fullscreen
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn origin_row(&self) -> u16 {
        if self.fullscreen {
            0
        } else {
            HUD_ROWS
        }
    }

    fn draw_status(&mut self) -> std::io::Result<()> {
        let width = self.renderer.width();
        let mut line: String = self.status.chars().take(width).collect();
        let pad = width.saturating_sub(line.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));

        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::Yellow),
            Print(line),
            ResetColor
        )
    }
}

/// Pseudo-pixel size of the drawable area of a `cols` x `rows` terminal
pub fn drawable_size(cols: u16, rows: u16, fullscreen: bool) -> (u32, u32) {
    let rows = if fullscreen {
        rows
    } else {
        rows.saturating_sub(HUD_ROWS)
    };
    (
        (cols as f32 * CELL_WIDTH_PX) as u32,
        (rows as f32 * CELL_HEIGHT_PX) as u32,
    )
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn resize(&mut self, width: u32, height: u32) {
        let cols = (width as f32 / CELL_WIDTH_PX).floor() as usize;
        let rows = (height as f32 / CELL_HEIGHT_PX).floor() as usize;
        self.renderer.resize(cols, rows);
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        self.renderer.clear();
        self.renderer.render_segments(&frame.segments());

        let origin = self.origin_row();
        self.renderer.draw(&mut self.out, &frame.style, origin)?;
        if !self.fullscreen {
            self.draw_status()?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.fullscreen = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;
    use spinmesh_core::{Camera, Mesh, Rgb, WireStyle};

    fn draw_triangle(surface: &mut TerminalSurface<Vec<u8>>, width: u32, height: u32) {
        let mesh = Mesh::from_positions(vec![
            -1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0,
        ])
        .unwrap();
        let camera = Camera::new(width, height);
        let frame = Frame {
            mesh: &mesh,
            camera: &camera,
            model: Matrix4::identity(),
            width,
            height,
            style: WireStyle {
                wire: Rgb::new(255, 255, 0),
                background: Rgb::new(0, 0, 0),
            },
        };
        surface.draw(&frame).unwrap();
    }

    #[test]
    fn test_drawable_size() {
        assert_eq!(drawable_size(80, 24, true), (640, 384));
        assert_eq!(drawable_size(80, 24, false), (640, 368));
        assert_eq!(drawable_size(10, 0, false), (80, 0));
    }

    #[test]
    fn test_resize_maps_pixels_to_cells() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.resize(640, 368);
        assert_eq!(surface.renderer().width(), 80);
        assert_eq!(surface.renderer().height(), 23);
        surface.resize(640, 368);
        assert_eq!(surface.renderer().height(), 23);
    }

    #[test]
    fn test_windowed_draw_shows_status() {
        let mut surface = TerminalSurface::new(Vec::new());
        let (w, h) = drawable_size(40, 20, false);
        surface.resize(w, h);
        surface.set_status("spinmesh | FPS 30.0");
        draw_triangle(&mut surface, w, h);

        let text = String::from_utf8_lossy(surface.writer()).into_owned();
        assert!(text.contains("spinmesh | FPS 30.0"));
        // Wireframe starts below the status line
        assert!(text.contains("\x1b[2;1H"));
    }

    #[test]
    fn test_fullscreen_hides_status() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.request_fullscreen().unwrap();
        assert!(surface.is_fullscreen());

        let (w, h) = drawable_size(40, 20, true);
        surface.resize(w, h);
        surface.set_status("hidden status");
        draw_triangle(&mut surface, w, h);

        let text = String::from_utf8_lossy(surface.writer()).into_owned();
        assert!(!text.contains("hidden status"));
        assert!(text.contains("\x1b[1;1H"));

        surface.exit_fullscreen().unwrap();
        assert!(!surface.is_fullscreen());
    }
}
