/// ASCII wireframe rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use spinmesh_core::{Rgb, Segment, WireStyle};
use std::io::Write;

/// Approximate pixel size of one terminal cell. Screen-space coordinates
/// are in these pseudo-pixels so drag and wheel tuning matches a browser.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Character luminosity ramp for depth cueing (farthest to nearest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Dimmest shade a wire is drawn at, so far edges stay visible
const MIN_SHADE: f32 = 0.35;

const EMPTY: char = ' ';

/// ASCII renderer that converts projected mesh edges to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    shade_buffer: Vec<f32>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![EMPTY; size],
            shade_buffer: vec![0.0; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate the buffers for a new cell grid. No-op when unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(EMPTY);
        self.shade_buffer.fill(0.0);
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.width && row < self.height).then(|| self.char_buffer[row * self.width + col])
    }

    /// Rasterize segments given in pseudo-pixel coordinates.
    ///
    /// Depth is normalized over the batch, so the nearest edge always gets
    /// the brightest glyph and the farthest the dimmest.
    pub fn render_segments(&mut self, segments: &[Segment]) {
        let (near, far) = segments
            .iter()
            .flat_map(|s| [s.from.depth, s.to.depth])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });
        let span = (far - near).max(1e-6);

        for segment in segments {
            let from = (
                segment.from.x / CELL_WIDTH_PX,
                segment.from.y / CELL_HEIGHT_PX,
                (segment.from.depth - near) / span,
            );
            let to = (
                segment.to.x / CELL_WIDTH_PX,
                segment.to.y / CELL_HEIGHT_PX,
                (segment.to.depth - near) / span,
            );
            self.draw_line(from, to);
        }
    }

    /// Draw a line between two cell-space points carrying normalized depth
    /// (0 nearest, 1 farthest), clipped to the grid.
    fn draw_line(&mut self, from: (f32, f32, f32), to: (f32, f32, f32)) {
        let Some((t0, t1)) = clip_line(
            (from.0, from.1),
            (to.0, to.1),
            self.width as f32,
            self.height as f32,
        ) else {
            return;
        };

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let (x0, y0) = (lerp(from.0, to.0, t0), lerp(from.1, to.1, t0));
        let (x1, y1) = (lerp(from.0, to.0, t1), lerp(from.1, to.1, t1));
        let (d0, d1) = (lerp(from.2, to.2, t0), lerp(from.2, to.2, t1));

        // DDA: one sample per cell along the major axis
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = lerp(x0, x1, t).floor();
            let y = lerp(y0, y1, t).floor();
            if x < 0.0 || y < 0.0 {
                continue;
            }
            self.plot(x as usize, y as usize, lerp(d0, d1, t));
        }
    }

    fn plot(&mut self, col: usize, row: usize, depth: f32) {
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = row * self.width + col;
        if depth < self.depth_buffer[idx] {
            let brightness = (1.0 - depth).clamp(0.0, 1.0);
            let ramp_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = LUMINOSITY_RAMP[ramp_index.min(LUMINOSITY_RAMP.len() - 1)];
            self.shade_buffer[idx] = MIN_SHADE + (1.0 - MIN_SHADE) * brightness;
        }
    }

    /// Write the grid starting at `origin_row`, one terminal row per grid row.
    pub fn draw<W: Write>(
        &self,
        writer: &mut W,
        style: &WireStyle,
        origin_row: u16,
    ) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_color(style.background)))?;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, origin_row + y as u16))?;
            let mut current: Option<Rgb> = None;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];
                if c != EMPTY {
                    let color = style.wire.scaled(self.shade_buffer[idx]);
                    if current != Some(color) {
                        writer.queue(SetForegroundColor(to_color(color)))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Liang-Barsky clip of the segment `a -> b` against `[0, width) x [0, height)`.
///
/// Returns the parameter range `(t0, t1)` of the visible part, or `None`
/// when the segment misses the rectangle.
fn clip_line(a: (f32, f32), b: (f32, f32), width: f32, height: f32) -> Option<(f32, f32)> {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    // Keep the far edge just inside so floor() lands on the last cell
    let max_x = (width - 1e-3).max(0.0);
    let max_y = (height - 1e-3).max(0.0);

    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    for (p, q) in [
        (-dx, a.0),
        (dx, max_x - a.0),
        (-dy, a.1),
        (dy, max_y - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinmesh_core::ScreenPoint;

    fn point(col: f32, row: f32, depth: f32) -> ScreenPoint {
        ScreenPoint {
            x: col * CELL_WIDTH_PX,
            y: row * CELL_HEIGHT_PX,
            depth,
        }
    }

    fn style() -> WireStyle {
        WireStyle {
            wire: Rgb::new(255, 255, 0),
            background: Rgb::new(0, 0, 0),
        }
    }

    #[test]
    fn test_horizontal_line_fills_row() {
        let mut renderer = AsciiRenderer::new(10, 3);
        renderer.render_segments(&[Segment {
            from: point(1.5, 1.5, 0.5),
            to: point(8.5, 1.5, 0.5),
        }]);
        for col in 1..=8 {
            assert_ne!(renderer.cell(col, 1), Some(' '), "col {col}");
        }
        assert_eq!(renderer.cell(0, 1), Some(' '));
        assert_eq!(renderer.cell(9, 1), Some(' '));
        assert_eq!(renderer.cell(4, 0), Some(' '));
    }

    #[test]
    fn test_nearer_edge_wins_and_is_brighter() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.render_segments(&[
            Segment {
                from: point(0.5, 5.5, 0.9),
                to: point(9.5, 5.5, 0.9),
            },
            Segment {
                from: point(5.5, 0.5, 0.1),
                to: point(5.5, 9.5, 0.1),
            },
        ]);
        assert_eq!(renderer.cell(5, 5), Some('@'));
        assert_eq!(renderer.cell(2, 5), Some('.'));
    }

    #[test]
    fn test_offscreen_segment_is_clipped() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.render_segments(&[Segment {
            from: point(-1.0e6, 2.5, 0.0),
            to: point(1.0e6, 2.5, 0.0),
        }]);
        for col in 0..4 {
            assert_ne!(renderer.cell(col, 2), Some(' '));
        }

        renderer.clear();
        renderer.render_segments(&[Segment {
            from: point(10.0, 10.0, 0.0),
            to: point(20.0, 12.0, 0.0),
        }]);
        assert!((0..4).all(|r| (0..4).all(|c| renderer.cell(c, r) == Some(' '))));
    }

    #[test]
    fn test_clip_line_ranges() {
        assert_eq!(clip_line((1.0, 1.0), (2.0, 2.0), 4.0, 4.0), Some((0.0, 1.0)));
        let (t0, t1) = clip_line((-2.0, 1.0), (6.0, 1.0), 4.0, 4.0).unwrap();
        assert!((t0 - 0.25).abs() < 1e-4);
        assert!(t1 < 0.75 && t1 > 0.74);
        assert_eq!(clip_line((-2.0, -1.0), (-1.0, 5.0), 4.0, 4.0), None);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut renderer = AsciiRenderer::new(2, 2);
        renderer.resize(5, 3);
        assert_eq!((renderer.width(), renderer.height()), (5, 3));
        assert_eq!(renderer.cell(4, 2), Some(' '));
        assert_eq!(renderer.cell(5, 2), None);
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.render_segments(&[Segment {
            from: point(0.5, 0.5, 0.0),
            to: point(2.5, 0.5, 0.0),
        }]);
        let mut out = Vec::new();
        renderer.draw(&mut out, &style(), 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('@'));
        // Cursor moves to rows 2 and 3 (1-based)
        assert!(text.contains("\x1b[2;1H"));
        assert!(text.contains("\x1b[3;1H"));
    }
}
