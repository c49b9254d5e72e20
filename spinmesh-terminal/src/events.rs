/// Translation of crossterm events into viewport input
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use spinmesh_core::InputEvent;
use std::time::{Duration, Instant};

use crate::renderer::{CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Two presses closer together than this count as a double-click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Wheel delta reported per scroll notch, in pixels as browsers report it
pub const WHEEL_STEP: f32 = 100.0;

/// What the terminal host should do with one terminal event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Input(InputEvent),
    /// The terminal changed to `cols` x `rows` cells
    TerminalResized { cols: u16, rows: u16 },
    Quit,
}

/// Synthesizes double-clicks from presses, since terminals only report
/// single presses.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    last: Option<(Instant, u16, u16)>,
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Register a press; returns true when it completes a double-click.
    pub fn press(&mut self, now: Instant, col: u16, row: u16) -> bool {
        let double = match self.last {
            Some((at, c, r)) => c == col && r == row && now.duration_since(at) <= self.window,
            None => false,
        };
        // A completed double-click does not start the next one
        self.last = if double { None } else { Some((now, col, row)) };
        double
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}

/// Centre of a terminal cell in pseudo-pixels
pub fn cell_to_pixels(col: u16, row: u16) -> (f32, f32) {
    (
        (col as f32 + 0.5) * CELL_WIDTH_PX,
        (row as f32 + 0.5) * CELL_HEIGHT_PX,
    )
}

#[derive(Debug, Default)]
pub struct EventTranslator {
    clicks: ClickTracker,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &Event, now: Instant) -> Vec<HostEvent> {
        match event {
            Event::Key(key) => self.translate_key(key).into_iter().collect(),
            Event::Mouse(mouse) => self.translate_mouse(mouse, now),
            Event::Resize(cols, rows) => vec![HostEvent::TerminalResized {
                cols: *cols,
                rows: *rows,
            }],
            Event::FocusLost => vec![HostEvent::Input(InputEvent::PointerLeave)],
            _ => Vec::new(),
        }
    }

    fn translate_key(&self, key: &KeyEvent) -> Option<HostEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(HostEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(HostEvent::Quit)
            }
            KeyCode::Char('f') => Some(HostEvent::Input(InputEvent::DoubleClick)),
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> Vec<HostEvent> {
        let (x, y) = cell_to_pixels(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let mut events = vec![HostEvent::Input(InputEvent::PointerDown { x, y })];
                if self.clicks.press(now, mouse.column, mouse.row) {
                    events.push(HostEvent::Input(InputEvent::DoubleClick));
                }
                events
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                vec![HostEvent::Input(InputEvent::PointerMove { x, y })]
            }
            MouseEventKind::Up(MouseButton::Left) => vec![HostEvent::Input(InputEvent::PointerUp)],
            MouseEventKind::ScrollDown => vec![HostEvent::Input(InputEvent::Wheel {
                delta_y: WHEEL_STEP,
            })],
            MouseEventKind::ScrollUp => vec![HostEvent::Input(InputEvent::Wheel {
                delta_y: -WHEEL_STEP,
            })],
            _ => Vec::new(),
        }
    }
}
