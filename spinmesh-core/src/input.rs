/// Pointer, wheel and resize input, and the drag/zoom targets it drives
use tracing::debug;

use crate::transform::RotationState;

/// Input events a host feeds to the viewport.
///
/// Pointer coordinates and wheel deltas are in pixels, the way a browser
/// reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    Wheel { delta_y: f32 },
    DoubleClick,
    Resize { width: u32, height: u32 },
}

/// Capability set a viewport exposes to its host
pub trait InputHandler {
    fn on_pointer_down(&mut self, x: f32, y: f32);
    fn on_pointer_move(&mut self, x: f32, y: f32);
    fn on_pointer_up(&mut self);
    fn on_pointer_leave(&mut self);
    fn on_wheel(&mut self, delta_y: f32);
    fn on_double_click(&mut self);
    fn on_resize(&mut self, width: u32, height: u32);

    /// Route an event to the matching handler
    fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.on_pointer_down(x, y),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            InputEvent::DoubleClick => self.on_double_click(),
            InputEvent::Resize { width, height } => self.on_resize(width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Sensitivities and bounds applied to raw input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputTuning {
    pub rotation_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.002,
            zoom_sensitivity: 0.001,
            zoom_min: 1.0,
            zoom_max: 10.0,
        }
    }
}

/// Transient input state: the drag machine, the last pointer position and
/// the targets the per-frame damping chases.
#[derive(Debug, Clone)]
pub struct InputState {
    tuning: InputTuning,
    drag: DragState,
    last_pointer: (f32, f32),
    target_rotation: RotationState,
    target_zoom: f32,
}

impl InputState {
    pub fn new(tuning: InputTuning, initial_zoom: f32) -> Self {
        Self {
            tuning,
            drag: DragState::Idle,
            last_pointer: (0.0, 0.0),
            target_rotation: RotationState::zero(),
            target_zoom: initial_zoom.clamp(tuning.zoom_min, tuning.zoom_max),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn last_pointer(&self) -> (f32, f32) {
        self.last_pointer
    }

    pub fn target_rotation(&self) -> RotationState {
        self.target_rotation
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.drag == DragState::Idle {
            debug!("drag started at ({x}, {y})");
        }
        self.drag = DragState::Dragging;
        self.last_pointer = (x, y);
    }

    /// Record the pointer position; while dragging, fold the movement into
    /// the rotation targets. Horizontal movement turns about Y, vertical
    /// movement about X.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.drag == DragState::Dragging {
            let dx = x - self.last_pointer.0;
            let dy = y - self.last_pointer.1;
            let k = self.tuning.rotation_sensitivity;
            self.target_rotation.rotate(dy * k, dx * k);
        }
        self.last_pointer = (x, y);
    }

    pub fn release(&mut self) {
        if self.drag == DragState::Dragging {
            debug!("drag ended");
        }
        self.drag = DragState::Idle;
    }

    pub fn wheel(&mut self, delta_y: f32) {
        let zoom = self.target_zoom + delta_y * self.tuning.zoom_sensitivity;
        // NaN deltas leave the target where it was
        if zoom.is_nan() {
            return;
        }
        self.target_zoom = zoom.clamp(self.tuning.zoom_min, self.tuning.zoom_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InputState {
        InputState::new(InputTuning::default(), 5.0)
    }

    #[test]
    fn test_drag_transitions() {
        let mut input = state();
        assert_eq!(input.drag_state(), DragState::Idle);

        input.pointer_down(10.0, 10.0);
        assert_eq!(input.drag_state(), DragState::Dragging);
        input.release();
        assert_eq!(input.drag_state(), DragState::Idle);

        input.pointer_down(0.0, 0.0);
        input.pointer_down(1.0, 1.0);
        assert_eq!(input.drag_state(), DragState::Dragging);
    }

    #[test]
    fn test_move_while_idle_only_records_position() {
        let mut input = state();
        input.pointer_move(120.0, 45.0);
        assert_eq!(input.last_pointer(), (120.0, 45.0));
        assert_eq!(input.target_rotation(), RotationState::zero());
    }

    #[test]
    fn test_drag_accumulates_with_sign() {
        let mut input = state();
        input.pointer_down(100.0, 100.0);
        input.pointer_move(150.0, 100.0);
        // deltaX feeds the Y target
        assert!((input.target_rotation().y - 50.0 * 0.002).abs() < 1e-6);
        assert_eq!(input.target_rotation().x, 0.0);

        input.pointer_move(150.0, 80.0);
        // deltaY feeds the X target, negative upward
        assert!((input.target_rotation().x + 20.0 * 0.002).abs() < 1e-6);

        let before = input.target_rotation().y;
        input.pointer_move(250.0, 80.0);
        assert!(input.target_rotation().y > before);
    }

    #[test]
    fn test_targets_grow_monotonically_with_drag_distance() {
        let mut input = state();
        input.pointer_down(0.0, 0.0);
        let mut previous = 0.0;
        for step in 1..=100 {
            input.pointer_move(step as f32 * 7.0, 0.0);
            let y = input.target_rotation().y;
            assert!(y > previous);
            previous = y;
        }
        // No wraparound past 2*pi
        assert!((previous - 700.0 * 0.002).abs() < 1e-4);
    }

    #[test]
    fn test_release_stops_rotation() {
        let mut input = state();
        input.pointer_down(0.0, 0.0);
        input.pointer_move(10.0, 10.0);
        input.release();
        let frozen = input.target_rotation();

        input.pointer_move(500.0, 500.0);
        assert_eq!(input.target_rotation(), frozen);
        assert_eq!(input.last_pointer(), (500.0, 500.0));
    }

    #[test]
    fn test_wheel_clamps_zoom() {
        let mut input = state();
        input.wheel(1000.0);
        assert!((input.target_zoom() - 6.0).abs() < 1e-6);

        input.wheel(1.0e9);
        assert_eq!(input.target_zoom(), 10.0);
        input.wheel(f32::INFINITY);
        assert_eq!(input.target_zoom(), 10.0);

        input.wheel(-1.0e9);
        assert_eq!(input.target_zoom(), 1.0);
        input.wheel(f32::NEG_INFINITY);
        assert_eq!(input.target_zoom(), 1.0);
    }

    #[test]
    fn test_cumulative_wheel_stays_in_range() {
        let mut input = state();
        for i in 0..10_000 {
            let delta = if i % 3 == 0 { -480.0 } else { 730.0 };
            input.wheel(delta);
            assert!((1.0..=10.0).contains(&input.target_zoom()));
        }
    }

    #[test]
    fn test_initial_zoom_is_clamped() {
        let input = InputState::new(InputTuning::default(), 50.0);
        assert_eq!(input.target_zoom(), 10.0);
    }
}
