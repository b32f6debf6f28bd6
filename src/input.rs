use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Per-tick snapshot of keyboard and mouse state.
///
/// The winit shell feeds events in; the update tick reads plain key-down
/// booleans and the mouse delta accumulated since the previous tick, then
/// calls [`InputState::end_tick`] to reset the delta.
#[derive(Default)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
    mouse_pos: Option<(f64, f64)>,
    mouse_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Record an absolute cursor position; the difference from the previous
    /// position accumulates into the per-tick delta.
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((px, py)) = self.mouse_pos {
            self.mouse_delta.0 += (x - px) as f32;
            self.mouse_delta.1 += (y - py) as f32;
        }
        self.mouse_pos = Some((x, y));
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Clear per-tick accumulators. Key-down state persists across ticks.
    pub fn end_tick(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cursor_event_produces_no_delta() {
        let mut input = InputState::new();
        input.cursor_moved(100.0, 50.0);
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn deltas_accumulate_until_end_of_tick() {
        let mut input = InputState::new();
        input.cursor_moved(100.0, 50.0);
        input.cursor_moved(103.0, 49.0);
        input.cursor_moved(104.0, 47.0);
        assert_eq!(input.mouse_delta(), (4.0, -3.0));

        input.end_tick();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        input.cursor_moved(105.0, 47.0);
        assert_eq!(input.mouse_delta(), (1.0, 0.0));
    }

    #[test]
    fn key_state_tracks_press_and_release() {
        let mut input = InputState::new();
        assert!(!input.is_down(KeyCode::KeyW));
        input.set_key(KeyCode::KeyW, true);
        assert!(input.is_down(KeyCode::KeyW));
        input.end_tick();
        assert!(input.is_down(KeyCode::KeyW));
        input.set_key(KeyCode::KeyW, false);
        assert!(!input.is_down(KeyCode::KeyW));
    }
}
