use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// What is held down right now, and where the pointer is.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<Vec2>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` and records it (plus any transition) in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    // Releases may never arrive once focus is gone.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(p) => self.pointer_pos = Some(*p),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(b) => {
                self.pointer_pos = Some(b.position);
                self.modifiers = b.modifiers;
                match b.state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(b.button) {
                            frame.buttons_pressed.insert(b.button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(&b.button) {
                            frame.buttons_released.insert(b.button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtonEvent;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            position: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn press_records_transition_and_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left, 10.0, 20.0));

        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(state.pointer_pos, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn release_without_press_is_not_a_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Released,
                position: Vec2::zero(),
                modifiers: Modifiers::default(),
            }),
        );
        assert!(frame.buttons_released.is_empty());
        assert_eq!(frame.events.len(), 1);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn held_key_repeats_are_not_new_presses() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::ArrowDown, KeyState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, key(Key::ArrowDown, KeyState::Pressed));

        assert!(state.key_down(Key::ArrowDown));
        assert!(!frame.key_pressed(Key::ArrowDown));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Home, KeyState::Pressed));
        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(state.keys_down.is_empty());
        assert!(state.buttons_down.is_empty());
        assert!(!state.focused);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_leave_clears_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(Vec2::new(3.0, 4.0)));
        assert_eq!(state.pointer_pos, Some(Vec2::new(3.0, 4.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn digit_helper() {
        assert_eq!(Key::Digit(3).digit(), Some(3));
        assert_eq!(Key::Home.digit(), None);
    }
}
