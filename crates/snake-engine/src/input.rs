//! Input handling for the engine.
//!
//! Bridges winit window events to the gameplay input system.

use tracing::warn;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use snake_gameplay::input::{Action, DirectionInput, InputManager, KeyCode};

use crate::config::KeyConfig;

/// Converts winit KeyCode to gameplay KeyCode
fn convert_key(key: WinitKeyCode) -> Option<KeyCode> {
    Some(match key {
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::ArrowUp => KeyCode::Up,
        WinitKeyCode::ArrowDown => KeyCode::Down,
        WinitKeyCode::ArrowLeft => KeyCode::Left,
        WinitKeyCode::ArrowRight => KeyCode::Right,
        WinitKeyCode::Escape => KeyCode::Escape,
        _ => return None,
    })
}

/// Handles input from winit and provides processed input for gameplay.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// The underlying input manager from gameplay crate
    manager: InputManager,
}

impl InputHandler {
    /// Create a new input handler with default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            manager: InputManager::new(),
        }
    }

    /// Create an input handler using the configured key bindings.
    ///
    /// A conflicting `[keys]` table is logged and the defaults are kept.
    #[must_use]
    pub fn with_keys(keys: &KeyConfig) -> Self {
        let mut handler = Self::new();
        if let Err(e) = handler.manager.set_bindings(keys.bindings()) {
            warn!("Ignoring [keys] config: {e}");
        }
        handler
    }

    /// Handle a winit window event. Returns true if the event was handled.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(winit_key) = event.physical_key {
                    self.handle_key(
                        winit_key,
                        event.state == ElementState::Pressed,
                        event.repeat,
                    );
                }
                true
            },
            _ => false,
        }
    }

    /// Feed one physical key transition.
    pub fn handle_key(&mut self, key: WinitKeyCode, is_pressed: bool, repeat: bool) {
        if repeat {
            return;
        }
        if let Some(key) = convert_key(key) {
            self.manager.update_key(key, is_pressed);
        }
    }

    /// Direction keys pressed since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn direction_input(&self) -> DirectionInput {
        self.manager.process()
    }

    /// Check if quit was just pressed.
    #[must_use]
    pub fn quit_pressed(&self) -> bool {
        self.manager.is_action_just_pressed(Action::Quit)
    }

    /// Reset per-frame state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.manager.end_frame();
    }
}
