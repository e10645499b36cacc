//! Input handling system for snake controls.
//!
//! This module provides keyboard state tracking with edge detection and
//! rebindable action mapping. The game loop never sees key codes: it receives
//! a [`DirectionInput`] value holding one "just pressed" flag per action.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::direction::Direction;

/// Errors that can occur in the input system.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// Key already bound to another action
    #[error("key {key:?} already bound to action: {action:?}")]
    KeyAlreadyBound {
        /// The key that's already bound
        key: KeyCode,
        /// The action it's bound to
        action: Action,
    },
}

/// Key codes the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Escape key
    Escape,
}

/// State of a button (pressed, just pressed, released).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Whether the button is currently held down
    pub pressed: bool,
    /// Whether the button went down at least once this frame
    pub just_pressed: bool,
    /// Whether the button went up at least once this frame
    pub just_released: bool,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: false,
            just_pressed: false,
            just_released: false,
        }
    }

    /// Update the button state based on whether it's currently pressed.
    ///
    /// Edges stick until [`clear_frame`](Self::clear_frame), so a tap that
    /// is released before the frame ends still registers. Repeats of an
    /// already held key do not.
    pub fn update(&mut self, is_pressed: bool) {
        self.just_pressed |= is_pressed && !self.pressed;
        self.just_released |= !is_pressed && self.pressed;
        self.pressed = is_pressed;
    }

    /// Clear the frame-specific state (just_pressed, just_released).
    pub fn clear_frame(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Game actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Turn up (W key by default)
    MoveUp,
    /// Turn down (S key by default)
    MoveDown,
    /// Turn left (A key by default)
    MoveLeft,
    /// Turn right (D key by default)
    MoveRight,
    /// Close the game (Escape by default)
    Quit,
}

impl Action {
    /// Direction actions in the order they are sampled each frame.
    pub const SAMPLE_ORDER: [Self; 4] = [
        Self::MoveRight,
        Self::MoveLeft,
        Self::MoveUp,
        Self::MoveDown,
    ];

    /// Returns the direction this action turns the snake, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::Quit => None,
        }
    }
}

/// Edge-triggered direction input for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionInput {
    /// MoveUp was just pressed
    pub up: bool,
    /// MoveDown was just pressed
    pub down: bool,
    /// MoveLeft was just pressed
    pub left: bool,
    /// MoveRight was just pressed
    pub right: bool,
}

impl DirectionInput {
    /// No keys pressed.
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Input with a single direction pressed.
    #[must_use]
    pub fn pressed(direction: Direction) -> Self {
        let mut input = Self::NONE;
        match direction {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
        }
        input
    }

    /// Returns whether the given action was just pressed.
    #[must_use]
    pub const fn is_just_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.up,
            Action::MoveDown => self.down,
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::Quit => false,
        }
    }

    /// Pressed directions in sampling order: right, left, up, down.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Action::SAMPLE_ORDER
            .into_iter()
            .filter(|action| self.is_just_pressed(*action))
            .filter_map(Action::direction)
    }

    /// Check if any direction was pressed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Primary key for this action
    pub primary: KeyCode,
    /// Optional secondary key
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    /// Create a new key binding with only a primary key.
    #[must_use]
    pub const fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Create a new key binding with primary and secondary keys.
    #[must_use]
    pub const fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Check if a key matches this binding.
    #[must_use]
    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Input manager that tracks raw key state and maps it to actions.
#[derive(Debug)]
pub struct InputManager {
    /// Current key states
    key_states: HashMap<KeyCode, ButtonState>,
    /// Action to key bindings
    bindings: HashMap<Action, KeyBinding>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Create a new input manager with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self {
            key_states: HashMap::new(),
            bindings: HashMap::new(),
        };
        manager.set_default_bindings();
        manager
    }

    /// Set default key bindings.
    pub fn set_default_bindings(&mut self) {
        self.bindings.clear();
        self.bindings.insert(
            Action::MoveUp,
            KeyBinding::with_secondary(KeyCode::W, KeyCode::Up),
        );
        self.bindings.insert(
            Action::MoveDown,
            KeyBinding::with_secondary(KeyCode::S, KeyCode::Down),
        );
        self.bindings.insert(
            Action::MoveLeft,
            KeyBinding::with_secondary(KeyCode::A, KeyCode::Left),
        );
        self.bindings.insert(
            Action::MoveRight,
            KeyBinding::with_secondary(KeyCode::D, KeyCode::Right),
        );
        self.bindings
            .insert(Action::Quit, KeyBinding::new(KeyCode::Escape));
    }

    /// Rebind an action to a new key.
    ///
    /// Fails if one of the keys already drives a different action.
    pub fn rebind(&mut self, action: Action, binding: KeyBinding) -> Result<(), InputError> {
        for (&other, existing) in &self.bindings {
            if other == action {
                continue;
            }
            for key in std::iter::once(binding.primary).chain(binding.secondary) {
                if existing.matches(key) {
                    return Err(InputError::KeyAlreadyBound { key, action: other });
                }
            }
        }
        self.bindings.insert(action, binding);
        Ok(())
    }

    /// Replace the whole binding table.
    ///
    /// Conflicts are checked within the new table only. On error the
    /// default bindings are restored.
    pub fn set_bindings(
        &mut self,
        bindings: impl IntoIterator<Item = (Action, KeyBinding)>,
    ) -> Result<(), InputError> {
        self.bindings.clear();
        for (action, binding) in bindings {
            if let Err(e) = self.rebind(action, binding) {
                self.set_default_bindings();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Get the current binding for an action.
    #[must_use]
    pub fn get_binding(&self, action: Action) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Update a key state.
    pub fn update_key(&mut self, key: KeyCode, is_pressed: bool) {
        self.key_states.entry(key).or_default().update(is_pressed);
    }

    /// Check if a key is currently held.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.key_states.get(&key).is_some_and(|s| s.pressed)
    }

    /// Check if a key was just pressed this frame.
    #[must_use]
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.key_states.get(&key).is_some_and(|s| s.just_pressed)
    }

    /// Check if any key bound to an action was just pressed this frame.
    #[must_use]
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|binding| {
            self.is_key_just_pressed(binding.primary)
                || binding
                    .secondary
                    .is_some_and(|key| self.is_key_just_pressed(key))
        })
    }

    /// Process raw input into the per-frame direction value.
    #[must_use]
    pub fn process(&self) -> DirectionInput {
        DirectionInput {
            up: self.is_action_just_pressed(Action::MoveUp),
            down: self.is_action_just_pressed(Action::MoveDown),
            left: self.is_action_just_pressed(Action::MoveLeft),
            right: self.is_action_just_pressed(Action::MoveRight),
        }
    }

    /// Clear frame-specific state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        for state in self.key_states.values_mut() {
            state.clear_frame();
        }
    }
}
