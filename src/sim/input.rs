//! Discrete control state
//!
//! Key events arrive between ticks and only flip flags here. The tick reads
//! the table once at its start, so the last write before a tick wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed set of driving controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Control {
    Accelerate,
    /// Tracked but unused by the driving model (friction alone slows the car)
    Brake,
    SteerLeft,
    SteerRight,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Accelerate,
        Control::Brake,
        Control::SteerLeft,
        Control::SteerRight,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Control::Accelerate => 0,
            Control::Brake => 1,
            Control::SteerLeft => 2,
            Control::SteerRight => 3,
        }
    }
}

/// Maps DOM `KeyboardEvent.code` values to controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub keys: BTreeMap<String, Control>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = [
            ("ArrowUp", Control::Accelerate),
            ("ArrowDown", Control::Brake),
            ("ArrowLeft", Control::SteerLeft),
            ("ArrowRight", Control::SteerRight),
        ]
        .into_iter()
        .map(|(code, control)| (code.to_string(), control))
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    /// Control bound to a key code, if any
    pub fn lookup(&self, code: &str) -> Option<Control> {
        self.keys.get(code).copied()
    }

    /// Bind a key code to a control (replacing any previous binding for that code)
    pub fn bind(&mut self, code: impl Into<String>, control: Control) {
        self.keys.insert(code.into(), control);
    }
}

/// Held/released flag per control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; 4],
}

impl InputState {
    /// Input with the given controls held
    pub fn with(controls: &[Control]) -> Self {
        let mut input = Self::default();
        for &control in controls {
            input.press(control);
        }
        input
    }

    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    pub fn set(&mut self, control: Control, held: bool) {
        self.held[control.index()] = held;
    }

    pub fn press(&mut self, control: Control) {
        self.set(control, true);
    }

    pub fn release(&mut self, control: Control) {
        self.set(control, false);
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    /// Apply a raw key event. Returns false (and changes nothing) for
    /// unbound key codes.
    pub fn apply_key(&mut self, bindings: &KeyBindings, code: &str, pressed: bool) -> bool {
        match bindings.lookup(code) {
            Some(control) => {
                self.set(control, pressed);
                true
            }
            None => false,
        }
    }
}
