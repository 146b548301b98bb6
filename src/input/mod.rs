//! Joystick and button input.
//!
//! The Astro Pi flight case has four direction buttons and two action
//! buttons wired to GPIO. With the `gpio` feature they are read through
//! `rppal`; without it a scripted provider stands in.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Pressed state of the joystick directions and the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoystickState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub button: bool,
}

impl JoystickState {
    /// Nothing pressed.
    pub const IDLE: JoystickState = JoystickState {
        up: false,
        down: false,
        left: false,
        right: false,
        button: false,
    };

    /// Everything pressed.
    pub const ALL: JoystickState = JoystickState {
        up: true,
        down: true,
        left: true,
        right: true,
        button: true,
    };

    /// Whether anything is pressed.
    pub fn is_active(&self) -> bool {
        self.up || self.down || self.left || self.right || self.button
    }

    /// Whether any button is pressed now that was not pressed in `previous`.
    pub fn pressed_since(&self, previous: &JoystickState) -> bool {
        (self.up && !previous.up)
            || (self.down && !previous.down)
            || (self.left && !previous.left)
            || (self.right && !previous.right)
            || (self.button && !previous.button)
    }
}

/// Trait for reading the joystick.
pub trait JoystickProvider {
    /// Read the current state of every button.
    fn read_joystick(&mut self) -> Result<JoystickState>;
}

#[cfg(feature = "gpio")]
mod astro_pi {
    use super::*;
    use crate::error::SpaceCraftError;
    use rppal::gpio::{Gpio, InputPin};

    // BCM pin numbers of the Astro Pi flight case buttons.
    const UP: u8 = 26;
    const DOWN: u8 = 13;
    const LEFT: u8 = 20;
    const RIGHT: u8 = 19;
    const A: u8 = 16;
    const B: u8 = 21;

    /// Astro Pi buttons read through rppal. Buttons pull the pin low.
    pub struct AstroPiButtons {
        up: InputPin,
        down: InputPin,
        left: InputPin,
        right: InputPin,
        a: InputPin,
        b: InputPin,
    }

    impl AstroPiButtons {
        pub fn new() -> Result<Self> {
            let gpio = Gpio::new().map_err(|e| {
                SpaceCraftError::gpio_error(format!("Failed to initialize GPIO: {}", e))
            })?;

            let input = |pin: u8| -> Result<InputPin> {
                gpio.get(pin)
                    .map(|p| p.into_input_pullup())
                    .map_err(|e| SpaceCraftError::gpio_error(format!("Failed to claim pin {}: {}", pin, e)))
            };

            Ok(Self {
                up: input(UP)?,
                down: input(DOWN)?,
                left: input(LEFT)?,
                right: input(RIGHT)?,
                a: input(A)?,
                b: input(B)?,
            })
        }
    }

    impl JoystickProvider for AstroPiButtons {
        fn read_joystick(&mut self) -> Result<JoystickState> {
            Ok(JoystickState {
                up: self.up.is_low(),
                down: self.down.is_low(),
                left: self.left.is_low(),
                right: self.right.is_low(),
                button: self.a.is_low() || self.b.is_low(),
            })
        }
    }
}

/// Plays back a fixed sequence of states, then stays idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedJoystick {
    script: VecDeque<JoystickState>,
}

impl ScriptedJoystick {
    pub fn new(script: impl IntoIterator<Item = JoystickState>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// A joystick nobody touches.
    pub fn idle() -> Self {
        Self::default()
    }
}

impl JoystickProvider for ScriptedJoystick {
    fn read_joystick(&mut self) -> Result<JoystickState> {
        Ok(self.script.pop_front().unwrap_or(JoystickState::IDLE))
    }
}

#[cfg(feature = "gpio")]
pub use astro_pi::AstroPiButtons;

/// The flight case buttons.
#[cfg(feature = "gpio")]
pub fn default_provider() -> Result<Box<dyn JoystickProvider>> {
    Ok(Box::new(AstroPiButtons::new()?))
}

/// No buttons on this build, so the joystick stays idle.
#[cfg(not(feature = "gpio"))]
pub fn default_provider() -> Result<Box<dyn JoystickProvider>> {
    Ok(Box::new(ScriptedJoystick::idle()))
}
