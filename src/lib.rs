//! Touch piano
//!
//! Board support for a capacitive touch piano: decodes the touch controller's
//! key mask, lights the four RGB LEDs and drives the buzzer. All hardware is
//! supplied by the host through the traits in [`system`].

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod demo;
pub mod piano;
pub mod system;

pub use piano::{Config, Piano};
pub use system::input::{ActiveKeyState, Key, KeyMask, KeyQuery};
