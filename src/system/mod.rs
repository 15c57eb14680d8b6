//! System
//!
//! Hardware facing pieces of the piano board. Each module owns one concern and
//! exposes the trait the host implements for it, the touch controller talks
//! `embedded-hal` I2C directly.

pub mod input;
pub mod led;
pub mod random;
pub mod stats;
pub mod tone;
pub mod touch;
