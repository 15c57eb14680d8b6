//! RGB LEDs
//!
//! Four addressable pixels sit above the keys. Colours are packed `0xRRGGBB`.

use core::fmt::Debug;

use crate::system::random::Entropy;

pub const LED_COUNT: usize = 4;
pub const FULL_BRIGHTNESS: u8 = 100;
pub const OFF: u32 = 0;

/// Well known colours
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0xFF0000,
    Orange = 0xFFA500,
    Yellow = 0xFFFF00,
    Green = 0x00FF00,
    Blue = 0x0000FF,
    Indigo = 0x4B0082,
    Violet = 0x8A2BE2,
    Purple = 0xFF00FF,
    White = 0xFFFFFF,
}

/// Packed value of a well known colour
pub const fn set_color(color: Color) -> u32 {
    color as u32
}

/// Pack red, green and blue into `0xRRGGBB`
pub const fn set_rgb(red: u8, green: u8, blue: u8) -> u32 {
    ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

pub fn random_color(entropy: &mut impl Entropy) -> u32 {
    set_rgb(entropy.next_u8(), entropy.next_u8(), entropy.next_u8())
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Led1 = 0,
    Led2 = 1,
    Led3 = 2,
    Led4 = 3,
}

impl Led {
    pub const ALL: [Led; LED_COUNT] = [Led::Led1, Led::Led2, Led::Led3, Led::Led4];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLed(pub u8);

impl TryFrom<u8> for Led {
    type Error = InvalidLed;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Led::ALL
            .get(index as usize)
            .copied()
            .ok_or(InvalidLed(index))
    }
}

/// Driver for the pixel strip, implemented by the host
pub trait LedStrip {
    type Error: Debug;

    /// Stage a colour, nothing changes until `show`
    fn set_pixel(&mut self, index: usize, color: u32) -> Result<(), Self::Error>;
    fn show(&mut self) -> Result<(), Self::Error>;
    /// Percentage, 0 - 100
    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error>;
}

/// The four board LEDs on top of a strip driver
pub struct RgbLeds<S> {
    strip: S,
    brightness: u8,
}

impl<S: LedStrip> RgbLeds<S> {
    pub fn new(strip: S, brightness: u8) -> Self {
        Self {
            strip,
            brightness: brightness.min(FULL_BRIGHTNESS),
        }
    }

    /// Set all four pixels and latch them
    pub fn show_rgb(&mut self, colors: [u32; LED_COUNT]) -> Result<(), S::Error> {
        for (index, color) in colors.iter().enumerate() {
            self.strip.set_pixel(index, *color)?;
        }
        self.strip.show()
    }

    pub fn show_single(&mut self, led: Led, color: u32) -> Result<(), S::Error> {
        self.strip.set_brightness(self.brightness)?;
        self.strip.set_pixel(led.index(), color)?;
        self.strip.show()
    }

    pub fn off_single(&mut self, led: Led) -> Result<(), S::Error> {
        self.show_single(led, OFF)
    }

    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.show_rgb([OFF; LED_COUNT])
    }

    pub fn release(self) -> S {
        self.strip
    }
}
