//! Entropy
//!
//! Source of the random key colours. Boards with a hardware RNG implement
//! [`Entropy`] on it, everything else can use [`XorShift32`].

pub trait Entropy {
    fn next_u8(&mut self) -> u8;
}

/// Marsaglia xorshift, 32 bit state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// A zero seed would lock the generator at zero, it is replaced
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Entropy for XorShift32 {
    fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }
}
