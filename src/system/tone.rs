//! Buzzer
//!
//! Tones are fire and forget, the generator keeps ringing until told otherwise.

pub const SILENCE: u16 = 0;

pub trait ToneGenerator {
    /// Ring `frequency` Hz until the next call, `SILENCE` stops it
    fn ring_tone(&mut self, frequency: u16);
    /// Play `frequency` Hz for `duration_ms`
    fn play_tone(&mut self, frequency: u16, duration_ms: u32);
    fn set_volume(&mut self, volume: u8);
    fn stop_all_sounds(&mut self);
}
