//! Piano
//!
//! Ties the touch controller, the LEDs and the buzzer together. The host
//! builds one `Piano` from its hardware handles and calls [`Piano::play`] once
//! per pass of its main loop, handing back the state the previous call
//! returned.

use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Read, Write};

use crate::system::{
    input::{self, resolve_active_key, ActiveKeyState, KeyMask, KeyQuery, Transition},
    led::{self, Led, LedStrip, RgbLeds, FULL_BRIGHTNESS, LED_COUNT, OFF},
    random::Entropy,
    stats::Stats,
    tone::{ToneGenerator, SILENCE},
    touch::{self, normalize_byte_order, TouchController},
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub touch: touch::Config,
    /// Brightness applied by the single LED helpers, percent
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            touch: touch::Config::default(),
            brightness: FULL_BRIGHTNESS,
        }
    }
}

pub struct Piano<I, S, T, R> {
    touch: TouchController<I>,
    leds: RgbLeds<S>,
    tone: T,
    entropy: R,
    stats: Stats,
}

impl<I, E, S, T, R> Piano<I, S, T, R>
where
    I: Write<Error = E> + Read<Error = E>,
    E: Debug,
    S: LedStrip,
    T: ToneGenerator,
    R: Entropy,
{
    pub fn new(i2c: I, strip: S, tone: T, entropy: R, config: Config) -> Self {
        Self {
            touch: TouchController::new(i2c, config.touch),
            leds: RgbLeds::new(strip, config.brightness),
            tone,
            entropy,
            stats: Stats::default(),
        }
    }

    /// Current key mask, zero when nothing is touched or the bus failed
    pub fn reading(&mut self) -> KeyMask {
        normalize_byte_order(self.touch.read_raw())
    }

    /// Polls the pads and answers whether `query` is touched
    pub fn is_pressed(&mut self, query: impl Into<KeyQuery>) -> bool {
        let query = query.into();
        input::is_pressed(self.reading(), query.mask())
    }

    /// One pass of the play loop. Sounds a newly touched key, keeps a held one
    /// ringing and goes quiet once everything is released.
    pub fn play(&mut self, active: ActiveKeyState) -> ActiveKeyState {
        let mask = self.reading();
        let resolution = resolve_active_key(mask, active);
        self.stats.record(resolution.transition);

        match resolution.transition {
            Transition::Strike(key) => {
                trace!("Strike {:?} from {:#06x}", key, mask);
                self.show_random_colors();
                self.tone.ring_tone(key.frequency());
            }
            Transition::Hold => {}
            Transition::Silence => {
                self.leds
                    .clear()
                    .unwrap_or_else(|e| error!("Failed to clear the LEDs: {:?}", e));
                self.tone.ring_tone(SILENCE);
            }
            Transition::Glitch => {
                debug!("Ignoring glitch frame, holding {:#06x}", active.mask());
            }
        }

        resolution.active
    }

    fn show_random_colors(&mut self) {
        let mut colors = [OFF; LED_COUNT];
        for color in colors.iter_mut() {
            *color = led::random_color(&mut self.entropy);
        }
        self.leds
            .show_rgb(colors)
            .unwrap_or_else(|e| error!("Failed to show key colours: {:?}", e));
    }

    pub fn show_rgb(&mut self, colors: [u32; LED_COUNT]) -> Result<(), S::Error> {
        self.leds.show_rgb(colors)
    }

    pub fn show_single(&mut self, led: Led, color: u32) -> Result<(), S::Error> {
        self.leds.show_single(led, color)
    }

    pub fn off_single(&mut self, led: Led) -> Result<(), S::Error> {
        self.leds.off_single(led)
    }

    /// Play `frequency` Hz for `duration_ms`
    pub fn play_music(&mut self, frequency: u16, duration_ms: u32) {
        self.tone.play_tone(frequency, duration_ms);
    }

    pub fn volume(&mut self, volume: u8) {
        self.tone.set_volume(volume);
    }

    /// Stop all sounds
    pub fn quiet(&mut self) {
        self.tone.stop_all_sounds();
    }

    pub fn stats(&self) -> Stats {
        Stats {
            bus_errors: self.touch.bus_errors(),
            ..self.stats
        }
    }

    /// Hand the hardware back to the host
    pub fn release(self) -> (I, S, T, R) {
        (self.touch.release(), self.leds.release(), self.tone, self.entropy)
    }
}
