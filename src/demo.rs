//! Demo
//!
//! Lights the LEDs in a chase at power up so the board can be checked by eye,
//! then hands over to the play loop.

use core::fmt::Debug;

use embedded_hal::blocking::{
    delay::DelayMs,
    i2c::{Read, Write},
};

use crate::{
    piano::Piano,
    system::{
        input::ActiveKeyState,
        led::{set_color, Color, Led, LedStrip, LED_COUNT},
        random::Entropy,
        tone::ToneGenerator,
    },
};

pub const PAUSE_MS: u16 = 100;
pub const CHASE_ROUNDS: usize = 5;

/// Colour each LED takes during the chase
pub const CHASE: [(Led, Color); LED_COUNT] = [
    (Led::Led1, Color::Red),
    (Led::Led2, Color::Green),
    (Led::Led3, Color::Blue),
    (Led::Led4, Color::Yellow),
];

/// Power up LED chase
pub fn startup<I, E, S, T, R, D>(
    piano: &mut Piano<I, S, T, R>,
    delay: &mut D,
) -> Result<(), S::Error>
where
    I: Write<Error = E> + Read<Error = E>,
    E: Debug,
    S: LedStrip,
    T: ToneGenerator,
    R: Entropy,
    D: DelayMs<u16>,
{
    info!("Piano starting up");
    for led in Led::ALL {
        piano.off_single(led)?;
    }
    delay.delay_ms(PAUSE_MS);

    for _ in 0..CHASE_ROUNDS {
        for (led, color) in CHASE {
            piano.show_single(led, set_color(color))?;
            delay.delay_ms(PAUSE_MS);
        }
        for led in Led::ALL {
            piano.off_single(led)?;
        }
        delay.delay_ms(PAUSE_MS);
    }
    Ok(())
}

/// Chase, then play forever
pub fn run<I, E, S, T, R, D>(mut piano: Piano<I, S, T, R>, mut delay: D) -> !
where
    I: Write<Error = E> + Read<Error = E>,
    E: Debug,
    S: LedStrip,
    T: ToneGenerator,
    R: Entropy,
    D: DelayMs<u16>,
{
    startup(&mut piano, &mut delay)
        .unwrap_or_else(|e| error!("LED chase failed: {:?}", e));

    let mut active = ActiveKeyState::IDLE;
    loop {
        active = piano.play(active);
    }
}
