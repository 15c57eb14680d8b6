//! Touch controller
//!
//! The pad controller is woken with a command byte on its primary address, the
//! touch word can then be read back from the primary address or, on boards
//! where it stays silent, from the secondary address.
//!
//! Both addresses hand us the same two bytes. We keep the word in wire
//! (big endian) order and recover the key mask with [`normalize_byte_order`].

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Read, Write};

use crate::system::input::{KeyMask, NONE};

pub const PRIMARY_ADDRESS: u8 = 0x50;
pub const SECONDARY_ADDRESS: u8 = 0x57;
pub const READ_COMMAND: u8 = 8;

/// Touch word exactly as it came off the bus
pub type RawTouchReading = u16;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error<E> {
    Bus(E),
}

/// Which address(es) the touch word is read from
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ReadPolicy {
    /// Primary first, secondary when the primary reads zero
    PrimaryThenSecondary,
    PrimaryOnly,
    SecondaryOnly,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub primary_address: u8,
    pub secondary_address: u8,
    pub command: u8,
    pub policy: ReadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_address: PRIMARY_ADDRESS,
            secondary_address: SECONDARY_ADDRESS,
            command: READ_COMMAND,
            policy: ReadPolicy::PrimaryThenSecondary,
        }
    }
}

/// Swap the high and low bytes of a raw reading. Its own inverse.
pub const fn normalize_byte_order(raw: RawTouchReading) -> KeyMask {
    (raw << 8) | (raw >> 8)
}

pub struct TouchController<I> {
    i2c: I,
    config: Config,
    bus_errors: u32,
}

impl<I, E> TouchController<I>
where
    I: Write<Error = E> + Read<Error = E>,
    E: Debug,
{
    pub fn new(i2c: I, config: Config) -> Self {
        Self {
            i2c,
            config,
            bus_errors: 0,
        }
    }

    /// Read the touch word, any bus failure reads as zero
    pub fn read_raw(&mut self) -> RawTouchReading {
        if cfg!(feature = "disable-input") {
            return NONE;
        }
        if let Err(e) = self.wake() {
            warn!("Failed to wake the touch controller: {:?}", e);
            self.bus_errors += 1;
            return NONE;
        }
        self.select(|touch, address| Ok::<_, Infallible>(touch.read_or_zero(address)))
            .unwrap_or(NONE)
    }

    /// Same as `read_raw` but reports the first bus failure instead of absorbing it
    pub fn try_read_raw(&mut self) -> Result<RawTouchReading, Error<E>> {
        if cfg!(feature = "disable-input") {
            return Ok(NONE);
        }
        self.wake()?;
        self.select(Self::read_word)
    }

    /// Bus failures absorbed so far
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    pub fn release(self) -> I {
        self.i2c
    }

    fn wake(&mut self) -> Result<(), Error<E>> {
        self.i2c
            .write(self.config.primary_address, &[self.config.command])
            .map_err(Error::Bus)
    }

    fn read_word(&mut self, address: u8) -> Result<RawTouchReading, Error<E>> {
        let mut buf = [0u8; 2];
        self.i2c.read(address, &mut buf).map_err(Error::Bus)?;
        Ok(RawTouchReading::from_be_bytes(buf))
    }

    /// Applies the read policy, `read` fetches the word at one address
    fn select<F, Err>(&mut self, mut read: F) -> Result<RawTouchReading, Err>
    where
        F: FnMut(&mut Self, u8) -> Result<RawTouchReading, Err>,
    {
        let (first, fallback) = match self.config.policy {
            ReadPolicy::PrimaryOnly => (self.config.primary_address, None),
            ReadPolicy::SecondaryOnly => (self.config.secondary_address, None),
            ReadPolicy::PrimaryThenSecondary => (
                self.config.primary_address,
                Some(self.config.secondary_address),
            ),
        };
        match (read(self, first)?, fallback) {
            (NONE, Some(address)) => read(self, address),
            (raw, _) => Ok(raw),
        }
    }

    fn read_or_zero(&mut self, address: u8) -> RawTouchReading {
        self.read_word(address).unwrap_or_else(|e| {
            warn!("Failed to read touch word from {:#04x}: {:?}", address, e);
            self.bus_errors += 1;
            NONE
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::vec::Vec;

    use crate::system::input::{C, D, GLITCH};

    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct Nack;

    /// Canned bus, answers each address with fixed bytes or a NACK
    pub struct FakeBus {
        pub primary: Result<[u8; 2], Nack>,
        pub secondary: Result<[u8; 2], Nack>,
        pub wake: Result<(), Nack>,
        pub writes: Vec<(u8, Vec<u8>)>,
        pub reads: Vec<u8>,
    }

    impl FakeBus {
        pub fn new(primary: [u8; 2], secondary: [u8; 2]) -> Self {
            Self {
                primary: Ok(primary),
                secondary: Ok(secondary),
                wake: Ok(()),
                writes: Vec::new(),
                reads: Vec::new(),
            }
        }
    }

    impl Write for FakeBus {
        type Error = Nack;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Nack> {
            self.writes.push((address, bytes.to_vec()));
            self.wake
        }
    }

    impl Read for FakeBus {
        type Error = Nack;

        fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Nack> {
            self.reads.push(address);
            let bytes = match address {
                PRIMARY_ADDRESS => self.primary?,
                SECONDARY_ADDRESS => self.secondary?,
                _ => return Err(Nack),
            };
            buffer.copy_from_slice(&bytes);
            Ok(())
        }
    }

    fn controller(bus: FakeBus) -> TouchController<FakeBus> {
        TouchController::new(bus, Config::default())
    }

    #[test]
    fn byte_swap_is_its_own_inverse() {
        for raw in [0x0000, 0x0001, 0x0100, 0x1234, 0xABCD, 0xFF00, 0xFFFF] {
            assert_eq!(normalize_byte_order(normalize_byte_order(raw)), raw);
        }
        assert_eq!(normalize_byte_order(0x1234), 0x3412);
        assert_eq!(normalize_byte_order(0x0100), C);
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn wakes_then_reads_primary() {
        let mut touch = controller(FakeBus::new([0x04, 0x00], [0x00, 0x00]));
        let raw = touch.read_raw();
        assert_eq!(normalize_byte_order(raw), D);

        let bus = touch.release();
        assert_eq!(bus.writes, vec![(PRIMARY_ADDRESS, vec![READ_COMMAND])]);
        // a non zero primary never touches the secondary
        assert_eq!(bus.reads, vec![PRIMARY_ADDRESS]);
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn falls_back_to_secondary() {
        let mut touch = controller(FakeBus::new([0x00, 0x00], [0x01, 0x00]));
        assert_eq!(normalize_byte_order(touch.read_raw()), C);
        assert_eq!(touch.release().reads, vec![PRIMARY_ADDRESS, SECONDARY_ADDRESS]);
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn failed_primary_falls_back() {
        let mut bus = FakeBus::new([0x00, 0x00], [0x00, 0x10]);
        bus.primary = Err(Nack);
        let mut touch = controller(bus);
        assert_eq!(normalize_byte_order(touch.read_raw()), 1 << 12);
        assert_eq!(touch.bus_errors(), 1);
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn failed_wake_reads_zero() {
        let mut bus = FakeBus::new([0x01, 0x00], [0x01, 0x00]);
        bus.wake = Err(Nack);
        let mut touch = controller(bus);
        assert_eq!(touch.read_raw(), 0);
        assert_eq!(touch.bus_errors(), 1);
        assert!(touch.release().reads.is_empty());
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn try_read_reports_failure() {
        let mut bus = FakeBus::new([0x00, 0x00], [0x00, 0x00]);
        bus.secondary = Err(Nack);
        let mut touch = controller(bus);
        assert_eq!(touch.try_read_raw(), Err(Error::Bus(Nack)));
        assert_eq!(touch.bus_errors(), 0);
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn single_address_policies() {
        let config = Config {
            policy: ReadPolicy::SecondaryOnly,
            ..Config::default()
        };
        let mut touch = TouchController::new(FakeBus::new([0x01, 0x00], [0xFF, 0xFF]), config);
        assert_eq!(touch.read_raw(), GLITCH);
        assert_eq!(touch.release().reads, vec![SECONDARY_ADDRESS]);

        let config = Config {
            policy: ReadPolicy::PrimaryOnly,
            ..Config::default()
        };
        let mut touch = TouchController::new(FakeBus::new([0x00, 0x00], [0x01, 0x00]), config);
        assert_eq!(touch.read_raw(), 0);
        assert_eq!(touch.release().reads, vec![PRIMARY_ADDRESS]);
    }

    #[test]
    #[cfg(not(feature = "disable-input"))]
    fn try_read_follows_the_same_policy() {
        let mut touch = controller(FakeBus::new([0x00, 0x00], [0x01, 0x00]));
        assert_eq!(touch.try_read_raw().map(normalize_byte_order), Ok(C));
        assert_eq!(touch.release().reads, vec![PRIMARY_ADDRESS, SECONDARY_ADDRESS]);

        let config = Config {
            policy: ReadPolicy::SecondaryOnly,
            ..Config::default()
        };
        let mut touch = TouchController::new(FakeBus::new([0x04, 0x00], [0x00, 0x00]), config);
        assert_eq!(touch.try_read_raw(), Ok(0));
        assert_eq!(touch.release().reads, vec![SECONDARY_ADDRESS]);
    }

    #[test]
    #[cfg(feature = "disable-input")]
    fn disabled_input_never_touches_the_bus() {
        let mut touch = controller(FakeBus::new([0x01, 0x00], [0x01, 0x00]));
        assert_eq!(touch.read_raw(), NONE);
        assert_eq!(touch.try_read_raw(), Ok(NONE));
        assert_eq!(touch.bus_errors(), 0);

        let bus = touch.release();
        assert!(bus.writes.is_empty());
        assert!(bus.reads.is_empty());
    }
}
