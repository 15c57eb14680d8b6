//! Statistics
//!
//! Counters for the play loop, printable line by line by the host.

use core::fmt::Write;

use heapless::String;

use crate::system::input::Transition;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Stats {
    pub cycles: u32,
    pub strikes: u32,
    pub holds: u32,
    pub silences: u32,
    pub glitches: u32,
    pub bus_errors: u32,
}

impl Stats {
    pub fn record(&mut self, transition: Transition) {
        self.cycles = self.cycles.wrapping_add(1);
        let counter = match transition {
            Transition::Strike(_) => &mut self.strikes,
            Transition::Hold => &mut self.holds,
            Transition::Silence => &mut self.silences,
            Transition::Glitch => &mut self.glitches,
        };
        *counter = counter.wrapping_add(1);
    }

    pub fn lines(&self) -> StatsIter {
        StatsIter {
            stats: *self,
            index: 0,
        }
    }
}

pub struct StatsIter {
    index: usize,
    stats: Stats,
}

impl Iterator for StatsIter {
    type Item = String<32>;

    /// Anything that needs to be printed should be produced by this iterator
    fn next(&mut self) -> Option<Self::Item> {
        let mut buffer = String::new();
        // u32 counters never overflow 32 chars, ignore the fmt result
        let _ = match self.index {
            0 => write!(buffer, "CYCLES: {}", self.stats.cycles),
            1 => write!(buffer, "STRIKES: {}", self.stats.strikes),
            2 => write!(buffer, "HOLDS: {}", self.stats.holds),
            3 => write!(buffer, "SILENT: {}", self.stats.silences),
            4 => write!(buffer, "GLITCHES: {}", self.stats.glitches),
            5 => write!(buffer, "BUS ERRORS: {}", self.stats.bus_errors),
            _ => return None,
        };
        self.index += 1;
        Some(buffer)
    }
}
