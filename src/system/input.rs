//! Input
//!
//! Each of the 13 piano keys owns one bit of a 16 bit mask, C in bit 0 up to
//! the high C in bit 12. Several bits may be set at once when more than one pad
//! is touched, but the piano only ever sounds one voice: the decoder below picks
//! which key that is and keeps holding it while the pad stays touched.

pub type KeyMask = u16;

pub const NONE: KeyMask = 0;
pub const C: KeyMask = Key::C.mask();
pub const DB: KeyMask = Key::Db.mask();
pub const D: KeyMask = Key::D.mask();
pub const EB: KeyMask = Key::Eb.mask();
pub const E: KeyMask = Key::E.mask();
pub const F: KeyMask = Key::F.mask();
pub const GB: KeyMask = Key::Gb.mask();
pub const G: KeyMask = Key::G.mask();
pub const AB: KeyMask = Key::Ab.mask();
pub const A: KeyMask = Key::A.mask();
pub const BB: KeyMask = Key::Bb.mask();
pub const B: KeyMask = Key::B.mask();
pub const C1: KeyMask = Key::C1.mask();
pub const ALL_KEYS: KeyMask = C | DB | D | EB | E | F | GB | G | AB | A | BB | B | C1;

/// An all ones frame, the controller produces these when a read goes wrong
pub const GLITCH: KeyMask = 0xFFFF;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    C = 1 << 0,
    Db = 1 << 1,
    D = 1 << 2,
    Eb = 1 << 3,
    E = 1 << 4,
    F = 1 << 5,
    Gb = 1 << 6,
    G = 1 << 7,
    Ab = 1 << 8,
    A = 1 << 9,
    Bb = 1 << 10,
    B = 1 << 11,
    C1 = 1 << 12,
}

/// Keys in the order they are tested, paired with the tone they sound (Hz).
/// Lowest pitch first, so the lowest touched key wins.
pub const KEY_TABLE: [(Key, u16); 13] = [
    (Key::C, 262),
    (Key::Db, 277),
    (Key::D, 294),
    (Key::Eb, 311),
    (Key::E, 330),
    (Key::F, 349),
    (Key::Gb, 370),
    (Key::G, 392),
    (Key::Ab, 415),
    (Key::A, 440),
    (Key::Bb, 466),
    (Key::B, 494),
    (Key::C1, 523),
];

impl Key {
    /// Every key, lowest first
    pub fn all() -> impl Iterator<Item = Key> {
        KEY_TABLE.into_iter().map(|(key, _)| key)
    }

    pub const fn mask(self) -> KeyMask {
        self as KeyMask
    }

    /// Tone frequency in Hz
    pub fn frequency(self) -> u16 {
        KEY_TABLE[self.mask().trailing_zeros() as usize].1
    }

    /// The key owning exactly this mask
    pub fn from_mask(mask: KeyMask) -> Option<Key> {
        Key::all().find(|key| key.mask() == mask)
    }
}

/// What a caller can ask `is_pressed` about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyQuery {
    /// Nothing is touched
    None,
    Key(Key),
    /// Any key of a combined mask
    Chord(KeyMask),
}

impl KeyQuery {
    pub fn mask(self) -> KeyMask {
        match self {
            KeyQuery::None => NONE,
            KeyQuery::Key(key) => key.mask(),
            KeyQuery::Chord(mask) => mask,
        }
    }
}

impl From<Key> for KeyQuery {
    fn from(key: Key) -> Self {
        KeyQuery::Key(key)
    }
}

/// True if any bit of `key` is set in `mask`. Asking about `NONE` is asking
/// whether nothing is touched at all.
pub fn is_pressed(mask: KeyMask, key: KeyMask) -> bool {
    if key != NONE {
        mask & key != 0
    } else {
        mask == NONE
    }
}

/// The mask that last produced a sound, threaded from one poll to the next.
///
/// Either idle (zero) or holding one or more key bits, never anything above
/// bit 12.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveKeyState(KeyMask);

impl ActiveKeyState {
    pub const IDLE: ActiveKeyState = ActiveKeyState(NONE);

    pub fn mask(&self) -> KeyMask {
        self.0
    }

    pub fn is_holding(&self) -> bool {
        self.0 != NONE
    }

    /// The lowest key being held
    pub fn key(&self) -> Option<Key> {
        Key::all().find(|key| self.0 & key.mask() != 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The previously sounding key is still touched, don't retrigger
    Hold,
    /// A new key was touched
    Strike(Key),
    /// No key is touched
    Silence,
    /// Garbage frame, ignored
    Glitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub mask: KeyMask,
    pub transition: Transition,
    pub active: ActiveKeyState,
}

/// Decide which key a reading sounds, given the key that sounded last poll.
///
/// Overlap with the previous key wins, then the lowest touched key. A glitch
/// frame still resolves but never replaces `previous`.
pub fn resolve_active_key(mask: KeyMask, previous: ActiveKeyState) -> Resolution {
    let (resolved, transition) = if mask & previous.mask() != 0 {
        (mask & previous.mask(), Transition::Hold)
    } else if let Some((key, _)) = KEY_TABLE.iter().find(|(key, _)| mask & key.mask() != 0) {
        (key.mask(), Transition::Strike(*key))
    } else {
        // reserved bits alone are as good as nothing
        (NONE, Transition::Silence)
    };

    if mask == GLITCH {
        Resolution {
            mask: resolved,
            transition: Transition::Glitch,
            active: previous,
        }
    } else {
        Resolution {
            mask: resolved,
            transition,
            active: ActiveKeyState(resolved),
        }
    }
}
