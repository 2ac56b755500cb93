use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WalkError;

/// Symbol classes recognised by the walk. Everything that is not one of the
/// four nucleotides falls into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    A,
    T,
    G,
    C,
    Other,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [Symbol::A, Symbol::T, Symbol::G, Symbol::C, Symbol::Other];

    /// Case-folding classification; total over all characters.
    pub fn classify(c: char) -> Self {
        match c {
            'a' | 'A' => Symbol::A,
            't' | 'T' => Symbol::T,
            'g' | 'G' => Symbol::G,
            'c' | 'C' => Symbol::C,
            _ => Symbol::Other,
        }
    }

    /// Short key used in settings files and the interactive session.
    pub fn key(self) -> &'static str {
        match self {
            Symbol::A => "a",
            Symbol::T => "t",
            Symbol::G => "g",
            Symbol::C => "c",
            Symbol::Other => "x",
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::classify(c)
    }
}

impl FromStr for Symbol {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Symbol::A),
            "t" => Ok(Symbol::T),
            "g" => Ok(Symbol::G),
            "c" => Ok(Symbol::C),
            "x" | "other" => Ok(Symbol::Other),
            other => Err(WalkError::invalid_setting(
                "symbol",
                format!("unknown symbol class '{}' (expected a, t, g, c or x)", other),
            )),
        }
    }
}

/// Compass direction a symbol moves the cursor in. North is `+y`, east is `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
    NE,
    NW,
    SE,
    SW,
    #[default]
    None,
}

impl Direction {
    /// Axis deltas applied to the cursor for one step.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::N => (0, 1),
            Direction::E => (1, 0),
            Direction::S => (0, -1),
            Direction::W => (-1, 0),
            Direction::NE => (1, 1),
            Direction::NW => (-1, 1),
            Direction::SE => (1, -1),
            Direction::SW => (-1, -1),
            Direction::None => (0, 0),
        }
    }

    /// Parses a direction name, mapping anything unrecognised to `None`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(direction) => direction,
            Err(_) => {
                log::warn!("Unrecognised direction '{}', symbol will not move the cursor", s);
                Direction::None
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::E => "E",
            Direction::S => "S",
            Direction::W => "W",
            Direction::NE => "NE",
            Direction::NW => "NW",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::None => "none",
        }
    }
}

impl FromStr for Direction {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Direction::N),
            "E" => Ok(Direction::E),
            "S" => Ok(Direction::S),
            "W" => Ok(Direction::W),
            "NE" => Ok(Direction::NE),
            "NW" => Ok(Direction::NW),
            "SE" => Ok(Direction::SE),
            "SW" => Ok(Direction::SW),
            "" | "NONE" => Ok(Direction::None),
            other => Err(WalkError::invalid_setting(
                "direction",
                format!("unknown direction '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit color, serialized as an `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, WalkError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || WalkError::invalid_setting("color", format!("'{}' is not a #rrggbb color", hex));

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl FromStr for Rgb {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
