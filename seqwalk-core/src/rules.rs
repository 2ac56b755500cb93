//! Per-symbol movement and color rules

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Rgb, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRule {
    pub direction: Direction,
    pub color: Rgb,
}

impl SymbolRule {
    pub const fn new(direction: Direction, color: Rgb) -> Self {
        Self { direction, color }
    }
}

/// One rule per symbol class. The fallback rule `x` always exists, so lookup
/// is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub a: SymbolRule,
    pub t: SymbolRule,
    pub g: SymbolRule,
    pub c: SymbolRule,
    pub x: SymbolRule,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            a: SymbolRule::new(Direction::N, Rgb::new(0x2c, 0xa0, 0x2c)),
            t: SymbolRule::new(Direction::S, Rgb::new(0xd6, 0x27, 0x28)),
            g: SymbolRule::new(Direction::E, Rgb::new(0xff, 0x7f, 0x0e)),
            c: SymbolRule::new(Direction::W, Rgb::new(0x1f, 0x77, 0xb4)),
            x: SymbolRule::new(Direction::None, Rgb::new(0x7f, 0x7f, 0x7f)),
        }
    }
}

impl RuleTable {
    /// Rule for a symbol class.
    pub fn get(&self, symbol: Symbol) -> &SymbolRule {
        match symbol {
            Symbol::A => &self.a,
            Symbol::T => &self.t,
            Symbol::G => &self.g,
            Symbol::C => &self.c,
            Symbol::Other => &self.x,
        }
    }

    pub fn get_mut(&mut self, symbol: Symbol) -> &mut SymbolRule {
        match symbol {
            Symbol::A => &mut self.a,
            Symbol::T => &mut self.t,
            Symbol::G => &mut self.g,
            Symbol::C => &mut self.c,
            Symbol::Other => &mut self.x,
        }
    }

    /// Rule for a raw input character (case-insensitive, fallback for anything else).
    pub fn rule_for(&self, c: char) -> &SymbolRule {
        self.get(Symbol::classify(c))
    }

    /// Convenience constructor for tests and presets: directions only, default colors.
    pub fn with_directions(a: Direction, t: Direction, g: Direction, c: Direction, x: Direction) -> Self {
        let mut table = Self::default();
        table.a.direction = a;
        table.t.direction = t;
        table.g.direction = g;
        table.c.direction = c;
        table.x.direction = x;
        table
    }
}
