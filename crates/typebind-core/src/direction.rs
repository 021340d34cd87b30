//! Parameter directions and handler roles.

use std::fmt::{self, Display, Formatter};

use bitflags::bitflags;

/// Which way a value crosses the native call boundary.
///
/// - `In`: the value is passed into the native call
/// - `Out`: the native call writes the value back to the caller
/// - `InOut`: both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

impl Direction {
    /// Lowercase name used in diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }

    /// The single-bit flag for this direction.
    pub const fn as_flag(self) -> Directions {
        match self {
            Direction::In => Directions::IN,
            Direction::Out => Directions::OUT,
            Direction::InOut => Directions::INOUT,
        }
    }

    /// Whether a value flows into the native call.
    #[inline]
    pub const fn is_input(self) -> bool {
        matches!(self, Direction::In | Direction::InOut)
    }

    /// Whether a value flows back out of the native call.
    #[inline]
    pub const fn is_output(self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of directions a handler supports.
    ///
    /// ```
    /// use typebind_core::{Direction, Directions};
    ///
    /// let all = Directions::all();
    /// assert!(all.supports(Direction::Out));
    /// assert!(!Directions::IN.supports(Direction::InOut));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        const IN = 1 << 0;
        const OUT = 1 << 1;
        const INOUT = 1 << 2;
    }
}

impl Directions {
    /// Whether `direction` is a member of this set.
    #[inline]
    pub fn supports(self, direction: Direction) -> bool {
        self.contains(direction.as_flag())
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        direction.as_flag()
    }
}

/// The slot a handler fills in a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Parameter,
    ReturnValue,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Parameter => "parameter",
            Role::ReturnValue => "return value",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
