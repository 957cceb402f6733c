use crate::utils::error::WorldError;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One of the eight compass directions a block or chunk can be linked in.
///
/// The discriminant doubles as the slot index in link tables, so the order
/// here is the clockwise order starting from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::NE => Self::SW,
            Self::E => Self::W,
            Self::SE => Self::NW,
            Self::S => Self::N,
            Self::SW => Self::NE,
            Self::W => Self::E,
            Self::NW => Self::SE,
        }
    }

    /// Unit offset of this direction with y pointing north.
    pub fn delta(self) -> IVec2 {
        match self {
            Self::N => IVec2::new(0, 1),
            Self::NE => IVec2::new(1, 1),
            Self::E => IVec2::new(1, 0),
            Self::SE => IVec2::new(1, -1),
            Self::S => IVec2::new(0, -1),
            Self::SW => IVec2::new(-1, -1),
            Self::W => IVec2::new(-1, 0),
            Self::NW => IVec2::new(-1, 1),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
            Self::NW => "nw",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Direction {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WorldError::DirectionMismatch(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution_and_negates_delta() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().delta(), -dir.delta());
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn index_matches_table_order() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn parses_tokens() {
        assert_eq!("ne".parse::<Direction>().unwrap(), Direction::NE);
        assert_eq!(" SW ".parse::<Direction>().unwrap(), Direction::SW);
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>().unwrap(), dir);
        }
    }

    #[test]
    fn unknown_token_is_a_mismatch() {
        assert!(matches!(
            "up".parse::<Direction>(),
            Err(WorldError::DirectionMismatch(token)) if token == "up"
        ));
    }
}
