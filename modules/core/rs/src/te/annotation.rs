use std::fmt::{Display, Formatter};

use super::TeId;

/// Annotation of a single genome position.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Annotation {
    /// The position doesn't belong to any transposable element.
    #[default]
    Empty,
    /// The position belongs to the given active transposable element.
    Active(TeId),
    /// The position belongs to a transposable element that was disabled.
    Disabled,
}

impl Annotation {
    pub const EMPTY: char = '-';
    pub const ACTIVE: char = 'A';
    pub const DISABLED: char = 'x';

    pub fn symbol(&self) -> char {
        match self {
            Annotation::Empty => Self::EMPTY,
            Annotation::Active(_) => Self::ACTIVE,
            Annotation::Disabled => Self::DISABLED,
        }
    }

    /// Identifier of the active element covering the position, if any.
    pub fn active(&self) -> Option<TeId> {
        match self {
            Annotation::Active(te) => Some(*te),
            _ => None,
        }
    }
}

impl From<Annotation> for char {
    fn from(value: Annotation) -> Self {
        value.symbol()
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
