use std::fmt;

/// One row of a sectioned list.
///
/// Ordering is lexicographic: every row of section 0 precedes every row of
/// section 1, and so on. Field order matters for the derived `Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowAddress {
    pub section: usize,
    pub row: usize,
}

impl RowAddress {
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for RowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

/// Vertical travel of a drag. `Forward` is toward later content (down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// True when `to` lies on this side of `from` (or equals it).
    pub fn reaches(self, from: RowAddress, to: RowAddress) -> bool {
        match self {
            Direction::None => from == to,
            Direction::Forward => to >= from,
            Direction::Backward => to <= from,
        }
    }
}

/// Polarity applied to every row a drag run touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    #[default]
    Selecting,
    Deselecting,
}

impl SelectionMode {
    /// Mode a run starts in when it begins on a row with this selection state.
    pub fn for_row(currently_selected: bool) -> Self {
        if currently_selected {
            SelectionMode::Deselecting
        } else {
            SelectionMode::Selecting
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SelectionMode::Selecting => SelectionMode::Deselecting,
            SelectionMode::Deselecting => SelectionMode::Selecting,
        }
    }

    pub fn selects(self) -> bool {
        self == SelectionMode::Selecting
    }
}
