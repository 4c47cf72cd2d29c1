//! Coordinate structure used to reference specific locations within parser input

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the parser input. Lines and columns are
/// both zero-based.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Coords {
    /// The absolute symbol position
    pub absolute: usize,
    /// The row position
    pub line: usize,
    /// The column position
    pub column: usize,
}

impl Coords {
    /// Step over a single symbol. A newline moves onto the start of the next line, anything
    /// else moves one column to the right.
    pub fn advance(&mut self, newline: bool) {
        self.absolute += 1;
        if newline {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Eq for Coords {}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Coords;

    #[test]
    fn should_reset_column_on_newline() {
        let mut coords = Coords::default();
        coords.advance(false);
        coords.advance(false);
        assert_eq!(coords.column, 2);
        coords.advance(true);
        assert_eq!(
            coords,
            Coords {
                absolute: 3,
                line: 1,
                column: 0
            }
        );
    }

    #[test]
    fn should_order_by_absolute_position() {
        let first = Coords {
            absolute: 4,
            line: 1,
            column: 9,
        };
        let second = Coords {
            absolute: 5,
            line: 0,
            column: 0,
        };
        assert!(first < second);
        assert_eq!(format!("{}", first), "[abs: 4, line: 1, column: 9]");
    }
}
