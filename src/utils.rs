//! Utility functions for the pacsearch crate

use crate::game::Position;

/// Manhattan distance between two board positions.
///
/// # Examples
///
/// ```
/// use pacsearch::utils::manhattan_distance;
///
/// assert_eq!(manhattan_distance((1, 1), (4, 5)), 7);
/// assert_eq!(manhattan_distance((2, 3), (2, 3)), 0);
/// ```
pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        assert_eq!(manhattan_distance((0, 0), (3, -2)), 5);
        assert_eq!(manhattan_distance((3, -2), (0, 0)), 5);
    }
}
