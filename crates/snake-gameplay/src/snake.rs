//! The snake's body.

use snake_common::{Cell, GRID_CELLS};

use crate::direction::Direction;

/// Length of a freshly spawned snake.
pub const INITIAL_LENGTH: usize = 4;

/// Ordered list of occupied cells, head first.
///
/// Movement shifts every segment into its predecessor's cell and then moves
/// the head, so iteration order stays head-to-tail at all times. The body
/// never shrinks and is bounded by the number of cells on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeBody {
    segments: Vec<Cell>,
}

impl SnakeBody {
    /// Creates the starting body: a vertical line in the first column with
    /// the head at `(0, 3)` and the tail at the origin.
    #[must_use]
    pub fn new() -> Self {
        let mut segments = Vec::with_capacity(GRID_CELLS);
        segments.extend((0..INITIAL_LENGTH as i32).rev().map(|y| Cell::new(0, y)));
        Self { segments }
    }

    /// Creates a body from explicit segments, head first.
    ///
    /// Returns `None` for an empty list or one longer than the board.
    #[must_use]
    pub fn from_segments(segments: &[Cell]) -> Option<Self> {
        if segments.is_empty() || segments.len() > GRID_CELLS {
            return None;
        }
        let mut body = Vec::with_capacity(GRID_CELLS);
        body.extend_from_slice(segments);
        Some(Self { segments: body })
    }

    /// Moves one cell in `direction`.
    ///
    /// Each segment takes the previous position of the one before it, then
    /// the head is translated. Length is unchanged.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.segments.len();
        self.segments.copy_within(0..len - 1, 1);
        self.segments[0] += direction.vector();
    }

    /// Appends a copy of the tail.
    ///
    /// The duplicate is overwritten by the next [`advance`](Self::advance),
    /// which is what makes the snake appear one cell longer.
    pub fn grow(&mut self) {
        if self.segments.len() >= GRID_CELLS {
            return;
        }
        self.segments.push(self.tail());
    }

    /// Head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    /// Tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a body has at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments, head first.
    #[must_use]
    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    /// Returns true if `head` lies off the board.
    #[must_use]
    pub fn out_of_bounds(head: Cell) -> bool {
        !head.in_bounds()
    }

    /// Returns true if `head` overlaps any segment behind the head.
    #[must_use]
    pub fn self_collision(&self, head: Cell) -> bool {
        self.segments[1..].contains(&head)
    }

    /// Returns true if the current head has left the board or hit the body.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        let head = self.head();
        Self::out_of_bounds(head) || self.self_collision(head)
    }
}

impl Default for SnakeBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn cells(list: &[(i32, i32)]) -> Vec<Cell> {
        list.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_initial_body() {
        let body = SnakeBody::new();
        assert_eq!(body.len(), 4);
        assert_eq!(body.segments(), cells(&[(0, 3), (0, 2), (0, 1), (0, 0)]));
        assert!(!body.is_dead());
    }

    #[test]
    fn test_advance_up_one_tick() {
        let mut body = SnakeBody::new();
        body.advance(Direction::Up);
        assert_eq!(body.segments(), cells(&[(0, 4), (0, 3), (0, 2), (0, 1)]));
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut body = SnakeBody::new();
        body.advance(Direction::Up);
        body.grow();
        assert_eq!(
            body.segments(),
            cells(&[(0, 4), (0, 3), (0, 2), (0, 1), (0, 1)])
        );
        assert_eq!(body.len(), 5);

        // The duplicate disappears on the next move
        body.advance(Direction::Right);
        assert_eq!(
            body.segments(),
            cells(&[(1, 4), (0, 4), (0, 3), (0, 2), (0, 1)])
        );
        let unique: HashSet<_> = body.segments().iter().collect();
        assert_eq!(unique.len(), body.len());
    }

    #[test]
    fn test_self_collision() {
        let body = SnakeBody::from_segments(&cells(&[(5, 5), (5, 4), (5, 3)]))
            .expect("valid body");
        assert!(body.self_collision(Cell::new(5, 4)));
        assert!(!body.self_collision(Cell::new(5, 6)));
        // The head itself never counts
        assert!(!body.self_collision(Cell::new(5, 5)));
    }

    #[test]
    fn test_out_of_bounds_right_edge() {
        let mut body = SnakeBody::from_segments(&cells(&[(31, 5), (30, 5), (29, 5)]))
            .expect("valid body");
        body.advance(Direction::Right);
        assert_eq!(body.head(), Cell::new(32, 5));
        assert!(SnakeBody::out_of_bounds(body.head()));
        assert!(body.is_dead());
    }

    #[test]
    fn test_out_of_bounds_below_origin() {
        let mut body = SnakeBody::new();
        body.advance(Direction::Left);
        assert_eq!(body.head(), Cell::new(-1, 3));
        assert!(body.is_dead());
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(SnakeBody::from_segments(&[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_advance_preserves_length(
            moves in prop::collection::vec(0usize..4, 0..100),
            grows in prop::collection::vec(any::<bool>(), 0..100),
        ) {
            let mut body = SnakeBody::new();
            let mut expected = body.len();

            for (i, m) in moves.iter().enumerate() {
                if grows.get(i).copied().unwrap_or(false) {
                    body.grow();
                    expected += 1;
                }
                body.advance(Direction::ALL[*m]);
                prop_assert_eq!(body.len(), expected);
            }
        }

        #[test]
        fn prop_segments_stay_adjacent(moves in prop::collection::vec(0usize..4, 0..100)) {
            let mut body = SnakeBody::new();
            for m in moves {
                body.advance(Direction::ALL[m]);
                for pair in body.segments().windows(2) {
                    let dist = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
                    prop_assert!(dist <= 1);
                }
            }
        }
    }
}
