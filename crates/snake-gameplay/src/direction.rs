//! Movement directions and the buffered turn queue.
//!
//! Key presses arrive once per frame, but the snake only moves once per
//! simulation tick. [`DirectionQueue`] sits between the two so that several
//! turns pressed within one tick are replayed on the following ticks, one
//! per tick, instead of the last press silently winning.

use serde::{Deserialize, Serialize};
use snake_common::Cell;
use tracing::trace;

/// One of the four unit movement directions.
///
/// The y axis points up, so [`Direction::Up`] increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// (0, +1)
    Up,
    /// (0, -1)
    Down,
    /// (-1, 0)
    Left,
    /// (+1, 0)
    Right,
}

impl Direction {
    /// All directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the unit vector for this direction.
    #[must_use]
    pub const fn vector(self) -> Cell {
        match self {
            Self::Up => Cell::new(0, 1),
            Self::Down => Cell::new(0, -1),
            Self::Left => Cell::new(-1, 0),
            Self::Right => Cell::new(1, 0),
        }
    }

    /// Returns true for Left and Right.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns true if both directions lie on the same axis.
    ///
    /// This covers both reversing (Up after Down) and repeating (Up after Up).
    #[must_use]
    pub const fn is_parallel(self, other: Self) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Number of slots in the turn ring buffer.
pub const DIRECTION_QUEUE_CAPACITY: usize = 4;

/// Fixed-capacity ring buffer of pending turns.
///
/// `top` is the slot of the most recently accepted direction and `current`
/// the slot the snake is currently moving in. The queue is drained when the
/// two cursors meet.
///
/// Overflow is not rejected: accepting more than `capacity - 1` turns within
/// a single tick wraps `top` onto `current`, overwriting the oldest unread
/// entries. The most recent turns win and memory stays bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionQueue {
    slots: [Direction; DIRECTION_QUEUE_CAPACITY],
    current: usize,
    top: usize,
}

impl DirectionQueue {
    /// Creates a queue with every slot holding `initial`.
    #[must_use]
    pub const fn new(initial: Direction) -> Self {
        Self {
            slots: [initial; DIRECTION_QUEUE_CAPACITY],
            current: 0,
            top: 0,
        }
    }

    /// Offers a turn. Returns whether it was accepted.
    ///
    /// A turn is rejected when it lies on the same axis as the most recently
    /// accepted entry, not the one currently executing, so several
    /// perpendicular turns can be chained between two ticks.
    pub fn enqueue(&mut self, direction: Direction) -> bool {
        if direction.is_parallel(self.last_accepted()) {
            trace!("Rejected turn {direction:?} after {:?}", self.last_accepted());
            return false;
        }

        self.top = (self.top + 1) % DIRECTION_QUEUE_CAPACITY;
        self.slots[self.top] = direction;
        true
    }

    /// Returns the direction for this tick.
    ///
    /// Consumes one buffered turn if there is one, otherwise holds course.
    pub fn dequeue_if_due(&mut self) -> Direction {
        if self.current != self.top {
            self.current = (self.current + 1) % DIRECTION_QUEUE_CAPACITY;
        }
        self.slots[self.current]
    }

    /// Direction the snake is currently moving in.
    #[must_use]
    pub const fn current(&self) -> Direction {
        self.slots[self.current]
    }

    /// Most recently accepted direction.
    #[must_use]
    pub const fn last_accepted(&self) -> Direction {
        self.slots[self.top]
    }

    /// Number of turns waiting to be consumed.
    #[must_use]
    pub const fn pending(&self) -> usize {
        (self.top + DIRECTION_QUEUE_CAPACITY - self.current) % DIRECTION_QUEUE_CAPACITY
    }

    /// Returns true if no turn is waiting.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.current == self.top
    }
}

impl Default for DirectionQueue {
    fn default() -> Self {
        Self::new(Direction::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::Up.vector(), Cell::new(0, 1));
        assert_eq!(Direction::Down.vector(), Cell::new(0, -1));
        assert_eq!(Direction::Left.vector(), Cell::new(-1, 0));
        assert_eq!(Direction::Right.vector(), Cell::new(1, 0));

        for direction in Direction::ALL {
            assert_ne!(direction.vector(), Cell::new(0, 0));
            assert!(direction.is_parallel(direction.opposite()));
        }
    }

    #[test]
    fn test_initial_queue_holds_course() {
        let mut queue = DirectionQueue::new(Direction::Up);
        assert!(queue.is_drained());
        assert_eq!(queue.dequeue_if_due(), Direction::Up);
        assert_eq!(queue.dequeue_if_due(), Direction::Up);
        assert_eq!(queue.current(), Direction::Up);
    }

    #[test]
    fn test_rejects_reverse_and_repeat() {
        let mut queue = DirectionQueue::new(Direction::Up);
        assert!(!queue.enqueue(Direction::Down));
        assert!(!queue.enqueue(Direction::Up));
        assert!(queue.is_drained());
    }

    #[test]
    fn test_chained_turns_within_one_tick() {
        let mut queue = DirectionQueue::new(Direction::Up);

        // Each press is checked against the previous accepted press
        assert!(queue.enqueue(Direction::Right));
        assert!(queue.enqueue(Direction::Down));
        assert!(queue.enqueue(Direction::Left));
        assert_eq!(queue.pending(), 3);

        assert_eq!(queue.dequeue_if_due(), Direction::Right);
        assert_eq!(queue.dequeue_if_due(), Direction::Down);
        assert_eq!(queue.dequeue_if_due(), Direction::Left);
        assert_eq!(queue.dequeue_if_due(), Direction::Left);
        assert!(queue.is_drained());
    }

    #[test]
    fn test_second_press_on_same_axis_rejected() {
        let mut queue = DirectionQueue::new(Direction::Up);
        assert!(queue.enqueue(Direction::Right));
        // Left is parallel to the pending Right, even though Up is executing
        assert!(!queue.enqueue(Direction::Left));
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_overflow_overwrites_oldest() {
        let mut queue = DirectionQueue::new(Direction::Up);
        assert!(queue.enqueue(Direction::Right));
        assert!(queue.enqueue(Direction::Up));
        assert!(queue.enqueue(Direction::Left));
        // Fourth accepted turn wraps onto the executing slot
        assert!(queue.enqueue(Direction::Down));

        assert!(queue.is_drained());
        assert_eq!(queue.current(), Direction::Down);
        assert_eq!(queue.dequeue_if_due(), Direction::Down);
    }

    proptest! {
        #[test]
        fn prop_consecutive_accepted_turns_are_perpendicular(
            ops in prop::collection::vec((direction_strategy(), any::<bool>()), 0..64)
        ) {
            let mut queue = DirectionQueue::new(Direction::Up);
            let mut previous = Direction::Up;

            for (direction, tick) in ops {
                if queue.enqueue(direction) {
                    prop_assert!(!direction.is_parallel(previous));
                    previous = direction;
                }
                prop_assert_eq!(queue.last_accepted(), previous);

                if tick {
                    queue.dequeue_if_due();
                }
                prop_assert!(queue.pending() < DIRECTION_QUEUE_CAPACITY);
            }
        }

        #[test]
        fn prop_drained_queue_never_reverses(
            presses in prop::collection::vec(direction_strategy(), 0..64)
        ) {
            // With one press per tick the queue never overflows, so the
            // executing direction can only ever turn by 90 degrees.
            let mut queue = DirectionQueue::new(Direction::Up);
            let mut moving = queue.dequeue_if_due();

            for direction in presses {
                queue.enqueue(direction);
                let next = queue.dequeue_if_due();
                prop_assert_ne!(next, moving.opposite());
                moving = next;
            }
        }
    }
}
