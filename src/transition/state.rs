use std::fmt::Display;

use crate::matrix::Cell;

/// The change of a gene's value from one organism to the next one
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The value dropped by more than one step (`1 -> 0`, loss)
    Falling,
    /// No qualifying change
    #[default]
    Steady,
    /// The value increased by more than one step (`0 -> 1`, gain)
    Rising,
}

impl State {
    /// Classifies the change from `previous` to `current`
    ///
    /// The difference must be strictly larger than `step` to count
    /// as a transition. Changes from or to a missing value are always
    /// [`State::Steady`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cotrans::transition::State;
    ///
    /// assert_eq!(State::classify(Some(0.0), Some(2.0), 1.0), State::Rising);
    /// assert_eq!(State::classify(Some(3.0), Some(1.0), 1.0), State::Falling);
    /// assert_eq!(State::classify(Some(0.0), Some(1.0), 1.0), State::Steady);
    /// assert_eq!(State::classify(None, Some(5.0), 1.0), State::Steady);
    /// ```
    pub fn classify(previous: Cell, current: Cell, step: f64) -> Self {
        match (previous, current) {
            (Some(previous), Some(current)) => {
                let diff = current - previous;
                if diff > step {
                    State::Rising
                } else if diff < -step {
                    State::Falling
                } else {
                    State::Steady
                }
            }
            _ => State::Steady,
        }
    }

    /// Returns `true` if `self` and `other` are transitions in opposite directions
    pub fn is_opposite(self, other: State) -> bool {
        matches!(
            (self, other),
            (State::Rising, State::Falling) | (State::Falling, State::Rising)
        )
    }

    /// Returns the numeric representation: `1`, `0` or `-1`
    pub fn as_i8(self) -> i8 {
        match self {
            State::Falling => -1,
            State::Steady => 0,
            State::Rising => 1,
        }
    }
}

impl From<i8> for State {
    fn from(n: i8) -> Self {
        match n {
            n if n > 0 => State::Rising,
            n if n < 0 => State::Falling,
            _ => State::Steady,
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Classifies every column of `row` compared to its predecessor
///
/// The returned vector has the same length as `row`. The first organism
/// has no predecessor and is always [`State::Steady`].
pub fn classify_row(row: &[Cell], step: f64) -> Vec<State> {
    let mut states = Vec::with_capacity(row.len());
    if row.is_empty() {
        return states;
    }
    states.push(State::Steady);
    states.extend(
        row.windows(2)
            .map(|pair| State::classify(pair[0], pair[1], step)),
    );
    states
}

/// Removes the second transition of two directly adjacent, opposite transitions
///
/// This is a single pass from left to right that compares each state
/// with the already collapsed predecessor.
///
/// # Examples
///
/// ```rust
/// use cotrans::transition::{collapse, State};
///
/// let mut states: Vec<State> = [1, -1, 0, 1].into_iter().map(State::from).collect();
/// collapse(&mut states);
/// assert_eq!(states.iter().map(|s| s.as_i8()).collect::<Vec<_>>(), vec![1, 0, 0, 1]);
/// ```
pub fn collapse(states: &mut [State]) {
    for idx in 1..states.len() {
        if states[idx - 1].is_opposite(states[idx]) {
            states[idx] = State::Steady;
        }
    }
}
