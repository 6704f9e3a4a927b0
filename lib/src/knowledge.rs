use crate::bitmask::BitMask;
use crate::word::{Word, WORD_LENGTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything learned from the feedback received so far in a game.
///
/// A new snapshot is built for each round and handed to the [`Guesser`](crate::Guesser), which can
/// read but not change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Knowledge {
    letters_seen: BitMask,
    letters_excluded: BitMask,
    forbidden: [BitMask; WORD_LENGTH],
    possible: [BitMask; WORD_LENGTH],
}

impl Knowledge {
    pub fn new(
        letters_seen: BitMask,
        letters_excluded: BitMask,
        forbidden: [BitMask; WORD_LENGTH],
        possible: [BitMask; WORD_LENGTH],
    ) -> Knowledge {
        Knowledge {
            letters_seen,
            letters_excluded,
            forbidden,
            possible,
        }
    }

    /// Letters that have appeared in any guess.
    pub fn letters_seen(&self) -> BitMask {
        self.letters_seen
    }

    /// Letters known not to be in the solution.
    pub fn letters_excluded(&self) -> BitMask {
        self.letters_excluded
    }

    /// Letters that cannot be at the given position.
    pub fn forbidden_at(&self, position: usize) -> BitMask {
        self.forbidden[position]
    }

    /// Letters that may still be at the given position. Empty once the position is solved, or
    /// before the first round has narrowed anything down.
    pub fn possible_at(&self, position: usize) -> BitMask {
        self.possible[position]
    }

    /// Returns `true` iff `word` avoids every excluded letter and every letter forbidden at its
    /// position.
    pub fn permits(&self, word: Word) -> bool {
        word.letters().enumerate().all(|(position, letter)| {
            !self.letters_excluded.is_set(letter) && !self.forbidden[position].is_set(letter)
        })
    }
}
