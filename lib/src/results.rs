use crate::word::Word;
use std::fmt;
use std::io;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Indicates that an error occurred while reading words or feedback.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WordleError {
    /// A word did not have the expected number of letters. Contains the length that was given.
    #[error("words must have exactly 5 letters, got {0}")]
    InvalidFormat(usize),
    /// A guess or feedback string did not match the expected length. Contains the length that was
    /// given.
    #[error("guesses and feedback must have exactly 5 letters, got {0}")]
    InvalidInput(usize),
    /// Indicates that one or more given characters are not in the supported set.
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),
    /// Wraps an error from reading the word list.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<io::Error> for WordleError {
    fn from(error: io::Error) -> Self {
        WordleError::Io(error.to_string())
    }
}

/// Why a game ended without finding the solution.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FailureReason {
    /// The feedback provider could not produce feedback for a guess.
    NoFeedback,
    /// The feedback was inconsistent with every word in the word bank.
    NoRemainingCandidates,
    /// All attempts were used without guessing the solution.
    MaxAttemptsReached,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FailureReason::NoFeedback => "no feedback",
            FailureReason::NoRemainingCandidates => "no remaining candidates",
            FailureReason::MaxAttemptsReached => "max attempts reached",
        };
        f.write_str(reason)
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success { solution: Word, guesses: Vec<Word> },
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were
    /// given.
    Failure {
        reason: FailureReason,
        guesses: Vec<Word>,
    },
}

impl GameResult {
    /// The guesses made, in order.
    pub fn guesses(&self) -> &[Word] {
        match self {
            GameResult::Success { guesses, .. } | GameResult::Failure { guesses, .. } => guesses,
        }
    }

    /// The solution, if the game was won.
    pub fn solution(&self) -> Option<Word> {
        match self {
            GameResult::Success { solution, .. } => Some(*solution),
            GameResult::Failure { .. } => None,
        }
    }

    /// The reason for failure, if the game was lost.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            GameResult::Success { .. } => None,
            GameResult::Failure { reason, .. } => Some(*reason),
        }
    }
}
