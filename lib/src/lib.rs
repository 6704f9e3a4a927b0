//! Solves Wordle-style puzzles by narrowing down a list of candidate words.
//!
//! Words are packed into a single integer ([`Word`]), and letter constraints are tracked with
//! [`BitMask`]s. Each round, a [`Guesser`] picks a word, a [`FeedbackProvider`] says how good the
//! guess was, and the candidates are filtered using that [`Feedback`].
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use wordle_sieve::*;
//!
//! let bank = WordBank::from_iterator(["crane", "slate", "trace", "plate", "grate"])?;
//! let solution = Word::new("plate")?;
//! let mut solver = Solver::new(bank, UnseenLettersGuesser::new(), SolutionFeedback::new(solution));
//!
//! let result = solver.solve(&mut StdRng::seed_from_u64(1));
//!
//! assert_eq!(result.solution(), Some(solution));
//! assert!(result.guesses().len() <= DEFAULT_MAX_ATTEMPTS as usize);
//! # Ok::<(), WordleError>(())
//! ```

mod bitmask;
mod data;
mod engine;
mod feedback;
mod guessers;
mod knowledge;
mod results;
mod word;

pub use bitmask::*;
pub use data::WordBank;
pub use engine::*;
pub use feedback::*;
pub use guessers::*;
pub use knowledge::Knowledge;
pub use results::*;
pub use word::*;
