use crate::results::WordleError;
use crate::word::{code_to_char, Word, ALPHABET_SIZE, WORD_LENGTH};
use std::fmt;
use std::io::{BufRead, Write};
use std::ops::Index;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of a given letter at a specific location.
///
/// The variants are ordered by the order in which the solver must apply them within a round.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterResult {
    /// The letter is in the solution at this position.
    Correct,
    /// The letter is in the solution, but not at this position.
    Misplaced,
    /// The solution holds no further occurrences of this letter.
    Absent,
}

impl LetterResult {
    /// The symbol used for this result in feedback strings.
    pub fn symbol(self) -> char {
        match self {
            LetterResult::Correct => 'c',
            LetterResult::Misplaced => 'm',
            LetterResult::Absent => 'n',
        }
    }

    fn from_symbol(symbol: char) -> Result<LetterResult, WordleError> {
        match symbol.to_ascii_lowercase() {
            'c' => Ok(LetterResult::Correct),
            'm' => Ok(LetterResult::Misplaced),
            'n' => Ok(LetterResult::Absent),
            _ => Err(WordleError::UnsupportedCharacter(symbol)),
        }
    }
}

/// The per-letter results for a single guess.
///
/// The text form uses one symbol per letter: `c` for [`LetterResult::Correct`], `m` for
/// [`LetterResult::Misplaced`] and `n` for [`LetterResult::Absent`].
///
/// ```
/// use wordle_sieve::{Feedback, LetterResult};
///
/// let feedback: Feedback = "ccmnn".parse()?;
///
/// assert_eq!(feedback[2], LetterResult::Misplaced);
/// assert_eq!(feedback.to_string(), "ccmnn");
/// # Ok::<(), wordle_sieve::WordleError>(())
/// ```
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feedback([LetterResult; WORD_LENGTH]);

impl Feedback {
    /// Feedback for a correctly guessed word.
    pub const SOLVED: Feedback = Feedback([LetterResult::Correct; WORD_LENGTH]);

    pub fn new(results: [LetterResult; WORD_LENGTH]) -> Feedback {
        Feedback(results)
    }

    /// Determines the feedback for `guess` when the hidden word is `solution`.
    ///
    /// Exact matches are resolved first, and each consumes one occurrence of its letter. Remaining
    /// letters are then marked [`LetterResult::Misplaced`] from left to right while unmatched
    /// occurrences of that letter remain in the solution, and [`LetterResult::Absent`] after that.
    pub fn compute(solution: Word, guess: Word) -> Feedback {
        let mut budget = LetterBudget::of(solution);
        let mut results = [LetterResult::Absent; WORD_LENGTH];
        let mut is_correct = [false; WORD_LENGTH];

        for position in 0..WORD_LENGTH {
            let letter = guess.get(position);
            if solution.get(position) == letter {
                is_correct[position] = true;
                results[position] = LetterResult::Correct;
                budget.consume(letter);
            }
        }

        for position in 0..WORD_LENGTH {
            if is_correct[position] {
                continue;
            }
            let letter = guess.get(position);
            if budget.remaining(letter) > 0 {
                results[position] = LetterResult::Misplaced;
                budget.consume(letter);
            }
        }

        Feedback(results)
    }

    /// Returns `true` iff every letter is correct.
    pub fn is_solved(&self) -> bool {
        *self == Feedback::SOLVED
    }

    pub fn results(&self) -> &[LetterResult; WORD_LENGTH] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = LetterResult> + '_ {
        self.0.iter().copied()
    }
}

impl Index<usize> for Feedback {
    type Output = LetterResult;

    fn index(&self, position: usize) -> &LetterResult {
        &self.0[position]
    }
}

impl FromStr for Feedback {
    type Err = WordleError;

    fn from_str(text: &str) -> Result<Feedback, WordleError> {
        let text = text.trim();
        let length = text.chars().count();
        if length != WORD_LENGTH {
            return Err(WordleError::InvalidInput(length));
        }
        let mut results = [LetterResult::Absent; WORD_LENGTH];
        for (result, symbol) in results.iter_mut().zip(text.chars()) {
            *result = LetterResult::from_symbol(symbol)?;
        }
        Ok(Feedback(results))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.iter() {
            fmt::Write::write_char(f, result.symbol())?;
        }
        Ok(())
    }
}

/// Counts the unmatched occurrences of each letter in a solution.
struct LetterBudget([u8; ALPHABET_SIZE as usize + 1]);

impl LetterBudget {
    fn of(solution: Word) -> LetterBudget {
        let mut counts = [0; ALPHABET_SIZE as usize + 1];
        for letter in solution.letters() {
            counts[letter as usize] += 1;
        }
        LetterBudget(counts)
    }

    fn remaining(&self, letter: u8) -> u8 {
        self.0[letter as usize]
    }

    fn consume(&mut self, letter: u8) {
        let count = &mut self.0[letter as usize];
        if *count == 0 {
            panic!(
                "letter {:?} has no occurrences left to consume",
                code_to_char(letter)
            );
        }
        *count -= 1;
    }
}

/// Determines the result of the given `guess` when applied to the given `solution`.
///
/// A malformed solution gives [`WordleError::InvalidFormat`]; a guess of the wrong length gives
/// [`WordleError::InvalidInput`].
///
/// ```
/// use wordle_sieve::{get_feedback, LetterResult};
///
/// let feedback = get_feedback("apple", "apply")?;
///
/// assert_eq!(feedback.to_string(), "ccccn");
/// assert_eq!(feedback[4], LetterResult::Absent);
/// # Ok::<(), wordle_sieve::WordleError>(())
/// ```
pub fn get_feedback(solution: &str, guess: &str) -> Result<Feedback, WordleError> {
    let solution = Word::new(solution)?;
    let guess_length = guess.chars().count();
    if guess_length != WORD_LENGTH {
        return Err(WordleError::InvalidInput(guess_length));
    }
    let guess = Word::new(guess)?;
    if !solution.is_complete() || !guess.is_complete() {
        return Err(WordleError::UnsupportedCharacter(' '));
    }
    Ok(Feedback::compute(solution, guess))
}

/// Supplies feedback for each guess.
pub trait FeedbackProvider {
    /// Returns the feedback for `guess`, or `None` if no feedback can be given, in which case the
    /// game fails. `remaining` is the number of candidate words when the guess was made.
    fn feedback(&mut self, guess: Word, remaining: usize) -> Option<Feedback>;
}

/// Computes feedback from a known solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionFeedback {
    solution: Word,
}

impl SolutionFeedback {
    pub fn new(solution: Word) -> SolutionFeedback {
        SolutionFeedback { solution }
    }

    pub fn solution(&self) -> Word {
        self.solution
    }
}

impl FeedbackProvider for SolutionFeedback {
    fn feedback(&mut self, guess: Word, _remaining: usize) -> Option<Feedback> {
        Some(Feedback::compute(self.solution, guess))
    }
}

impl<F: FeedbackProvider + ?Sized> FeedbackProvider for &mut F {
    fn feedback(&mut self, guess: Word, remaining: usize) -> Option<Feedback> {
        (**self).feedback(guess, remaining)
    }
}

/// Asks a person for feedback, one line per guess.
///
/// Each guess is written to `output` as a prompt, and the answer is read from `input`. An empty
/// line or the end of input means no feedback is available. Malformed answers are reported and
/// asked for again.
pub struct InteractiveFeedback<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveFeedback<R, W> {
    pub fn new(input: R, output: W) -> InteractiveFeedback<R, W> {
        InteractiveFeedback { input, output }
    }

    fn read_answer(&mut self, guess: Word, remaining: usize) -> std::io::Result<Option<Feedback>> {
        loop {
            write!(
                self.output,
                "Feedback for {} ({} possible words) [c/m/n]: ",
                guess, remaining
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 || line.trim().is_empty() {
                return Ok(None);
            }
            match line.parse::<Feedback>() {
                Ok(feedback) => return Ok(Some(feedback)),
                Err(error) => writeln!(self.output, "{}. Try again.", error)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> FeedbackProvider for InteractiveFeedback<R, W> {
    fn feedback(&mut self, guess: Word, remaining: usize) -> Option<Feedback> {
        self.read_answer(guess, remaining).unwrap_or(None)
    }
}
