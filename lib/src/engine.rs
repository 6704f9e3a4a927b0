use crate::bitmask::BitMask;
use crate::data::WordBank;
use crate::feedback::{Feedback, FeedbackProvider, LetterResult, SolutionFeedback};
use crate::knowledge::Knowledge;
use crate::results::{FailureReason, GameResult, WordleError};
use crate::word::{Word, WORD_LENGTH};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// The number of guesses allowed in a standard game.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Chooses the next word to guess.
///
/// Guessers are only consulted while more than one candidate remains. The returned word should be
/// one of `candidates`, or at least a word the feedback provider will accept.
pub trait Guesser {
    /// Selects the next guess.
    ///
    /// * `rng` - the only source of randomness a guesser should use, so that games can be replayed.
    /// * `partial_solution` - the letters confirmed so far; unknown slots are blank.
    /// * `candidates` - the words still consistent with all feedback, in word bank order.
    /// * `knowledge` - the constraints learned so far.
    /// * `attempt` - the one-based number of the guess being made.
    /// * `attempts_remaining` - how many guesses are left, including this one.
    fn select_next_guess(
        &mut self,
        rng: &mut dyn RngCore,
        partial_solution: Word,
        candidates: &[Word],
        knowledge: &Knowledge,
        attempt: u32,
        attempts_remaining: u32,
    ) -> Word;
}

impl<G: Guesser + ?Sized> Guesser for &mut G {
    fn select_next_guess(
        &mut self,
        rng: &mut dyn RngCore,
        partial_solution: Word,
        candidates: &[Word],
        knowledge: &Knowledge,
        attempt: u32,
        attempts_remaining: u32,
    ) -> Word {
        (**self).select_next_guess(
            rng,
            partial_solution,
            candidates,
            knowledge,
            attempt,
            attempts_remaining,
        )
    }
}

impl<G: Guesser + ?Sized> Guesser for Box<G> {
    fn select_next_guess(
        &mut self,
        rng: &mut dyn RngCore,
        partial_solution: Word,
        candidates: &[Word],
        knowledge: &Knowledge,
        attempt: u32,
        attempts_remaining: u32,
    ) -> Word {
        (**self).select_next_guess(
            rng,
            partial_solution,
            candidates,
            knowledge,
            attempt,
            attempts_remaining,
        )
    }
}

/// Observes the progress of a game. This has no effect on the outcome.
pub trait Reporter {
    /// Called after each guess is chosen, with the number of candidates it was chosen from.
    fn on_guess(&mut self, attempt: u32, guess: Word, remaining: usize);

    /// Called when the feedback rules out every word in the word bank.
    fn on_no_candidates(&mut self) {}
}

impl Reporter for () {
    fn on_guess(&mut self, _attempt: u32, _guess: Word, _remaining: usize) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn on_guess(&mut self, attempt: u32, guess: Word, remaining: usize) {
        (**self).on_guess(attempt, guess, remaining)
    }

    fn on_no_candidates(&mut self) {
        (**self).on_no_candidates()
    }
}

/// The state of a game after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    InProgress,
    Solved(Word),
    Failed(FailureReason),
}

/// The state of a single game: the remaining candidates and everything learned so far.
///
/// Each game owns its own state, so separate games can be played concurrently.
#[derive(Debug, Clone)]
pub struct Game {
    candidates: Vec<Word>,
    partial_solution: Word,
    letters_seen: BitMask,
    letters_excluded: BitMask,
    forbidden: [BitMask; WORD_LENGTH],
    possible: [BitMask; WORD_LENGTH],
    guesses: Vec<Word>,
    attempts: u32,
    max_attempts: u32,
    state: SolveState,
}

impl Game {
    /// Starts a game where the solution is one of `words`.
    pub fn new(words: &[Word], max_attempts: u32) -> Game {
        Game {
            candidates: words.to_vec(),
            partial_solution: Word::EMPTY,
            letters_seen: BitMask::EMPTY,
            letters_excluded: BitMask::EMPTY,
            forbidden: [BitMask::EMPTY; WORD_LENGTH],
            possible: [BitMask::EMPTY; WORD_LENGTH],
            guesses: Vec::with_capacity(max_attempts as usize),
            attempts: 0,
            max_attempts,
            state: SolveState::InProgress,
        }
    }

    /// The words that are still consistent with all feedback.
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    /// The letters confirmed so far. Unknown slots are blank.
    pub fn partial_solution(&self) -> Word {
        self.partial_solution
    }

    /// The guesses made so far.
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    /// A snapshot of everything learned so far.
    pub fn knowledge(&self) -> Knowledge {
        Knowledge::new(
            self.letters_seen,
            self.letters_excluded,
            self.forbidden,
            self.possible,
        )
    }

    /// Plays one round: makes a guess, gets feedback for it and narrows down the candidates.
    ///
    /// Once the game has finished, this returns the final state without doing anything.
    pub fn play_round<G, F, R>(
        &mut self,
        rng: &mut dyn RngCore,
        guesser: &mut G,
        feedback_provider: &mut F,
        reporter: &mut R,
    ) -> SolveState
    where
        G: Guesser + ?Sized,
        F: FeedbackProvider + ?Sized,
        R: Reporter + ?Sized,
    {
        if self.state != SolveState::InProgress {
            return self.state;
        }
        if self.attempts >= self.max_attempts {
            return self.finish(SolveState::Failed(FailureReason::MaxAttemptsReached));
        }
        if self.candidates.is_empty() {
            return self.finish(SolveState::Failed(FailureReason::NoRemainingCandidates));
        }

        let attempts_remaining = self.max_attempts - self.attempts;
        self.attempts += 1;
        let guess = if self.candidates.len() == 1 {
            self.candidates[0]
        } else {
            let knowledge = self.knowledge();
            guesser.select_next_guess(
                rng,
                self.partial_solution,
                &self.candidates,
                &knowledge,
                self.attempts,
                attempts_remaining,
            )
        };
        self.guesses.push(guess);
        self.letters_seen |= guess.unique_letters();
        reporter.on_guess(self.attempts, guess, self.candidates.len());

        let feedback = match feedback_provider.feedback(guess, self.candidates.len()) {
            Some(feedback) => feedback,
            None => return self.finish(SolveState::Failed(FailureReason::NoFeedback)),
        };
        if feedback.is_solved() {
            return self.finish(SolveState::Solved(guess));
        }

        self.apply_feedback(guess, &feedback);

        if self.candidates.is_empty() {
            reporter.on_no_candidates();
            return self.finish(SolveState::Failed(FailureReason::NoRemainingCandidates));
        }
        if self.attempts >= self.max_attempts {
            return self.finish(SolveState::Failed(FailureReason::MaxAttemptsReached));
        }
        SolveState::InProgress
    }

    /// Narrows down the candidates and updates the known constraints using the feedback for a
    /// guess.
    ///
    /// Results are applied in a fixed order: every [`LetterResult::Correct`], then every
    /// [`LetterResult::Misplaced`], then every [`LetterResult::Absent`]. An absent letter that was
    /// also marked misplaced in the same guess only rules out its own position, since the solution
    /// does contain that letter.
    pub fn apply_feedback(&mut self, guess: Word, feedback: &Feedback) {
        let mut operations: Vec<(LetterResult, u8, usize)> = feedback
            .iter()
            .zip(guess.letters())
            .enumerate()
            .map(|(position, (result, letter))| (result, letter, position))
            .collect();
        // Stable, so positions stay in order within each kind of result.
        operations.sort_by_key(|(result, _, _)| *result);

        let mut misplaced_letters = BitMask::EMPTY;
        for (result, letter, position) in operations {
            match result {
                LetterResult::Correct => {
                    if self.partial_solution.get(position) == 0 {
                        self.partial_solution =
                            self.partial_solution.with_letter_at(letter, position);
                        self.retain_candidates(|word| word.get(position) == letter);
                        self.possible[position] = BitMask::EMPTY;
                    }
                }
                LetterResult::Misplaced => {
                    self.forbidden[position] = self.forbidden[position].set(letter);
                    misplaced_letters = misplaced_letters.set(letter);
                    self.retain_candidates(|word| {
                        word.get(position) != letter && word.contains(letter)
                    });
                }
                LetterResult::Absent => {
                    if misplaced_letters.is_set(letter) {
                        self.retain_candidates(|word| word.get(position) != letter);
                    } else {
                        self.forbidden[position] = self.forbidden[position].set(letter);
                        if !self.partial_solution.contains(letter) {
                            self.letters_excluded = self.letters_excluded.set(letter);
                        }
                        let partial_solution = self.partial_solution;
                        self.retain_candidates(|word| {
                            partial_solution
                                .unresolved_positions()
                                .all(|slot| word.get(slot) != letter)
                        });
                    }
                }
            }

            if self.candidates.len() < 2 {
                // Either solved, or the feedback doesn't match any word in the bank.
                break;
            }
        }

        if self.candidates.len() < 2 {
            return;
        }

        self.add_common_letters_to_solution();

        for slot in self.partial_solution.unresolved_positions() {
            self.possible[slot] = self
                .candidates
                .iter()
                .map(|word| word.get(slot))
                .collect::<BitMask>()
                .difference(self.forbidden[slot]);
        }
    }

    /// Confirms any unresolved position where every candidate has the same letter.
    fn add_common_letters_to_solution(&mut self) {
        let first = match self.candidates.first() {
            Some(word) => *word,
            None => return,
        };
        for position in self.partial_solution.unresolved_positions() {
            let letter = first.get(position);
            if self.candidates[1..]
                .iter()
                .all(|word| word.get(position) == letter)
            {
                self.partial_solution = self.partial_solution.with_letter_at(letter, position);
                self.possible[position] = BitMask::EMPTY;
            }
        }
    }

    fn retain_candidates<P>(&mut self, predicate: P)
    where
        P: FnMut(&Word) -> bool,
    {
        self.candidates.retain(predicate);
    }

    fn finish(&mut self, state: SolveState) -> SolveState {
        self.state = state;
        state
    }

    /// Converts a finished game into its result. Returns `None` if the game is still in progress.
    pub fn into_result(self) -> Option<GameResult> {
        match self.state {
            SolveState::InProgress => None,
            SolveState::Solved(solution) => Some(GameResult::Success {
                solution,
                guesses: self.guesses,
            }),
            SolveState::Failed(reason) => Some(GameResult::Failure {
                reason,
                guesses: self.guesses,
            }),
        }
    }
}

/// Derives the random seed for the puzzle published on the given date, as
/// `year * 10000 + month * 100 + day`.
///
/// ```
/// use chrono::NaiveDate;
/// use wordle_sieve::seed_for_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(seed_for_date(date), 20240309);
/// ```
pub fn seed_for_date(date: NaiveDate) -> u64 {
    (date.year() as i64 * 10000 + date.month() as i64 * 100 + date.day() as i64) as u64
}

/// Solves puzzles whose solution is in a given word bank.
///
/// Each call to [`Solver::solve`] plays a fresh game, so a solver can be reused. Games are limited
/// to [`DEFAULT_MAX_ATTEMPTS`] guesses unless changed with [`Solver::with_max_attempts`].
pub struct Solver<G, F, R = ()> {
    bank: WordBank,
    guesser: G,
    feedback_provider: F,
    reporter: R,
    max_attempts: u32,
}

impl<G, F> Solver<G, F>
where
    G: Guesser,
    F: FeedbackProvider,
{
    pub fn new(bank: WordBank, guesser: G, feedback_provider: F) -> Solver<G, F> {
        Solver {
            bank,
            guesser,
            feedback_provider,
            reporter: (),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl<G, F, R> Solver<G, F, R>
where
    G: Guesser,
    F: FeedbackProvider,
    R: Reporter,
{
    /// Replaces the reporter that is notified of each guess.
    pub fn with_reporter<R2: Reporter>(self, reporter: R2) -> Solver<G, F, R2> {
        Solver {
            bank: self.bank,
            guesser: self.guesser,
            feedback_provider: self.feedback_provider,
            reporter,
            max_attempts: self.max_attempts,
        }
    }

    /// Sets the maximum number of guesses per game.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Solver<G, F, R> {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Plays a game using the given source of randomness.
    pub fn solve(&mut self, rng: &mut dyn RngCore) -> GameResult {
        let mut game = Game::new(&self.bank, self.max_attempts);
        loop {
            let state = game.play_round(
                rng,
                &mut self.guesser,
                &mut self.feedback_provider,
                &mut self.reporter,
            );
            if state != SolveState::InProgress {
                break;
            }
        }
        match game.into_result() {
            Some(result) => result,
            None => unreachable!("game loop ended while still in progress"),
        }
    }

    /// Plays the game for the given date, seeding the random number generator with
    /// [`seed_for_date`] so that the same date always plays out the same way.
    pub fn solve_for_date(&mut self, date: NaiveDate) -> GameResult {
        let mut rng = StdRng::seed_from_u64(seed_for_date(date));
        self.solve(&mut rng)
    }
}

/// Attempts to guess the given word within the maximum number of guesses, using words from the
/// word bank.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use wordle_sieve::{play_game_with_guesser, RandomGuesser, WordBank};
///
/// let bank = WordBank::from_iterator(["crane", "slate", "trace"])?;
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let result = play_game_with_guesser("slate", 6, &bank, RandomGuesser, &mut rng)?;
///
/// assert_eq!(result.solution().map(|word| word.to_string()), Some("SLATE".to_string()));
/// # Ok::<(), wordle_sieve::WordleError>(())
/// ```
pub fn play_game_with_guesser<G: Guesser>(
    solution: &str,
    max_attempts: u32,
    bank: &WordBank,
    guesser: G,
    rng: &mut dyn RngCore,
) -> Result<GameResult, WordleError> {
    let solution = Word::new(solution)?;
    let mut solver = Solver::new(bank.clone(), guesser, SolutionFeedback::new(solution))
        .with_max_attempts(max_attempts);
    Ok(solver.solve(rng))
}
