#[macro_use]
extern crate assert_matches;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use wordle_sieve::*;

use std::result::Result;

const WORDS: &[&str] = &[
    "crane", "slate", "trace", "plate", "grate", "irate", "skate", "crate", "spade", "blade",
    "error", "rorer", "apple", "apply", "allow", "hello", "cello", "jello", "lunch", "latch",
];

fn create_word_bank() -> WordBank {
    WordBank::from_iterator(WORDS).unwrap()
}

fn word(text: &str) -> Word {
    Word::new(text).unwrap()
}

/// Guesses from a fixed list, and records how often it was asked.
struct ScriptedGuesser {
    script: Vec<Word>,
    calls: usize,
}

impl ScriptedGuesser {
    fn new(script: &[&str]) -> ScriptedGuesser {
        ScriptedGuesser {
            script: script.iter().map(|text| word(text)).collect(),
            calls: 0,
        }
    }
}

impl Guesser for ScriptedGuesser {
    fn select_next_guess(
        &mut self,
        _rng: &mut dyn RngCore,
        _partial_solution: Word,
        _candidates: &[Word],
        _knowledge: &Knowledge,
        _attempt: u32,
        _attempts_remaining: u32,
    ) -> Word {
        let guess = self.script[self.calls];
        self.calls += 1;
        guess
    }
}

struct NoFeedback;

impl FeedbackProvider for NoFeedback {
    fn feedback(&mut self, _guess: Word, _remaining: usize) -> Option<Feedback> {
        None
    }
}

#[derive(Default)]
struct RecordingReporter {
    guesses: Vec<(u32, Word, usize)>,
    no_candidates: bool,
}

impl Reporter for RecordingReporter {
    fn on_guess(&mut self, attempt: u32, guess: Word, remaining: usize) {
        self.guesses.push((attempt, guess, remaining));
    }

    fn on_no_candidates(&mut self) {
        self.no_candidates = true;
    }
}

#[test]
fn solves_every_word_in_the_bank() {
    let bank = create_word_bank();
    for solution in bank.iter() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut solver = Solver::new(
            bank.clone(),
            UnseenLettersGuesser::new(),
            SolutionFeedback::new(*solution),
        )
        .with_max_attempts(bank.len() as u32);

        let result = solver.solve(&mut rng);

        assert_eq!(result.solution(), Some(*solution), "{:?}", result);
    }
}

#[test]
fn last_candidate_is_guessed_without_asking_guesser() {
    let bank = WordBank::from_iterator(["crane", "slate", "trace"]).unwrap();
    let mut guesser = ScriptedGuesser::new(&["crane"]);
    let mut solver = Solver::new(bank, &mut guesser, SolutionFeedback::new(word("slate")));

    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    assert_eq!(
        result,
        GameResult::Success {
            solution: word("slate"),
            guesses: vec![word("crane"), word("slate")],
        }
    );
    drop(solver);
    assert_eq!(guesser.calls, 1);
}

#[test]
fn max_attempts_reached_with_candidates_left() {
    let bank = WordBank::from_iterator(["crane", "slate", "plate", "grate"]).unwrap();
    let guesser = ScriptedGuesser::new(&["crane"]);
    let mut solver =
        Solver::new(bank, guesser, SolutionFeedback::new(word("plate"))).with_max_attempts(1);

    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    assert_matches!(
        result,
        GameResult::Failure {
            reason: FailureReason::MaxAttemptsReached,
            ..
        }
    );
    assert_eq!(result.solution(), None);
    assert_eq!(result.guesses(), &[word("crane")]);
}

#[test]
fn missing_feedback_fails() {
    let bank = create_word_bank();
    let mut solver = Solver::new(bank, RandomGuesser, NoFeedback);

    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    assert_eq!(result.failure_reason(), Some(FailureReason::NoFeedback));
    assert_eq!(result.guesses().len(), 1);
}

#[test]
fn last_wrong_candidate_is_repeated_until_attempts_run_out() {
    let bank = WordBank::from_iterator(["crane", "slate"]).unwrap();
    let guesser = ScriptedGuesser::new(&["crane"]);
    let mut solver = Solver::new(bank, guesser, SolutionFeedback::new(word("plumb")))
        .with_reporter(RecordingReporter::default());

    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    // The correct 'l' leaves a single candidate, so the absent letters of "slate" are never
    // applied and it stays in the list.
    let mut expected_guesses = vec![word("crane")];
    expected_guesses.extend([word("slate"); 5]);
    assert_eq!(
        result,
        GameResult::Failure {
            reason: FailureReason::MaxAttemptsReached,
            guesses: expected_guesses,
        }
    );
    assert!(!solver.reporter().no_candidates);
    let mut expected_reports = vec![(1, word("crane"), 2)];
    expected_reports.extend((2..=6).map(|attempt| (attempt, word("slate"), 1)));
    assert_eq!(solver.reporter().guesses, expected_reports);
}

#[test]
fn solution_missing_from_bank_runs_out_of_candidates() {
    let bank = WordBank::from_iterator(["crane", "slate"]).unwrap();
    let guesser = ScriptedGuesser::new(&["crane"]);
    let mut solver = Solver::new(bank, guesser, SolutionFeedback::new(word("pluck")))
        .with_reporter(RecordingReporter::default());

    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    // The misplaced 'c' removes "crane" for its position and "slate" for lacking a 'c'.
    assert_eq!(
        result,
        GameResult::Failure {
            reason: FailureReason::NoRemainingCandidates,
            guesses: vec![word("crane")],
        }
    );
    assert!(solver.reporter().no_candidates);
    assert_eq!(solver.reporter().guesses, vec![(1, word("crane"), 2)]);
}

#[test]
fn max_attempts_defaults_to_six() {
    let bank = create_word_bank();
    let solver = Solver::new(bank.clone(), RandomGuesser, NoFeedback);

    assert_eq!(solver.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(solver.with_max_attempts(2).max_attempts(), 2);

    // No word in the bank has an 'x', so these guesses never narrow anything down.
    let mut solver = Solver::new(
        bank,
        ScriptedGuesser::new(&["xxxxx"; 7]),
        SolutionFeedback::new(word("latch")),
    );
    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    assert_eq!(result.failure_reason(), Some(FailureReason::MaxAttemptsReached));
    assert_eq!(result.guesses().len(), DEFAULT_MAX_ATTEMPTS as usize);
}

#[test]
fn same_seed_gives_same_game() {
    let bank = create_word_bank();
    let play = |seed: u64| {
        let mut solver = Solver::new(
            bank.clone(),
            RandomGuesser,
            SolutionFeedback::new(word("grate")),
        )
        .with_max_attempts(20);
        solver.solve(&mut StdRng::seed_from_u64(seed))
    };

    assert_eq!(play(20240101), play(20240101));
}

#[test]
fn same_date_gives_same_game() {
    let bank = create_word_bank();
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut solver = Solver::new(bank, RandomGuesser, SolutionFeedback::new(word("hello")))
        .with_max_attempts(20);

    let first = solver.solve_for_date(date);
    let second = solver.solve_for_date(date);
    let seeded = solver.solve(&mut StdRng::seed_from_u64(seed_for_date(date)));

    assert_eq!(first, second);
    assert_eq!(first, seeded);
    assert_eq!(first.solution(), Some(word("hello")));
}

#[test]
fn candidates_shrink_and_respect_knowledge() {
    let bank = create_word_bank();
    for solution in bank.iter() {
        let mut game = Game::new(&bank, 20);
        let mut rng = StdRng::seed_from_u64(3);
        let mut feedback = SolutionFeedback::new(*solution);
        let mut previous_count = game.candidates().len();
        let mut previous_partial = game.partial_solution();

        while game.play_round(&mut rng, &mut RandomGuesser, &mut feedback, &mut ())
            == SolveState::InProgress
        {
            assert!(game.candidates().len() <= previous_count);
            assert!(game.candidates().contains(solution));
            let knowledge = game.knowledge();
            assert!(game
                .candidates()
                .iter()
                .all(|candidate| knowledge.permits(*candidate)));
            for position in 0..WORD_LENGTH {
                let letter = previous_partial.get(position);
                if letter != 0 {
                    assert_eq!(game.partial_solution().get(position), letter);
                }
            }
            previous_count = game.candidates().len();
            previous_partial = game.partial_solution();
        }

        assert_eq!(game.state(), SolveState::Solved(*solution));
    }
}

#[test]
fn guesser_receives_round_information() {
    struct Checker {
        seen: Vec<(u32, u32, usize)>,
    }

    impl Guesser for Checker {
        fn select_next_guess(
            &mut self,
            _rng: &mut dyn RngCore,
            _partial_solution: Word,
            candidates: &[Word],
            knowledge: &Knowledge,
            attempt: u32,
            attempts_remaining: u32,
        ) -> Word {
            if attempt == 1 {
                assert_eq!(*knowledge, Knowledge::default());
            } else {
                assert!(!knowledge.letters_seen().is_empty());
            }
            self.seen.push((attempt, attempts_remaining, candidates.len()));
            candidates[0]
        }
    }

    let bank = WordBank::from_iterator(["crane", "slate", "plate", "grate"]).unwrap();
    let mut checker = Checker { seen: vec![] };
    let mut solver = Solver::new(bank, &mut checker, SolutionFeedback::new(word("plate")));

    let result = solver.solve(&mut StdRng::seed_from_u64(0));

    assert_eq!(result.solution(), Some(word("plate")));
    drop(solver);
    assert_eq!(checker.seen, vec![(1, 6, 4), (2, 5, 2)]);
}

#[test]
fn play_game_with_guesser_rejects_bad_solution() -> Result<(), WordleError> {
    let bank = create_word_bank();

    assert_matches!(
        play_game_with_guesser("loll", 6, &bank, RandomGuesser, &mut StdRng::seed_from_u64(0)),
        Err(WordleError::InvalidFormat(4))
    );
    let result =
        play_game_with_guesser("apple", 20, &bank, RandomGuesser, &mut StdRng::seed_from_u64(0))?;
    assert_eq!(result.solution(), Some(word("apple")));
    Ok(())
}
