use crate::engine::Guesser;
use crate::knowledge::Knowledge;
use crate::word::{Word, ALPHABET_SIZE, WORD_LENGTH};
use rand::{Rng, RngCore};
use rayon::prelude::*;
use std::cmp::Reverse;

/// Guesses uniformly at random from the remaining candidates.
///
/// The candidate is chosen with a single pass of reservoir sampling, drawing only from the given
/// random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGuesser;

impl Guesser for RandomGuesser {
    fn select_next_guess(
        &mut self,
        rng: &mut dyn RngCore,
        partial_solution: Word,
        candidates: &[Word],
        _knowledge: &Knowledge,
        _attempt: u32,
        _attempts_remaining: u32,
    ) -> Word {
        let mut selection = None;
        for (index, word) in candidates.iter().enumerate() {
            if rng.gen_range(0..=index) == 0 {
                selection = Some(*word);
            }
        }
        selection.unwrap_or(partial_solution)
    }
}

/// Counts how many candidates have each letter, in total and per position.
struct LetterCounts {
    words_with_letter: [u64; ALPHABET_SIZE as usize + 1],
    words_with_located_letter: [[u64; ALPHABET_SIZE as usize + 1]; WORD_LENGTH],
}

impl LetterCounts {
    fn new(candidates: &[Word]) -> LetterCounts {
        let mut counts = LetterCounts {
            words_with_letter: [0; ALPHABET_SIZE as usize + 1],
            words_with_located_letter: [[0; ALPHABET_SIZE as usize + 1]; WORD_LENGTH],
        };
        for word in candidates {
            for letter in word.unique_letters() {
                counts.words_with_letter[letter as usize] += 1;
            }
            for (position, letter) in word.letters().enumerate() {
                counts.words_with_located_letter[position][letter as usize] += 1;
            }
        }
        counts
    }
}

/// Picks the candidate whose new letters are shared by the most other candidates.
///
/// Each candidate is scored as follows:
///
/// * 2 points for every candidate containing each of its letters that has not been guessed yet.
/// * 1 point for every candidate with the same letter at each position that is not yet solved.
///
/// Ties go to the word with more unguessed letters, and then to the word that comes first in the
/// candidate list, so the guess does not depend on the random number generator.
#[derive(Debug, Clone, Copy)]
pub struct UnseenLettersGuesser {
    parallelisation_limit: usize,
}

impl UnseenLettersGuesser {
    /// Constructs a guesser that scores candidates in parallel when there are more than 256.
    pub fn new() -> UnseenLettersGuesser {
        UnseenLettersGuesser::with_parallelisation_limit(256)
    }

    /// Constructs a guesser that scores candidates in parallel when there are more than
    /// `parallelisation_limit` of them.
    pub fn with_parallelisation_limit(parallelisation_limit: usize) -> UnseenLettersGuesser {
        UnseenLettersGuesser {
            parallelisation_limit,
        }
    }

    fn score_word(
        word: Word,
        counts: &LetterCounts,
        partial_solution: Word,
        knowledge: &Knowledge,
    ) -> (u64, usize) {
        let seen = knowledge.letters_seen();
        let unseen = word.unique_letters().difference(seen);
        let presence: u64 = unseen
            .iter()
            .map(|letter| counts.words_with_letter[letter as usize])
            .sum();
        let located: u64 = partial_solution
            .unresolved_positions()
            .map(|position| counts.words_with_located_letter[position][word.get(position) as usize])
            .sum();
        let num_unseen = word
            .unique_letters()
            .count_where(|letter| !seen.is_set(letter));
        (presence * 2 + located, num_unseen)
    }
}

impl Default for UnseenLettersGuesser {
    fn default() -> Self {
        UnseenLettersGuesser::new()
    }
}

impl Guesser for UnseenLettersGuesser {
    fn select_next_guess(
        &mut self,
        _rng: &mut dyn RngCore,
        partial_solution: Word,
        candidates: &[Word],
        knowledge: &Knowledge,
        _attempt: u32,
        _attempts_remaining: u32,
    ) -> Word {
        let counts = LetterCounts::new(candidates);
        let key = |(index, word): (usize, &Word)| {
            let (score, num_unseen) =
                UnseenLettersGuesser::score_word(*word, &counts, partial_solution, knowledge);
            (score, num_unseen, Reverse(index))
        };
        let best = if candidates.len() > self.parallelisation_limit {
            candidates
                .par_iter()
                .enumerate()
                .map(|entry| (key(entry), *entry.1))
                .max_by_key(|(key, _)| *key)
        } else {
            candidates
                .iter()
                .enumerate()
                .map(|entry| (key(entry), *entry.1))
                .max_by_key(|(key, _)| *key)
        };
        best.map(|(_, word)| word).unwrap_or(partial_solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmask::BitMask;
    use crate::word::letter_code;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|word| Word::new(word).unwrap()).collect()
    }

    #[test]
    fn random_guesser_picks_a_candidate() {
        let candidates = words(&["crane", "slate", "trace", "plate"]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let guess = RandomGuesser.select_next_guess(
                &mut rng,
                Word::EMPTY,
                &candidates,
                &Knowledge::default(),
                1,
                6,
            );
            assert!(candidates.contains(&guess));
        }
    }

    #[test]
    fn random_guesser_is_deterministic_for_a_seed() {
        let candidates = words(&["crane", "slate", "trace", "plate", "grate", "irate"]);
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5)
                .map(|_| {
                    RandomGuesser.select_next_guess(
                        &mut rng,
                        Word::EMPTY,
                        &candidates,
                        &Knowledge::default(),
                        1,
                        6,
                    )
                })
                .collect::<Vec<Word>>()
        };

        assert_eq!(pick(2024), pick(2024));
    }

    #[test]
    fn unseen_letters_guesser_prefers_common_letters() {
        let candidates = words(&["fuzzy", "crane", "trace", "react"]);
        let mut guesser = UnseenLettersGuesser::new();
        let mut rng = StdRng::seed_from_u64(0);

        let guess = guesser.select_next_guess(
            &mut rng,
            Word::EMPTY,
            &candidates,
            &Knowledge::default(),
            1,
            6,
        );

        assert_ne!(guess, candidates[0]);
    }

    #[test]
    fn unseen_letters_guesser_ignores_seen_letters() {
        let candidates = words(&["abcde", "vwxyz", "vwxya"]);
        let seen: BitMask = "vwxyz".chars().filter_map(letter_code).collect();
        let knowledge = Knowledge::new(
            seen,
            BitMask::EMPTY,
            [BitMask::EMPTY; WORD_LENGTH],
            [BitMask::EMPTY; WORD_LENGTH],
        );
        let mut rng = StdRng::seed_from_u64(0);

        let guess = UnseenLettersGuesser::new().select_next_guess(
            &mut rng,
            Word::new("     ").unwrap(),
            &candidates,
            &knowledge,
            2,
            5,
        );

        assert_eq!(guess, candidates[0]);
    }

    #[test]
    fn unseen_letters_guesser_parallel_matches_serial() {
        let candidates = words(&[
            "crane", "slate", "trace", "plate", "grate", "irate", "skate", "crate", "spade",
            "blade",
        ]);
        let knowledge = Knowledge::default();
        let mut rng = StdRng::seed_from_u64(0);

        let serial = UnseenLettersGuesser::with_parallelisation_limit(usize::MAX)
            .select_next_guess(&mut rng, Word::EMPTY, &candidates, &knowledge, 1, 6);
        let parallel = UnseenLettersGuesser::with_parallelisation_limit(0).select_next_guess(
            &mut rng,
            Word::EMPTY,
            &candidates,
            &knowledge,
            1,
            6,
        );

        assert_eq!(serial, parallel);
    }
}
