use crate::bitmask::BitMask;
use crate::results::WordleError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of letters in every word.
pub const WORD_LENGTH: usize = 5;
/// The number of bits used to store each letter of a [`Word`].
pub const BITS_PER_LETTER: u32 = 5;
/// The number of letters in the supported alphabet.
pub const ALPHABET_SIZE: u8 = 26;

const LETTER_MASK: u64 = (1 << BITS_PER_LETTER) - 1;

/// Returns the letter code (`1..=26`) for an ASCII letter, ignoring case.
pub fn letter_code(letter: char) -> Option<u8> {
    if letter.is_ascii_alphabetic() {
        Some(letter.to_ascii_lowercase() as u8 - b'a' + 1)
    } else {
        None
    }
}

/// Returns the uppercase letter for a letter code, or a space for the blank code `0`.
pub fn code_to_char(code: u8) -> char {
    match code {
        0 => ' ',
        1..=ALPHABET_SIZE => (b'A' + code - 1) as char,
        _ => panic!("letter code {} is out of range", code),
    }
}

/// A five-letter word packed into a single integer.
///
/// Each slot holds a letter code: `0` is blank, and `1..=26` are the letters `a` to `z`. Blank
/// slots let a `Word` describe a partially known solution. Words are immutable; methods that change
/// a slot return a new `Word`. Equality, ordering and hashing use the packed value.
///
/// ```
/// use wordle_sieve::Word;
///
/// let word = Word::new("cr ne")?;
///
/// assert_eq!(word.get(0), 3);
/// assert_eq!(word.get(2), 0);
/// assert_eq!(word.with_letter_at(1, 2).to_string(), "CRANE");
/// # Ok::<(), wordle_sieve::WordleError>(())
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Word(u64);

impl Word {
    /// A word with every slot blank.
    pub const EMPTY: Word = Word(0);

    /// Parses a word. Spaces become blank slots; letters are case-insensitive.
    pub fn new(text: &str) -> Result<Word, WordleError> {
        let length = text.chars().count();
        if length != WORD_LENGTH {
            return Err(WordleError::InvalidFormat(length));
        }
        let mut bits = 0;
        for (index, letter) in text.chars().enumerate() {
            let code = match letter {
                ' ' => 0,
                _ => letter_code(letter).ok_or(WordleError::UnsupportedCharacter(letter))?,
            };
            bits |= (code as u64) << shift(index);
        }
        Ok(Word(bits))
    }

    /// Returns the letter code at the given position, or `0` if that slot is blank.
    #[inline]
    pub fn get(self, position: usize) -> u8 {
        ((self.0 >> shift(position)) & LETTER_MASK) as u8
    }

    /// Returns a copy of this word with the slot at `position` replaced by `code`.
    pub fn with_letter_at(self, code: u8, position: usize) -> Word {
        debug_assert!(code <= ALPHABET_SIZE, "letter code {} is out of range", code);
        let shift = shift(position);
        Word((self.0 & !(LETTER_MASK << shift)) | ((code as u64) << shift))
    }

    /// Returns whether any slot holds exactly this code.
    pub fn contains(self, code: u8) -> bool {
        self.letters().any(|letter| letter == code)
    }

    /// Returns the position of `code` if it occurs in exactly one slot.
    pub fn contains_once(self, code: u8) -> Option<usize> {
        let mut found = None;
        for (position, letter) in self.letters().enumerate() {
            if letter == code {
                if found.is_some() {
                    return None;
                }
                found = Some(position);
            }
        }
        found
    }

    /// Iterates over the letter codes in slot order.
    pub fn letters(self) -> impl Iterator<Item = u8> + Clone {
        (0..WORD_LENGTH).map(move |position| self.get(position))
    }

    /// The set of distinct letters in this word. Blank slots are ignored.
    pub fn unique_letters(self) -> BitMask {
        self.letters().filter(|code| *code != 0).collect()
    }

    /// Iterates over the positions that are still blank.
    pub fn unresolved_positions(self) -> impl Iterator<Item = usize> {
        (0..WORD_LENGTH).filter(move |position| self.get(*position) == 0)
    }

    /// Returns `true` iff no slot is blank.
    pub fn is_complete(self) -> bool {
        self.letters().all(|code| code != 0)
    }
}

#[inline]
fn shift(position: usize) -> u32 {
    debug_assert!(
        position < WORD_LENGTH,
        "position {} is out of range",
        position
    );
    position as u32 * BITS_PER_LETTER
}

impl FromStr for Word {
    type Err = WordleError;

    fn from_str(text: &str) -> Result<Word, WordleError> {
        Word::new(text)
    }
}

impl TryFrom<&str> for Word {
    type Error = WordleError;

    fn try_from(text: &str) -> Result<Word, WordleError> {
        Word::new(text)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in self.letters() {
            fmt::Write::write_char(f, code_to_char(code))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(\"{}\", {:#x})", self, self.0)
    }
}
