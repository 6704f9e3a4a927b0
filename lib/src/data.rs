use crate::results::WordleError;
use crate::word::Word;
use std::collections::HashSet;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// Contains all the possible words for this Wordle game.
///
/// Cloning a `WordBank` is cheap, as the words are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBank {
    all_words: Arc<[Word]>,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Surrounding whitespace and empty lines are
    /// ignored, and each word is converted to lower case. Every word must have exactly five
    /// letters.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let lines = word_reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        WordBank::from_iterator(lines)
    }

    /// Constructs a new `WordBank` using the words from the given iterator.
    ///
    /// This follows the same rules as [`WordBank::from_reader`]. Repeated words are only kept once,
    /// in the position of their first occurrence.
    ///
    /// ```
    /// use wordle_sieve::WordBank;
    ///
    /// let bank = WordBank::from_iterator(["crane", "", "  Slate "])?;
    ///
    /// assert_eq!(bank.len(), 2);
    /// assert_eq!(bank[1].to_string(), "SLATE");
    /// # Ok::<(), wordle_sieve::WordleError>(())
    /// ```
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut seen = HashSet::new();
        let mut all_words = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            let word = Word::new(word)?;
            if !word.is_complete() {
                return Err(WordleError::UnsupportedCharacter(' '));
            }
            if seen.insert(word) {
                all_words.push(word);
            }
        }
        Ok(WordBank {
            all_words: all_words.into(),
        })
    }

    /// Returns the number of words in the bank.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns whether the bank contains the given word.
    pub fn contains(&self, word: Word) -> bool {
        self.all_words.contains(&word)
    }
}

impl Deref for WordBank {
    type Target = [Word];

    fn deref(&self) -> &[Word] {
        &self.all_words
    }
}
