//! Letter/number word scanning and per-line parameter sets
//!
//! A word is a single letter immediately followed by an optional sign and a
//! decimal number (`X10`, `Z-2.5`, `F.8`). Exponent forms are not numbers
//! here. Anything that does not form a word is ignored, including comment
//! text and letters without a trailing number.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single letter/value pair scanned from a line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Uppercase letter code
    pub letter: char,
    /// Numeric value following the letter
    pub value: f64,
}

impl Word {
    /// Create a new word, normalizing the letter to uppercase
    pub fn new(letter: char, value: f64) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            value,
        }
    }

    /// Check whether this word is the given letter/number code (e.g. `G`, 81.0)
    pub fn is(&self, letter: char, value: f64) -> bool {
        self.letter == letter.to_ascii_uppercase() && self.value == value
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.letter, self.value)
    }
}

/// Returns the end index of a number starting at `start`, if one is present
fn number_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    if matches!(bytes.get(i), Some(b'-') | Some(b'+')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let int_digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let mut j = i + 1;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        let frac_digits = j - (i + 1);
        if int_digits > 0 || frac_digits > 0 {
            return Some(j);
        }
    }

    (int_digits > 0).then_some(i)
}

/// Try to read one word at `pos` of an uppercased line
fn word_at(upper: &str, pos: usize) -> Option<(Word, usize)> {
    let bytes = upper.as_bytes();
    let letter = *bytes.get(pos)?;
    if !letter.is_ascii_uppercase() {
        return None;
    }

    let end = number_end(bytes, pos + 1)?;
    let value = upper[pos + 1..end].parse::<f64>().ok()?;
    Some((Word::new(letter as char, value), end))
}

/// Scan every word in a line, in order of appearance
///
/// Repeated letters are all returned; use [`ParameterSet`] for the
/// last-occurrence-wins view.
pub fn scan_words(line: &str) -> Vec<Word> {
    let upper = line.to_ascii_uppercase();
    let mut words = Vec::new();
    let mut pos = 0;

    while pos < upper.len() {
        match word_at(&upper, pos) {
            Some((word, end)) => {
                words.push(word);
                pos = end;
            }
            None => pos += 1,
        }
    }

    words
}

/// Scan the run of words at the very start of a line
///
/// Stops at the first character that does not begin a word (a comment,
/// an operator, a bare letter). Whitespace between words is allowed, so both
/// `G81 X10` and `G81X10` yield two words.
pub fn leading_words(line: &str) -> Vec<Word> {
    let upper = line.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut words = Vec::new();
    let mut pos = 0;

    loop {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        match word_at(&upper, pos) {
            Some((word, end)) => {
                words.push(word);
                pos = end;
            }
            None => break,
        }
    }

    words
}

/// Letter-to-value mapping for a single line
///
/// Keys are unique; when a letter repeats on a line the last occurrence wins.
/// An absent key means "not specified on this line", which is distinct from
/// a zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    values: BTreeMap<char, f64>,
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the parameter set of one line
    pub fn from_line(line: &str) -> Self {
        scan_words(line).into_iter().collect()
    }

    /// Get the value for a letter, if the line specified it
    pub fn get(&self, letter: char) -> Option<f64> {
        self.values.get(&letter.to_ascii_uppercase()).copied()
    }

    /// Check whether the line specified a letter
    pub fn contains(&self, letter: char) -> bool {
        self.values.contains_key(&letter.to_ascii_uppercase())
    }

    /// Set a value, replacing any earlier one for the same letter
    pub fn insert(&mut self, letter: char, value: f64) {
        self.values.insert(letter.to_ascii_uppercase(), value);
    }

    /// Number of distinct letters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no words were found
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate letters and values in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<Word> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word.letter, word.value);
        }
        set
    }
}
