//! Letter set of a dictionary.
//!
//! Every letter gets a dense code `1..=N` (code 0 is reserved for the
//! sentinel). Letters are stored upper-case; lower-case characters in words
//! mark letters played with a joker and map to the same code.

use std::borrow::Cow;
use std::collections::HashMap;

/// Code of a letter inside the packed edge records (6 bits).
pub type Code = u8;

/// Maximum number of letters, bounded by the 6-bit code field.
pub const MAX_LETTERS: usize = 63;

/// Joker (blank tile) symbol.
pub const JOKER: char = '?';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("no letter for code {0}")]
    UnknownCode(Code),

    #[error("no code for letter '{0}'")]
    UnknownChar(char),

    #[error("invalid letter '{0}' (only alphabetic characters and '?' are allowed)")]
    InvalidLetter(char),

    #[error("invalid input form '{form}' for letter '{letter}'")]
    InvalidForm { letter: char, form: String },

    #[error("letter '{0}' defined twice")]
    DuplicateLetter(char),

    #[error("too many letters (max {max})")]
    TooManyLetters { max: usize },

    #[error("letters file, line {line}: {reason}")]
    LettersFile { line: usize, reason: String },
}

/// One letter definition, as found in a letters file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDef {
    pub ch: char,
    pub points: u8,
    pub frequency: u8,
    pub vowel: bool,
    pub consonant: bool,
    /// Display string followed by extra accepted input strings.
    /// Empty means the letter is shown and typed as itself.
    pub inputs: Vec<String>,
}

impl LetterDef {
    pub fn new(ch: char, points: u8, frequency: u8, vowel: bool, consonant: bool) -> Self {
        Self {
            ch,
            points,
            frequency,
            vowel,
            consonant,
            inputs: Vec::new(),
        }
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    letters: Vec<char>,
    points: Vec<u8>,
    frequency: Vec<u8>,
    vowels: u64,
    consonants: u64,
    /// Per code: display string first, then the other accepted inputs.
    forms: Vec<Vec<String>>,
    codes: HashMap<char, Code>,
    has_forms: bool,
}

pub(crate) fn to_upper(c: char) -> char {
    let mut up = c.to_uppercase();
    match (up.next(), up.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

pub(crate) fn to_lower(c: char) -> char {
    let mut low = c.to_lowercase();
    match (low.next(), low.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

impl Alphabet {
    /// Build an alphabet, assigning codes in definition order.
    pub fn new(defs: Vec<LetterDef>) -> Result<Self, AlphabetError> {
        let mut alphabet = Self::default();
        for def in defs {
            alphabet.push(def)?;
        }
        Ok(alphabet)
    }

    /// Append one letter; its code is the new letter count.
    pub fn push(&mut self, def: LetterDef) -> Result<Code, AlphabetError> {
        if def.ch != JOKER && !def.ch.is_alphabetic() {
            return Err(AlphabetError::InvalidLetter(def.ch));
        }
        let ch = to_upper(def.ch);
        if self.codes.contains_key(&ch) {
            return Err(AlphabetError::DuplicateLetter(ch));
        }
        if self.letters.len() >= MAX_LETTERS {
            return Err(AlphabetError::TooManyLetters { max: MAX_LETTERS });
        }
        // The header stores forms as `|`-joined, space-separated tokens.
        if let Some(form) = def
            .inputs
            .iter()
            .find(|f| f.is_empty() || f.chars().any(|c| c == '|' || c.is_whitespace()))
        {
            return Err(AlphabetError::InvalidForm {
                letter: def.ch,
                form: form.clone(),
            });
        }

        let bit = 1u64 << self.letters.len();
        self.letters.push(ch);
        self.points.push(def.points);
        self.frequency.push(def.frequency);
        if def.vowel {
            self.vowels |= bit;
        }
        if def.consonant {
            self.consonants |= bit;
        }

        let code = self.letters.len() as Code;
        self.codes.insert(ch, code);
        self.codes.insert(to_lower(ch), code);

        let forms: Vec<String> = def.inputs.iter().map(|s| s.to_uppercase()).collect();
        let default_form = forms.is_empty() || (forms.len() == 1 && forms[0] == ch.to_string());
        if default_form {
            self.forms.push(vec![ch.to_string()]);
        } else {
            self.forms.push(forms);
            self.has_forms = true;
        }
        Ok(code)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// All letters in code order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Iterator over every valid code, `1..=N`.
    pub fn codes(&self) -> impl Iterator<Item = Code> {
        1..=self.letters.len() as Code
    }

    /// Case-insensitive code lookup.
    pub fn code(&self, ch: char) -> Result<Code, AlphabetError> {
        self.codes
            .get(&ch)
            .copied()
            .ok_or(AlphabetError::UnknownChar(ch))
    }

    pub fn char_of(&self, code: Code) -> Result<char, AlphabetError> {
        self.index(code).map(|i| self.letters[i])
    }

    pub fn encode(&self, word: &str) -> Result<Vec<Code>, AlphabetError> {
        word.chars().map(|c| self.code(c)).collect()
    }

    pub fn decode(&self, codes: &[Code]) -> Result<String, AlphabetError> {
        codes.iter().map(|&c| self.char_of(c)).collect()
    }

    pub fn points(&self, code: Code) -> Result<u8, AlphabetError> {
        self.index(code).map(|i| self.points[i])
    }

    pub fn frequency(&self, code: Code) -> Result<u8, AlphabetError> {
        self.index(code).map(|i| self.frequency[i])
    }

    pub fn is_vowel(&self, code: Code) -> bool {
        self.index(code)
            .map(|i| self.vowels & (1u64 << i) != 0)
            .unwrap_or(false)
    }

    pub fn is_consonant(&self, code: Code) -> bool {
        self.index(code)
            .map(|i| self.consonants & (1u64 << i) != 0)
            .unwrap_or(false)
    }

    /// Vowel flags as a bitmask, bit `code - 1`.
    pub fn vowel_mask(&self) -> u64 {
        self.vowels
    }

    /// Consonant flags as a bitmask, bit `code - 1`.
    pub fn consonant_mask(&self) -> u64 {
        self.consonants
    }

    pub fn display(&self, code: Code) -> Result<&str, AlphabetError> {
        self.index(code).map(|i| self.forms[i][0].as_str())
    }

    /// Accepted input strings for a code, display string first.
    pub fn inputs(&self, code: Code) -> Result<&[String], AlphabetError> {
        self.index(code).map(|i| self.forms[i].as_slice())
    }

    /// Whether any letter has a display or input form other than itself.
    pub fn has_custom_forms(&self) -> bool {
        self.has_forms
    }

    /// Letter definitions in code order, suitable for `Alphabet::new`.
    pub fn defs(&self) -> Vec<LetterDef> {
        (0..self.letters.len())
            .map(|i| {
                let ch = self.letters[i];
                let mut def = LetterDef::new(
                    ch,
                    self.points[i],
                    self.frequency[i],
                    self.vowels & (1u64 << i) != 0,
                    self.consonants & (1u64 << i) != 0,
                );
                if !self.is_default_form(i) {
                    def.inputs = self.forms[i].clone();
                }
                def
            })
            .collect()
    }

    pub(crate) fn is_default_form(&self, index: usize) -> bool {
        self.forms[index].len() == 1 && self.forms[index][0].chars().eq([self.letters[index]])
    }

    fn index(&self, code: Code) -> Result<usize, AlphabetError> {
        if code == 0 || code as usize > self.letters.len() {
            return Err(AlphabetError::UnknownCode(code));
        }
        Ok(code as usize - 1)
    }

    /// Replace internal letters by their display strings.
    ///
    /// Lower-case letters (joker) get a lower-case display string.
    /// Characters outside the alphabet are kept as they are.
    pub fn convert_to_display<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if !self.has_forms {
            return Cow::Borrowed(word);
        }
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            match self.code(c).and_then(|code| self.display(code)) {
                Ok(display) if c != to_upper(c) => out.push_str(&display.to_lowercase()),
                Ok(display) => out.push_str(display),
                Err(_) => out.push(c),
            }
        }
        Cow::Owned(out)
    }

    /// Turn user input into internal letters.
    ///
    /// Uses the longest accepted input string at each position. The case of
    /// the first input character decides the case of the produced letter.
    /// The joker is passed through; any other character outside the
    /// alphabet is an error.
    pub fn convert_from_input<'a>(&self, input: &'a str) -> Result<Cow<'a, str>, AlphabetError> {
        if !self.has_forms {
            if let Some(c) = input.chars().find(|&c| c != JOKER && self.code(c).is_err()) {
                return Err(AlphabetError::UnknownChar(c));
            }
            return Ok(Cow::Borrowed(input));
        }
        self.convert_input(input, false).map(Cow::Owned)
    }

    /// Like `convert_from_input`, but characters that start no input string
    /// are kept as they are. Used for regexp patterns, where `L.L` may be a
    /// single letter: the longest input string wins over the operators.
    pub fn convert_pattern_from_input<'a>(&self, pattern: &'a str) -> Cow<'a, str> {
        if !self.has_forms {
            return Cow::Borrowed(pattern);
        }
        match self.convert_input(pattern, true) {
            Ok(converted) => Cow::Owned(converted),
            Err(_) => Cow::Borrowed(pattern),
        }
    }

    fn convert_input(&self, input: &str, keep_unknown: bool) -> Result<String, AlphabetError> {
        let chars: Vec<char> = input.chars().collect();
        let upper: Vec<char> = chars.iter().map(|&c| to_upper(c)).collect();
        let mut out = String::with_capacity(input.len());
        let mut pos = 0;
        while pos < chars.len() {
            let mut best: Option<(usize, char)> = None;
            for (i, forms) in self.forms.iter().enumerate() {
                for form in forms {
                    let len = form.chars().count();
                    let fits = pos + len <= upper.len()
                        && form.chars().zip(&upper[pos..pos + len]).all(|(a, &b)| a == b);
                    if fits && len > best.map_or(0, |(l, _)| l) {
                        best = Some((len, self.letters[i]));
                    }
                }
            }
            let Some((len, letter)) = best else {
                if keep_unknown || chars[pos] == JOKER {
                    out.push(chars[pos]);
                    pos += 1;
                    continue;
                }
                return Err(AlphabetError::UnknownChar(chars[pos]));
            };
            if chars[pos] != upper[pos] {
                out.push(to_lower(letter));
            } else {
                out.push(letter);
            }
            pos += len;
        }
        Ok(out)
    }
}

/// Parse a letters file.
///
/// One letter per line, at least five space-separated fields:
/// `letter points frequency vowel consonant [display [input ...]]`.
/// A UTF-8 byte order mark and empty lines are ignored.
pub fn parse_letters(text: &str) -> Result<Vec<LetterDef>, AlphabetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut defs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let err = |reason: String| AlphabetError::LettersFile {
            line: line_no,
            reason,
        };
        if fields.len() < 5 {
            return Err(err("not enough fields (expected at least 5)".to_string()));
        }

        let mut letter = fields[0].chars();
        let ch = match (letter.next(), letter.next()) {
            (Some(c), None) => c,
            _ => return Err(err("only one character allowed for the letter".to_string())),
        };
        let number = |i: usize, name: &str| -> Result<u8, AlphabetError> {
            fields[i]
                .parse::<u8>()
                .map_err(|_| err(format!("invalid {name} '{}'", fields[i])))
        };
        let flag = |i: usize, name: &str| -> Result<bool, AlphabetError> {
            match fields[i] {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(err(format!("invalid {name} flag '{other}'"))),
            }
        };

        let def = LetterDef::new(
            ch,
            number(1, "points")?,
            number(2, "frequency")?,
            flag(3, "vowel")?,
            flag(4, "consonant")?,
        )
        .with_inputs(fields[5..].iter().copied());
        defs.push(def);
    }
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Alphabet {
        Alphabet::new(vec![
            LetterDef::new('A', 1, 9, true, false),
            LetterDef::new('B', 3, 2, false, true),
            LetterDef::new('C', 3, 2, false, true),
            LetterDef::new('?', 0, 2, true, true),
        ])
        .unwrap()
    }

    fn catalan_like() -> Alphabet {
        Alphabet::new(vec![
            LetterDef::new('A', 1, 12, true, false),
            LetterDef::new('L', 1, 4, false, true),
            LetterDef::new('W', 10, 1, false, true).with_inputs(["L.L", "L-L", "L·L"]),
            LetterDef::new('Y', 10, 1, false, true).with_inputs(["NY"]),
        ])
        .unwrap()
    }

    #[test]
    fn codes_are_dense() {
        let a = abc();
        assert_eq!(a.len(), 4);
        assert_eq!(a.code('A').unwrap(), 1);
        assert_eq!(a.code('c').unwrap(), 3);
        assert_eq!(a.code('?').unwrap(), 4);
        assert_eq!(a.char_of(2).unwrap(), 'B');
        assert_eq!(a.codes().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unknown_code_and_char() {
        let a = abc();
        assert_eq!(a.char_of(0), Err(AlphabetError::UnknownCode(0)));
        assert_eq!(a.char_of(5), Err(AlphabetError::UnknownCode(5)));
        assert_eq!(a.code('Z'), Err(AlphabetError::UnknownChar('Z')));
        assert_eq!(a.encode("ABZ"), Err(AlphabetError::UnknownChar('Z')));
    }

    #[test]
    fn encode_decode() {
        let a = abc();
        let codes = a.encode("cab").unwrap();
        assert_eq!(codes, vec![3, 1, 2]);
        assert_eq!(a.decode(&codes).unwrap(), "CAB");
    }

    #[test]
    fn flags_points_frequency() {
        let a = abc();
        assert!(a.is_vowel(1));
        assert!(!a.is_consonant(1));
        assert!(a.is_vowel(4) && a.is_consonant(4));
        assert!(!a.is_vowel(9));
        assert_eq!(a.points(2).unwrap(), 3);
        assert_eq!(a.frequency(1).unwrap(), 9);
        assert_eq!(a.vowel_mask(), 0b1001);
        assert_eq!(a.consonant_mask(), 0b1110);
    }

    #[test]
    fn rejects_invalid_letters() {
        let mut a = Alphabet::default();
        assert_eq!(
            a.push(LetterDef::new('1', 0, 0, false, false)),
            Err(AlphabetError::InvalidLetter('1'))
        );
        a.push(LetterDef::new('a', 1, 1, true, false)).unwrap();
        assert_eq!(
            a.push(LetterDef::new('A', 1, 1, true, false)),
            Err(AlphabetError::DuplicateLetter('A'))
        );
    }

    #[test]
    fn rejects_too_many_letters() {
        let mut a = Alphabet::default();
        let letters: Vec<char> = ('A'..='Z')
            .chain('\u{410}'..='\u{42f}')
            .chain('\u{391}'..='\u{3a9}')
            .filter(|c| c.is_alphabetic())
            .collect();
        let mut pushed = 0;
        let mut result = Ok(0);
        for c in letters {
            result = a.push(LetterDef::new(c, 1, 1, false, true));
            if result.is_err() {
                break;
            }
            pushed += 1;
        }
        assert_eq!(pushed, MAX_LETTERS);
        assert_eq!(result, Err(AlphabetError::TooManyLetters { max: MAX_LETTERS }));
    }

    #[test]
    fn display_identity_fast_path() {
        let a = abc();
        assert!(!a.has_custom_forms());
        assert!(matches!(a.convert_to_display("CaB"), Cow::Borrowed("CaB")));
        assert!(matches!(a.convert_from_input("cab"), Ok(Cow::Borrowed("cab"))));
        assert_eq!(a.display(1).unwrap(), "A");
        assert_eq!(a.inputs(1).unwrap(), ["A".to_string()]);
    }

    #[test]
    fn display_substitution() {
        let a = catalan_like();
        assert!(a.has_custom_forms());
        assert_eq!(a.display(3).unwrap(), "L.L");
        assert_eq!(a.convert_to_display("AWA"), "AL.LA");
        assert_eq!(a.convert_to_display("AwA"), "Al.lA");
        assert_eq!(a.convert_to_display("YA"), "NYA");
    }

    #[test]
    fn input_longest_match() {
        let a = catalan_like();
        assert_eq!(a.convert_from_input("AL-LA").unwrap(), "AWA");
        assert_eq!(a.convert_from_input("al·la").unwrap(), "awa");
        assert_eq!(a.convert_from_input("NYA").unwrap(), "YA");
        assert_eq!(a.convert_from_input("LA").unwrap(), "LA");
        assert_eq!(
            a.convert_from_input("AX"),
            Err(AlphabetError::UnknownChar('X'))
        );
    }

    #[test]
    fn input_fast_path_checks_letters() {
        let a = Alphabet::new(vec![LetterDef::new('A', 1, 1, true, false)]).unwrap();
        assert!(matches!(a.convert_from_input("Aa"), Ok(Cow::Borrowed("Aa"))));
        assert!(matches!(a.convert_from_input("A?"), Ok(Cow::Borrowed("A?"))));
        assert_eq!(
            a.convert_from_input("AX"),
            Err(AlphabetError::UnknownChar('X'))
        );
    }

    #[test]
    fn input_joker_passes_through() {
        let a = catalan_like();
        assert_eq!(a.convert_from_input("L.L?").unwrap(), "W?");
    }

    #[test]
    fn pattern_input_keeps_operators() {
        let a = catalan_like();
        assert_eq!(a.convert_pattern_from_input("AL.LA"), "AWA");
        assert_eq!(a.convert_pattern_from_input("(ny)?.*"), "(y)?.*");
        assert_eq!(a.convert_pattern_from_input("[^L]:v:"), "[^L]:v:");
        assert!(matches!(
            abc().convert_pattern_from_input("A.B"),
            Cow::Borrowed("A.B")
        ));
    }

    #[test]
    fn rejects_unstorable_forms() {
        for form in ["L|L", "L L", ""] {
            let def = LetterDef::new('W', 10, 1, false, true).with_inputs([form]);
            assert_eq!(
                Alphabet::new(vec![def]),
                Err(AlphabetError::InvalidForm {
                    letter: 'W',
                    form: form.to_string()
                })
            );
        }
        assert!(parse_letters("W 10 1 0 1 L|L\n")
            .map(Alphabet::new)
            .unwrap()
            .is_err());
    }

    #[test]
    fn defs_round_trip() {
        let a = catalan_like();
        let b = Alphabet::new(a.defs()).unwrap();
        assert_eq!(a, b);
        assert!(a.defs()[0].inputs.is_empty());
    }

    #[test]
    fn parse_letters_file() {
        let text = "\u{feff}A 1 9 1 0\n\nB 3 2 0 1\r\nW 10 1 0 1 L.L L-L\n? 0 2 1 1\n";
        let defs = parse_letters(text).unwrap();
        assert_eq!(defs.len(), 4);
        assert_eq!(defs[0], LetterDef::new('A', 1, 9, true, false));
        assert_eq!(defs[2].inputs, vec!["L.L", "L-L"]);
        assert_eq!(defs[3].ch, '?');
        assert!(Alphabet::new(defs).is_ok());
    }

    #[test]
    fn parse_letters_errors() {
        let err = parse_letters("A 1 9 1 0\nB 3 2 0\n").unwrap_err();
        assert!(matches!(err, AlphabetError::LettersFile { line: 2, .. }));
        let err = parse_letters("AB 1 9 1 0\n").unwrap_err();
        assert!(matches!(err, AlphabetError::LettersFile { line: 1, .. }));
        let err = parse_letters("A x 9 1 0\n").unwrap_err();
        assert!(err.to_string().contains("points"));
        let err = parse_letters("A 1 9 2 0\n").unwrap_err();
        assert!(err.to_string().contains("vowel"));
    }
}
