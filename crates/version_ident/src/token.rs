use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use itertools::Either;

use crate::compare::CompareMode;
use crate::numeric::NumericalToken;

// --- CharacterSpanToken --------------------------------------------

/// A run of non-digit, non-delimiter characters.
///
/// An empty span is a placeholder left behind by a delimiter that had no
/// token after it (`1..2`, `.1`, `1.`). Placeholders keep the original text
/// reconstructable but are skipped when comparing.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterSpanToken {
    text: String,
}

impl CharacterSpanToken {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// number of characters, not bytes
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn characters(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    pub fn compare_with(&self, other: &Self, mode: CompareMode) -> Ordering {
        match mode {
            CompareMode::Ordinal => self.text.cmp(&other.text),
            CompareMode::CaseInsensitive => {
                let left = self.text.chars().flat_map(char::to_lowercase);
                let right = other.text.chars().flat_map(char::to_lowercase);
                left.cmp(right)
            }
        }
    }
}

impl PartialEq<str> for CharacterSpanToken {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for CharacterSpanToken {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl std::fmt::Display for CharacterSpanToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

// ---/CharacterSpanToken --------------------------------------------

// --- Token ---------------------------------------------------------

/// The atomic unit of a parsed version.
///
/// Numerical tokens always sort before character spans, whatever the span
/// happens to contain.
#[derive(Debug, Clone)]
pub enum Token {
    Numerical(NumericalToken),
    CharacterSpan(CharacterSpanToken),
}

impl Token {
    pub(crate) fn placeholder() -> Self {
        Token::CharacterSpan(CharacterSpanToken::default())
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, Token::Numerical(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::CharacterSpan(span) if span.is_empty())
    }

    pub fn as_numerical(&self) -> Option<&NumericalToken> {
        match self {
            Token::Numerical(n) => Some(n),
            Token::CharacterSpan(_) => None,
        }
    }

    pub fn as_character_span(&self) -> Option<&CharacterSpanToken> {
        match self {
            Token::Numerical(_) => None,
            Token::CharacterSpan(s) => Some(s),
        }
    }

    /// The characters of this token. With `normalized` the zero padding of
    /// numbers is dropped. Calling again (or cloning) restarts the iteration.
    pub fn characters(&self, normalized: bool) -> impl Iterator<Item = char> + Clone + '_ {
        match self {
            Token::Numerical(n) => Either::Left(n.characters(normalized)),
            Token::CharacterSpan(s) => Either::Right(s.characters()),
        }
    }

    pub fn compare_with(&self, other: &Self, mode: CompareMode) -> Ordering {
        match (self, other) {
            (Token::Numerical(a), Token::Numerical(b)) => a.compare_with(b, mode),
            (Token::CharacterSpan(a), Token::CharacterSpan(b)) => a.compare_with(b, mode),
            (Token::Numerical(_), Token::CharacterSpan(_)) => Ordering::Less,
            (Token::CharacterSpan(_), Token::Numerical(_)) => Ordering::Greater,
        }
    }

    /// compare against the implicit zero a shorter sequence is padded with
    pub(crate) fn cmp_zero(&self) -> Ordering {
        match self {
            Token::Numerical(n) => n.cmp_int(0u8),
            Token::CharacterSpan(_) => Ordering::Greater,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_with(other, CompareMode::Ordinal)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Token::Numerical(n) => {
                0u8.hash(state);
                n.hash(state);
            }
            Token::CharacterSpan(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl From<NumericalToken> for Token {
    fn from(n: NumericalToken) -> Self {
        Token::Numerical(n)
    }
}

impl From<CharacterSpanToken> for Token {
    fn from(s: CharacterSpanToken) -> Self {
        Token::CharacterSpan(s)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let normalized = f.alternate();
        for c in self.characters(normalized) {
            std::fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

// ---/Token ---------------------------------------------------------

// --- DelimitedToken ------------------------------------------------

/// A token plus the delimiter (`.`, `-` or `+`) that came right before it.
/// The first token of a segment has no delimiter.
///
/// The delimiter is display information only, equality and ordering look at
/// the token alone.
#[derive(Debug, Clone)]
pub struct DelimitedToken {
    delimiter: Option<char>,
    token: Token,
}

impl DelimitedToken {
    pub fn new(delimiter: Option<char>, token: Token) -> Self {
        Self { delimiter, token }
    }

    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The delimiter, then the token. `normalized` only drops zero padding
    /// here, the delimiter is always kept. Dropping redundant delimiters
    /// needs the neighbours, see [`crate::VersionIdentifier::render`].
    pub fn characters(&self, normalized: bool) -> impl Iterator<Item = char> + Clone + '_ {
        self.delimiter.into_iter().chain(self.token.characters(normalized))
    }
}

impl std::ops::Deref for DelimitedToken {
    type Target = Token;
    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl PartialEq for DelimitedToken {
    fn eq(&self, other: &Self) -> bool {
        self.token.eq(&other.token)
    }
}

impl Eq for DelimitedToken {}

impl PartialOrd for DelimitedToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DelimitedToken {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token.cmp(&other.token)
    }
}

impl Hash for DelimitedToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

// ---/DelimitedToken ------------------------------------------------
