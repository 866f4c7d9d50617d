// Ordering of parsed versions, highest precedence first:
//
// 0. non-numerical versions are less than everything else
// 1. release tokens, element by element
// 2. no pre-release is greater than a pre-release
// 3. pre-release tokens, element by element
// 4. build text, only as a tie breaker
//
// Element by element:
// - placeholders (empty spans) are skipped
// - numbers < spans
// - the shorter side is padded with zeros, so 1 == 1.0 == 1.0.0,
//   1 < 1.1, 1.-1 < 1 and 1 < 1.a

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use itertools::{EitherOrBoth, Itertools};
use num_bigint::BigInt;

use crate::ident::VersionIdentifier;
use crate::token::{DelimitedToken, Token};

/// How character spans are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompareMode {
    /// character by character, `A < Z < a`
    #[default]
    Ordinal,
    /// lowercase both sides first, `rc == RC`
    CaseInsensitive,
}

fn eq_to_none(v: Ordering) -> Option<Ordering> {
    if matches!(v, Ordering::Equal) {
        return None;
    }
    Some(v)
}

fn effective(tokens: &[DelimitedToken]) -> impl Iterator<Item = &Token> + Clone + '_ {
    tokens.iter().map(DelimitedToken::token).filter(|t| !t.is_placeholder())
}

fn sequence_cmp(left: &[DelimitedToken], right: &[DelimitedToken], mode: CompareMode) -> Ordering {
    for pair in effective(left).zip_longest(effective(right)) {
        let ord = match pair {
            EitherOrBoth::Both(l, r) => l.compare_with(r, mode),
            EitherOrBoth::Left(l) => l.cmp_zero(),
            EitherOrBoth::Right(r) => r.cmp_zero().reverse(),
        };
        if let Some(ret) = eq_to_none(ord) {
            return ret;
        }
    }
    Ordering::Equal
}

fn text_cmp(left: &str, right: &str, mode: CompareMode) -> Ordering {
    match mode {
        CompareMode::Ordinal => left.cmp(right),
        CompareMode::CaseInsensitive => {
            left.chars().flat_map(char::to_lowercase)
                .cmp(right.chars().flat_map(char::to_lowercase))
        }
    }
}

/// Hash what sequence_cmp looks at: no placeholders, no trailing zeros.
fn hash_sequence<H: Hasher>(tokens: &[DelimitedToken], state: &mut H) {
    let tokens: Vec<&Token> = effective(tokens).collect();
    let end = tokens.iter()
        .rposition(|t| t.cmp_zero() != Ordering::Equal)
        .map_or(0, |idx| idx + 1);
    tokens[..end].hash(state);
}

impl VersionIdentifier {

    /// Rank two versions, ignoring build metadata.
    ///
    /// This is the order to use for "is this version newer", two versions
    /// that only differ in their build are equal here.
    pub fn precedence_cmp(&self, other: &Self) -> Ordering {
        self.precedence_with(other, CompareMode::Ordinal)
    }

    pub fn precedence_with(&self, other: &Self, mode: CompareMode) -> Ordering {

        match (self.is_numerical(), other.is_numerical()) {
            (false, false) => return sequence_cmp(&self.release, &other.release, mode),
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => {}
        }

        if let Some(ret) = eq_to_none(sequence_cmp(&self.release, &other.release, mode)) {
            return ret;
        }

        match (&self.pre_release, &other.pre_release) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(left), Some(right)) => sequence_cmp(left, right, mode),
        }
    }

    /// The full order: precedence, then the normalized build text.
    pub fn compare_with(&self, other: &Self, mode: CompareMode) -> Ordering {
        self.precedence_with(other, mode).then_with(|| {
            match (self.build_text(true), other.build_text(true)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(left), Some(right)) => text_cmp(&left, &right, mode),
            }
        })
    }

    /// Compare against the version made of the single number `rhs`.
    /// `1.0.0 == 1`, `1.0.1 > 1`, `1-rc < 1`.
    pub fn cmp_int<T: Into<BigInt>>(&self, rhs: T) -> Ordering {
        self.cmp(&VersionIdentifier::from_int(rhs))
    }

    /// parse `rhs`, then compare
    pub fn cmp_str(&self, rhs: &str) -> Ordering {
        self.cmp(&crate::parse(rhs))
    }
}

/// `compare(a, b)`, the same as `a.cmp(b)`
pub fn compare(left: &VersionIdentifier, right: &VersionIdentifier) -> Ordering {
    left.compare_with(right, CompareMode::Ordinal)
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}

impl Eq for VersionIdentifier {}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for VersionIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Standard and Alt hash the same, they can compare equal
        self.is_numerical().hash(state);
        hash_sequence(&self.release, state);
        match &self.pre_release {
            None => 0u8.hash(state),
            Some(pre) => {
                1u8.hash(state);
                hash_sequence(pre, state);
            }
        }
        self.build_text(true).hash(state);
    }
}

impl PartialEq<str> for VersionIdentifier {
    fn eq(&self, other: &str) -> bool {
        matches!(self.cmp_str(other), Ordering::Equal)
    }
}

impl PartialEq<&str> for VersionIdentifier {
    fn eq(&self, other: &&str) -> bool {
        matches!(self.cmp_str(other), Ordering::Equal)
    }
}

impl PartialOrd<str> for VersionIdentifier {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.cmp_str(other))
    }
}

impl PartialOrd<&str> for VersionIdentifier {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(self.cmp_str(other))
    }
}

impl_int_cmp_all!(VersionIdentifier);
