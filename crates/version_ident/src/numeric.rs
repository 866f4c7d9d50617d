// Numbers in versions can be any width. Upstream sources hand out build
// numbers and dates that overflow u64, and the callers compare against i8
// through u128 and bignums. All of it is compared in one domain:
//
// - token vs token compares sign, then digit count, then the digits.
//   This is exact for any magnitude and never parses the number.
// - token vs primitive promotes the primitive to a BigInt and splits it
//   back into sign and decimal digits, then uses the same compare.
//
// Zero padding is kept for display, it never takes part in ordering.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use num_bigint::{BigInt, BigUint, Sign};

use crate::compare::CompareMode;
use crate::token::CharacterSpanToken;

/// A run of digits, with an optional sign, zero padding and letter suffix.
///
/// `2ab` is magnitude 2 with suffix `ab`, `-007` is magnitude 7, negative,
/// padded by 2.
#[derive(Debug, Clone)]
pub struct NumericalToken {
    /// canonical decimal digits, no leading zeros, "0" for zero
    digits: String,
    negative: bool,
    zero_pad: usize,
    suffix: Option<CharacterSpanToken>,
}

impl NumericalToken {

    /// `run` is the digit run as found in the input, padding included
    pub(crate) fn from_digits(run: &str, negative: bool) -> Self {
        let trimmed = run.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Self {
            zero_pad: run.len().saturating_sub(digits.len()),
            digits: digits.to_string(),
            negative,
            suffix: None,
        }
    }

    pub(crate) fn with_suffix(mut self, suffix: CharacterSpanToken) -> Self {
        if !suffix.is_empty() {
            self.suffix = Some(suffix);
        }
        self
    }

    pub fn from_int<T: Into<BigInt>>(value: T) -> Self {
        let value: BigInt = value.into();
        let (sign, magnitude) = value.into_parts();
        Self {
            digits: magnitude.to_string(),
            negative: sign == Sign::Minus,
            zero_pad: 0,
            suffix: None,
        }
    }

    pub fn magnitude(&self) -> BigUint {
        // digits are ascii digits by construction
        BigUint::parse_bytes(self.digits.as_bytes(), 10).unwrap_or_default()
    }

    pub fn value(&self) -> BigInt {
        let sign = if self.is_negative_value() { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, self.magnitude())
    }

    /// canonical digits of the magnitude
    pub fn digits(&self) -> &str {
        self.digits.as_str()
    }

    /// the sign as written, `-0` is negative here
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    fn is_negative_value(&self) -> bool {
        self.negative && !self.is_zero()
    }

    pub fn zero_pad_length(&self) -> usize {
        self.zero_pad
    }

    pub fn suffix(&self) -> Option<&CharacterSpanToken> {
        self.suffix.as_ref()
    }

    pub fn characters(&self, normalized: bool) -> impl Iterator<Item = char> + Clone + '_ {
        let pad = if normalized { 0 } else { self.zero_pad };
        self.negative.then_some('-').into_iter()
            .chain(std::iter::repeat_n('0', pad))
            .chain(self.digits.chars())
            .chain(self.suffix.iter().flat_map(|s| s.characters()))
    }

    /// numeric value only, suffix not considered
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        signed_cmp(self.negative, &self.digits, other.negative, &other.digits)
    }

    pub fn compare_with(&self, other: &Self, mode: CompareMode) -> Ordering {
        self.cmp_value(other).then_with(|| {
            match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(left), Some(right)) => left.compare_with(right, mode),
            }
        })
    }

    /// Compare against an integer of any width. A plain integer has no
    /// suffix, so a token with a suffix is greater than its own value.
    pub fn cmp_int<T: Into<BigInt>>(&self, rhs: T) -> Ordering {
        let rhs: BigInt = rhs.into();
        let (sign, magnitude) = rhs.into_parts();
        let rhs_digits = magnitude.to_string();
        signed_cmp(self.negative, &self.digits, sign == Sign::Minus, &rhs_digits)
            .then(if self.suffix.is_some() { Ordering::Greater } else { Ordering::Equal })
    }
}

/// compare canonical digit strings, longer is larger
fn magnitude_cmp(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn signed_cmp(a_negative: bool, a: &str, b_negative: bool, b: &str) -> Ordering {
    // -0 == 0
    let a_negative = a_negative && a != "0";
    let b_negative = b_negative && b != "0";
    match (a_negative, b_negative) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => magnitude_cmp(a, b),
        (true, true) => magnitude_cmp(b, a),
    }
}

impl PartialEq for NumericalToken {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}

impl Eq for NumericalToken {}

impl PartialOrd for NumericalToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericalToken {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_with(other, CompareMode::Ordinal)
    }
}

impl Hash for NumericalToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_negative_value().hash(state);
        self.digits.hash(state);
        self.suffix.hash(state);
    }
}

impl_int_cmp_all!(NumericalToken);
