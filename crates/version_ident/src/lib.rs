// version identifiers
//
// Parse any version string into tokens and order the results, even when
// the upstream source does not follow semver.
//
// --- General rules ---
//
// 1. A version with no digits at all is "non-numerical" and is LESS than any other
// 2. Numbers are compared by value, at any width, leading zeros do not count
// 3.  numeric is LESS than non-numeric
// 4.   prerel is LESS than non-prerel
// 5. missing parts are zeros, 1 == 1.0 == 1.0.0
// 6. build only breaks ties, non-build is LESS than build
//
// --- General Form ---
//
// numbers                              example: 1.2.3
// numbers "-" prerelease               example: 1.2.3-rc1
// numbers prerelease                   example: 1.2.3rc1   (alt)
// numbers "+" build                    example: 1.2.3+20250102
// numbers "-" prerelease "+" build     example: 1.2.3-rc1+20250102
// numbers prerelease "-" build         example: 3.14.0rc1-amd64   (alt)
// no digits                            example: not-a-version
//
// --- Tokens ---
//
// Every segment is a list of tokens, each remembering the delimiter before it.
//
//   1.02.3-rc1+b..7   release  (1, .02, .3)
//                     prerel   (rc, 1)
//                     build    (b, .'', .7)
//
// - a number may carry a sign:   1.-2.3 -> (1, .-2, .3)
// - a number may carry a suffix outside the release: 1.0-2ab -> prerel (2ab)
// - consecutive delimiters leave an empty placeholder, so the text can be rebuilt
//
// --- Differences from Semver ---
//
// 1. Any number of release numbers: 1, 1.2, 1.2.3, 1.2.3.4
// 2. '-' splits pre-release tokens too, 1.2.3-1-2 < 1.2.3-1-10
// 3. leading zeros, negative numbers and numbers beyond u64 are allowed
// 4. a leading 'v' or 'V' is ignored

#[macro_use]
mod macros;

mod compare;
mod ident;
mod numeric;
mod token;
mod tokenizer;

pub use compare::{compare, CompareMode};
pub use ident::{BuildSeparator, VersionFormat, VersionIdentifier};
pub use numeric::NumericalToken;
pub use token::{CharacterSpanToken, DelimitedToken, Token};
pub use tokenizer::parse;

pub use num_bigint::{BigInt, BigUint};
