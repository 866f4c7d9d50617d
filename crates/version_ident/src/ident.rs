use num_bigint::BigInt;

use crate::numeric::NumericalToken;
use crate::token::{CharacterSpanToken, DelimitedToken, Token};

/// How the version text is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionFormat {
    /// no digits anywhere, the whole text is one span
    NonNumerical,
    /// no pre-release, or one introduced by `-`
    Standard,
    /// pre-release glued to the release without a separator, `1.2.3rc1`
    Alt,
}

impl VersionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonNumerical => "non-numerical",
            Self::Standard => "standard",
            Self::Alt => "alt",
        }
    }
}

impl std::fmt::Display for VersionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The character that started the build segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildSeparator {
    Plus,
    /// fallback for alt versions, `3.14.0rc1.20250102`
    Dot,
    /// fallback for alt versions, `3.14.0rc1-amd64`
    Dash,
}

impl BuildSeparator {
    pub fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Dot => '.',
            Self::Dash => '-',
        }
    }

    pub(crate) fn from_delimiter(c: char) -> Self {
        match c {
            '.' => Self::Dot,
            '-' => Self::Dash,
            _ => Self::Plus,
        }
    }
}

/// A parsed version.
///
/// Built once by [`crate::parse`] and never changed afterwards. Ordering,
/// equality and hashing live in the `compare` module.
///
/// ```
/// use version_ident::{parse, VersionFormat};
///
/// let v = parse("1.02.3-rc1+amd64");
/// assert_eq!(v.format(), VersionFormat::Standard);
/// assert_eq!(v.release().len(), 3);
/// assert_eq!(v.to_string(), "1.02.3-rc1+amd64");
/// assert_eq!(v.render(true), "1.2.3-rc1+amd64");
/// ```
#[derive(Debug, Clone)]
pub struct VersionIdentifier {
    pub(crate) prefix: Option<char>,
    pub(crate) release: Vec<DelimitedToken>,
    pub(crate) pre_release: Option<Vec<DelimitedToken>>,
    pub(crate) build: Option<Vec<DelimitedToken>>,
    pub(crate) format: VersionFormat,
    pub(crate) build_separator: Option<BuildSeparator>,
}

impl VersionIdentifier {

    pub(crate) fn non_numerical(raw: &str) -> Self {
        let span = CharacterSpanToken::new(raw);
        Self {
            prefix: None,
            release: vec![DelimitedToken::new(None, Token::CharacterSpan(span))],
            pre_release: None,
            build: None,
            format: VersionFormat::NonNumerical,
            build_separator: None,
        }
    }

    /// a version made of a single number, `7` for 7
    pub fn from_int<T: Into<BigInt>>(value: T) -> Self {
        let token = Token::Numerical(NumericalToken::from_int(value));
        Self {
            prefix: None,
            release: vec![DelimitedToken::new(None, token)],
            pre_release: None,
            build: None,
            format: VersionFormat::Standard,
            build_separator: None,
        }
    }

    pub fn format(&self) -> VersionFormat {
        self.format
    }

    /// the leading `v` or `V`, if there was one
    pub fn prefix(&self) -> Option<char> {
        self.prefix
    }

    /// never empty
    pub fn release(&self) -> &[DelimitedToken] {
        &self.release
    }

    pub fn pre_release(&self) -> Option<&[DelimitedToken]> {
        self.pre_release.as_deref()
    }

    pub fn build(&self) -> Option<&[DelimitedToken]> {
        self.build.as_deref()
    }

    pub fn build_separator(&self) -> Option<BuildSeparator> {
        self.build_separator
    }

    pub fn is_numerical(&self) -> bool {
        self.format != VersionFormat::NonNumerical
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre_release.is_some()
    }

    pub fn has_build(&self) -> bool {
        self.build.is_some()
    }

    /// The numbers of the release segment, in order, skipping anything else.
    /// `1.2.3` gives `[1, 2, 3]`.
    pub fn release_numbers(&self) -> impl Iterator<Item = &NumericalToken> + '_ {
        self.release.iter().filter_map(|t| t.as_numerical())
    }

    /// Rebuild the version text.
    ///
    /// Without `normalized` this is the input, character for character.
    /// With it, zero padding, the `v` prefix and placeholders between
    /// consecutive delimiters are dropped. Parsing the normalized text gives
    /// a version equal to this one.
    pub fn render(&self, normalized: bool) -> String {
        let mut out = String::new();
        if !normalized {
            out.extend(self.prefix);
        }
        render_segment(&mut out, &self.release, normalized);
        if let Some(pre) = &self.pre_release {
            if self.format == VersionFormat::Standard {
                out.push('-');
            }
            render_segment(&mut out, pre, normalized);
        }
        if let Some(build) = &self.build {
            out.extend(self.build_separator.map(BuildSeparator::as_char));
            render_segment(&mut out, build, normalized);
        }
        out
    }

    /// the build segment text, without its separator
    pub fn build_text(&self, normalized: bool) -> Option<String> {
        self.build.as_ref().map(|build| {
            let mut out = String::new();
            render_segment(&mut out, build, normalized);
            out
        })
    }
}

fn render_segment(out: &mut String, tokens: &[DelimitedToken], normalized: bool) {
    let last = tokens.len().saturating_sub(1);
    for (idx, token) in tokens.iter().enumerate() {
        // leading and trailing placeholders stay, they change how the text reparses
        let interior = idx != 0 && idx != last;
        if normalized && interior && token.is_placeholder() {
            continue;
        }
        out.extend(token.characters(normalized));
    }
}

impl std::fmt::Display for VersionIdentifier {
    /// `{}` is the original text, `{:#}` the normalized one
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(f.alternate()))
    }
}

impl std::str::FromStr for VersionIdentifier {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::parse(s))
    }
}

impl From<&str> for VersionIdentifier {
    fn from(s: &str) -> Self {
        crate::parse(s)
    }
}

impl From<&String> for VersionIdentifier {
    fn from(s: &String) -> Self {
        crate::parse(s)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::parse;

    #[test]
    fn round_trip() {
        let inputs = [
            "",
            "1",
            "1.2.3",
            "v1.2.3",
            "V1.2",
            "1.02.003",
            "1..2",
            ".1",
            "1.",
            "1.2.3-",
            "1.2.3+",
            "+1",
            "-1.2",
            "1.-2.3",
            "1.2.3-rc1+build.5",
            "1.2.3rc1",
            "3.14.0rc1-amd64",
            "3.14.0rc1.20250102",
            "2024-01-15",
            "1.0-2ab.3",
            "not-a-version",
            "1.2.3-rc.1+20250102-aa..b",
            "7.0.1-1::b",
            "6.1.2:5-10",
            "vv1",
            "1.2.3.4",
        ];
        for s in inputs {
            println!("{s}");
            let v = parse(s);
            assert_eq!(v.render(false), s);
            assert_eq!(v.to_string(), s);
        }
    }

    #[test]
    fn normalized_text() {
        assert_eq!(parse("v01.002.3").render(true), "1.2.3");
        assert_eq!(parse("1..2").render(true), "1.2");
        assert_eq!(parse("1...2").render(true), "1.2");
        assert_eq!(parse("1.2.3-rc..01").render(true), "1.2.3-rc.1");
        assert_eq!(parse(".1").render(true), ".1");
        assert_eq!(parse("1.").render(true), "1.");
        assert_eq!(parse("not-a-version").render(true), "not-a-version");
        assert_eq!(format!("{:#}", parse("1.00+01")), "1.0+1");
    }

    #[test]
    fn normalized_reparses_equal() {
        let inputs = [
            "v01.002.3",
            "1..2",
            "1.2.3-rc..01",
            "1.-.-2",
            "1-a.-.2",
            "a..-2.1",
            ".v1",
            "1.2.3rc01..x",
            "1.0-2ab..3",
            "1.2.3+b..01",
            "not--a--version",
            "1.-0",
        ];
        for s in inputs {
            let v = parse(s);
            let normalized = v.render(true);
            println!("{s} -> {normalized}");
            let again = parse(&normalized);
            assert_eq!(v, again);
            assert_eq!(normalized, again.render(true));
        }
    }

    #[test]
    fn accessors() {
        let v = parse("v1.2.3-rc.1+linux");
        assert_eq!(v.prefix(), Some('v'));
        assert!(v.is_prerelease());
        assert!(v.has_build());
        assert_eq!(v.build_text(false).as_deref(), Some("linux"));
        let nums: Vec<String> = v.release_numbers().map(|n| n.digits().to_string()).collect();
        assert_eq!(nums, ["1", "2", "3"]);
        assert_eq!(v.pre_release().map(|p| p.len()), Some(2));

        let v = VersionIdentifier::from_int(7u8);
        assert_eq!(v.to_string(), "7");
        assert_eq!(v.format(), VersionFormat::Standard);
    }
}
