use std::iter::Peekable;
use std::str::CharIndices;

use crate::ident::{BuildSeparator, VersionFormat, VersionIdentifier};
use crate::numeric::NumericalToken;
use crate::token::{CharacterSpanToken, DelimitedToken, Token};

const DELIMITERS: &[char] = &['.', '-', '+'];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// anything that is not a digit or a delimiter belongs to a span
fn is_span_char(c: char) -> bool {
    !c.is_ascii_digit() && !is_delimiter(c)
}

/// Parse any string into a version. Never fails.
///
/// - no digits at all: one span, `NonNumerical`
/// - a leading `v`/`V` before a digit is recorded as the prefix
/// - `-` in the release starts the pre-release (`Standard`)
/// - letters right after a release number start the pre-release (`Alt`)
/// - `+` starts the build, alt versions without a `+` also accept the first
///   `.` or `-` after a pre-release number
/// - `-` before a digit, right after another delimiter or at the start, is a sign
pub fn parse(raw: &str) -> VersionIdentifier {

    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        tracing::trace!(version = raw, "no digits, non-numerical version");
        return VersionIdentifier::non_numerical(raw);
    }

    let (prefix, body) = split_prefix(raw);
    Tokenizer::new(body).run(prefix)
}

fn split_prefix(raw: &str) -> (Option<char>, &str) {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(v @ ('v' | 'V')), Some(d)) if d.is_ascii_digit() => (Some(v), &raw[1..]),
        _ => (None, raw),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Release,
    PreRelease,
    Build,
}

struct Tokenizer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,

    /// last consumed char
    prev: Option<char>,

    stage: Stage,
    format: VersionFormat,

    /// delimiter waiting for the next token
    pending: Option<char>,

    /// a sign was consumed, goes to the next number
    negative: bool,

    /// true at the start of a segment and after a delimiter
    expect_token: bool,

    /// the pre-release holds at least one number
    pre_numeric: bool,

    /// a `+` is somewhere in the text, it alone may open the build
    has_plus: bool,

    release: Vec<DelimitedToken>,
    pre_release: Option<Vec<DelimitedToken>>,
    build: Option<Vec<DelimitedToken>>,
    build_separator: Option<BuildSeparator>,
}

impl<'a> Tokenizer<'a> {

    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            prev: None,
            stage: Stage::Release,
            format: VersionFormat::Standard,
            pending: None,
            negative: false,
            expect_token: true,
            pre_numeric: false,
            has_plus: src.contains('+'),
            release: Vec::new(),
            pre_release: None,
            build: None,
            build_separator: None,
        }
    }

    fn run(mut self, prefix: Option<char>) -> VersionIdentifier {

        while let Some(&(idx, c)) = self.chars.peek() {
            if is_delimiter(c) {
                let prev = self.prev;
                self.bump();
                self.delimiter(c, prev);
            } else if c.is_ascii_digit() {
                self.number(idx);
            } else {
                let span = self.span(idx);
                self.push(Token::CharacterSpan(span));
            }
        }

        // trailing delimiter, or a segment opened at the very end
        if self.expect_token {
            self.push(Token::placeholder());
        }

        VersionIdentifier {
            prefix,
            release: self.release,
            pre_release: self.pre_release,
            build: self.build,
            format: self.format,
            build_separator: self.build_separator,
        }
    }

    fn bump(&mut self) {
        if let Some((_, c)) = self.chars.next() {
            self.prev = Some(c);
        }
    }

    fn next_is_digit(&mut self) -> bool {
        self.chars.peek().is_some_and(|&(_, c)| c.is_ascii_digit())
    }

    fn take_while(&mut self, start: usize, pred: fn(char) -> bool) -> &'a str {
        let src = self.src;
        let mut end = start;
        while let Some(&(idx, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            end = idx + c.len_utf8();
            self.bump();
        }
        &src[start..end]
    }

    fn span(&mut self, start: usize) -> CharacterSpanToken {
        CharacterSpanToken::new(self.take_while(start, is_span_char))
    }

    fn number(&mut self, start: usize) {
        let run = self.take_while(start, |c| c.is_ascii_digit());
        let negative = std::mem::take(&mut self.negative);
        let mut token = NumericalToken::from_digits(run, negative);

        let letters = self.chars.peek().copied().filter(|&(_, c)| is_span_char(c));
        if let Some((at, _)) = letters {
            if self.stage == Stage::Release {
                // 1.2.3rc1
                self.push(Token::Numerical(token));
                self.open_pre_release(VersionFormat::Alt);
                return;
            }
            // 1.0-2ab
            token = token.with_suffix(self.span(at));
        }

        self.push(Token::Numerical(token));
    }

    fn delimiter(&mut self, c: char, prev: Option<char>) {

        if c == '-' && prev.is_none_or(is_delimiter) && self.next_is_digit() {
            self.negative = true;
            return;
        }

        match (c, self.stage) {
            ('+', Stage::Release | Stage::PreRelease) => {
                self.open_build(BuildSeparator::Plus);
            }
            ('-', Stage::Release) => {
                self.open_pre_release(VersionFormat::Standard);
            }
            ('.' | '-', Stage::PreRelease) if self.format == VersionFormat::Alt && self.pre_numeric && !self.has_plus => {
                self.open_build(BuildSeparator::from_delimiter(c));
            }
            _ => {
                if self.expect_token {
                    self.push(Token::placeholder());
                }
                self.pending = Some(c);
                self.expect_token = true;
            }
        }
    }

    fn close_segment(&mut self) {
        if self.expect_token {
            self.push(Token::placeholder());
        }
        self.pending = None;
        self.expect_token = true;
    }

    fn open_pre_release(&mut self, format: VersionFormat) {
        self.close_segment();
        self.stage = Stage::PreRelease;
        self.format = format;
        self.pre_release = Some(Vec::new());
    }

    fn open_build(&mut self, separator: BuildSeparator) {
        self.close_segment();
        self.stage = Stage::Build;
        self.build = Some(Vec::new());
        self.build_separator = Some(separator);
    }

    fn push(&mut self, token: Token) {
        let numerical = token.is_numerical();
        let token = DelimitedToken::new(self.pending.take(), token);
        match self.stage {
            Stage::Release => {
                self.release.push(token);
            }
            Stage::PreRelease => {
                self.pre_numeric |= numerical;
                self.pre_release.get_or_insert_with(Vec::new).push(token);
            }
            Stage::Build => {
                self.build.get_or_insert_with(Vec::new).push(token);
            }
        }
        self.expect_token = false;
    }
}
