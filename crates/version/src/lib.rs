use serde::{Serialize, Deserialize};
use version_ident::{VersionFormat, VersionIdentifier};

/// A version as stored and exchanged: serialized as its original text,
/// ordered by the parsed identifier. Derefs to the identifier for
/// `format()`, `is_prerelease()`, `has_build()` and the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "VersionString", into = "VersionString")]
pub struct Version {
    ident: VersionIdentifier,
}

/// The raw text of a version, the way it is written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionString(pub String);

impl VersionString {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<VersionString> for Version {
    fn from(v: VersionString) -> Self {
        Version::new(v.as_str())
    }
}

impl From<Version> for VersionString {
    fn from(v: Version) -> Self {
        Self(v.to_string())
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Version::new(s)
    }
}

impl From<String> for VersionString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VersionString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Version {

    pub fn new(v: &str) -> Self {
        Self {
            ident: version_ident::parse(v),
        }
    }

    pub fn ident(&self) -> &VersionIdentifier {
        &self.ident
    }

    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.to_string()).is_ok()
    }

    /// canonical text, see [`VersionIdentifier::render`]
    pub fn normalized(&self) -> String {
        self.ident.render(true)
    }

    /// Is this a newer release than `other`? Build metadata does not count,
    /// `1.2.3+b` is not newer than `1.2.3+a`.
    pub fn is_newer_than(&self, other: &Version) -> bool {
        self.ident.precedence_cmp(&other.ident).is_gt()
    }
}

/// How picky to be about what counts as a version.
///
/// The parser takes anything, these are policies on top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// anything goes, even "not-a-version"
    #[default]
    Any,
    /// must contain a number
    Numeric,
    /// registry style, see [`is_valid_version`]
    Registry,
    /// must parse as semver
    Semver,
}

impl Strictness {
    pub fn accepts(&self, v: &Version) -> bool {
        match self {
            Self::Any => true,
            Self::Numeric => v.format() != VersionFormat::NonNumerical,
            Self::Registry => is_valid_version(&v.to_string()),
            Self::Semver => v.is_semver(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Numeric => "numeric",
            Self::Registry => "registry",
            Self::Semver => "semver",
        }
    }
}

impl std::str::FromStr for Strictness {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "numeric" => Ok(Self::Numeric),
            "registry" => Ok(Self::Registry),
            "semver" => Ok(Self::Semver),
            _ => Err(format!("unknown strictness '{s}', expected any, numeric, registry or semver")),
        }
    }
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_valid_version(text: &str) -> bool {
    // cannot be empty string
    // cannot contain underscore _
    // must start with a number
    // must end with an alphanumeric
    // does not have multiple consecutive -, +, or .
    let s = ['.', '-', '+'];
    !text.is_empty()
        && text.chars().next().is_some_and(|c| c.is_ascii_digit())
        && text.chars().last().is_some_and(|c| c.is_alphanumeric())
        && text.chars().all(|c| {
            c.is_ascii() && c.is_alphanumeric() || s.contains(&c)
        })
        && text.as_bytes().windows(2).all(|ab| {
            !(s.contains(&(ab[0] as char)) && s.contains(&(ab[1] as char)))
        })
}

/// drop the versions `strictness` does not accept, returns how many were dropped
pub fn retain_valid(versions: &mut Vec<Version>, strictness: Strictness) -> usize {
    let before = versions.len();
    versions.retain(|v| {
        let ok = strictness.accepts(v);
        if !ok {
            tracing::debug!(version = %v, %strictness, "dropping version");
        }
        ok
    });
    before - versions.len()
}

/// sort ascending and remove duplicates, `1.0` and `1` are duplicates
pub fn sort_dedup(versions: &mut Vec<Version>) {
    versions.sort();
    versions.dedup();
}

/// the newest version, build metadata only breaks ties
pub fn newest<'a, I>(versions: I) -> Option<&'a Version>
where
    I: IntoIterator<Item = &'a Version>,
{
    versions.into_iter().max()
}

impl std::ops::Deref for Version {
    type Target = VersionIdentifier;
    fn deref(&self) -> &Self::Target {
        &self.ident
    }
}

impl std::ops::Deref for VersionString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Version) -> bool {
        self.ident.eq(&other.ident)
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> std::cmp::Ordering {
        self.ident.cmp(&other.ident)
    }
}

impl std::hash::Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ident.hash(state);
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.ident, f)
    }
}

impl std::fmt::Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_ordering() {
        let s1 = "1.2.3-7.1.2";
        let s2 = "1.2.3-7.1.10";

        let v1 = Version::new(s1);
        let v2 = Version::new(s2);
        assert!(v1 < v2);
    }

    #[test]
    fn subpart_ordering() {
        let s1 = "1.2.3-7-2-a";
        let s2 = "1.2.3-7-10-a";

        let v1 = Version::new(s1);
        let v2 = Version::new(s2);
        assert!(v1 < v2);
    }

    #[test]
    fn ascii_ordering() {
        let s1 = "1.2.3-A-2";
        let s2 = "1.2.3-a-2";

        let v1 = Version::new(s1);
        let v2 = Version::new(s2);
        assert!(v1 < v2);
    }

    #[test]
    fn serde_keeps_text() {
        let v = Version::new("v1.02.3-rc1");
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"v1.02.3-rc1\"");

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.to_string(), "v1.02.3-rc1");

        let list: Vec<Version> = serde_json::from_str(r#"["2.0", "1.10", "1.9"]"#).unwrap();
        let mut list = list;
        list.sort();
        let text: Vec<String> = list.iter().map(ToString::to_string).collect();
        assert_eq!(text, ["1.9", "1.10", "2.0"]);
    }

    #[test]
    fn identifier_accessors() {
        let v = Version::new("3.14.0rc1+local");
        assert_eq!(v.format(), VersionFormat::Alt);
        assert!(v.is_prerelease());
        assert!(v.has_build());
        assert_eq!(v.normalized(), "3.14.0rc1+local");

        let v = Version::new("1.2.3");
        assert_eq!(v.format(), VersionFormat::Standard);
        assert!(!v.is_prerelease());
        assert!(!v.has_build());
    }

    #[test]
    fn newer() {
        assert!(Version::new("1.2.4").is_newer_than(&Version::new("1.2.3")));
        assert!(Version::new("1.2.3").is_newer_than(&Version::new("1.2.3-rc1")));
        assert!(!Version::new("1.2.3").is_newer_than(&Version::new("1.2.3.0")));
        assert!(!Version::new("1.2.3+b").is_newer_than(&Version::new("1.2.3+a")));
        assert!(Version::new("1.0").is_newer_than(&Version::new("junk")));
    }

    #[test]
    fn newest_and_dedup() {
        let mut versions: Vec<Version> = ["1.0", "1.0.0", "2.0-rc1", "1.9", "junk", "1.10", "v1.10"]
            .into_iter()
            .map(Version::from)
            .collect();

        assert_eq!(newest(&versions).map(ToString::to_string).as_deref(), Some("2.0-rc1"));
        assert!(newest(&Vec::<Version>::new()).is_none());

        sort_dedup(&mut versions);
        let text: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(text, ["junk", "1.0", "1.9", "1.10", "2.0-rc1"]);
    }

    #[test]
    fn strictness() {
        let junk = Version::new("junk");
        let alt = Version::new("3.14.0rc1");
        let four = Version::new("1.2.3.4");
        let semver = Version::new("1.2.3-rc.1");
        let messy = Version::new("1.2..3");

        assert!(Strictness::Any.accepts(&junk));
        assert!(!Strictness::Numeric.accepts(&junk));
        assert!(Strictness::Numeric.accepts(&messy));
        assert!(!Strictness::Registry.accepts(&messy));
        assert!(Strictness::Registry.accepts(&four));
        assert!(Strictness::Registry.accepts(&alt));
        assert!(!Strictness::Semver.accepts(&four));
        assert!(!Strictness::Semver.accepts(&alt));
        assert!(Strictness::Semver.accepts(&semver));

        let mut all = vec![junk, alt, four, semver, messy];
        assert_eq!(retain_valid(&mut all, Strictness::Semver), 4);
        assert_eq!(all.len(), 1);

        assert_eq!("registry".parse::<Strictness>(), Ok(Strictness::Registry));
        assert!("strict".parse::<Strictness>().is_err());
    }

    #[test]
    fn valid_version() {
        assert!(is_valid_version("1"));
        assert!(is_valid_version("1.2.3-rc1+b5"));
        assert!(!is_valid_version(""));
        assert!(!is_valid_version("v1.2"));
        assert!(!is_valid_version("1.2_3"));
        assert!(!is_valid_version("1.2."));
        assert!(!is_valid_version("1.-2"));
        assert!(!is_valid_version("1.2.3:4"));
    }

    #[test]
    fn cant_use_vc_crate() {

        // the version-compare crate gets these wrong for upstream data,
        // check that we don't

        // version-compare crate does no-case string compares
        assert!(
            version_compare::Version::from("1.2.3.4-master").unwrap()
            <
            version_compare::Version::from("1.2.3.4-TRIAL").unwrap()
        );
        assert!(Version::new("1.2.3.4-TRIAL") < Version::new("1.2.3.4-master"));

        // version-compare crate gives strange ordering here
        assert!(
            version_compare::Version::from("1.2.3.4-rc1").unwrap()
            <
            version_compare::Version::from("1.2.3-rc1").unwrap()
        );
        assert!(Version::new("1.2.3-rc1") < Version::new("1.2.3.4-rc1"));

        // both agree that trailing zeros don't matter
        assert!(
            version_compare::Version::from("1").unwrap()
            ==
            version_compare::Version::from("1.0").unwrap()
        );
        assert_eq!(Version::new("1"), Version::new("1.0"));
    }
}
