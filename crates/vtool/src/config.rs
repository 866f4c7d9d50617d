use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use version::Strictness;
use version_ident::CompareMode;

pub const CONFIG_FILE_NAME: &str = "vtool.toml";

/// defaults for the command line, flags win over these
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ignore_case: bool,
    pub descending: bool,
    pub skip_invalid: bool,
    pub require: Strictness,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_case: false,
            descending: true,
            skip_invalid: false,
            require: Strictness::Any,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    compare: CompareToml,

    #[serde(default)]
    sort: SortToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompareToml {
    #[serde(default = "bool::default")]
    ignore_case: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SortToml {

    /// newest first, defaults to true
    descending: Option<bool>,

    #[serde(default = "bool::default")]
    skip_invalid: bool,

    /// any, numeric, registry or semver
    require: Option<Strictness>,
}

impl Config {

    pub fn compare_mode(&self) -> CompareMode {
        if self.ignore_case {
            CompareMode::CaseInsensitive
        } else {
            CompareMode::Ordinal
        }
    }

    pub fn from_reader<R: Read>(mut read: R) -> Result<Config> {

        let toml = {
            let mut contents = String::new();
            read.read_to_string(&mut contents)?;
            toml::from_str::<ConfigToml>(&contents).context("failed to parse config")?
        };

        let defaults = Config::default();

        Ok(Config {
            ignore_case: toml.compare.ignore_case,
            descending: toml.sort.descending.unwrap_or(defaults.descending),
            skip_invalid: toml.sort.skip_invalid,
            require: toml.sort.require.unwrap_or(defaults.require),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("failed to open config file {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("in config file {}", path.display()))
    }

    /// Load `explicit` if given, otherwise the first vtool.toml found,
    /// otherwise the defaults.
    pub fn load(explicit: Option<&String>) -> Result<Config> {
        let path = match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config_file()?,
        };

        match path {
            Some(path) => {
                tracing::debug!("using config file {}", path.display());
                Self::from_path(path)
            }
            None => {
                tracing::debug!("no config file, using defaults");
                Ok(Config::default())
            }
        }
    }
}

/// vtool.toml next to the executable, then in the current directory
fn find_config_file() -> Result<Option<PathBuf>> {

    let path = std::env::current_exe()?.with_file_name(CONFIG_FILE_NAME);
    if path.is_file() {
        return Ok(Some(path));
    }

    let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
    if path.is_file() {
        return Ok(Some(path));
    }

    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::from_reader("".as_bytes()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.descending);
        assert_eq!(config.compare_mode(), CompareMode::Ordinal);
    }

    #[test]
    fn full() {
        let text = r#"
            [compare]
            ignore_case = true

            [sort]
            descending = false
            skip_invalid = true
            require = "semver"
        "#;

        let config = Config::from_reader(text.as_bytes()).unwrap();
        assert!(config.ignore_case);
        assert!(!config.descending);
        assert!(config.skip_invalid);
        assert_eq!(config.require, Strictness::Semver);
        assert_eq!(config.compare_mode(), CompareMode::CaseInsensitive);
    }

    #[test]
    fn bad_config() {
        assert!(Config::from_reader("[sort]\nrequire = \"strict\"\n".as_bytes()).is_err());
        assert!(Config::from_reader("[sort]\ndecending = true\n".as_bytes()).is_err());
        assert!(Config::from_reader("[compare\n".as_bytes()).is_err());
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sort]\nrequire = \"numeric\"").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.require, Strictness::Numeric);
        assert!(config.descending);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(CONFIG_FILE_NAME).to_string_lossy().to_string();
        assert!(Config::load(Some(&missing)).is_err());
    }
}
