use clap::Command;
use clap::arg;
use anyhow::Result;
use anyhow::Context;
use version::{Strictness, Version};
use version_ident::CompareMode;

use crate::Config;

pub fn args() -> Command {
    Command::new("sort")
        .about("Sort versions")
        .long_about("Take a list of versions, sort, dedup and print them, newest first unless configured otherwise")
        .visible_alias("vc")
        .arg(arg!(versions: <version>... "Versions to sort"))
        .arg(arg!(--"skip-invalid" "Skip invalid versions instead of failing"))
        .arg(arg!(--require <strictness> "What counts as a valid version")
            .value_parser(["any", "numeric", "registry", "semver"])
        )
        .arg(arg!(-i --"ignore-case" "Compare letters without case"))
        .arg(arg!(--ascending "output in ascending order")
            .overrides_with("descending")
        )
        .arg(arg!(--descending "output in descending order")
            .overrides_with("ascending")
        )
}

pub struct SortOptions {
    pub descending: bool,
    pub skip_invalid: bool,
    pub require: Strictness,
    pub mode: CompareMode,
}

impl SortOptions {
    fn new(matches: &clap::ArgMatches, config: &Config) -> Result<Self> {

        let descending = if matches.get_flag("ascending") {
            false
        } else if matches.get_flag("descending") {
            true
        } else {
            config.descending
        };

        let require = match matches.get_one::<String>("require") {
            Some(s) => s.parse::<Strictness>().map_err(anyhow::Error::msg)?,
            None => config.require,
        };

        let mode = if matches.get_flag("ignore-case") {
            CompareMode::CaseInsensitive
        } else {
            config.compare_mode()
        };

        Ok(Self {
            descending,
            skip_invalid: matches.get_flag("skip-invalid") || config.skip_invalid,
            require,
            mode,
        })
    }
}

/// Validate, sort and dedup. Fails on the first bad batch unless skipping.
pub fn sort_versions(mut versions: Vec<Version>, opts: &SortOptions) -> Result<Vec<Version>> {

    if opts.skip_invalid {
        let dropped = version::retain_valid(&mut versions, opts.require);
        if dropped > 0 {
            tracing::warn!("skipped {dropped} invalid version(s)");
        }
    } else {
        let mut err = 0;
        for v in &versions {
            if !opts.require.accepts(v) {
                eprintln!("error: version does not satisfy '{}': {}", opts.require, v);
                err += 1;
            }
        }
        if err > 0 {
            anyhow::bail!("{err} invalid version(s)");
        }
    }

    match opts.mode {
        CompareMode::Ordinal => version::sort_dedup(&mut versions),
        mode => {
            versions.sort_by(|a, b| a.ident().compare_with(b.ident(), mode));
            versions.dedup_by(|a, b| a.ident().compare_with(b.ident(), mode).is_eq());
        }
    }

    if opts.descending {
        versions.reverse();
    }

    Ok(versions)
}

pub fn main(matches: &clap::ArgMatches, config: &Config) -> Result<()> {

    let versions = matches.get_many::<String>("versions").context("version expected")?;
    let versions = versions.map(|v| Version::new(v)).collect::<Vec<_>>();

    let opts = SortOptions::new(matches, config)?;

    for v in sort_versions(versions, &opts)? {
        println!("{}", v);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(input: &[&str], opts: &SortOptions) -> Result<Vec<String>> {
        let versions = input.iter().map(|s| Version::new(s)).collect();
        Ok(sort_versions(versions, opts)?.iter().map(ToString::to_string).collect())
    }

    fn opts() -> SortOptions {
        SortOptions {
            descending: true,
            skip_invalid: false,
            require: Strictness::Any,
            mode: CompareMode::Ordinal,
        }
    }

    #[test]
    fn descending_dedup() {
        let out = run(&["1.9", "1.10", "1.10.0", "1.10-rc1", "junk"], &opts()).unwrap();
        assert_eq!(out, ["1.10", "1.10-rc1", "1.9", "junk"]);

        let out = run(&["1.9", "1.10"], &SortOptions { descending: false, ..opts() }).unwrap();
        assert_eq!(out, ["1.9", "1.10"]);
    }

    #[test]
    fn invalid() {
        let strict = SortOptions { require: Strictness::Semver, ..opts() };
        assert!(run(&["1.2.3", "1.2"], &strict).is_err());

        let skip = SortOptions { skip_invalid: true, ..strict };
        assert_eq!(run(&["1.2.3", "1.2", "1.2.4"], &skip).unwrap(), ["1.2.4", "1.2.3"]);
    }

    #[test]
    fn ignore_case() {
        let ordinal = run(&["1-b", "1-A", "1-a"], &SortOptions { descending: false, ..opts() }).unwrap();
        assert_eq!(ordinal, ["1-A", "1-a", "1-b"]);

        let nocase = SortOptions { descending: false, mode: CompareMode::CaseInsensitive, ..opts() };
        assert_eq!(run(&["1-b", "1-A", "1-a"], &nocase).unwrap(), ["1-A", "1-b"]);
    }

    #[test]
    fn flags_override_config() {
        let config = Config { descending: false, ignore_case: true, ..Config::default() };

        let m = args().try_get_matches_from(["sort", "1", "2"]).unwrap();
        let o = SortOptions::new(&m, &config).unwrap();
        assert!(!o.descending);
        assert_eq!(o.mode, CompareMode::CaseInsensitive);

        let m = args().try_get_matches_from(["sort", "--descending", "--require", "registry", "1"]).unwrap();
        let o = SortOptions::new(&m, &config).unwrap();
        assert!(o.descending);
        assert_eq!(o.require, Strictness::Registry);
    }
}
