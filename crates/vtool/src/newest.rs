use clap::Command;
use clap::arg;
use anyhow::Result;
use anyhow::Context;
use version::Version;
use version_ident::CompareMode;

use crate::Config;

pub fn args() -> Command {
    Command::new("newest")
        .about("Print the newest version")
        .arg(arg!(versions: <version>... "Versions to choose from"))
        .arg(arg!(-i --"ignore-case" "Compare letters without case"))
}

pub fn pick(versions: &[Version], mode: CompareMode) -> Option<&Version> {
    match mode {
        CompareMode::Ordinal => version::newest(versions),
        mode => versions.iter().max_by(|a, b| a.ident().compare_with(b.ident(), mode)),
    }
}

pub fn main(matches: &clap::ArgMatches, config: &Config) -> Result<()> {

    let versions = matches.get_many::<String>("versions").context("version expected")?;
    let mut versions = versions.map(|v| Version::new(v)).collect::<Vec<_>>();

    let dropped = version::retain_valid(&mut versions, config.require);
    if dropped > 0 {
        tracing::warn!("skipped {dropped} invalid version(s)");
    }

    let mode = if matches.get_flag("ignore-case") {
        CompareMode::CaseInsensitive
    } else {
        config.compare_mode()
    };

    let newest = pick(&versions, mode).context("no valid versions")?;
    println!("{}", newest);

    Ok(())
}
