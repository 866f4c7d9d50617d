use clap::Command;
use clap::arg;
use anyhow::Result;
use anyhow::Context;
use std::cmp::Ordering;
use version_ident::{CompareMode, VersionIdentifier};

use crate::Config;

pub fn args() -> Command {
    Command::new("compare")
        .about("Compare two versions")
        .long_about("Compare two versions and print <, = or >")
        .visible_alias("cmp")
        .arg(arg!(left: <left> "left side"))
        .arg(arg!(right: <right> "right side"))
        .arg(arg!(-i --"ignore-case" "Compare letters without case"))
        .arg(arg!(-p --precedence "Ignore build metadata"))
}

pub fn symbol(ord: Ordering) -> &'static str {
    match ord {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

pub fn compare_versions(left: &str, right: &str, mode: CompareMode, precedence: bool) -> Ordering {
    let left = version_ident::parse(left);
    let right = version_ident::parse(right);
    tracing::debug!(left = %left.format(), right = %right.format(), "comparing");

    if precedence {
        left.precedence_with(&right, mode)
    } else {
        VersionIdentifier::compare_with(&left, &right, mode)
    }
}

pub fn main(matches: &clap::ArgMatches, config: &Config) -> Result<()> {

    let left = matches.get_one::<String>("left").context("left version expected")?;
    let right = matches.get_one::<String>("right").context("right version expected")?;

    let mode = if matches.get_flag("ignore-case") {
        CompareMode::CaseInsensitive
    } else {
        config.compare_mode()
    };

    let ord = compare_versions(left, right, mode, matches.get_flag("precedence"));
    println!("{}", symbol(ord));

    Ok(())
}
