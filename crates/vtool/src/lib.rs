use clap::Command;
use clap::arg;
use anyhow::Result;

pub mod config;

mod compare;
mod explain;
mod newest;
mod sort;

pub use config::Config;

pub fn get_cli() -> Command {
    build_cli(Command::new("vtool"))
}

pub fn build_cli(cmd: clap::Command) -> clap::Command {

    let cmd = cmd
        .about("Sort, compare and inspect version strings")
        .subcommand_required(true)
        .arg(arg!(config: -c --config <file> "Use this config file instead of searching for vtool.toml")
            .global(true)
        );

    let cmd = cmd.subcommand(sort::args());
    let cmd = cmd.subcommand(compare::args());
    let cmd = cmd.subcommand(newest::args());
    let cmd = cmd.subcommand(explain::args());

    cmd
}

pub fn main_cli(matches: &clap::ArgMatches) -> Result<()> {

    let config = Config::load(matches.get_one::<String>("config"))?;

    match matches.subcommand() {

        Some(("sort", matches)) => {
            return sort::main(matches, &config);
        }

        Some(("compare", matches)) => {
            return compare::main(matches, &config);
        }

        Some(("newest", matches)) => {
            return newest::main(matches, &config);
        }

        Some(("explain", matches)) => {
            return explain::main(matches);
        }

        _ =>  {
            anyhow::bail!("no subcmd");
        }
    }
}
