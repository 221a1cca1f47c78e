//! Subcommand modules for the `arm-overlay` binary.

pub mod render;
pub mod view;

use std::path::Path;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches};

use crate::config::PlotConfig;

pub(crate) fn arg_input() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .num_args(1)
        .required(true)
        .help("Directory holding the coordinate files")
}

pub(crate) fn arg_config() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .num_args(1)
        .help("JSON configuration (default: built-in PJL/BEB/ITU layout)")
}

pub(crate) fn arg_chrom() -> Arg {
    Arg::new("chrom")
        .long("chrom")
        .num_args(1)
        .action(ArgAction::Append)
        .help("Chromosome name without the `chr` prefix")
}

/// Load the configuration named by `--config`, or the defaults.
pub(crate) fn config_from(args: &ArgMatches) -> anyhow::Result<PlotConfig> {
    let path = args.get_one::<String>("config").map(Path::new);
    PlotConfig::load_or_default(path).context("invalid configuration")
}
