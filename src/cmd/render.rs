use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::pipeline::driver::{DirectorySource, PipelineDriver};
use crate::render::{render_png, write_tsv};

pub fn make_subcommand() -> Command {
    Command::new("render")
        .about("Render one overlay PNG per chromosome")
        .after_help(
            r###"
Input files are looked up as `<input>/<input_template>`, by default
`header_filt_chr{chrom}_{population}_{coverage}`. Missing or unreadable
files are skipped with a warning.

Examples:
    arm-overlay render -i data/ -o plots/
    arm-overlay render -i data/ -o plots/ --chrom 7 --chrom X --tsv

"###,
        )
        .arg(super::arg_input())
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .num_args(1)
                .required(true)
                .help("Output directory, created if needed"),
        )
        .arg(super::arg_config())
        .arg(super::arg_chrom().help("Chromosome(s) to render (default: all configured)"))
        .arg(
            Arg::new("tsv")
                .long("tsv")
                .action(ArgAction::SetTrue)
                .help("Also write the plotted points as <image>.tsv"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let config = super::config_from(args)?;
    let input = PathBuf::from(args.get_one::<String>("input").context("--input is required")?);
    let output = PathBuf::from(args.get_one::<String>("output").context("--output is required")?);
    let tsv = args.get_flag("tsv");

    let chroms: Vec<String> = match args.get_many::<String>("chrom") {
        Some(values) => values.cloned().collect(),
        None => config.chromosomes.clone(),
    };

    std::fs::create_dir_all(&output)
        .with_context(|| format!("cannot create output directory {}", output.display()))?;
    tempfile::NamedTempFile::new_in(&output)
        .with_context(|| format!("cannot write to output directory {}", output.display()))?;

    let source = DirectorySource::new(&input, &config.input_template);
    let driver = PipelineDriver::new(config);

    let mut failed = 0usize;
    for chrom in &chroms {
        match render_chromosome(&driver, &source, chrom, &output, tsv) {
            Ok(path) => log::info!("Output for chr{chrom} saved at {}", path.display()),
            Err(e) => {
                failed += 1;
                log::error!("Error processing chromosome {chrom}: {e:#}");
            }
        }
    }
    if failed > 0 {
        log::warn!("{failed} of {} chromosomes failed", chroms.len());
    }

    Ok(())
}

/// Build, draw and save one chromosome. Returns the image path.
pub fn render_chromosome(
    driver: &PipelineDriver,
    source: &DirectorySource,
    chrom: &str,
    output: &Path,
    tsv: bool,
) -> anyhow::Result<PathBuf> {
    let config = driver.config();
    let figure = driver.chromosome_figure(source, chrom);
    if figure.series_count() == 0 {
        log::warn!("chr{chrom}: no input found under {}", source.dir().display());
    }

    let path = output.join(config.output_file_name(chrom));
    render_png(&figure, &config.figure, &path)?;

    if tsv {
        let tsv_path = path.with_extension("tsv");
        write_tsv(&figure, &tsv_path)
            .with_context(|| format!("writing {}", tsv_path.display()))?;
    }
    Ok(path)
}
