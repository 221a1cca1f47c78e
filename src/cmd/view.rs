use std::path::PathBuf;

use clap::{ArgMatches, Command};
use eframe::egui;

use crate::app::ArmOverlayApp;
use crate::state::AppState;

pub fn make_subcommand() -> Command {
    Command::new("view")
        .about("Open the interactive overlay viewer")
        .arg(super::arg_input().required(false))
        .arg(super::arg_config())
        .arg(super::arg_chrom().help("Chromosome shown at start-up"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let config = super::config_from(args)?;
    let input = args.get_one::<String>("input").map(PathBuf::from);
    let chrom = args
        .get_many::<String>("chrom")
        .and_then(|mut v| v.next().cloned())
        .or_else(|| config.chromosomes.first().cloned())
        .unwrap_or_else(|| "1".to_string());

    let mut state = AppState::new(config);
    state.chrom_input = chrom;
    if let Some(dir) = input {
        state.set_input_dir(dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Arm Overlay – Chromosome Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(ArmOverlayApp { state }))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
