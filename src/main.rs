mod app;
mod cmd;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod render;
mod state;
mod ui;

use clap::{crate_version, ColorChoice, Command};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = Command::new("arm-overlay")
        .version(crate_version!())
        .about("Overlay plots of chromosome arms across populations and coverages")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd::render::make_subcommand())
        .subcommand(cmd::view::make_subcommand())
        .after_help(
            r###"Subcommands:

* render - batch PNG output, one image per chromosome
* view   - interactive viewer for one chromosome

Set RUST_LOG=debug to trace arm detection and orientation fixes.

"###,
        );

    match app.get_matches().subcommand() {
        Some(("render", sub_matches)) => cmd::render::execute(sub_matches),
        Some(("view", sub_matches)) => cmd::view::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
