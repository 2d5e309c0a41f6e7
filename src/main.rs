//! Command line tool to plan ground based observations.
//! Computes the elevation of target and calibrator sources over a
//! 24 hour window, for a given telescope and observing start time.
mod altaz;
mod cli; // command line interface
mod graph;
mod site;
mod source;
mod window;

use cli::{Cli, Workspace};
use site::SiteRegistry;
use window::ObservingWindow;

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    StdioError(#[from] std::io::Error),
    #[error("site resolution error: {0}")]
    SiteError(#[from] site::Error),
    #[error("source parsing error: {0}")]
    SourceError(#[from] source::Error),
    #[error("observing window error: {0}")]
    WindowError(#[from] window::Error),
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();

    info!("planning observation with telescope \"{}\"", cli.site());

    // site resolution: builtin registry first, telescope table second
    let registry = SiteRegistry::builtin();
    let location = site::resolve(&registry, cli.site(), cli.telescope_file())?;
    debug!(
        "site location: lat={:.5}°, lon={:.5}°, h={:.1}m",
        location.lat_deg, location.lon_deg, location.height_m
    );

    // target coordinates: command line or source table
    let targets = source::resolve_targets(&cli)?;
    info!(
        "target source(s): {}",
        targets.iter().map(|src| &src.name).format(", ")
    );

    // calibrator coordinates: table rows selected by the requested names
    let calibrators = source::resolve_calibrators(&cli)?;
    info!(
        "calibrator(s): {}",
        calibrators.iter().map(|src| &src.name).format(", ")
    );

    // planned observing window (UTC)
    let window = ObservingWindow::parse(cli.start_time(), cli.length_hours(), cli.shift_hours())?;
    info!("planned window: {} - {}", window.start, window.end());

    // elevation view
    let plot_ctx = graph::elevation_plot(
        &location,
        &targets,
        &calibrators,
        &window,
        cli.elevation_limit_deg(),
    );

    let workspace = Workspace::new(&cli);
    workspace.render_html("elevation.html", plot_ctx.to_html());

    if !cli.quiet() {
        workspace.open_with_web_browser("elevation.html");
    }

    Ok(())
} // main
