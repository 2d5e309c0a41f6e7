use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};

mod workspace;
pub use workspace::Workspace;

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }

    /// Command line interface definition.
    /// Kept separate from [Cli::new] so tests can feed their own argument vectors.
    pub fn command() -> Command {
        Command::new("obsplan")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Ground based observation planning")
            .long_about(
                "obsplan plans a single observing session: it resolves the telescope
site, reads target and calibrator coordinates, computes their elevation
over a 24 hour window around the planned start time and renders an
interactive elevation chart.",
            )
            .color(ColorChoice::Always)
            .next_help_heading("Observation")
            .arg(
                Arg::new("site")
                    .long("site")
                    .value_name("NAME")
                    .default_value("atca")
                    .help("Telescope name. Either a builtin observatory or a row of the telescope table."),
            )
            .arg(
                Arg::new("target")
                    .long("target")
                    .value_name("\"HH:MM:SS ±DD:MM:SS\"")
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .help("Target coordinates (hourangle, degrees), one string per target. See --help.")
                    .long_help(
                        "Use --target for one or more targets given directly on the command line,
each as a combined \"RA DEC\" string in (hourangle, degrees):

obsplan --target \"04:37:15.8 -47:15:09\" \"19:39:25.0 -63:42:45\"

Names are synthesized by position (\"source 0\", \"source 1\", ...).
When --target is omitted, targets are read from --sourcefile instead.",
                    ),
            )
            .arg(
                Arg::new("cal")
                    .long("cal")
                    .value_name("NAME")
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .default_values(["1934-638", "0823-500"])
                    .help("Calibrator names, matched against rows of the calibrator table."),
            )
            .arg(
                Arg::new("time")
                    .long("time")
                    .value_name("\"YYYY-MM-DD HH:MM:SS\"")
                    .default_value("2022-03-11 00:00:00")
                    .help("Planned observing date and time, in UTC."),
            )
            .arg(
                Arg::new("length")
                    .long("length")
                    .value_name("HOURS")
                    .default_value("6")
                    .value_parser(value_parser!(f64))
                    .help("Planned observing time length [hours]."),
            )
            .arg(
                Arg::new("elimit")
                    .long("elimit")
                    .value_name("DEGREES")
                    .default_value("12")
                    .value_parser(value_parser!(f64))
                    .help("Elevation limit of the horizon [°]. Parkes is 30°."),
            )
            .arg(
                Arg::new("shift")
                    .long("shift")
                    .value_name("HOURS")
                    .default_value("5")
                    .value_parser(value_parser!(f64))
                    .help("Window lead [hours]: the 24h sampling grid starts this many hours before --time."),
            )
            .next_help_heading("Input tables")
            .arg(
                Arg::new("telefile")
                    .long("telefile")
                    .value_name("FILE")
                    .default_value("telescope.csv")
                    .help("Telescope table (columns: name, lat [°], lon [°], height [m])."),
            )
            .arg(
                Arg::new("sourcefile")
                    .long("sourcefile")
                    .value_name("FILE")
                    .default_value("source.csv")
                    .help("Target table (columns: name, coordinate, unit), used when --target is omitted."),
            )
            .arg(
                Arg::new("calfile")
                    .long("calfile")
                    .value_name("FILE")
                    .default_value("calibrator.csv")
                    .help("Calibrator table (columns: name, coordinate, unit)."),
            )
            .next_help_heading("Session")
            .arg(
                Arg::new("workspace")
                    .short('w')
                    .long("workspace")
                    .value_name("FOLDER")
                    .value_parser(value_parser!(PathBuf))
                    .help("Define custom workspace location, where the HTML chart is generated.
The $OBSPLAN_WORKSPACE variable is automatically picked up and always prefered."),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue)
                    .help("Do not open the generated chart with the web browser."),
            )
    }

    /// Telescope name
    pub fn site(&self) -> &str {
        self.matches.get_one::<String>("site").unwrap() // has default
    }

    /// Targets passed on the command line, in input order (None: use the source table)
    pub fn targets(&self) -> Option<Vec<&String>> {
        self.matches
            .get_many::<String>("target")
            .map(|targets| targets.collect())
    }

    /// Calibrator names, in input order
    pub fn calibrators(&self) -> Vec<&String> {
        self.matches
            .get_many::<String>("cal")
            .map(|cals| cals.collect())
            .unwrap_or_default()
    }

    /// Planned observing date and time (UTC)
    pub fn start_time(&self) -> &str {
        self.matches.get_one::<String>("time").unwrap() // has default
    }

    /// Planned observing time length [hours]
    pub fn length_hours(&self) -> f64 {
        *self.matches.get_one::<f64>("length").unwrap() // has default
    }

    /// Elevation display floor [°]
    pub fn elevation_limit_deg(&self) -> f64 {
        *self.matches.get_one::<f64>("elimit").unwrap() // has default
    }

    /// Sampling grid lead with respect to the observation start [hours]
    pub fn shift_hours(&self) -> f64 {
        *self.matches.get_one::<f64>("shift").unwrap() // has default
    }

    /// Telescope table path
    pub fn telescope_file(&self) -> &String {
        self.matches.get_one::<String>("telefile").unwrap() // has default
    }

    /// Target table path
    pub fn source_file(&self) -> &String {
        self.matches.get_one::<String>("sourcefile").unwrap() // has default
    }

    /// Calibrator table path
    pub fn calibrator_file(&self) -> &String {
        self.matches.get_one::<String>("calfile").unwrap() // has default
    }

    /// True when -q (quiet) option is active
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli {
            matches: Cli::command().get_matches_from(args),
        }
    }

    #[test]
    fn defaults() {
        let cli = cli(&["obsplan"]);
        assert_eq!(cli.site(), "atca");
        assert!(cli.targets().is_none());
        assert_eq!(cli.calibrators(), ["1934-638", "0823-500"]);
        assert_eq!(cli.start_time(), "2022-03-11 00:00:00");
        assert_eq!(cli.length_hours(), 6.0);
        assert_eq!(cli.elevation_limit_deg(), 12.0);
        assert_eq!(cli.shift_hours(), 5.0);
        assert_eq!(cli.telescope_file(), "telescope.csv");
        assert_eq!(cli.source_file(), "source.csv");
        assert_eq!(cli.calibrator_file(), "calibrator.csv");
        assert!(!cli.quiet());
    }

    #[test]
    fn targets_in_input_order() {
        let cli = cli(&[
            "obsplan",
            "--target",
            "04:37:15.8 -47:15:09",
            "19:39:25.0 -63:42:45",
        ]);
        let targets = cli.targets().unwrap();
        assert_eq!(
            targets,
            ["04:37:15.8 -47:15:09", "19:39:25.0 -63:42:45"]
        );
    }

    #[test]
    fn custom_session() {
        let cli = cli(&[
            "obsplan",
            "--site",
            "parkes",
            "--elimit",
            "30",
            "--length",
            "8.5",
            "-q",
        ]);
        assert_eq!(cli.site(), "parkes");
        assert_eq!(cli.elevation_limit_deg(), 30.0);
        assert_eq!(cli.length_hours(), 8.5);
        assert!(cli.quiet());
    }
}
