//! Command-line surface of the `streakline` binary

use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command};

/// What the user asked the binary to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Print the dashboard snapshot.
    Dashboard,
    /// Print the calendar grid for a month (first day), or the current one.
    Calendar(Option<NaiveDate>),
    /// Keep reminders and the midnight sweep running until interrupted.
    Run,
}

/// Build the argument parser.
pub fn build_cli() -> Command {
    Command::new("streakline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Habit streaks, completion calendars and reminders")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("dashboard").about("Print streaks, counts and achievements"))
        .subcommand(
            Command::new("calendar").about("Print a month calendar of completions").arg(
                Arg::new("month")
                    .value_name("YYYY-MM")
                    .value_parser(parse_month)
                    .help("Month to show (defaults to the current month)"),
            ),
        )
        .subcommand(Command::new("run").about("Schedule reminders and wait for Ctrl-C"))
}

impl Invocation {
    /// Interpret parsed arguments.
    pub fn from_matches(matches: &ArgMatches) -> Option<Self> {
        match matches.subcommand()? {
            ("dashboard", _) => Some(Self::Dashboard),
            ("calendar", args) => Some(Self::Calendar(args.get_one::<NaiveDate>("month").copied())),
            ("run", _) => Some(Self::Run),
            _ => None,
        }
    }
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| format!("expected a month as YYYY-MM, got '{value}'"))
}
