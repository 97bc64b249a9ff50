//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use rollcall_core::sweep::{
    HOUSE_VOTES, HOUSE_YEARS, SENATE_CONGRESSES, SENATE_SESSIONS, SENATE_VOTES,
};
use rollcall_core::{Sweep, TemplateError};

#[derive(Parser, Debug)]
#[command(
    name = "rollcall",
    version,
    about = "Download U.S. House and Senate roll-call vote XML"
)]
pub struct Cli {
    /// Collection log file [default: ./rollcall.log]
    #[arg(long, env = "ROLLCALL_LOG", global = true)]
    pub log_file: Option<PathBuf>,

    /// More diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sweep clerk.house.gov by year and vote number
    House(HouseArgs),
    /// Sweep senate.gov by congress, session, and vote number
    Senate(SenateArgs),
}

impl Command {
    pub fn sweep(&self) -> Result<Sweep, TemplateError> {
        match self {
            Command::House(a) => Sweep::house(a.start_year..=a.end_year, a.start_vote..=a.end_vote),
            Command::Senate(a) => Sweep::senate(
                a.start_congress..=a.end_congress,
                a.start_session..=a.end_session,
                a.start_vote..=a.end_vote,
            ),
        }
    }

    pub fn run_args(&self) -> &RunArgs {
        match self {
            Command::House(a) => &a.run,
            Command::Senate(a) => &a.run,
        }
    }
}

#[derive(Args, Debug)]
pub struct HouseArgs {
    #[arg(long, default_value_t = *HOUSE_YEARS.start())]
    pub start_year: u32,

    #[arg(long, default_value_t = *HOUSE_YEARS.end())]
    pub end_year: u32,

    #[arg(long, default_value_t = *HOUSE_VOTES.start())]
    pub start_vote: u32,

    #[arg(long, default_value_t = *HOUSE_VOTES.end())]
    pub end_vote: u32,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct SenateArgs {
    /// First congress, e.g. 101 for the 101st
    #[arg(long, default_value_t = *SENATE_CONGRESSES.start())]
    pub start_congress: u32,

    #[arg(long, default_value_t = *SENATE_CONGRESSES.end())]
    pub end_congress: u32,

    #[arg(
        long,
        default_value_t = *SENATE_SESSIONS.start(),
        value_parser = clap::value_parser!(u32).range(1..=2)
    )]
    pub start_session: u32,

    #[arg(
        long,
        default_value_t = *SENATE_SESSIONS.end(),
        value_parser = clap::value_parser!(u32).range(1..=2)
    )]
    pub end_session: u32,

    #[arg(long, default_value_t = *SENATE_VOTES.start())]
    pub start_vote: u32,

    #[arg(long, default_value_t = *SENATE_VOTES.end())]
    pub end_vote: u32,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Existing directory to write vote XML into
    #[arg(short, long, env = "ROLLCALL_OUTPUT", required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Seconds to wait after each request
    #[arg(long, default_value_t = 1.0)]
    pub rate_limit: f64,

    /// Print the URLs that would be tried as JSON lines, without fetching
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn rate_limit(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.rate_limit)
            .map_err(|e| anyhow::anyhow!("invalid --rate-limit {}: {e}", self.rate_limit))
    }
}
