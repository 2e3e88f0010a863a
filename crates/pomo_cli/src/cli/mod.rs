use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: pomo add "Write report"
    Add {
        name: Option<String>,
    },
    /// Remove the task at the given index
    ///
    /// Example: pomo remove 0
    Remove {
        index: usize,
    },
    /// Reset the session counter of the task at the given index
    ///
    /// Example: pomo reset 0
    Reset {
        index: usize,
    },
    /// List tasks with their session counts
    ///
    /// Example: pomo list
    List,
    /// Start a work session for the task at the given index
    ///
    /// Example: pomo start 0
    /// Example: pomo start 0 --minutes 50
    Start {
        index: usize,
        /// Session length in minutes (defaults to the configured length)
        #[arg(long)]
        minutes: Option<u64>,
        /// Session length in seconds; overrides --minutes
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Stop the running session or break (interactive mode)
    ///
    /// Sessions run inside one process, so this only has something to stop
    /// in the interactive prompt. Example: pomo> stop
    Stop,
    /// Show the current timer display (interactive mode)
    ///
    /// Each one-shot invocation starts idle; outside the interactive prompt
    /// this always shows the idle display. Example: pomo> status
    Status,
}
