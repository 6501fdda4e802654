use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lcdigest")]
#[command(about = "Incremental LeetCode Discuss digest with email delivery")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch new articles since the last checkpoint and deliver the digest
    Run {
        /// Dry run - fetch and print only, no report, no email, no checkpoint update
        #[arg(long)]
        dry_run: bool,

        /// Skip email delivery but still write the report and advance the checkpoint
        #[arg(long)]
        skip_email: bool,
    },

    /// Show the persisted checkpoint and the cutoff the next run would use
    Status,

    /// Clear the checkpoint, or pin it to an explicit instant
    Reset {
        /// RFC3339 timestamp to set the checkpoint to (clears it if omitted)
        #[arg(long)]
        to: Option<String>,
    },
}
