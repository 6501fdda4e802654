use std::io::{self, Write};

use chrono::{DateTime, Duration, Utc};
use clap::Parser;

use lcdigest::checkpoint::CheckpointStore;
use lcdigest::cli::{Cli, Commands};
use lcdigest::config::Config;
use lcdigest::domain::format_wire_timestamp;
use lcdigest::errors::{DigestError, DigestResult};
use lcdigest::services::{DigestService, EmailService, FetchService, FetcherOptions, ReportService};
use lcdigest::sources::GraphqlDiscussFeed;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> DigestResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    let store = CheckpointStore::new(&config.checkpoint_path);

    match cli.command {
        Commands::Run {
            dry_run,
            skip_email,
        } => cmd_run(&config, store, dry_run, skip_email),
        Commands::Status => cmd_status(&config, store),
        Commands::Reset { to } => cmd_reset(store, to),
    }
}

/// Cutoff for this run: the persisted checkpoint, or a fixed fallback window
/// on the first-ever run. A corrupt checkpoint is fatal here; silently
/// falling back would either re-send old articles or skip a gap.
fn cutoff_for_run(
    store: &CheckpointStore,
    config: &Config,
) -> DigestResult<(DateTime<Utc>, bool)> {
    match store.read()? {
        Some(checkpoint) => Ok((checkpoint, true)),
        None => Ok((Utc::now() - Duration::hours(config.fallback_hours), false)),
    }
}

fn cmd_run(
    config: &Config,
    store: CheckpointStore,
    dry_run: bool,
    skip_email: bool,
) -> DigestResult<()> {
    let (cutoff, from_checkpoint) = cutoff_for_run(&store, config)?;

    if from_checkpoint {
        println!("Resuming from checkpoint: {}", cutoff.to_rfc3339());
    } else {
        println!(
            "No checkpoint found, falling back to the last {} hours.",
            config.fallback_hours
        );
    }
    println!(
        "Fetching articles published after {}...\n",
        format_wire_timestamp(&cutoff.to_rfc3339())
    );

    let feed = GraphqlDiscussFeed::new(&config.graphql_url);
    let fetcher = FetchService::new(
        feed,
        FetcherOptions {
            page_size: config.page_size,
            scan_full_page_on_boundary: config.scan_full_page,
        },
    );

    let articles = fetcher.fetch_since(cutoff)?;

    if articles.is_empty() {
        println!("\nNo new articles since last run.");
        return Ok(());
    }

    println!("\nFound {} new articles:", articles.len());
    for (i, article) in articles.iter().enumerate() {
        println!("\n{}. {}", i + 1, article.title);
        println!("   Created: {}", article.created_display());
        println!("   URL: {}", article.url());
    }

    if dry_run {
        println!(
            "\nDry run complete. Would deliver {} articles.",
            articles.len()
        );
        return Ok(());
    }

    let now = Utc::now();

    if let Some(dir) = &config.report_dir {
        let path = ReportService::new(dir).write_report(&articles, now)?;
        println!("\nSaved {} articles to {}", articles.len(), path.display());
    }

    if skip_email {
        println!("Running in skip-email mode; delivery skipped.");
    } else if let Some(email_config) = &config.email {
        let email_service = EmailService::new(email_config)?;
        let subject = DigestService::subject(articles.len(), now);
        let html = DigestService::build_html(&articles, now);

        print!("Sending digest to {} recipient(s)... ", email_config.recipients.len());
        io::stdout().flush()?;
        email_service.send(&subject, &html)?;
        println!("OK");
    } else {
        println!("Email not configured; skipping delivery.");
    }

    // The newest creation time across the run becomes the next cutoff
    let newest = articles.iter().filter_map(|a| a.created_time()).max();
    if let Some(newest) = newest {
        if let Err(e) = store.write(newest) {
            eprintln!(
                "WARNING: digest delivered but the checkpoint could not be saved; \
                 the next run will fetch and send these articles again."
            );
            return Err(e);
        }
        println!("Checkpoint advanced to {}.", newest.to_rfc3339());
    }

    Ok(())
}

fn cmd_status(config: &Config, store: CheckpointStore) -> DigestResult<()> {
    match store.read()? {
        Some(checkpoint) => {
            println!("Checkpoint: {}", checkpoint.to_rfc3339());
            println!(
                "Next run fetches articles published after {}.",
                format_wire_timestamp(&checkpoint.to_rfc3339())
            );
        }
        None => {
            println!("No checkpoint recorded.");
            println!(
                "Next run falls back to the last {} hours.",
                config.fallback_hours
            );
        }
    }

    Ok(())
}

fn cmd_reset(store: CheckpointStore, to: Option<String>) -> DigestResult<()> {
    match to {
        Some(raw) => {
            let t = DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| {
                    DigestError::InvalidInput(format!("invalid RFC3339 timestamp {:?}: {}", raw, e))
                })?
                .with_timezone(&Utc);
            store.write(t)?;
            println!("Checkpoint set to {}.", t.to_rfc3339());
        }
        None => {
            store.clear()?;
            println!("Checkpoint cleared.");
        }
    }

    Ok(())
}
