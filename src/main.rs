use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use social_roster::config::Config;
use social_roster::directory::Directory;
use social_roster::loader;
use social_roster::logging::init_logging;
use social_roster::menu::Menu;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "social-roster")]
#[command(about = "Load a user file and edit users, friends and posts from a menu")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Bulk user file to load at startup")]
    csv: Option<PathBuf>,

    #[arg(long, help = "Number of data rows to load (default: all)")]
    rows: Option<usize>,

    #[arg(long, help = "Posts shown per page (0 means 3)")]
    page_size: Option<usize>,

    #[arg(long, default_value = "social-roster.toml", help = "TOML config file")]
    config: PathBuf,

    #[arg(long, help = "Log level, overridden by RUST_LOG")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("reading config {}", cli.config.display()))?;
    if let Some(path) = cli.csv {
        config.loader.path = path;
    }
    if cli.rows.is_some() {
        config.loader.rows = cli.rows;
    }
    if let Some(page_size) = cli.page_size {
        config.display.page_size = page_size;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level);

    let mut directory = match File::open(&config.loader.path) {
        Ok(file) => {
            let (directory, report) = loader::load(BufReader::new(file), config.loader.rows)
                .with_context(|| format!("loading {}", config.loader.path.display()))?;
            info!(users = directory.len(), rows = report.rows, "directory loaded");
            directory
        }
        Err(err) => {
            warn!(
                path = %config.loader.path.display(),
                error = %err,
                "could not open bulk file, starting with an empty directory"
            );
            Directory::new()
        }
    };

    let stdin = io::stdin();
    Menu::new(&mut directory, stdin.lock(), io::stdout(), config.display.page_size)
        .run()
        .context("running menu")?;

    let released = directory.teardown();
    info!(
        users = released.users,
        friends = released.friends,
        posts = released.posts,
        "released directory"
    );
    Ok(())
}
