mod app;
mod config;
mod error;
mod input;
mod karaoke;
mod lyrics;
mod player;
mod translit;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lyrics-finder",
    version,
    about = "Find song lyrics, read them in Latin letters, and sing along"
)]
struct Cli {
    /// Override config file path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui {
        /// Local audio file to use as the karaoke backing track.
        #[arg(long)]
        audio: Option<PathBuf>,
    },
    /// Search LRCLIB and print the results (headless).
    Search { query: String },
    /// Resolve lyrics for a song and print them (headless).
    Lyrics {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
        /// Print the original-script text instead of the primary one.
        #[arg(long)]
        secondary: bool,
        /// Rewrite non-Latin text into readable Latin letters.
        #[arg(long)]
        localize: bool,
        /// Print the timestamped version.
        #[arg(long)]
        synced: bool,
    },
    /// Transliterate a file, or stdin, into readable Latin letters.
    Localize {
        file: Option<PathBuf>,
        /// Keep LRC timestamps at the start of each line.
        #[arg(long)]
        synced: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    match cli.command.unwrap_or(Command::Tui { audio: None }) {
        Command::Tui { audio } => {
            // The terminal belongs to ratatui, so logs go to a file.
            init_file_logging(&cfg.paths.data_dir)?;
            let mut terminal = tui::TerminalGuard::enter().context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path, audio)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Search { query } => {
            init_stderr_logging();
            let resolver = lyrics::Resolver::new(&cfg)?;
            let results = resolver.search_songs(&query).await?;
            print_results(&results);
        }
        Command::Lyrics {
            artist,
            title,
            secondary,
            localize,
            synced,
        } => {
            init_stderr_logging();
            let resolver = lyrics::Resolver::new(&cfg)?;
            let resolved = resolver.resolve(&artist, &title, None).await?;
            print_lyrics(&resolved, secondary, localize, synced)?;
        }
        Command::Localize { file, synced } => {
            init_stderr_logging();
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("read stdin")?;
                    buf
                }
            };
            if synced {
                println!("{}", translit::localize_synced(&raw));
            } else {
                for line in raw.lines() {
                    println!("{}", translit::localize(line));
                }
            }
        }
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn init_file_logging(data_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("create dir {}", data_dir.display()))?;
    let path = data_dir.join("lyrics-finder.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

fn print_results(results: &[lyrics::LyricCandidate]) {
    for (i, c) in results.iter().enumerate() {
        let album = c
            .album_name
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(|a| format!(" ({a})"))
            .unwrap_or_default();
        let synced = if c.synced().is_some() { "  [synced]" } else { "" };
        println!(
            "{:02}. {} - {}{}{}",
            i + 1,
            c.track_name,
            c.artist_name,
            album,
            synced
        );
    }
}

fn print_lyrics(
    resolved: &lyrics::ResolvedLyrics,
    secondary: bool,
    localize: bool,
    synced: bool,
) -> anyhow::Result<()> {
    if secondary && !resolved.has_secondary {
        anyhow::bail!("no original-script lyrics for this song");
    }
    let (plain, timed) = if secondary {
        (&resolved.secondary_plain, &resolved.secondary_synced)
    } else {
        (&resolved.primary_plain, &resolved.primary_synced)
    };
    let text = if synced { timed } else { plain }
        .as_deref()
        .context(if synced {
            "no synced lyrics for this song"
        } else {
            "no plain lyrics for this song"
        })?;

    eprintln!("{} - {} [{}]", resolved.title, resolved.artist, resolved.genre);
    eprintln!("{}", resolved.external_link);

    match (localize, synced) {
        (true, true) => println!("{}", translit::localize_synced(text)),
        (true, false) => {
            for line in text.lines() {
                println!("{}", translit::localize(line));
            }
        }
        (false, _) => println!("{text}"),
    }
    Ok(())
}
