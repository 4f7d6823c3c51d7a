use chrono::Datelike;
use clap::{Parser, Subcommand};
use simple_folio::feed::{HttpPhotoFeed, PhotoFeed, StaticFeed};
use simple_folio::pipeline::{self, BuildOptions};
use simple_folio::{config, logging, output};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

fn version_string() -> &'static str {
    let on_tag = env!("FOLIO_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("FOLIO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static site generator for a personal portfolio")]
#[command(long_about = "\
Static site generator for a personal portfolio

Content lives in small markdown files; each one feeds a placeholder in an
HTML shell template. Stylesheet and script are inlined, a photo feed fills
the gallery, and the seasonal accent color drives the favicon and OG image.

Site structure:

  site/
  ├── site.toml          # Pages, sections, seasons, feed (optional)
  ├── template.html      # Shell template with {{placeholders}}
  ├── work.html
  ├── play.html
  ├── style.css          # Inlined as {{style}}
  ├── script.js          # Inlined as {{script}}
  ├── CNAME              # Passthrough files are copied to the output root
  ├── assets/            # Copied unchanged to dist/assets/
  └── content/
      ├── hero.md        # # Heading + tagline
      ├── projects.md    # ## Name + - url/role/desc fields per card
      ├── writing.md     # ## Title + - publisher/date/tags/url per card
      ├── lately.md      # - read: [Book](url), empty values are omitted
      └── footer.md

Run 'simple-folio gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root (holds site.toml, templates and content)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Month (1-12) selecting the seasonal accent; defaults to the current month
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Skip the photo feed; the gallery renders empty
    #[arg(long, global = true)]
    offline: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the output directory (default)
    Build,
    /// Parse, render and compose every page without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli.command.unwrap_or(Command::Build);
    if let Command::GenConfig = command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let options = BuildOptions {
        site_root: cli.source.clone(),
        output: cli.output.clone(),
        month: cli.month.unwrap_or_else(|| chrono::Local::now().month()),
    };
    // Loaded here only to pick the feed; the pipeline reloads and validates.
    let site_config = config::load_config(&cli.source)?;
    let feed = select_feed(&site_config.feed, cli.offline)?;

    match command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = pipeline::check(&options, feed.as_ref())?;
            output::print_check_output(&report);
        }
        _ => {
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = pipeline::build(&options, feed.as_ref())?;
            output::print_build_output(&report, &site_config.static_dir);
        }
    }
    Ok(())
}

fn select_feed(
    feed: &config::FeedConfig,
    offline: bool,
) -> Result<Box<dyn PhotoFeed>, Box<dyn std::error::Error>> {
    if offline || !feed.enabled() {
        return Ok(Box::new(StaticFeed::default()));
    }
    let timeout = Duration::from_secs(feed.timeout_secs);
    Ok(Box::new(HttpPhotoFeed::new(feed.url.clone(), timeout)?))
}
