use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vitrine::app::{Portfolio, Responder};
use vitrine::transport::HttpTransport;
use vitrine::{config, events, output, page, render};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Headless interaction engine for single-page portfolio sites")]
#[command(long_about = "\
Headless interaction engine for single-page portfolio sites

A page is described in page.toml: sections with their offsets, animatable
blocks, the filterable gallery, skill cards, lazy images and the contact form.
Browser events are replayed against it from a JSON script and the resulting
view state is printed or rendered back to HTML.

Script format (one event per entry, applied in order):

  [
    { \"scroll\": { \"offset\": 950 } },
    \"toggle_menu\",
    { \"nav_link\": { \"href\": \"#work\" } },
    { \"filter\": { \"tag\": \"web\" } },
    { \"intersect\": { \"id\": \"about-content\", \"ratio\": 0.4 } },
    { \"advance\": { \"ms\": 300 } },
    { \"type\": { \"field\": \"email\", \"value\": \"ada@example.com\" } },
    { \"submit\": { \"respond\": { \"status\": 200 } } }
  ]

Tunables live in config.toml next to the page (optional).
Run 'vitrine gen-config' to generate a documented config.toml.

Set RUST_LOG=vitrine=debug to trace every dispatched event.")]
#[command(version = version_string())]
struct Cli {
    /// Page description
    #[arg(long, default_value = "page.toml", global = true)]
    page: PathBuf,

    /// Interaction config (defaults to config.toml next to the page)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the page and config, and list what was found
    Check,
    /// Replay an event script and print the resulting view state
    Replay {
        /// JSON event script
        #[arg(long)]
        script: PathBuf,
        /// Send contact-form submissions for real instead of answering them
        /// from the script
        #[arg(long)]
        live: bool,
    },
    /// Replay an event script (if any) and write the page as HTML
    Render {
        /// JSON event script
        #[arg(long)]
        script: Option<PathBuf>,
        /// Output file
        #[arg(long, default_value = "index.html")]
        output: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Check => {
            let page = page::Page::load(&cli.page)?;
            config::load_config(&config_path(&cli))?;
            println!("==> Checking {}", cli.page.display());
            output::print_check(&page);
            println!("==> Page is valid");
        }
        Command::Replay { script, live } => {
            let mut portfolio = load_portfolio(&cli)?;
            let events = events::load_script(script)?;
            let transport = HttpTransport::default();
            let responder = if *live {
                Responder::Live(&transport)
            } else {
                Responder::scripted()
            };
            portfolio.replay(&events, &responder).await;
            println!("==> Replayed {} events", events.len());
            output::print_snapshot(&portfolio);
        }
        Command::Render { script, output } => {
            let mut portfolio = load_portfolio(&cli)?;
            if let Some(script) = script {
                let events = events::load_script(script)?;
                portfolio.replay(&events, &Responder::scripted()).await;
            }
            render::write_page(&portfolio, output)?;
            println!("==> Rendered {}", output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--config`, or `config.toml` beside the page.
fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| {
        cli.page
            .parent()
            .unwrap_or(Path::new("."))
            .join("config.toml")
    })
}

fn load_portfolio(cli: &Cli) -> Result<Portfolio, Box<dyn std::error::Error>> {
    let page = page::Page::load(&cli.page)?;
    let config = config::load_config(&config_path(cli))?;
    Ok(Portfolio::load(page, config))
}
