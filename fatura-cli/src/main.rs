use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fatura_core::SystemClock;
use fatura_scrape::{ContainerKind, DateFormat, HtmlDocument, RowPolicy, scrape_ofx_data};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "fatura",
    version,
    about = "Scrape a saved credit-card statement page into OFX-ready JSON"
)]
struct Cli {
    /// Config file (default: ~/.fatura/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a statement page and print {DTSERVER, dueDate, BANKTRANLIST} as JSON
    Scrape {
        /// Saved HTML page, or `-` for stdin
        input: PathBuf,

        /// Transaction container element (overrides config)
        #[arg(long, value_enum)]
        container: Option<ContainerArg>,

        /// Row date format (overrides config)
        #[arg(long, value_enum)]
        dates: Option<DatesArg>,

        /// Drop rows that fail to parse instead of failing the scrape
        #[arg(long)]
        skip_bad_rows: bool,

        #[arg(long)]
        pretty: bool,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ContainerArg {
    Auto,
    Table,
    TableBody,
}

impl ContainerArg {
    fn to_option(self) -> Option<ContainerKind> {
        match self {
            ContainerArg::Auto => None,
            ContainerArg::Table => Some(ContainerKind::Table),
            ContainerArg::TableBody => Some(ContainerKind::TableBody),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DatesArg {
    Auto,
    DayMonthName,
    Full,
}

impl DatesArg {
    fn to_option(self) -> Option<DateFormat> {
        match self {
            DatesArg::Auto => None,
            DatesArg::DayMonthName => Some(DateFormat::DayMonthName),
            DatesArg::Full => Some(DateFormat::Full),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fatura_cli=info,fatura_scrape=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Scrape {
            input,
            container,
            dates,
            skip_bad_rows,
            pretty,
        } => {
            let mut cfg = config::load_config(config_path)?;
            if let Some(c) = container {
                cfg.scrape.container = c.to_option();
            }
            if let Some(d) = dates {
                cfg.scrape.dates = d.to_option();
            }
            if skip_bad_rows {
                cfg.scrape.row_policy = RowPolicy::Skip;
            }
            scrape(&input, &cfg, pretty)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(config_path)?,
            ConfigCommand::Show => {
                let cfg = config::load_config(config_path)?;
                print!("{}", config::render_config(&cfg)?);
            }
        },
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read stdin")?;
        return Ok(s);
    }
    std::fs::read_to_string(input).with_context(|| format!("read {}", input.display()))
}

fn scrape(input: &Path, cfg: &config::Config, pretty: bool) -> Result<()> {
    let html = read_input(input)?;
    let clock = SystemClock::from_name(&cfg.clock.timezone)?;

    let doc = HtmlDocument::parse(&html);
    let data = scrape_ofx_data(&doc, &cfg.scrape, &clock)
        .with_context(|| format!("scraping {}", input.display()))?;

    let credits = data.bank_tran_list.iter().filter(|t| t.is_credit()).count();
    info!(
        due_date = %data.due_date,
        transactions = data.bank_tran_list.len(),
        credits,
        balance = data.balance(),
        "scraped statement"
    );

    let json = if pretty {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };
    println!("{json}");

    Ok(())
}
