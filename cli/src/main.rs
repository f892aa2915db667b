//! `loso` — command-line front end for the statistical Chinese word
//! segmenter: `interact`, `feed`, `reset`, `serve`, `dump`, `info`.
//!
//! Thin by design (spec.md treats the CLI as an external collaborator);
//! every command is a handful of calls into [`loso_core::Service`].

mod config;
mod store;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use loso_core::{Service, Store};
use tracing::info;

use config::Config;
use store::AnyStore;

#[derive(Parser)]
#[command(name = "loso", about = "Statistical Chinese word segmenter")]
struct Cli {
    /// Path to the YAML config file. Defaults to $LOSO_CONFIG_FILE, then
    /// ./default.yaml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the in-memory store instead of Redis (testing/demo only; state
    /// is lost when the process exits).
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// REPL: prompt "Text:", print space-joined terms.
    Interact {
        #[arg(long, value_delimiter = ',')]
        category: Vec<String>,
    },
    /// Load a whole text file and feed it into a category.
    Feed {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "utf8")]
        encoding: String,
        #[arg(long)]
        category: String,
    },
    /// Remove all categories and keys under the configured prefix.
    Reset,
    /// Run an RPC endpoint exposing the service facade.
    Serve,
    /// Emit a text dump of a category's lexicon.
    Dump {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "utf8")]
        encoding: String,
        #[arg(long)]
        category: String,
    },
    /// Print per-category gram order and per-n sum/variety.
    Info {
        #[arg(long, value_delimiter = ',')]
        category: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    info!(path = ?cli.config, "loaded configuration");

    let backing = if cli.memory {
        AnyStore::memory()
    } else {
        AnyStore::redis(&cfg.redis.url())?
    };
    let service = Service::new(&backing, cfg.lexicon.ngram);

    match cli.command {
        Command::Interact { category } => run_interact(&service, &category),
        Command::Feed { file, encoding, category } => run_feed(&service, &file, &encoding, &category),
        Command::Reset => run_reset(&service),
        Command::Serve => run_serve(&service, &cfg),
        Command::Dump { file, encoding, category } => run_dump(&service, &file, &encoding, &category),
        Command::Info { category } => run_info(&service, &category),
    }
}

fn run_interact<S: Store>(service: &Service<'_, S>, categories: &[String]) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Text:");
        stdout.flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim_end_matches(['\n', '\r']);
        let terms = service.split_terms(text, categories)?;
        println!("{}", terms.join(" "));
    }
    Ok(())
}

fn run_feed<S: Store>(
    service: &Service<'_, S>,
    file: &PathBuf,
    encoding: &str,
    category: &str,
) -> Result<()> {
    if !encoding.eq_ignore_ascii_case("utf8") && !encoding.eq_ignore_ascii_case("utf-8") {
        bail!("unsupported encoding {encoding:?}: only utf8 is supported");
    }
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let total = service.feed(category, &text)?;
    info!(category, total, "fed terms");
    Ok(())
}

fn run_reset<S: Store>(service: &Service<'_, S>) -> Result<()> {
    service.reset()?;
    println!("Done.");
    Ok(())
}

fn run_serve<S: Store>(_service: &Service<'_, S>, cfg: &Config) -> Result<()> {
    bail!(
        "RPC transport is an external collaborator, not implemented here; \
         configured endpoint would be {}:{}",
        cfg.xmlrpc.interface,
        cfg.xmlrpc.port
    );
}

fn run_dump<S: Store>(
    service: &Service<'_, S>,
    file: &PathBuf,
    encoding: &str,
    category: &str,
) -> Result<()> {
    if !encoding.eq_ignore_ascii_case("utf8") && !encoding.eq_ignore_ascii_case("utf-8") {
        bail!("unsupported encoding {encoding:?}: only utf8 is supported");
    }
    let stats = service.get_stats(&[category.to_string()])?;
    let stats = stats.into_iter().next().context("category not found")?;

    let mut out = String::new();
    out.push_str(&format!("gram {}\n", stats.gram));
    for g in &stats.grams {
        out.push_str(&format!("{}-gram-sum {}\n", g.n, g.sum));
        out.push_str(&format!("{}-gram-variety {}\n", g.n, g.variety));
    }
    out.push('\n');

    let mut terms = service.dump_terms(category)?;
    terms.sort_by(|a, b| a.0.cmp(&b.0));
    for (term, count) in terms {
        out.push_str(&format!("{count}\t{term}\n"));
    }

    fs::write(file, out).with_context(|| format!("writing {}", file.display()))?;
    println!("Done.");
    Ok(())
}

fn run_info<S: Store>(service: &Service<'_, S>, categories: &[String]) -> Result<()> {
    let stats = service.get_stats(categories)?;
    for s in stats {
        println!("Category {}", s.name);
        println!("========={}", "=".repeat(s.name.len()));
        println!("Ngram: {}", s.gram);
        for g in &s.grams {
            println!("{}-gram sum: {}", g.n, g.sum);
            println!("{}-gram variety: {}", g.n, g.variety);
        }
        println!();
    }
    Ok(())
}
