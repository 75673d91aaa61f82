use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use revue_core::grammar::{GrammarRegistry, LineRange};
use revue_core::resolver::ContextResolver;

#[derive(Parser)]
#[command(name = "revue", about = "Enclosing-context engine for pull-request review")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the syntactic unit enclosing a changed-line range
    Context {
        file: PathBuf,

        /// First changed line (1-based)
        #[arg(long)]
        start: usize,

        /// Last changed line (1-based, defaults to --start)
        #[arg(long)]
        end: Option<usize>,

        /// Include the enclosing unit's source text in the output
        #[arg(long)]
        snippet: bool,
    },
    /// Dry-run a file: report whether it parses cleanly
    Check { file: PathBuf },
}

#[derive(Serialize)]
struct ContextReport {
    language: String,
    /// 1-based, inclusive
    start_line: usize,
    end_line: usize,
    tag: Option<&'static str>,
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snippet: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("revue_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = GrammarRegistry::new();

    match cli.command {
        Command::Context {
            file,
            start,
            end,
            snippet,
        } => {
            let end = end.unwrap_or(start);
            anyhow::ensure!(start >= 1, "lines are 1-based");
            anyhow::ensure!(start <= end, "--start must not exceed --end");
            let range = LineRange::new(start - 1, end - 1)
                .expect("checked start <= end");

            let grammar = registry.for_path(&file)?;
            let language = registry
                .detect_language(&file)
                .unwrap_or("unknown")
                .to_string();
            let source = std::fs::read_to_string(&file)?;

            let resolver = ContextResolver::new(grammar);
            let context = resolver.find_enclosing_context(&source, range)?;

            let report = match context {
                Some(node) => ContextReport {
                    language,
                    start_line: node.start_line + 1,
                    end_line: node.end_line + 1,
                    tag: Some(node.tag.as_str()),
                    kind: Some(node.kind.clone()),
                    snippet: snippet.then(|| node.snippet(&source)),
                },
                None => {
                    tracing::info!(file = %file.display(), start, end, "no enclosing node");
                    ContextReport {
                        language,
                        start_line: start,
                        end_line: end,
                        tag: None,
                        kind: None,
                        snippet: None,
                    }
                }
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Check { file } => {
            let grammar = registry.for_path(&file)?;
            let source = std::fs::read_to_string(&file)?;
            let outcome = ContextResolver::new(grammar).dry_run(&source);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !outcome.valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
