use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use fst_locator::config::{load_from_path, run_queries, QueryOutcome};
use fst_locator::{
    load_tree, path_to_bounding_box, position_to_path, BoundingBox, Node, TreePath,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `fst_locator=debug`.
const LOG_ENV: &str = "FST_LOCATOR_LOG";

#[derive(Parser)]
#[command(name = "fst-locator")]
#[command(about = "Map cursor positions to paths and bounding boxes in lossless syntax trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the node under a cursor position
    Locate {
        /// Tree in JSON form
        tree: PathBuf,

        /// Line (1-indexed)
        line: i64,

        /// Column (1-indexed)
        column: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the bounding box of a node
    Bbox {
        /// Tree in JSON form
        tree: PathBuf,

        /// Dotted path to the node (whole tree if omitted)
        path: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the source text a tree renders to
    Render {
        /// Tree in JSON form
        tree: PathBuf,
    },

    /// Run a batch of queries from a TOML file
    Run {
        /// Tree in JSON form
        tree: PathBuf,

        /// Query file
        queries: PathBuf,

        /// Print the outcomes as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Locate {
            tree,
            line,
            column,
            json,
        } => cmd_locate(&tree, line, column, json),

        Commands::Bbox { tree, path, json } => cmd_bbox(&tree, path.as_deref(), json),

        Commands::Render { tree } => cmd_render(&tree),

        Commands::Run {
            tree,
            queries,
            json,
        } => cmd_run(&tree, &queries, json),
    }
}

/// Logs go to stderr. `-v` flags win over the environment.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("fst_locator=debug"),
        _ => EnvFilter::new("fst_locator=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_tree(path: &Path) -> Result<Node> {
    load_tree(path).with_context(|| format!("Could not load tree from {}", path.display()))
}

#[derive(Serialize)]
struct LocateReport {
    line: i64,
    column: i64,
    path: Option<TreePath>,
    kind: Option<String>,
}

fn cmd_locate(tree_path: &Path, line: i64, column: i64, json: bool) -> Result<()> {
    let tree = read_tree(tree_path)?;

    let path = position_to_path(&tree, line, column);
    let kind = match &path {
        Some(path) => Some(tree.descend(path)?.kind_name().to_string()),
        None => None,
    };

    if json {
        let report = LocateReport {
            line,
            column,
            path: path.clone(),
            kind: kind.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match (&path, &kind) {
            (Some(path), Some(kind)) => {
                println!(
                    "{} {}:{} -> {} {}",
                    "✓".green(),
                    line,
                    column,
                    display_path(path).bold(),
                    format!("({kind})").dimmed()
                );
            }
            _ => {
                println!(
                    "{} {}:{} is outside the rendered text",
                    "⊘".yellow(),
                    line,
                    column
                );
            }
        }
    }

    if path.is_none() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_bbox(tree_path: &Path, path: Option<&str>, json: bool) -> Result<()> {
    let tree = read_tree(tree_path)?;

    let path = match path {
        Some(path) => TreePath::parse(path)?,
        None => TreePath::root(),
    };

    let bbox = path_to_bounding_box(&tree, &path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bbox)?);
    } else {
        print_bbox(&path, &bbox);
    }

    Ok(())
}

fn print_bbox(path: &TreePath, bbox: &BoundingBox) {
    let lines = match bbox.line_span() {
        1 => "1 line".to_string(),
        n => format!("{n} lines"),
    };
    println!(
        "{} {}: {} -> {} {}",
        "✓".green(),
        display_path(path).bold(),
        bbox.top_left,
        bbox.bottom_right,
        format!("({lines})").dimmed()
    );
}

fn cmd_render(tree_path: &Path) -> Result<()> {
    let tree = read_tree(tree_path)?;
    print!("{}", tree.render());
    Ok(())
}

fn cmd_run(tree_path: &Path, queries_path: &Path, json: bool) -> Result<()> {
    let tree = read_tree(tree_path)?;
    let config = load_from_path(queries_path)?;

    if !json {
        let name = if config.meta.name.is_empty() {
            queries_path.display().to_string()
        } else {
            config.meta.name.clone()
        };
        println!(
            "{}",
            format!("Running {} ({} queries)", name, config.queries.len()).bold()
        );
    }

    let outcomes = run_queries(&tree, &config);
    let failed = outcomes.iter().filter(|o| !o.is_success()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            match outcome {
                QueryOutcome::Resolved { .. } => println!("{} {}", "✓".green(), outcome),
                QueryOutcome::Mismatch { .. } => eprintln!("{} {}", "✗".red(), outcome),
                QueryOutcome::Failed { .. } => eprintln!("{} {}", "✗".red(), outcome),
            }
        }

        println!();
        println!(
            "Summary: {} passed, {} failed",
            (outcomes.len() - failed).to_string().green(),
            failed.to_string().red()
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn display_path(path: &TreePath) -> String {
    if path.is_root() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}
