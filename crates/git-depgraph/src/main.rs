use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{error::ErrorKind, ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use git_depgraph::{discover_git_dir, mermaid, Renderer};

#[derive(Parser)]
#[command(
    name = "git-depgraph",
    about = "Render which files appear in which commits of a branch",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Path to the repository (work tree or git directory)
    repo_path: PathBuf,

    /// Path to the Mermaid renderer executable (e.g. mmdc)
    renderer_path: PathBuf,

    /// Branch whose history is walked
    branch_name: String,

    /// Where the rendered image is written
    output_path: PathBuf,

    /// Also write the Mermaid source to <path> ("-" for stdout)
    #[arg(long, value_name = "path")]
    emit_mermaid: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("fatal: {e:#}");
        process::exit(128);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Some(git_dir) = discover_git_dir(&cli.repo_path) else {
        bail!("not a git repository: {}", cli.repo_path.display());
    };
    tracing::debug!(git_dir = %git_dir.display(), "using git directory");

    let history = git_revwalk::walk_branch(&git_dir, &cli.branch_name)?;
    let graph = git_revwalk::build_graph(&history);
    tracing::info!(
        files = graph.len(),
        edges = graph.edge_count(),
        "built dependency graph"
    );

    let source = mermaid::generate(&graph);
    if let Some(path) = &cli.emit_mermaid {
        emit(path, &source)?;
    }

    Renderer::new(&cli.renderer_path)
        .render(&source, &cli.output_path)
        .with_context(|| format!("rendering {}", cli.output_path.display()))?;

    println!("Dependency graph saved to: {}", cli.output_path.display());
    Ok(())
}

fn emit(path: &Path, source: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{source}")?;
        return Ok(());
    }
    fs::write(path, source).with_context(|| format!("writing {}", path.display()))
}
