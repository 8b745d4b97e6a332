//! Build helpers: man pages and shell completions for `essay-check`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "essay-check development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages (one per subcommand).
    Man {
        /// Output directory.
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts.
    Completions {
        /// Output directory.
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
        /// Shells to generate for (default: all).
        #[arg(long, value_enum)]
        shell: Vec<Shell>,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir, shell } => {
            let shells = if shell.is_empty() {
                Shell::value_variants().to_vec()
            } else {
                shell
            };
            generate_completions(&out_dir, &shells)
        }
    }
}

fn generate_man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    clap_mangen::generate_to(essay_check::command(), out_dir)
        .with_context(|| format!("failed to write man pages to {}", out_dir.display()))?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn generate_completions(out_dir: &Path, shells: &[Shell]) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut cmd = essay_check::command();
    for &shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, "essay-check", out_dir)
            .with_context(|| format!("failed to write {shell} completions"))?;
        println!("{shell}: {}", path.display());
    }
    Ok(())
}
