use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tooldoc_core::config::{Config, Layout};
use tooldoc_core::{verify_catalog, DocgenError, Generator, Result};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = resolve_root(cli.root);

    let result = match cli.command {
        Some(Commands::Build) | None => handle_build(&root, cli.quiet),
        Some(Commands::Verify) => handle_verify(&root),
        Some(Commands::Config { action }) => handle_config(action, &root),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            if e.is_validation() {
                eprintln!(
                    "{}",
                    "Catalog not updated; pages generated before the failure were kept.".dimmed()
                );
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise -v/-q pick the level
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    cli_root.unwrap_or_else(|| PathBuf::from("."))
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "tooldoc", &mut io::stdout());
}

fn handle_build(root: &Path, quiet: bool) -> Result<()> {
    let layout = Layout::for_root(root)?;
    let generator = Generator::new(layout);
    let report = generator.run()?;

    for missing in &report.missing_roots {
        eprintln!(
            "{} Tool directory \"{}\" not found",
            "[WARN]".yellow().bold(),
            missing.display()
        );
    }
    for skipped in &report.skipped {
        eprintln!(
            "{} Tool \"{}\" {}",
            "[WARN]".yellow().bold(),
            skipped.tool,
            skipped.reason
        );
    }

    if quiet {
        return Ok(());
    }

    println!();
    for tool in &report.tools {
        println!(
            "  {} {} {}",
            tool.name.cyan(),
            format!("[{}]", tool.kind).dimmed(),
            tool.display_name
        );
    }
    println!();
    println!(
        "{} {} tools, {} skipped",
        "Generated:".green(),
        report.tools.len(),
        report.skipped.len()
    );
    println!("  Pages:    {}", generator.layout().pages_dir.display());
    println!("  Menu:     {}", report.menu_path.display());
    println!("  Catalog:  {}", report.catalog.catalog_path.display());
    println!("  Checksum: {}", report.catalog.checksum.dimmed());

    Ok(())
}

fn handle_verify(root: &Path) -> Result<()> {
    let layout = Layout::for_root(root)?;
    let checksum = verify_catalog(&layout.catalog_path, &layout.checksum_path)?;
    println!(
        "{} {} ({})",
        "Verified:".green(),
        layout.catalog_path.display(),
        checksum.dimmed()
    );
    Ok(())
}

fn handle_config(action: ConfigAction, root: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(root)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(DocgenError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(root)?;
            config.set(&key, &value)?;
            config.save(root)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(root)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(root);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(root)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
