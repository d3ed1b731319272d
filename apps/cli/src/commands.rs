//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docsmith_core::ProgressReporter;
use docsmith_core::nav::{self, NavOptions};
use docsmith_core::rename::{self, RenameOptions};
use docsmith_core::titles::{self, InjectOptions};
use docsmith_core::{notebooks, sections};
use docsmith_notebook::ExportOptions;
use docsmith_shared::{AppConfig, FileOutcome, Section, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docsmith keeps a documentation site's pages and navigation in shape.
#[derive(Parser)]
#[command(
    name = "docsmith",
    version,
    about = "Maintenance tools for a static documentation site.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Site root; config and relative paths resolve against it.
    #[arg(long, default_value = ".", global = true, env = "DOCSMITH_ROOT")]
    pub root: PathBuf,

    /// Explicit config file (defaults to <root>/docsmith.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Make every page start with a heading matching its front-matter title.
    Titles {
        /// Report files that would change, write nothing, fail if any would.
        #[arg(long)]
        check: bool,
    },

    /// Regenerate the navigation block of the site config.
    Nav {
        /// Print the generated block instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Export notebooks to Markdown pages.
    Notebooks {
        /// Directory holding the notebooks.
        #[arg(long)]
        source: Option<PathBuf>,

        /// Directory receiving the Markdown files.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Copy prefixed files in a section to their un-prefixed names.
    Rename {
        /// Section to process.
        #[arg(long)]
        section: Option<String>,

        /// Prefix to strip.
        #[arg(long)]
        prefix: Option<String>,

        /// Delete the prefixed originals after copying.
        #[arg(long)]
        remove_original: bool,

        /// List the copies without making them.
        #[arg(long)]
        dry_run: bool,
    },

    /// List the content files of a section, in processing order.
    List {
        /// Section name.
        section: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default docsmith.toml into the site root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docsmith=info",
        1 => "docsmith=debug",
        _ => "docsmith=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let root = cli.root;

    if let Command::Config {
        action: ConfigAction::Init,
    } = cli.command
    {
        return cmd_config_init(&root);
    }

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(&root)?,
    };

    match cli.command {
        Command::Titles { check } => cmd_titles(&root, &config, check),
        Command::Nav { dry_run } => cmd_nav(&root, &config, dry_run),
        Command::Notebooks { source, out } => {
            cmd_notebooks(&root, &config, source.as_deref(), out.as_deref())
        }
        Command::Rename {
            section,
            prefix,
            remove_original,
            dry_run,
        } => cmd_rename(
            &root,
            &config,
            section.as_deref(),
            prefix.as_deref(),
            remove_original,
            dry_run,
        ),
        Command::List { section } => cmd_list(&root, &config, &section),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_done(&self, path: &str, current: usize) {
        self.spinner.set_message(format!("[{current}] {path}"));
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

// Clears a spinner left running by a failed pass or a dry run.
impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_titles(root: &Path, config: &AppConfig, check: bool) -> Result<()> {
    let opts = InjectOptions {
        docs_dir: root.join(&config.site.docs_dir),
        sections: config.site.sections(),
        index_stem: config.site.index_stem.clone(),
        check_only: check,
    };

    info!(docs_dir = %opts.docs_dir.display(), check, "injecting titles");

    let report = titles::inject_titles(&opts, &CliProgress::new())?;

    for file in report.changed() {
        println!("  {:<9} {}", file.outcome.as_str(), file.path.display());
    }

    let changed = report.changed().count();
    println!();
    println!("  Files:     {}", report.files.len());
    println!("  Inserted:  {}", report.count(FileOutcome::Inserted));
    println!("  Corrected: {}", report.count(FileOutcome::Corrected));
    println!("  Unchanged: {}", report.count(FileOutcome::Unchanged));
    println!();

    if check && changed > 0 {
        return Err(eyre!("{changed} file(s) need a title heading; run `docsmith titles`"));
    }

    Ok(())
}

fn cmd_nav(root: &Path, config: &AppConfig, dry_run: bool) -> Result<()> {
    let opts = NavOptions::from_config(
        root,
        root.join(&config.site.docs_dir),
        config.site.sections(),
        config.site.index_stem.clone(),
        &config.nav,
    );

    if dry_run {
        let block = nav::build_nav(&opts, &CliProgress::new())?;
        println!("{}", block.render());
        return Ok(());
    }

    let update = nav::regenerate_nav(&opts, &CliProgress::new())?;

    println!();
    println!("  Navigation updated!");
    println!("  File:    {}", update.nav_file.display());
    println!("  Backup:  {}", update.backup_file.display());
    println!("  Entries: {}", update.entry_count);
    println!("  Changed: {}", if update.changed { "yes" } else { "no" });
    println!();

    Ok(())
}

fn cmd_notebooks(
    root: &Path,
    config: &AppConfig,
    source: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let source_dir = root.join(source.unwrap_or(&config.notebooks.source_dir));
    let output_dir = root.join(out.unwrap_or(&config.notebooks.output_dir));
    let opts = ExportOptions::from(&config.notebooks);

    info!(
        source = %source_dir.display(),
        output = %output_dir.display(),
        "exporting notebooks"
    );

    let exported =
        notebooks::export_notebooks(&source_dir, &output_dir, &opts, &CliProgress::new())?;

    for result in &exported {
        println!(
            "  {} ({} cells, {} removed)",
            result.target.display(),
            result.cells_rendered,
            result.cells_removed
        );
    }
    println!("  {} notebook(s) exported", exported.len());

    Ok(())
}

fn cmd_rename(
    root: &Path,
    config: &AppConfig,
    section: Option<&str>,
    prefix: Option<&str>,
    remove_original: bool,
    dry_run: bool,
) -> Result<()> {
    let section = Section::new(section.unwrap_or(&config.rename.section));
    let opts = RenameOptions {
        dir: section.dir(&root.join(&config.site.docs_dir)),
        prefix: prefix.unwrap_or(&config.rename.prefix).to_string(),
        remove_original: remove_original || config.rename.remove_original,
        dry_run,
    };

    if opts.prefix.is_empty() {
        return Err(eyre!("prefix must not be empty"));
    }

    let done = rename::strip_prefix_copies(&opts)?;

    let verb = if dry_run { "would copy" } else { "copied" };
    for item in &done {
        println!("  {verb} {} -> {}", item.from.display(), item.to.display());
    }
    println!("  {} file(s)", done.len());

    Ok(())
}

fn cmd_list(root: &Path, config: &AppConfig, section: &str) -> Result<()> {
    let docs_dir = root.join(&config.site.docs_dir);
    let files = sections::list_section(&docs_dir, &Section::new(section), &config.site.index_stem)?;

    for file in files {
        println!("{}", file.file_name());
    }

    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
