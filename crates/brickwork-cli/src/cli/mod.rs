//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "brickwork",
    bin_name = "brickwork",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Integrate reusable bricks into a web project",
    long_about = "Brickwork reads a brick manifest, compiles an integration plan \
                  and applies it idempotently to a project tree, recording \
                  every change in a ledger.",
    after_help = "EXAMPLES:\n\
        \x20 brickwork plan bricks/blog\n\
        \x20 brickwork diff bricks/blog\n\
        \x20 brickwork apply bricks/blog --yes\n\
        \x20 brickwork install acme/blog-brick\n\
        \x20 brickwork list --compact",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the compiled plan of a local brick.
    #[command(
        about = "Print a brick's integration plan",
        after_help = "EXAMPLES:\n\
            \x20 brickwork plan bricks/blog"
    )]
    Plan(BrickArgs),

    /// Print the ledger.
    #[command(
        visible_alias = "ls",
        about = "Show the ledger of applied bricks",
        after_help = "EXAMPLES:\n\
            \x20 brickwork list\n\
            \x20 brickwork list --compact\n\
            \x20 brickwork list --output ledger-backup.json"
    )]
    List(ListArgs),

    /// Apply a local brick to the project.
    #[command(
        about = "Apply a local brick",
        after_help = "EXAMPLES:\n\
            \x20 brickwork apply bricks/blog         # show plan only\n\
            \x20 brickwork apply bricks/blog --yes   # apply it"
    )]
    Apply(ApplyArgs),

    /// Fetch a brick from a repository and apply it.
    #[command(
        about = "Install a brick from a git repository",
        after_help = "EXAMPLES:\n\
            \x20 brickwork install acme/blog-brick\n\
            \x20 brickwork install https://github.com/acme/blog-brick.git\n\
            \x20 brickwork install git@github.com:acme/blog-brick.git"
    )]
    Install(InstallArgs),

    /// Preview what `apply` would add.
    #[command(
        about = "Preview additions without writing",
        after_help = "EXAMPLES:\n\
            \x20 brickwork diff bricks/blog"
    )]
    Diff(BrickArgs),

    /// Write a default `brickwork.toml` into the project root.
    #[command(
        about = "Initialise project configuration",
        after_help = "EXAMPLES:\n\
            \x20 brickwork init\n\
            \x20 brickwork -C ../site init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 brickwork completions bash > ~/.local/share/bash-completion/completions/brickwork\n\
            \x20 brickwork completions zsh  > ~/.zfunc/_brickwork\n\
            \x20 brickwork completions fish > ~/.config/fish/completions/brickwork.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the resolved configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 brickwork config get project.settings\n\
            \x20 brickwork config list\n\
            \x20 brickwork config path"
    )]
    Config(ConfigCommands),
}

// ── plan / diff ───────────────────────────────────────────────────────────────

/// A local brick directory.
#[derive(Debug, Args)]
pub struct BrickArgs {
    /// Directory containing `brick.yaml`, `brick.yml` or `brick.json`.
    #[arg(value_name = "PATH", help = "Brick directory")]
    pub path: PathBuf,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `brickwork list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Single-line JSON instead of pretty-printed.
    #[arg(long = "compact", help = "Print compact JSON")]
    pub compact: bool,

    /// Write the ledger to a file instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the ledger JSON to FILE"
    )]
    pub output: Option<PathBuf>,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `brickwork apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub brick: BrickArgs,

    /// Perform the changes. Without it only the plan is printed.
    #[arg(short = 'y', long = "yes", help = "Apply the plan")]
    pub yes: bool,
}

// ── install ───────────────────────────────────────────────────────────────────

/// Arguments for `brickwork install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Repository URL, `git@host:path`, or `owner/name` (GitHub).
    #[arg(value_name = "REPO", help = "Repository reference")]
    pub repo: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `brickwork init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `brickwork completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `brickwork config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.settings`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
