//! CLI argument definitions for deckpack.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and
//! focused on orchestration.

use crate::scaffold::TEMPLATE_REPO_URL;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::num::NonZeroU16;

/// Scaffold, validate, and pack Stream Deck plugins.
#[derive(Parser, Debug)]
#[command(name = "deckpack")]
#[command(version, about)]
#[command(long_about = concat!(
    "Scaffold, validate, and pack Stream Deck plugins.\n\n",
    "deckpack turns a plugin directory into a distributable .streamDeckPlugin ",
    "file: a zip archive the Stream Deck software unpacks into its plugin ",
    "directory. Repackaging the same version lands in a fresh auto-numbered ",
    "release directory, so earlier packages are never clobbered.\n\n",
    "Files listed in the plugin's .packignore (gitignore syntax) are excluded ",
    "from the package. The file is required; packing without one exits with ",
    "code 9.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Scaffold a new plugin project from the template:\n",
    "    $ deckpack create\n\n",
    "  Validate the manifest of the plugin in the current directory:\n",
    "    $ deckpack validate\n\n",
    "  Pack the current directory into ./releases:\n",
    "    $ deckpack pack\n\n",
    "  Pack with a debug port baked into the package:\n",
    "    $ deckpack pack --debug 12345\n\n",
    "  Pack under an explicit version:\n",
    "    $ deckpack pack my-plugin --version 2.0.0 -o dist\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a new plugin project from the template.
    Create(CreateArgs),

    /// Pack a plugin directory into a .streamDeckPlugin file.
    Pack(PackArgs),

    /// Validate a plugin's manifest.json.
    Validate(ValidateArgs),
}

/// Arguments for the create command.
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Template repository URL or local path to clone from.
    #[arg(value_name = "SRC", default_value = TEMPLATE_REPO_URL)]
    pub src_path: String,

    /// Destination directory [default: derived from the template name].
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<Utf8PathBuf>,
}

/// Arguments for the pack command.
#[derive(Parser, Debug, Clone)]
pub struct PackArgs {
    /// Path to the plugin directory [default: current directory].
    #[arg(value_name = "PLUGIN_DIR")]
    pub plugin_dir: Option<Utf8PathBuf>,

    /// Output directory for versioned releases.
    #[arg(short, long, value_name = "DIR", default_value = "releases")]
    pub output: Utf8PathBuf,

    /// Package under this version instead of the manifest version.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Enable debug mode in the packed plugin, listening for debug
    /// messages on the specified port.
    #[arg(short, long = "debug", value_name = "PORT")]
    pub debug_port: Option<NonZeroU16>,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the validate command.
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the plugin directory [default: current directory].
    #[arg(value_name = "PLUGIN_DIR")]
    pub plugin_dir: Option<Utf8PathBuf>,
}
