//! Command-line argument definitions for the Constellation CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global flags select the content directory, the
//! configuration file and logging verbosity; each [`Command`] maps to one
//! content-authoring task.

use clap::{Parser, Subcommand};

use constellation::content::{Link, Status};

/// Command-line arguments for the Constellation placement tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Content root directory, overriding the configured one
    #[arg(long, global = true)]
    pub content_dir: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate every position and write the site manifest
    Generate {
        /// Path to the generated manifest
        #[arg(short, long, default_value = "portfolio.json")]
        output: String,

        /// Seed for reproducible jitter
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report overlapping items and protected-zone violations
    Check,

    /// Move overlapping and protected-zone items to free positions
    Fix {
        /// Seed for reproducible jitter
        #[arg(long)]
        seed: Option<u64>,

        /// Report the moves without writing content files
        #[arg(long)]
        dry_run: bool,
    },

    /// Reset every stored position to the origin
    Reset {
        /// Confirm rewriting every content file
        #[arg(long, required = true)]
        yes: bool,
    },

    /// Create a new portfolio item
    Create(CreateArgs),

    /// Delete a portfolio item and its directory
    Remove {
        /// Id of the item to remove
        id: String,

        /// Confirm the deletion
        #[arg(long, required = true)]
        yes: bool,
    },

    /// Render an SVG preview of a regenerated layout
    Preview {
        /// Path to the SVG file
        #[arg(short, long, default_value = "layout.svg")]
        output: String,

        /// Seed for reproducible jitter
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Fields of a new portfolio item.
#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub short_description: Option<String>,

    /// Tag directory the item belongs to
    #[arg(long)]
    pub tag: String,

    /// Project date, e.g. 2025 or 2025-03
    #[arg(long)]
    pub date: Option<String>,

    /// Technology used; repeat for several
    #[arg(long = "technology")]
    pub technologies: Vec<String>,

    /// completed, in-progress or concept
    #[arg(long)]
    pub status: Option<Status>,

    /// External link as label=url; repeat for several
    #[arg(long = "link")]
    pub links: Vec<Link>,
}
