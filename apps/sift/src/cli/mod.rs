//! # Sift CLI Module
//!
//! This module implements the CLI interface for Sift.
//!
//! ## Available Commands
//!
//! - `search` - Print one page of results (the default command)
//! - `facets` - Print facet options
//! - `check` - Report authoring problems in the catalog
//! - `profile` - Print the effective profile as TOML
//! - `serve` - Start the HTTP search API

mod commands;

use crate::source::CatalogSource;
use clap::{Parser, Subcommand};
use sift_core::primitives::DEFAULT_CATALOG_PATH;
use sift_core::{Profile, SiftError, SortOrder};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Sift - faceted search over a static JSON catalog
///
/// Filters by free text and two facets, sorts, paginates, and keeps the whole
/// search state in a shareable URL query string.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog location: a file path or an http(s) URL
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: String,

    /// Built-in profile: "blog" or "recipes"
    #[arg(short = 'P', long, global = true, default_value = "blog")]
    pub profile: String,

    /// Profile TOML file (overrides --profile)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of results
    Search {
        /// Seed the state from a URL query string (e.g. "?tag=rust&page=2")
        #[arg(short, long)]
        url: Option<String>,

        /// Free-text query
        #[arg(short, long)]
        search: Option<String>,

        /// Facet A selection (empty clears it)
        #[arg(short = 'a', long)]
        facet_a: Option<String>,

        /// Facet B selection (empty clears it)
        #[arg(short = 'b', long)]
        facet_b: Option<String>,

        /// Ordering: newest, time_asc, time_desc, title_asc
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortOrder>,

        /// Page number (clamped to the available pages)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Print facet options for the whole catalog
    Facets,

    /// Report authoring problems in the catalog
    Check,

    /// Print the effective profile as TOML
    Profile,

    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    SortOrder::from_param(value).ok_or_else(|| {
        let known: Vec<&str> = SortOrder::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown sort '{}' (expected one of: {})", value, known.join(", "))
    })
}

/// Resolve the effective profile: `--config` wins over `--profile`.
pub fn resolve_profile(name: &str, config: Option<&PathBuf>) -> Result<Profile, SiftError> {
    match config {
        Some(path) => Profile::load(path),
        None => Profile::builtin(name).ok_or_else(|| {
            SiftError::InvalidProfile(format!(
                "unknown profile '{}' (expected blog or recipes)",
                name
            ))
        }),
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), SiftError> {
    let profile = resolve_profile(&cli.profile, cli.config.as_ref())?;
    let source = CatalogSource::parse(&cli.catalog);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Search {
            url,
            search,
            facet_a,
            facet_b,
            sort,
            page,
        }) => {
            let args = SearchArgs {
                url: url.unwrap_or_default(),
                query: search,
                facet_a,
                facet_b,
                sort,
                page,
            };
            cmd_search(&source, profile, &args, json_mode, cli.verbose).await
        }
        Some(Commands::Facets) => cmd_facets(&source, &profile, json_mode).await,
        Some(Commands::Check) => cmd_check(&source, json_mode).await,
        Some(Commands::Profile) => cmd_profile(&profile, json_mode),
        Some(Commands::Serve { host, port }) => cmd_serve(&source, profile, &host, port).await,
        None => {
            // No subcommand - first page of the default state
            cmd_search(&source, profile, &SearchArgs::default(), json_mode, cli.verbose).await
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_overrides() {
        let cli = Cli::parse_from([
            "sift",
            "--profile",
            "recipes",
            "search",
            "--url",
            "?diet=vegan",
            "-s",
            "soup",
            "--sort",
            "time_desc",
        ]);
        assert_eq!(cli.profile, "recipes");
        assert!(matches!(
            cli.command,
            Some(Commands::Search { ref url, ref search, sort: Some(SortOrder::TimeDesc), .. })
                if url.as_deref() == Some("?diet=vegan") && search.as_deref() == Some("soup")
        ));
    }

    #[test]
    fn rejects_unknown_sort() {
        let result = Cli::try_parse_from(["sift", "search", "--sort", "oldest"]);
        assert!(result.is_err());
    }

    #[test]
    fn resolves_builtin_profiles() {
        assert_eq!(resolve_profile("recipes", None).ok(), Some(Profile::recipes()));
        assert!(matches!(
            resolve_profile("videos", None),
            Err(SiftError::InvalidProfile(_))
        ));
    }

    #[test]
    fn config_overrides_builtin() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profile.toml");
        std::fs::write(
            &path,
            "name = \"notes\"\n[facet_a]\nkey = \"topic\"\nfield = \"tags\"\n[facet_b]\nkey = \"level\"\nfield = \"difficulty\"\n",
        )
        .expect("write");

        let profile = resolve_profile("blog", Some(&path)).expect("profile");
        assert_eq!(profile.name, "notes");
        assert_eq!(profile.facet_a.key, "topic");
    }
}
