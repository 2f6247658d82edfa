//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// folio portfolio site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Print debug output (skipped sections, missing mount points)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a site with a sample portfolio
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render the portfolio into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the site. Rebuild on change automatically
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Validate the portfolio data file and report problems
    Check {
        /// Treat warnings (clamped values, dropped entries) as errors
        #[arg(long)]
        strict: bool,
    },

    /// Ask the canned chat responder. Starts a prompt when no query is given
    Chat {
        /// Question to ask
        query: Vec<String>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Build arguments of the current command, if it builds.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["folio", "build", "--clean", "-m", "false", "-o", "dist"]);
        let args = cli.build_args().unwrap();
        assert!(args.clean);
        assert_eq!(args.minify, Some(false));
        assert_eq!(args.output, Some(PathBuf::from("dist")));
        assert!(!cli.is_init());
    }

    #[test]
    fn test_parse_minify_without_value() {
        let cli = Cli::parse_from(["folio", "build", "--minify"]);
        assert_eq!(cli.build_args().unwrap().minify, Some(true));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["folio", "serve", "-p", "8080", "--watch=false"]);
        match cli.command {
            Commands::Serve { port, watch, .. } => {
                assert_eq!(port, Some(8080));
                assert_eq!(watch, Some(false));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_chat_query_words() {
        let cli = Cli::parse_from(["folio", "chat", "what", "skills?"]);
        match cli.command {
            Commands::Chat { ref query } => assert_eq!(query.join(" "), "what skills?"),
            _ => panic!("expected chat"),
        }
        assert!(cli.build_args().is_none());
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::parse_from(["folio", "-r", "site", "check", "--strict", "--verbose"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check { strict: true }));
    }
}
