use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Compile a markdown music tree into the data a static artist site plays
/// from: `discography.json`, an RSS feed and one page per track.
#[derive(Debug, Parser)]
#[command(name = "mantis", version)]
pub struct Cli {
    /// Project directory holding `music/` and the generated files.
    #[arg(long, short = 'C', global = true, default_value = ".", env = "MANTIS_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile the discography, feed and track pages.
    Build {
        /// Prefix for asset paths in the output, e.g. a CDN address.
        #[arg(long)]
        base_url: Option<String>,

        /// Skip streaming-link lookups.
        #[arg(long)]
        offline: bool,
    },

    /// Report missing audio, artwork and metadata.
    Health,

    /// Create a track directory with a starter `track.md`.
    NewTrack {
        title: String,
        #[arg(long)]
        slug: Option<String>,
        /// Comma-separated tags; the first letter of each is capitalised.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Create an album or EP with an empty track list.
    NewCollection {
        title: String,
        /// `album` or `ep`.
        #[arg(long = "type", default_value = "album")]
        kind: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Replace a collection's track order.
    Reorder {
        slug: String,
        #[arg(required = true)]
        tracks: Vec<String>,
    },

    /// Set or clear a track's lyrics.
    Lyrics {
        slug: String,
        /// Read lyrics from this file instead of the argument.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Lyrics text. Omit both this and `--file` to clear.
        text: Option<String>,
    },

    /// Build, then upload the site with rsync.
    Deploy {
        /// Skip streaming-link lookups during the build.
        #[arg(long)]
        offline: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_flags_and_globals() {
        let cli = Cli::try_parse_from([
            "mantis", "build", "--offline", "--base-url", "https://cdn.example.com", "-vv", "-C", "site",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project_dir, PathBuf::from("site"));
        match cli.command {
            Command::Build { base_url, offline } => {
                assert!(offline);
                assert_eq!(base_url.as_deref(), Some("https://cdn.example.com"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn reorder_requires_tracks() {
        assert!(Cli::try_parse_from(["mantis", "reorder", "first_light"]).is_err());
        let cli = Cli::try_parse_from(["mantis", "reorder", "first_light", "b", "a"]).unwrap();
        match cli.command {
            Command::Reorder { slug, tracks } => {
                assert_eq!(slug, "first_light");
                assert_eq!(tracks, vec!["b".to_string(), "a".to_string()]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn new_track_splits_tags_on_commas() {
        let cli =
            Cli::try_parse_from(["mantis", "new-track", "Night Drive", "--tags", "ambient,lo-fi"])
                .unwrap();
        match cli.command {
            Command::NewTrack { tags, .. } => {
                assert_eq!(tags, vec!["ambient".to_string(), "lo-fi".to_string()]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn new_collection_type_defaults_to_album() {
        let cli = Cli::try_parse_from(["mantis", "new-collection", "First Light"]).unwrap();
        match cli.command {
            Command::NewCollection {
                title,
                kind,
                slug,
                tags,
            } => {
                assert_eq!(title, "First Light");
                assert_eq!(kind, "album");
                assert_eq!(slug, None);
                assert!(tags.is_empty());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
