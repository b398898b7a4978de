use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "seasonfold")]
#[command(version = "0.1.0")]
#[command(about = "Organize TV show folders and rename episode files from TMDB", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rename season files in PATH using the parent folder's tvshow.nfo
    Folder {
        /// Season folder, e.g. "Foo (2020)/Season 01"
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Create tvshow.nfo and season folders for the show folder at PATH
    Create {
        /// Show folder named "Title (YYYY)"
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_command() {
        let args = Args::try_parse_from(["seasonfold", "folder", "Foo (2020)/Season 01"]).unwrap();
        match args.command {
            Some(Command::Folder { path }) => assert_eq!(path, PathBuf::from("Foo (2020)/Season 01")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_command() {
        let args = Args::try_parse_from(["seasonfold", "create", "Foo (2020)"]).unwrap();
        assert!(matches!(args.command, Some(Command::Create { .. })));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        assert!(Args::try_parse_from(["seasonfold", "folder"]).is_err());
        assert!(Args::try_parse_from(["seasonfold", "rename", "x"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["seasonfold"]).unwrap();
        assert!(args.command.is_none());
    }
}
