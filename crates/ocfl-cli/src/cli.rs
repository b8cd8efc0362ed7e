use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ocfl_types::EntityType;

#[derive(Parser)]
#[command(
    name = "ocfl",
    about = "Inspect OCFL storage roots",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// OCFL storage root (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List entities under a location
    Ls(LsArgs),
    /// Show the storage root enclosing a location
    Root(RootArgs),
}

#[derive(Args)]
pub struct LsArgs {
    /// Entity type to list: root, intermediate, object, version, file, any
    #[arg(short = 't', long = "type", default_value = "file")]
    pub entity_type: EntityType,
    /// Only the head version of each object
    #[arg(long)]
    pub head: bool,
    /// A path, or logical coordinates: OBJECT [VERSION [FILE]]
    pub location: Vec<String>,
}

#[derive(Args)]
pub struct RootArgs {
    /// Path inside a storage root (defaults to the configured root)
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ls() {
        let cli = Cli::parse_from(["ocfl", "ls", "-t", "version", "--head", "obj-A"]);
        match cli.command {
            Command::Ls(args) => {
                assert_eq!(args.entity_type, EntityType::Version);
                assert!(args.head);
                assert_eq!(args.location, vec!["obj-A"]);
            }
            Command::Root(_) => panic!("expected ls"),
        }
    }

    #[test]
    fn ls_defaults_to_files() {
        let cli = Cli::parse_from(["ocfl", "--root", "/data", "ls"]);
        assert_eq!(cli.root, Some(PathBuf::from("/data")));
        match cli.command {
            Command::Ls(args) => assert_eq!(args.entity_type, EntityType::File),
            Command::Root(_) => panic!("expected ls"),
        }
    }

    #[test]
    fn verbose_flag_has_help() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let verbose = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "verbose")
            .unwrap();
        assert!(verbose.get_help().is_some());
        assert!(Cli::parse_from(["ocfl", "-v", "ls"]).verbose);
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(Cli::try_parse_from(["ocfl", "ls", "-t", "blob"]).is_err());
    }
}
