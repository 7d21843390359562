mod print;
mod validate;

use crate::Cli;
use crate::CommandResult;
use print::PrintCmd;
use std::path::PathBuf;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-client")]
pub(crate) enum CommandEnum {
    Print(Box<PrintCmd>),
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Print(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}

/// Arguments shared by every command that loads client sources from disk.
#[derive(Debug, clap::Args)]
pub(crate) struct SourceArgs {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    pub graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL operations and fragments. Each file is registered under \
             its directory path relative to the argument plus its file stem.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    pub file_or_dir_paths: Vec<PathBuf>,
}
