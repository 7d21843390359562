use crate::commands::print::format_errors;
use crate::commands::SourceArgs;
use crate::output_utils;
use crate::source_loader;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_client::schema::SdlSchema;
use libgraphql_client::Client;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        help="Path to an SDL file describing the schema operations and \
             fragments are validated against. Without one only unused and \
             unresolved fragments are reported.",
        long,
    )]
    schema: Option<PathBuf>,

    #[command(flatten)]
    sources: SourceArgs,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        let mut client_builder = Client::builder().config(cli.client_config());
        if let Some(schema_path) = &self.schema {
            log::debug!("Loading schema from {schema_path:#?}...");
            match SdlSchema::from_file(schema_path) {
                Ok(schema) => client_builder = client_builder.schema(schema),
                Err(err) => return CommandResult::stderr(format_args!(
                    "{} Errors loading schema {schema_path:#?}: {err}",
                    output_utils::RED_X,
                )),
            }
        }
        let client = client_builder.build();

        let discovered = source_loader::discover_sources(
            &self.sources.file_or_dir_paths,
            &self.sources.graphql_file_exts,
        );
        let num_files = discovered.files.len();
        let num_skipped = discovered.num_skipped;
        let mut errors = discovered.errors;
        errors.extend(source_loader::register_sources(&client, discovered.files));
        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} GraphQL validation errors:\n{}",
                output_utils::RED_X,
                format_errors(&errors),
            ));
        }
        client.freeze();

        match client.validate() {
            Ok(()) => {
                let (num_operations, num_fragments) = client.registry()
                    .with_definitions(|defs| {
                        let num_fragments = defs.values()
                            .filter(|def| def.is_fragment())
                            .count();
                        (defs.len() - num_fragments, num_fragments)
                    });
                CommandResult::stdout(format_args!(
                    concat!(
                        "{} All GraphQL validated successfully:\n",
                        "  * Analyzed {} files.\n",
                        "  * Skipped {} non-graphql files.\n",
                        "  * Validated {} operations.\n",
                        "  * Validated {} fragments.",
                    ),
                    output_utils::GREEN_CHECK,
                    num_files,
                    num_skipped,
                    num_operations,
                    num_fragments,
                ))
            },

            Err(err) => CommandResult::stderr(format_args!(
                "{} GraphQL validation errors:\n{}",
                output_utils::RED_X,
                err.messages().iter()
                    .map(|message| {
                        let locations = message.locations();
                        if locations.is_empty() {
                            format!("  * {message}")
                        } else {
                            format!(
                                "  * {message} ({})",
                                locations.iter()
                                    .map(ToString::to_string)
                                    .collect::<Vec<_>>()
                                    .join(", "),
                            )
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            )),
        }
    }
}
