use crate::commands::SourceArgs;
use crate::output_utils;
use crate::source_loader;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_client::Client;
use libgraphql_client::ScopePath;

#[derive(Debug, clap::Args)]
pub(crate) struct PrintCmd {
    #[arg(
        help="Only print this definition (by global name, or by scope path \
             such as `App::UserQuery`) along with every fragment it \
             transitively spreads.",
        long,
    )]
    root: Option<String>,

    #[command(flatten)]
    sources: SourceArgs,
}

#[inherent::inherent]
impl RunnableCommand for PrintCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        let client = Client::new(cli.client_config());
        let discovered = source_loader::discover_sources(
            &self.sources.file_or_dir_paths,
            &self.sources.graphql_file_exts,
        );
        let mut errors = discovered.errors;
        errors.extend(source_loader::register_sources(&client, discovered.files));
        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Failed to load GraphQL sources:\n{}",
                output_utils::RED_X,
                format_errors(&errors),
            ));
        }
        client.freeze();

        let document = match &self.root {
            Some(root) => {
                let Some(definition) = find_definition(&client, root) else {
                    return CommandResult::stderr(format_args!(
                        "{} No definition named `{root}` was loaded.",
                        output_utils::RED_X,
                    ));
                };
                client.document_for(&[definition])
            },
            None => client.document(),
        };

        match document {
            Ok(document) => CommandResult::stdout(format_args!(
                "{}",
                document.to_query_string(),
            )),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to assemble the document: {err}",
                output_utils::RED_X,
            )),
        }
    }
}

fn find_definition(
    client: &Client,
    name: &str,
) -> Option<std::sync::Arc<libgraphql_client::definition::Definition>> {
    client.definition(name).or_else(|| {
        let scope_path: ScopePath = name.parse().ok()?;
        client.definition(&scope_path.global_name(&client.config().separator, None))
    })
}

pub(crate) fn format_errors(errors: &[anyhow::Error]) -> String {
    errors.iter()
        .map(|err| format!("  * {err:#}"))
        .collect::<Vec<_>>()
        .join("\n")
}
