use clap::CommandFactory;
use crate::commands;
use libgraphql_client::ClientConfig;
use libgraphql_client::DEFAULT_SEPARATOR;

#[derive(clap::Parser, Debug)]
#[command(name = "graphql-client", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        default_value=DEFAULT_SEPARATOR,
        global=true,
        help="String used to join scope-path segments into global definition \
             names.",
        long,
    )]
    pub separator: String,

    #[arg(
        help="Enable verbose output.",
        global=true,
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) fn client_config(&self) -> ClientConfig {
        ClientConfig {
            separator: self.separator.to_owned(),
            ..ClientConfig::default()
        }
    }

    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use libgraphql_client::SpreadMode;

    #[test]
    fn separator_flows_into_client_config() {
        let cli = Cli::try_parse_from(["graphql-client", "--separator", "_", "print", "src"])
            .expect("arguments parse");
        let config = cli.client_config();
        assert_eq!(config.separator, "_");
        assert_eq!(config.spread_mode, SpreadMode::Inline);
    }

    #[test]
    fn projection_flags_are_not_accepted() {
        assert!(Cli::try_parse_from(["graphql-client", "--masked-spreads", "print", "src"]).is_err());
    }
}
