//! CLI argument parsing.

use clap::{Parser, Subcommand};

/// PDF summarizer HTTP service.
#[derive(Parser, Debug)]
#[command(name = "briefly-server", version, about)]
pub struct Cli {
    /// Config profile; keys are looked up as `{PROFILE}_{KEY}` first.
    #[arg(long, env = "BRIEFLY_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,
        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration with secrets redacted
    Config,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["briefly-server"]).unwrap();
        assert_eq!(cli.command(), Command::Serve { host: None, port: None });
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["briefly-server", "serve", "--host", "127.0.0.1", "--port", "9000"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Serve {
                host: Some("127.0.0.1".into()),
                port: Some(9000),
            }
        );
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = Cli::try_parse_from(["briefly-server", "--profile", "prod", "config"]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("prod"));
        assert_eq!(cli.command(), Command::Config);
    }
}
