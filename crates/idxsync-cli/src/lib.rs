mod command;
mod declaration;
mod utility;

pub use command::*;
pub use declaration::Declaration;

use anyhow::Result;
use clap::Parser;
use idxsync::Config;

/// idxsync CLI library for building custom command-line tools
pub struct IdxsyncCli {
    config: Config,
}

impl IdxsyncCli {
    /// Create a new IdxsyncCli instance with the default reconciliation
    /// configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new IdxsyncCli instance with a custom configuration.
    /// Command-line flags refine it.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli).await
    }

    async fn run(&self, cli: Cli) -> Result<()> {
        let config = cli.args.config(self.config.clone());

        match cli.command {
            Command::Plan(cmd) => cmd.run(&cli.args, config).await,
            Command::Ensure(cmd) => cmd.run(&cli.args, config).await,
        }
    }
}

impl Default for IdxsyncCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "idxsync")]
#[command(about = "idxsync - Reconcile declared indexes with a MongoDB database")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Show which indexes would be dropped and created
    Plan(PlanCommand),

    /// Drop undeclared indexes and create missing ones
    Ensure(EnsureCommand),
}
