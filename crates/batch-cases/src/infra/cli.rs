//! CLI arguments for the `batch-cases` binary.

use {
    alloy::primitives::Address,
    clap::{Parser, Subcommand},
    std::path::PathBuf,
};

/// Build batches of DeFi transactions from a catalog of predefined cases.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// The log filter.
    #[arg(long, env, default_value = "warn,batch_cases=debug")]
    pub log: String,

    /// Emit log events as JSON.
    #[arg(long, env)]
    pub log_json: bool,

    /// Path to the configuration file. This file should be in TOML format.
    /// Without it only commands that don't talk to nodes or APIs work.
    #[arg(long, env)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the cases of the catalog.
    List {
        /// Only list cases targeting this chain.
        #[arg(long)]
        chain_id: Option<u64>,
    },
    /// Print the description, inputs and preview transactions of a case.
    Preview {
        /// Identifier of the case, e.g. `lido_multiplier`.
        id: String,
    },
    /// Check the inputs for a case without building any transactions.
    Validate {
        id: String,

        /// Input values, in the order the case declares them.
        #[arg(long = "input")]
        inputs: Vec<String>,
    },
    /// Build the transactions of a case for an account.
    Render {
        id: String,

        /// The account submitting the batch.
        #[arg(long, env)]
        account: Address,

        /// Input values, in the order the case declares them. Leave an
        /// optional input empty to skip it.
        #[arg(long = "input")]
        inputs: Vec<String>,
    },
}
