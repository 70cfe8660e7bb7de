//! Veriform CLI: the `veriform` command.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Checks {
            category,
            query,
            json,
        } => commands::checks::run(category, query, json),

        Commands::Fields { ids, json } => commands::fields::run(ids, json),

        Commands::ConfigCheck { config, json } => commands::config_check::run(config, json),

        Commands::Run {
            ids,
            values,
            script,
            fail,
            json,
        } => commands::run::run(commands::run::Args {
            ids,
            values,
            script,
            fail,
            json,
        }),
    }
}
