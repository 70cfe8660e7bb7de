use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "veriform",
    about = "Veriform: one consolidated form dispatched to many verification checks",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the check catalog
    Checks {
        /// Filter by category (employment, gstin, vehicle, financial,
        /// healthcare, education)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over name, description, and category
        #[arg(long)]
        query: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the consolidated field view for a selection
    Fields {
        /// Check ids, in selection order
        #[arg(required = true)]
        ids: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a catalog/groups configuration file
    ConfigCheck {
        /// Path to the TOML configuration
        config: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the selected checks against a scripted backend
    Run {
        /// Check ids, in selection order
        #[arg(required = true)]
        ids: Vec<String>,

        /// Canonical or raw field value, key=value (repeatable)
        #[arg(long = "value")]
        values: Vec<String>,

        /// JSON file of canned responses keyed by check id
        #[arg(long)]
        script: Option<String>,

        /// Check id whose backend call fails at transport level
        #[arg(long)]
        fail: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
