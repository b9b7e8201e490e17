use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// List persisted extraction states.
    Status {
        /// Restrict to a single source (e.g. "github").
        #[arg(long)]
        source: Option<String>,

        /// Write the report to a file instead of stdout.
        #[arg(long)]
        output: Option<String>,
    },

    /// Show the persisted state for one state id
    /// (`source:resource[:partition]`).
    State { state_id: String },

    /// Print the configured source catalog.
    Catalog,
}
