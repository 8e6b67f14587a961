use clap::{Parser, Subcommand};

use duoyin_cli::commands::{config_ops, snapshot_ops};

#[derive(Parser)]
#[command(name = "snaptool", about = "Duoyin reference snapshot tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download reference data into a snapshot file
    Fetch {
        /// Comma-separated base syllables to include
        #[arg(long)]
        bases: Option<String>,
        /// File of base syllables, one per line
        #[arg(long)]
        bases_file: Option<String>,
        /// Custom settings TOML file
        #[arg(long)]
        settings: Option<String>,
        /// Output snapshot file
        output_file: String,
    },
    /// Show snapshot contents
    Inspect {
        /// Snapshot file
        file: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check tone-key entries against their bare-entry fallback
    Check {
        /// Snapshot file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    // No-op unless built with the `trace` feature.
    duoyin_core::trace_init::init_tracing(&std::env::temp_dir());

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch {
            bases,
            bases_file,
            settings,
            output_file,
        } => snapshot_ops::fetch(
            bases.as_deref(),
            bases_file.as_deref(),
            settings.as_deref(),
            &output_file,
        ),
        Command::Inspect { file, json } => snapshot_ops::inspect(&file, json),
        Command::Check { file } => snapshot_ops::check(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
