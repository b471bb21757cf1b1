mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::RunArgs;
use sheets_io::{DEFAULT_BATCH_SIZE, DEFAULT_EXPORT_SHEET};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sheetcheck")]
#[command(version, about = "Spreadsheet rule validation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every sheet of a workbook against its rule set
    Validate {
        /// Path to the workbook (xlsx, xlsm, xlsb, xls, ods or csv)
        file: String,

        #[command(flatten)]
        run: RunArgs,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the rule sets that sheets are validated against
    Rules {
        /// Rule file (YAML or TOML); built-in rules when omitted
        #[arg(short, long)]
        rules: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a workbook and write its accepted rows to an .xlsx file
    Export {
        /// Path to the workbook
        file: String,

        #[command(flatten)]
        run: RunArgs,

        /// Output .xlsx path
        #[arg(short, long)]
        output: String,

        /// Worksheet name in the exported file
        #[arg(long, default_value = DEFAULT_EXPORT_SHEET)]
        sheet_name: String,
    },

    /// Validate a workbook and append its accepted rows to a JSON-lines store
    Import {
        /// Path to the workbook
        file: String,

        #[command(flatten)]
        run: RunArgs,

        /// JSON-lines store to append to
        #[arg(long)]
        store: String,

        /// Records written per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Validate { file, run, format } => {
            commands::validate::execute(&file, &run, &format).await
        }

        Commands::Rules { rules, format } => commands::rules::execute(rules.as_deref(), &format),

        Commands::Export {
            file,
            run,
            output,
            sheet_name,
        } => commands::export::execute(&file, &run, &output, &sheet_name).await,

        Commands::Import {
            file,
            run,
            store,
            batch_size,
        } => commands::import::execute(&file, &run, &store, batch_size).await,
    }
}
