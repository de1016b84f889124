use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use data_loader::config::DEFAULT_OPENSEARCH_URL;
use data_loader::example_csv::write_example_csv;
use data_loader::{Dependencies, LoaderConfig, LoaderError, LogFormat};
use data_loader_ingest::UploadMode;
use data_loader_repository::config::DEFAULT_BULK_CHUNK_SIZE;
use data_loader_shared::DocumentType;

#[derive(Parser)]
#[command(name = "data-loader")]
#[command(about = "Upload research CSV data into the search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSearch URL
    #[arg(long, env = "OPENSEARCH_URL", default_value = DEFAULT_OPENSEARCH_URL, global = true)]
    opensearch_url: String,

    /// Documents per bulk request
    #[arg(long, env = "BULK_CHUNK_SIZE", default_value_t = DEFAULT_BULK_CHUNK_SIZE, global = true)]
    bulk_chunk_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a CSV file of opportunities
    Opportunities(UploadArgs),
    /// Upload a CSV file of projects
    Projects(UploadArgs),
    /// Write an example opportunities CSV
    ExampleCsv {
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct UploadArgs {
    /// `;`-delimited CSV file with a header row
    file: PathBuf,

    /// Delete the index before uploading
    #[arg(long)]
    replace: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match LogFormat::from_env() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn upload(
    cli: &Cli,
    document_type: DocumentType,
    args: &UploadArgs,
) -> Result<(), LoaderError> {
    let file = File::open(&args.file).map_err(|e| {
        LoaderError::config(format!("Cannot open {}: {}", args.file.display(), e))
    })?;

    let config = LoaderConfig::new(cli.opensearch_url.clone(), cli.bulk_chunk_size);
    let dependencies = Dependencies::new(&config).await?;

    let mode = if args.replace {
        UploadMode::Replace
    } else {
        UploadMode::Append
    };

    info!(file = %args.file.display(), document_type = %document_type, "Starting upload");

    let result = dependencies
        .uploader
        .upload(document_type, BufReader::new(file), mode)
        .await?;

    println!("{}", result);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), LoaderError> {
    match &cli.command {
        Commands::Opportunities(args) => upload(&cli, DocumentType::Opportunity, args).await,
        Commands::Projects(args) => upload(&cli, DocumentType::Project, args).await,
        Commands::ExampleCsv { output: Some(path) } => {
            write_example_csv(File::create(path)?)?;
            info!(path = %path.display(), "Example CSV written");
            Ok(())
        }
        Commands::ExampleCsv { output: None } => Ok(write_example_csv(io::stdout().lock())?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    tokio::select! {
        result = run(cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Data loader failed");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
            ExitCode::FAILURE
        }
    }
}
