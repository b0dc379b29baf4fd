//! CLI entry point for the gazette tracer.
//!
//! Query results are written to stdout as JSON; extracted text is written
//! as-is. Logs go to stderr.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use gazette_core::GazetteConfig;
use gazette_extract::{ExtractConfig, PdfTextExtractor};
use gazette_graph::{GraphClient, GraphConfig};
use gazette_tracer::GazetteService;

#[derive(Parser)]
#[command(name = "gazette-tracer")]
#[command(about = "Query gazettes and their amendments from the Neo4j graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: gazette).
    #[arg(short, long, default_value = "gazette", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// List every gazette ordered by date.
    Timeline,
    /// List every amendment edge (child -> parent).
    Graph,
    /// List parent gazettes, including gazettes with no relationships.
    Parents,
    /// Show parents published on a date with the gazettes amending them.
    Tree {
        /// Publication date, exactly as stored on the gazette nodes.
        #[arg(long)]
        date: String,
    },
    /// List distinct publication dates.
    Dates,
    /// Extract the text of a gazette PDF.
    Extract {
        /// URL of the PDF.
        #[arg(long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = GazetteConfig::load(&cli.config)?;

    let extractor = PdfTextExtractor::new(&ExtractConfig::from(config.extract))?;
    let graph = GraphClient::connect(&GraphConfig::from(config.neo4j)).await?;
    let service = GazetteService::new(graph, extractor);

    let rows = match cli.command {
        Command::Timeline => service.get_timeline().await?,
        Command::Graph => service.get_graph().await?,
        Command::Parents => service.get_parents().await?,
        Command::Tree { ref date } => service.get_amendment_tree(date).await?,
        Command::Dates => service.get_dates().await?,
        Command::Extract { ref url } => {
            let text = service.extract_text(url).await?;
            println!("{text}");
            return Ok(());
        }
    };
    println!("{}", serde_json::to_string(&rows)?);

    Ok(())
}
