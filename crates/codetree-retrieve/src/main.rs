//! CLI entry point for codetree-retrieve.
//!
//! Designed for subprocess invocation from an agent runtime: takes a request
//! either as flags or as JSON on stdin and writes the JSON response to stdout.
//! Logs go to stderr.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use codetree_core::{AppConfig, NodeId, ProjectId};
use codetree_graph::{GraphClient, GraphConfig, SubtreeQuery};
use codetree_retrieve::{CodeGraphRequest, CodeGraphService, Neo4jFetcher, PgProjectStore};

#[derive(Parser)]
#[command(name = "codetree-retrieve")]
#[command(about = "Retrieve the code graph rooted at a node")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: codetree).
    #[arg(short, long, default_value = "codetree", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Retrieve a code graph for the given project and node.
    Get {
        /// Project (repository) ID.
        #[arg(long)]
        project_id: String,
        /// Start node ID.
        #[arg(long)]
        node_id: String,
    },
    /// Retrieve a code graph for a `{"project_id", "node_id"}` request read from stdin.
    Request,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    let request = match cli.command {
        Command::Get {
            project_id,
            node_id,
        } => CodeGraphRequest {
            project_id: ProjectId(project_id),
            node_id: NodeId(node_id),
        },
        Command::Request => {
            let input = std::io::read_to_string(std::io::stdin())?;
            serde_json::from_str(&input)?
        }
    };

    let graph = GraphClient::connect(&GraphConfig::from(&config.neo4j)).await?;
    let fetcher =
        Neo4jFetcher::new(graph).with_subtree_query(SubtreeQuery::from(&config.retrieval));
    let projects = PgProjectStore::connect(&config.postgres).await?;

    let mut service = CodeGraphService::new(projects, fetcher)
        .with_max_tree_depth(config.retrieval.max_tree_depth);
    if let Some(secs) = config.retrieval.request_timeout_secs {
        service = service.with_request_timeout(Duration::from_secs(secs));
    }

    let response = service
        .get_code_graph(&request.project_id, &request.node_id)
        .await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
