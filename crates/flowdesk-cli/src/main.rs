//! Flowdesk headless driver
//!
//! Prints the editor's seed graph, replays recorded gesture scripts
//! through the interaction controller, and browses the workflow list.

mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flowdesk_workflow_service::{
    CatalogConfig, InMemoryWorkflowBackend, SaveWorkflowDialog, StubSaver, WorkflowCatalog,
};
use graph_editor::{inspect, EditorConfig, GraphStore, ToolbarState};

#[derive(Parser)]
#[command(name = "flowdesk", about = "Headless driver for the Flowdesk graph editor")]
struct Cli {
    /// Editor configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the graph every editor session starts from
    Seed,
    /// Replay a gesture script and print the resulting graph
    Replay {
        script: PathBuf,
        /// Confirm the save dialog under this name afterwards
        #[arg(long)]
        save_as: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Page through the placeholder workflow list
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Use the small-screen page size
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Seed => {
            let store = GraphStore::seeded(config);
            print_graph(&store)?;
        }
        Command::Replay {
            script,
            save_as,
            description,
        } => {
            let steps = script::load_script(&script)?;
            log::info!("Replaying {} steps from {:?}", steps.len(), script);
            let store = script::replay(steps, config);

            for issue in inspect(&store.snapshot()) {
                log::warn!("{}", issue);
            }
            print_graph(&store)?;

            if let Some(name) = save_as {
                let mut dialog = SaveWorkflowDialog::new();
                dialog.open();
                dialog.set_name(name);
                dialog.set_description(description);
                dialog.confirm(&StubSaver, store.snapshot()).await?;
            }
        }
        Command::List {
            search,
            page,
            compact,
        } => {
            let backend = InMemoryWorkflowBackend::with_placeholders(25);
            let mut catalog = WorkflowCatalog::new();
            catalog.refresh(&backend).await?;

            let rows = CatalogConfig::default().rows_for(compact);
            let page = catalog.page(&search, page, rows);
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

fn print_graph(store: &GraphStore) -> Result<(), serde_json::Error> {
    let projection = graph_editor::render::project(
        &store.snapshot(),
        store.selection(),
        ToolbarState::for_selection(store.selection()),
    );
    println!("{}", serde_json::to_string_pretty(&projection)?);
    Ok(())
}
