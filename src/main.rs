//! Papershelf
//!
//! Inspection binary for the exam-paper resolution and materialization core.
//! Lists hierarchy children for a partial key, or opens a viewer session for
//! a full key and materializes the selected document.
//!
//! Usage:
//!   papershelf                               list years
//!   papershelf <year>                        list exam types
//!   papershelf <year> <type>                 list categories
//!   papershelf <year> <type> <category> [document-id]
//!                                            resolve, materialize, print

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use papershelf::config::Config;
use papershelf::materializer::MaterializedSource;
use papershelf::session::{NavigationRequest, PaperKey, SessionStatus};
use papershelf::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "papershelf=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting papershelf v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Catalog dir: {}", config.catalog.config_dir.display());
    tracing::info!(
        "Documents dir: {}",
        config.storage.documents_dir.display()
    );

    let state = AppState::new(config).context("failed to load catalog")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            for year in state.resolver().years() {
                let request = NavigationRequest::pick_year(year);
                println!("{year}\t{}", serde_json::to_string(&request)?);
            }
        }
        [year] => {
            for option in state.resolver().types_for_year(year) {
                let request = NavigationRequest::pick_type(year, &option.id);
                println!(
                    "{}\t{}\t{}",
                    option.id,
                    option.display_name,
                    serde_json::to_string(&request)?
                );
            }
        }
        [year, exam_type] => {
            for option in state.resolver().categories_for(year, exam_type) {
                let request = NavigationRequest::pick_category(year, exam_type, &option.id);
                println!(
                    "{}\t{}\t{}",
                    option.id,
                    option.name,
                    serde_json::to_string(&request)?
                );
            }
        }
        [year, exam_type, category, rest @ ..] => {
            let mut key = PaperKey::new(year, exam_type, category);
            if let Some(document) = rest.first() {
                key = key.with_document(document);
            }

            let session = state.new_session();
            match session.open(&key).await {
                SessionStatus::Ready => {
                    let selected = session
                        .selected()
                        .await
                        .context("session ready without a selection")?;
                    let source = session
                        .source()
                        .await
                        .context("session ready without a source")?;

                    println!("{}", selected.title);
                    match source {
                        MaterializedSource::Local { path } => {
                            println!("local\t{}", path.display());
                        }
                        MaterializedSource::Remote { url, .. } => {
                            println!("remote\t{url}");
                        }
                    }
                }
                SessionStatus::Empty => println!("no documents available"),
                SessionStatus::Failed => {
                    let message = session
                        .error()
                        .await
                        .unwrap_or_else(|| "unknown error".to_string());
                    anyhow::bail!("materialization failed: {message}");
                }
                other => anyhow::bail!("unexpected session status: {other:?}"),
            }
        }
    }

    Ok(())
}
