use crate::services::IngestSource;
use crate::state::SharedState;

pub async fn cmd_ingest(state: &SharedState, source: IngestSource) -> anyhow::Result<()> {
    println!(
        "Fetching {} manga from Jikan (delay {} ms between items)...",
        source,
        state.pipeline.delay().as_millis()
    );

    let report = state.catalog.ingest_source(source).await?;

    println!("{}", report.message);
    if !report.report.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &report.report.errors {
            println!("  • {error}");
        }
    }

    Ok(())
}
