use crate::services::CatalogError;
use crate::state::SharedState;

pub async fn cmd_search_manga(state: &SharedState, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    match state.catalog.ingest_search(query).await {
        Ok(outcome) => {
            println!("{}", outcome.message);
            println!(
                "  ID: {} | Status: {} | Genres: {}",
                outcome.manga.manga_id,
                outcome.manga.status,
                outcome.manga.genres.join(", ")
            );
            Ok(())
        }
        Err(e @ (CatalogError::EmptyQuery | CatalogError::NotFound)) => {
            println!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
