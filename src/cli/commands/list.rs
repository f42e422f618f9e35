//! List manga command handler

use crate::services::build_filter;
use crate::state::SharedState;

pub async fn cmd_list_manga(
    state: &SharedState,
    name: Option<&str>,
    genres: Option<&str>,
    status: Option<&str>,
) -> anyhow::Result<()> {
    let filter = build_filter(name, genres, status);
    let listing = state.query.list(&filter).await?;

    if listing.count == 0 {
        if filter.is_empty() {
            println!("No manga stored yet.");
            println!();
            println!("Fill the catalog with: mangadb ingest top");
        } else {
            println!("No manga match the given filters.");
        }
        return Ok(());
    }

    println!("Stored Manga ({} total)", listing.count);
    println!("{:-<70}", "");

    for manga in listing.manga {
        let status_indicator = match manga.status.as_str() {
            "Publishing" => "🟢",
            "Finished" => "✓",
            _ => "•",
        };

        println!("{} {} [{}]", status_indicator, manga.manga_name, manga.status);
        println!(
            "  ID: {} | Genres: {} | Added: {}",
            manga.manga_id,
            manga.genres.join(", "),
            manga.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!();
    println!("Legend: 🟢 Publishing | ✓ Finished");

    Ok(())
}
