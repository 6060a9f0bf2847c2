use rawg_rs::search::{self, TimePeriod};
use rawg_rs::{CatalogBuilder, CatalogKind, Game, GamesQuery, ListQuery, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build a client from RAWG_* variables (a .env file is honored).
    let settings = Settings::from_env()?;
    let client = settings.client()?;

    // 2. Resolve a loosely typed title to a single game.
    let Some(best) = search::search_best_match(&client, "witcher 3").await? else {
        println!("No match found.");
        return Ok(());
    };
    println!("--- Best match ---");
    println!("{} (id {}, released {:?})", best.name, best.id, best.released);
    println!("Genres: {}", best.genres.join(", "));
    println!();

    // 3. Details, screenshots and achievements through a game handle.
    let game = Game::new(&client, best.id);
    if let Some(detail) = game.details().await? {
        println!("Developers: {}", detail.developers.join(", "));
        println!("Rated: {}", detail.content_rating.unwrap_or_default());
    }
    println!("Screenshots: {}", game.screenshots().await?.len());
    for a in game.achievements().await?.iter().take(5) {
        match a.percent {
            Some(p) => println!("  {:<40} {p:>6.2}%", a.name),
            None => println!("  {:<40}    n/a", a.name),
        }
    }
    println!();

    // 4. Curated lists.
    println!("--- Popular this month ---");
    let popular = search::popular_games(&client, TimePeriod::Month, GamesQuery::new().page_size(5)).await?;
    for g in &popular.results {
        println!("  {:<40} {:.2}", g.name, g.rating.unwrap_or_default());
    }

    println!("--- Trending ---");
    let trending = search::trending_games(&client, GamesQuery::new().page_size(5)).await?;
    for g in &trending.results {
        println!("  {}", g.name);
    }
    println!();

    // 5. Catalog resources.
    let genres = CatalogBuilder::new(&client, CatalogKind::Genres)
        .query(ListQuery::new().page_size(10))
        .fetch()
        .await?;
    println!("--- Genres ({} total) ---", genres.count.unwrap_or_default());
    for g in &genres.results {
        println!("  {:<20} {} games", g.name, g.games_count.unwrap_or_default());
    }

    Ok(())
}
