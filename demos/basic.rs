use game_recommender::{initialize, Catalog, EngineConfig, GameRecord};

fn record(name: &str, platform: &str, genres: &str, developer: &str, summary: &str) -> GameRecord {
    GameRecord {
        name: name.to_string(),
        platform: platform.to_string(),
        release_year: "2017".to_string(),
        genres: genres.to_string(),
        developer: developer.to_string(),
        multiplayer: "No".to_string(),
        summary: summary.to_string(),
        ..Default::default()
    }
}

fn main() -> game_recommender::Result<()> {
    // build catalog
    let catalog = Catalog::from_records(vec![
        record(
            "Breath of the Wild",
            "Switch",
            "Action, Adventure",
            "Nintendo",
            "Explore a vast open world of Hyrule and defeat Calamity Ganon.",
        ),
        record(
            "Super Mario Odyssey",
            "Switch",
            "Platformer",
            "Nintendo",
            "Mario travels across kingdoms with his living hat Cappy.",
        ),
        record(
            "Horizon Zero Dawn",
            "PS4",
            "Action, Adventure",
            "Guerrilla Games",
            "Hunt robotic creatures across a vast open world.",
        ),
        record(
            "Hollow Knight",
            "PC",
            "Metroidvania",
            "Team Cherry",
            "Descend into a ruined insect kingdom.",
        ),
    ]);

    // build engine and query
    let engine = initialize(catalog, &EngineConfig::default())?;
    println!("bag: {}", engine.feature_bag(0).map(|b| b.as_str()).unwrap_or_default());
    for rec in engine.recommend_scored("Breath of the Wild", 3)? {
        println!("{:.3}  {}", rec.score, rec);
    }
    Ok(())
}
