use criterion::{black_box, criterion_group, criterion_main, Criterion};
use game_recommender::{initialize, Catalog, EngineConfig, GameRecord};

const PLATFORMS: [&str; 5] = ["PC", "PlayStation 4", "Xbox One", "Switch", "Game Boy Advance"];
const GENRES: [&str; 6] = ["Action", "Puzzle", "RPG", "Action, Adventure", "Racing", "Strategy"];
const WORDS: [&str; 16] = [
    "space", "battle", "dragon", "kingdom", "racing", "puzzle", "ancient", "robot",
    "magic", "city", "survival", "island", "war", "hero", "dungeon", "galaxy",
];

// deterministic synthetic catalog
fn catalog(n: usize) -> Catalog {
    let records = (0..n)
        .map(|i| {
            let summary: Vec<&str> = (0..8).map(|w| WORDS[(i * 7 + w * 3) % WORDS.len()]).collect();
            GameRecord {
                name: format!("Game {i}"),
                platform: PLATFORMS[i % PLATFORMS.len()].to_string(),
                release_year: (1990 + i % 30).to_string(),
                genres: GENRES[i % GENRES.len()].to_string(),
                developer: format!("Studio {}", i % 40),
                multiplayer: if i % 3 == 0 { "Yes" } else { "No" }.to_string(),
                summary: format!(
                    "A {} with the {}.",
                    summary[..4].join(" "),
                    summary[4..].join(" ")
                ),
                ..Default::default()
            }
        })
        .collect();
    Catalog::from_records(records)
}

fn engine_benchmark(c: &mut Criterion) {
    let data = catalog(1_000);
    let config = EngineConfig::default();

    c.bench_function("initialize_1000", |b| {
        b.iter(|| initialize(black_box(data.clone()), &config))
    });

    let engine = initialize(data, &config).expect("build engine");
    c.bench_function("recommend_top10", |b| {
        b.iter(|| engine.recommend(black_box("Game 500"), 10))
    });
}

criterion_group!(benches, engine_benchmark);
criterion_main!(benches);
