// demos/basic_usage.rs
use colu_explorer::{Colu, ColuConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ColuConfig::default();
    let mut colu = Colu::new(&config)?;

    // Crawl a few expansion steps out from a seed asset
    let seed = "La8sGvnXs3DgVbqzKzxcBLFJVhjvg1pyGwRxqk";
    println!("🕸️  Crawling from {}...", seed);
    let visited = colu
        .crawl_assets([seed], 5, Duration::from_millis(100))
        .await?;
    println!("✅ Expanded {} asset(s)", visited.len());
    println!(
        "📊 Cached {} asset(s) and {} holder(s), {} pending",
        colu.assets().len(),
        colu.holders().len(),
        colu.frontier().len()
    );

    // Build the weighted holder/asset graph
    colu.weight_assets(1, Duration::from_millis(100)).await?;
    if let Some(graph) = colu.graph() {
        println!(
            "🕸️  Graph: {} node(s), {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );
    }

    // Persist everything for the next session
    colu.save("colu.json")?;
    println!("💾 Saved registry to colu.json");

    Ok(())
}
