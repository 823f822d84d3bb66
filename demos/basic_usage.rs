// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `--features logging` to see the ranker's debug/trace output.

use lexorank::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== LexoRank Example ===\n");

    let ranker = RankerBuilder::base36().build().unwrap();

    println!("Key space:");
    println!("  min:    {}", ranker.min());
    println!("  middle: {}", ranker.middle());
    println!("  max:    {}", ranker.max());

    // Build a list by appending after the initial rank
    println!("\nAppending five items...");
    let mut list: Vec<(String, Rank)> = Vec::new();
    let mut rank = ranker.initial(Bucket::Bucket0).clone();
    for i in 0..5 {
        list.push((format!("item_{}", i), rank.clone()));
        rank = rank.gen_next().unwrap();
    }

    for (name, rank) in &list {
        println!("  {} -> {}", rank, name);
    }

    // Move the last item between the first two
    println!("\n=== Moving item_4 between item_0 and item_1 ===");
    let new_rank = list[0].1.between(&list[1].1).unwrap();
    println!("  item_4 gets {}", new_rank);
    list[4].1 = new_rank;

    list.sort_by(|a, b| a.1.cmp(&b.1));
    println!("\nList after sort by key:");
    for (name, rank) in &list {
        println!("  {} -> {}", rank, name);
    }

    // Keys survive a round trip through storage
    println!("\n=== Parsing stored keys ===");
    for key in ["0|100004:", "1|y00000:", "0|0i0000:i", "3|000000:"] {
        match ranker.parse(key) {
            Ok(rank) => println!("  {:<12} ok   bucket {}", key, rank.bucket()),
            Err(e) => println!("  {:<12} err  {}", key, e),
        }
    }

    // Rebalance into the next bucket, walking down from its initial rank
    println!("\n=== Rebalancing into bucket 1 ===");
    let mut rank = ranker.initial(Bucket::Bucket1).clone();
    for (name, _) in list.iter().rev() {
        println!("  {} -> {}", rank, name);
        rank = rank.gen_prev().unwrap();
    }

    // A denser configuration for long-lived lists
    println!("\n=== Base 64, eight digits ===");
    let wide = RankerBuilder::base64().build().unwrap();
    println!("  middle:          {}", wide.middle());
    println!("  middle.gen_next: {}", wide.middle().gen_next().unwrap());
    println!("  min.gen_next:    {}", wide.min().gen_next().unwrap());
}
