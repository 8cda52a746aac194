//! Persistence Gateway Demo
//!
//! Run with: `cargo run --example kv_store`
//!
//! Shows the two `KvStore` backends the engine persists collections through.

use campus_records::kv::{FileKvStore, KvStore, MemoryKvStore};

#[tokio::main]
async fn main() -> campus_records::Result<()> {
    println!("=== campus-records KV Store Demo ===\n");

    // In-memory backend
    demo_memory().await?;

    // File backend (one file per key)
    demo_file().await?;

    println!("All demos completed successfully!");
    Ok(())
}

async fn demo_memory() -> campus_records::Result<()> {
    println!("1. MemoryKvStore");
    println!("   -------------");

    let store = MemoryKvStore::new();

    store.set("courses", br#"[{"id":"c1"}]"#.to_vec()).await?;
    println!("   SET courses");

    let value = store.get("courses").await?;
    println!(
        "   GET courses = {:?}",
        value.map(|v| String::from_utf8_lossy(&v).to_string())
    );

    println!("   EXISTS exams = {}", store.exists("exams").await?);

    store.delete("courses").await?;
    println!("   DELETE courses");
    println!("   EXISTS courses = {}", store.exists("courses").await?);

    println!();
    Ok(())
}

async fn demo_file() -> campus_records::Result<()> {
    println!("2. FileKvStore");
    println!("   -----------");

    let root = std::env::temp_dir().join("campus-records-kv-demo");
    let store = FileKvStore::open(&root).await?;
    println!("   root = {}", store.root().display());

    store.set("mealBookings", b"[]".to_vec()).await?;
    println!("   SET mealBookings");

    // Survives reopening
    let reopened = FileKvStore::open(&root).await?;
    println!(
        "   reopened EXISTS mealBookings = {}",
        reopened.exists("mealBookings").await?
    );

    match reopened.set("../escape", Vec::new()).await {
        Ok(()) => println!("   SET ../escape unexpectedly accepted"),
        Err(e) => println!("   SET ../escape rejected: {e}"),
    }

    reopened.delete("mealBookings").await?;
    println!();
    Ok(())
}
