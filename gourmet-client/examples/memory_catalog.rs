//! Catalog walkthrough over the in-memory stores
//!
//! Demonstrates a full session: start a controller, create places,
//! toggle status, attach photos, filter, and observe the live catalog.
//!
//! Run: cargo run --example memory_catalog

use std::sync::Arc;

use gourmet_client::{
    CatalogConfig, CatalogController, Filters, MemoryDocumentStore, MemoryObjectStore, PhotoUpload,
    PlaceDraft, PriceRange, Status,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gourmet_client=debug".into()),
        )
        .init();

    let documents = Arc::new(MemoryDocumentStore::new());
    let objects = Arc::new(MemoryObjectStore::new());

    let config = CatalogConfig::from_url("https://gourmet.example/?list=demo")?;
    let mut controller =
        CatalogController::start(documents.clone(), objects.clone(), config).await?;

    // Two places with different statuses and price tiers
    let mut sushi = PlaceDraft::new("Sushi Tengoku");
    sushi.area = Some("Ginza".into());
    sushi.genre = Some("sushi".into());
    sushi.price_range = PriceRange::Tier3;
    controller.save(sushi).await?;

    let mut ramen = PlaceDraft::new("Ramen Ichi");
    ramen.area = Some("Shibuya".into());
    ramen.genre = Some("ramen".into());
    ramen.price_range = PriceRange::Tier1;
    controller.save(ramen).await?;

    // Wait for the synchronizer to apply the echo of both writes
    let mut catalog = controller.catalog();
    while catalog.borrow().len() < 2 {
        catalog.changed().await?;
    }

    let places = controller.places();
    println!("catalog ({} places):", places.len());
    for place in &places {
        println!("  {} [{}] {}", place.name, place.status, place.price_range.as_str());
    }

    // Book the ramen place and attach a couple of photos
    let ramen_id = places
        .iter()
        .find(|p| p.name == "Ramen Ichi")
        .map(|p| p.id.clone())
        .expect("just created");
    controller.set_status(&ramen_id, Status::Booked).await?;
    let merged = controller
        .add_photos(
            &ramen_id,
            vec![
                PhotoUpload::new("bowl.jpg", vec![0xFF, 0xD8]),
                PhotoUpload::new("queue.jpg", vec![0xFF, 0xD8]),
            ],
        )
        .await?;
    println!("attached {} photos, first at {}", merged.len(), merged[0].url);

    // Filtered view: sushi only
    let filters = Filters {
        genre: Some("SUSHI".into()),
        ..Filters::default()
    };
    for place in controller.filtered(&filters) {
        println!("filtered: {}", place.name);
    }

    controller.shutdown().await;
    Ok(())
}
