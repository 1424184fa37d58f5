use homy_client::api::rest::build_client;
use homy_client::api::{CloudinaryUploader, RestCollection};
use homy_client::config::AppConfig;
use homy_client::models::{Listing, Reservation};
use homy_client::store::{HouseStore, ReservationStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    info!("🏠 Homy client - {}", config.api_url);

    let client = build_client(config.http_timeout)?;
    let uploader = CloudinaryUploader::new(
        client.clone(),
        &config.cloudinary_cloud_name,
        &config.cloudinary_upload_preset,
    );
    let houses = HouseStore::new(
        Arc::new(RestCollection::<Listing>::new(client.clone(), &config.api_url, &config.houses_resource)),
        Arc::new(uploader),
    );
    let reservations = ReservationStore::new(Arc::new(RestCollection::<Reservation>::new(
        client,
        &config.api_url,
        &config.reservations_resource,
    )));

    houses.fetch_all().await?;
    let listings = houses.items();
    info!("✅ Loaded {} listings\n", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        let house = &listing.data;
        println!("{}. {} ({} MAD / night)", i + 1, house.title, house.price);
        println!("   {} · {}", house.kind, house.address);
        println!("   {} rooms, {} bathrooms, {} m²", house.rooms, house.bathrooms, house.surface);
        match (house.reserved_from, house.reserved_to) {
            (Some(from), Some(to)) => println!("   Reserved {} → {}", from, to),
            _ => println!("   Available"),
        }
        println!("   ID: {}", listing.id);
        println!("   Photos: {}", 1 + house.images.len());
        println!();
    }

    // The reservation collection is optional on some backends
    if let Err(err) = reservations.fetch_all().await {
        warn!("Could not load reservations: {:#}", err);
        return Ok(());
    }

    let requests = reservations.items();
    info!("📋 {} reservation request(s)", requests.len());
    for request in &requests {
        let stay = &request.data;
        let title = houses
            .find(&stay.house_id.to_string())
            .map(|l| l.data.title)
            .unwrap_or_else(|| "(removed listing)".to_string());
        println!(
            "   {} → {} · {} · {} nights · {} MAD · {:?}",
            stay.from, stay.to, title, stay.nights, stay.total, stay.status
        );
    }

    Ok(())
}
