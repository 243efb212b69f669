//! Database seed command.
//!
//! Inserts a handful of sample orphanages so the map has pins to show
//! during local development. Safe to run repeatedly; it just adds rows.

use rust_decimal::Decimal;
use secrecy::SecretString;

use haven_api::db::{self, OrphanageRepository};
use haven_api::models::NewOrphanage;
use haven_core::Coordinates;

use super::CliError;

/// Insert sample orphanages.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = SecretString::from(super::database_url()?);

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;
    let repo = OrphanageRepository::new(&pool);

    for data in samples() {
        match repo.create(&data, &[]).await {
            Ok(orphanage) => tracing::info!(id = %orphanage.id, name = %orphanage.name, "seeded"),
            Err(e) => tracing::error!(name = %data.name, error = %e, "seed insert failed"),
        }
    }

    Ok(())
}

fn samples() -> Vec<NewOrphanage> {
    vec![
        NewOrphanage {
            name: "Lar das Meninas".to_owned(),
            coordinates: coords("-23.5505199", "-46.6333094"),
            about: "A home for girls aged 6 to 14, run by volunteers since 1998.".to_owned(),
            instructions: "Visits are guided; ring the side bell on arrival.".to_owned(),
            opening_hours: "9am to 6pm".to_owned(),
            open_on_weekends: true,
            approved: true,
        },
        NewOrphanage {
            name: "Casa Esperança".to_owned(),
            coordinates: coords("-22.9068467", "-43.1728965"),
            about: "Small family-style home hosting up to twelve children.".to_owned(),
            instructions: "Schedule visits a day ahead by phone.".to_owned(),
            opening_hours: "10am to 5pm".to_owned(),
            open_on_weekends: false,
            approved: true,
        },
        NewOrphanage {
            name: "Recanto do Sol".to_owned(),
            coordinates: coords("-19.9166813", "-43.9344931"),
            about: "Day activities and schooling support for local children.".to_owned(),
            instructions: "Enter through the garden gate.".to_owned(),
            opening_hours: "8am to 4pm".to_owned(),
            open_on_weekends: true,
            approved: false,
        },
    ]
}

fn coords(lat: &str, lng: &str) -> Coordinates {
    let latitude: Decimal = lat.parse().unwrap_or_default();
    let longitude: Decimal = lng.parse().unwrap_or_default();
    Coordinates::new(latitude, longitude).unwrap_or_else(|_| {
        Coordinates::new(Decimal::ZERO, Decimal::ZERO).expect("origin is valid")
    })
}
