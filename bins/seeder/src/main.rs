//! Database seeder for Viatour development and testing.
//!
//! Seeds demo clients, employees and a small travel catalog (hotels, flights,
//! packages, services, payment methods) for local development.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use viatour_db::entities::{
    clients, employees, flights, hotels, packages, payment_methods, services,
};

/// Demo client ID (consistent for all seeds)
const DEMO_CLIENT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo employee ID (consistent for all seeds)
const DEMO_EMPLOYEE_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = viatour_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo client...");
    seed_demo_client(&db).await;

    println!("Seeding demo employee...");
    seed_demo_employee(&db).await;

    println!("Seeding hotels...");
    seed_hotels(&db).await;

    println!("Seeding flights...");
    seed_flights(&db).await;

    println!("Seeding packages...");
    seed_packages(&db).await;

    println!("Seeding services...");
    seed_services(&db).await;

    println!("Seeding payment methods...");
    seed_payment_methods(&db).await;

    println!("Seeding complete!");
}

fn demo_client_id() -> Uuid {
    Uuid::parse_str(DEMO_CLIENT_ID).unwrap()
}

fn demo_employee_id() -> Uuid {
    Uuid::parse_str(DEMO_EMPLOYEE_ID).unwrap()
}

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Seeds a demo client for development.
async fn seed_demo_client(db: &DatabaseConnection) {
    if clients::Entity::find_by_id(demo_client_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo client already exists, skipping...");
        return;
    }

    let client = clients::ActiveModel {
        id: Set(demo_client_id()),
        full_name: Set("Maria Fernandez".to_string()),
        email: Set("maria@example.com".to_string()),
        phone: Set(Some("+34 600 123 456".to_string())),
        document_number: Set(Some("X1234567A".to_string())),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = client.insert(db).await {
        eprintln!("Failed to insert demo client: {e}");
    } else {
        println!("  Created demo client: maria@example.com");
    }
}

/// Seeds a demo employee for development.
async fn seed_demo_employee(db: &DatabaseConnection) {
    if employees::Entity::find_by_id(demo_employee_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo employee already exists, skipping...");
        return;
    }

    let employee = employees::ActiveModel {
        id: Set(demo_employee_id()),
        full_name: Set("Carlos Ruiz".to_string()),
        email: Set("carlos@viatour.dev".to_string()),
        role: Set("agent".to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = employee.insert(db).await {
        eprintln!("Failed to insert demo employee: {e}");
    } else {
        println!("  Created demo employee: carlos@viatour.dev");
    }
}

/// Seeds a handful of hotels across popular destinations.
async fn seed_hotels(db: &DatabaseConnection) {
    let rows = [
        ("Hotel Playa Azul", "Cancun", "Mexico", 4_i16, "145.00"),
        ("Grand Lisboa Palace", "Lisbon", "Portugal", 5_i16, "210.00"),
        ("Andes View Lodge", "Cusco", "Peru", 3_i16, "89.50"),
    ];

    let mut inserted = 0;
    for (name, city, country, stars, rate) in rows {
        let hotel = hotels::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            city: Set(city.to_string()),
            country: Set(country.to_string()),
            stars: Set(stars),
            nightly_rate: Set(money(rate)),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = hotel.insert(db).await {
            eprintln!("Failed to insert hotel {name}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} hotels");
}

/// Seeds flights departing over the next two months.
async fn seed_flights(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let rows = [
        ("Iberia", "IB6401", "Madrid", "Cancun", 30_i64, "480.00", 180),
        ("TAP", "TP1025", "Lisbon", "Madrid", 14_i64, "95.00", 120),
        ("LATAM", "LA2478", "Lima", "Cusco", 45_i64, "75.50", 90),
    ];

    let mut inserted = 0;
    for (airline, number, origin, destination, days_out, price, seats) in rows {
        let flight = flights::ActiveModel {
            id: Set(Uuid::new_v4()),
            airline: Set(airline.to_string()),
            flight_number: Set(number.to_string()),
            origin: Set(origin.to_string()),
            destination: Set(destination.to_string()),
            departure_date: Set(today + Duration::days(days_out)),
            base_seat_price: Set(money(price)),
            seats_total: Set(seats),
            seats_available: Set(seats),
            version: Set(1),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = flight.insert(db).await {
            eprintln!("Failed to insert flight {number}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} flights");
}

/// Seeds tour packages with limited slots.
async fn seed_packages(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let rows = [
        (
            "Riviera Maya Escape",
            "Seven nights all-inclusive on the Riviera Maya",
            "Cancun",
            "1250.00",
            40,
            30_i64,
            37_i64,
        ),
        (
            "Inca Trail Adventure",
            "Guided four-day trek to Machu Picchu",
            "Cusco",
            "890.00",
            16,
            45_i64,
            49_i64,
        ),
    ];

    let mut inserted = 0;
    for (name, description, destination, price, slots, start_out, end_out) in rows {
        let package = packages::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            destination: Set(destination.to_string()),
            price_per_person: Set(money(price)),
            slots_total: Set(slots),
            slots_available: Set(slots),
            start_date: Set(today + Duration::days(start_out)),
            end_date: Set(today + Duration::days(end_out)),
            version: Set(1),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = package.insert(db).await {
            eprintln!("Failed to insert package {name}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} packages");
}

/// Seeds standalone services that can be added to any reservation.
async fn seed_services(db: &DatabaseConnection) {
    let rows = [
        ("Airport transfer", "Private van, up to 6 passengers", "35.00"),
        ("Travel insurance", "Per-person trip coverage", "28.50"),
        ("City walking tour", "Three-hour guided tour", "22.00"),
    ];

    let mut inserted = 0;
    for (name, description, price) in rows {
        let service = services::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            unit_price: Set(money(price)),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = service.insert(db).await {
            eprintln!("Failed to insert service {name}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} services");
}

/// Seeds the accepted payment methods.
async fn seed_payment_methods(db: &DatabaseConnection) {
    let names = ["Cash", "Credit card", "Bank transfer"];

    let mut inserted = 0;
    for name in names {
        let method = payment_methods::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = method.insert(db).await {
            // Ignore duplicate key errors (method already exists)
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert payment method {name}: {e}");
            }
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} payment methods");
}
