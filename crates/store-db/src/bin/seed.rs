//! # Seed Data Generator
//!
//! Populates the database with demo categories, customers, and products
//! for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (store.db)
//! cargo run -p store-db --bin seed
//!
//! # Specify database path
//! cargo run -p store-db --bin seed -- --db ./data/store.db
//! ```

use std::env;

use store_core::Money;
use store_db::{Database, DbConfig, DbResult};

/// Demo catalog: category name and (product name, price, stock) rows.
const CATALOG: &[(&str, &[(&str, &str, i64)])] = &[
    (
        "Electronics",
        &[
            ("USB-C Cable 1m", "9.99", 120),
            ("Wireless Mouse", "24.50", 40),
            ("Mechanical Keyboard", "89.00", 15),
            ("27in Monitor", "219.99", 8),
            ("Webcam 1080p", "49.95", 25),
        ],
    ),
    (
        "Books",
        &[
            ("The Rust Programming Language", "39.95", 30),
            ("Database Internals", "55.00", 12),
            ("Designing Data-Intensive Applications", "49.99", 18),
        ],
    ),
    (
        "Home & Kitchen",
        &[
            ("French Press", "19.99", 10),
            ("Chef Knife 8in", "34.90", 22),
            ("Cutting Board", "12.00", 50),
        ],
    ),
];

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Alice Martin", "alice.martin@example.com", "12 Rose Lane, Springfield"),
    ("Bob Ortiz", "bob.ortiz@example.com", "44 Elm Street, Rivertown"),
    ("Carol Nguyen", "carol.nguyen@example.com", "7 Harbor View, Lakeside"),
];

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let mut db_path = "store.db".to_string();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" if i + 1 < args.len() => {
                db_path = args[i + 1].clone();
                i += 2;
            }
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("usage: seed [--db <path>]");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = seed(&db_path).await {
        eprintln!("seed failed: {e}");
        std::process::exit(1);
    }
}

async fn seed(db_path: &str) -> DbResult<()> {
    let db = Database::new(DbConfig::new(db_path)).await?;

    let products = db.products();
    let customers = db.customers();

    let mut product_count = 0;
    for (category, items) in CATALOG {
        let category_id = products.insert_category(category).await?;
        for (name, price, stock) in *items {
            let price = Money::parse(price).expect("seed prices are valid decimals");
            products.insert(name, price, *stock, category_id).await?;
            product_count += 1;
        }
    }

    for (name, email, address) in CUSTOMERS {
        customers.insert(name, email, address).await?;
    }

    println!(
        "Seeded {} categories, {} products, {} customers into {}",
        CATALOG.len(),
        product_count,
        CUSTOMERS.len(),
        db_path
    );

    db.close().await;
    Ok(())
}
