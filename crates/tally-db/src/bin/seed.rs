//! # Seed Data Generator
//!
//! Populates a development database with a catalog and sales history so
//! every report has something to show.
//!
//! ## Usage
//! ```bash
//! # Seed ./tally_dev.db with 200 sales (default)
//! cargo run -p tally-db --bin seed
//!
//! # Generate more sales
//! cargo run -p tally-db --bin seed -- --sales 2000
//!
//! # Specify database path
//! cargo run -p tally-db --bin seed -- --db ./data/tally.db
//! ```
//!
//! ## Generated Data
//! - One category per entry of `CATALOG`, each with its items
//! - A handful of units of measure
//! - `--sales` sales of 1-4 lines each; quantities and the items picked are
//!   derived from the sale index, so two runs produce identical data
//!
//! Lines favour the front of the catalog, which gives the best-sellers
//! report a clear ranking instead of a flat distribution.

use std::env;
use std::process::ExitCode;
use tally_core::{Money, NewItem, NewSaleLine};
use tally_db::{Database, DbConfig};

/// Categories and the items listed under them, with list prices in cents.
const CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Beverages",
        &[
            ("Coca-Cola 330ml", 150),
            ("Sprite 330ml", 140),
            ("Orange Juice 1L", 320),
            ("Mineral Water 500ml", 90),
            ("Iced Tea 500ml", 180),
            ("Coffee Beans 250g", 899),
        ],
    ),
    (
        "Snacks",
        &[
            ("Potato Chips", 249),
            ("Tortilla Chips", 279),
            ("Chocolate Bar", 129),
            ("Salted Peanuts", 199),
            ("Gummy Bears", 159),
        ],
    ),
    (
        "Dairy",
        &[
            ("Whole Milk 1L", 119),
            ("Cheddar Cheese 200g", 389),
            ("Greek Yogurt", 149),
            ("Butter 250g", 299),
        ],
    ),
    (
        "Grocery",
        &[
            ("White Bread", 219),
            ("Pasta Penne 500g", 169),
            ("Basmati Rice 1kg", 459),
            ("Canned Tomatoes", 99),
            ("Peanut Butter", 379),
            ("Honey 350g", 649),
        ],
    ),
];

/// Units of measure; items cycle through them.
const UNITS: &[&str] = &["pcs", "pack", "bottle", "kg"];

const DEFAULT_SALES: usize = 200;
const DEFAULT_DB_PATH: &str = "./tally_dev.db";

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Seed { sales: usize, db_path: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (sales, db_path) = match parse_args(env::args().skip(1)) {
        Ok(Command::Help) => {
            print_help();
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Command::Seed { sales, db_path }) => (sales, db_path),
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run `seed --help` for usage.");
            return Ok(ExitCode::from(2));
        }
    };

    println!("🌱 Tally POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Sales:    {}", sales);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!("Creating catalog...");

    let mut unit_ids = Vec::with_capacity(UNITS.len());
    for name in UNITS {
        unit_ids.push(db.catalog().insert_unit(name).await?.id);
    }

    let mut items: Vec<(i64, i64)> = Vec::new();
    for (category_name, entries) in CATALOG {
        let category = db.catalog().insert_category(category_name).await?;

        for (name, price_cents) in entries.iter() {
            let position = items.len();
            let item = db
                .items()
                .insert(&NewItem {
                    category_id: category.id,
                    unit_id: unit_ids[position % unit_ids.len()],
                    name: name.to_string(),
                    price_cents: *price_cents,
                    stock_quantity: 20 + ((position * 37) % 180) as i64,
                })
                .await?;
            items.push((item.id, item.price_cents));
        }
    }

    println!("  {} categories, {} items", CATALOG.len(), items.len());

    println!();
    println!("Generating sales...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for sale_idx in 0..sales {
        let lines = generate_lines(&items, sale_idx);

        if let Err(e) = db.sales().create_sale(&lines).await {
            eprintln!("Failed to record sale #{}: {}", sale_idx, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} sales...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} sales in {:?}", generated, elapsed);

    println!();
    println!("Summary:");
    println!("  Categories:  {}", db.catalog().count_categories().await?);
    println!("  Items:       {}", db.items().count().await?);
    println!("  Sales:       {}", db.sales().count().await?);
    println!("  Units sold:  {}", db.sales().total_quantity_sold().await?);
    println!("  Revenue:     {}", db.sales().total_amount().await?);

    println!();
    println!("✓ Seed complete!");

    Ok(ExitCode::SUCCESS)
}

/// Reads `--sales`, `--db` and `--help`; anything else is a usage error.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut sales = DEFAULT_SALES;
    let mut db_path = DEFAULT_DB_PATH.to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sales" | "-s" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a number of sales"))?;
                sales = value
                    .parse()
                    .map_err(|_| format!("invalid value '{value}' for {arg}: expected a whole number"))?;
            }
            "--db" | "-d" => {
                db_path = args.next().ok_or_else(|| format!("{arg} requires a path"))?;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }

    Ok(Command::Seed { sales, db_path })
}

fn print_help() {
    println!("Tally POS Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --sales <N>    Number of sales to generate (default: {DEFAULT_SALES})");
    println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
    println!("  -h, --help         Show this help message");
}

/// Builds the lines of one sale from its index.
///
/// `items` holds `(item_id, price_cents)` pairs.
fn generate_lines(items: &[(i64, i64)], sale_idx: usize) -> Vec<NewSaleLine> {
    let line_count = 1 + (sale_idx * 7) % 4;

    (0..line_count)
        .map(|line_idx| {
            let mix = sale_idx * 31 + line_idx * 13;
            // Squaring skews picks toward the front of the catalog.
            let pick = (mix % items.len()) * (mix % items.len()) / items.len();
            let (item_id, unit_price) = items[pick];
            let quantity = 1 + ((mix * 5) % 3) as i64;

            NewSaleLine {
                item_id,
                quantity,
                price_cents: (Money::from_cents(unit_price) * quantity).cents(),
            }
        })
        .collect()
}
