//! # Seed Data Generator
//!
//! Populates the database with sample clients, invoices and estimates for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p facture-store --bin seed
//!
//! # Specify database path
//! cargo run -p facture-store --bin seed -- --db ./data/facture.db
//! ```
//!
//! ## Generated Data
//! - A handful of address-book clients
//! - Invoices numbered through the real numbering engine (INV-2025-001, ...)
//! - One invoice already paid, to exercise the remaining-amount path
//! - Pending estimates (EST-2025-001, ...), one converted to an invoice

use chrono::{Datelike, Duration, TimeZone, Utc};
use std::env;
use tracing_subscriber::EnvFilter;

use facture_core::numbering::{next_number, resolve_number, DocumentKind};
use facture_core::{
    Client, ClientSnapshot, Estimate, Invoice, LineItem, Money, PaymentMethod, Quantity, TaxPolicy,
    TransactionResult, TransactionStatus,
};
use facture_store::{Database, DbConfig, Repository};

/// Sample clients seeded into the address book.
const CLIENTS: &[(&str, &str, &str)] = &[
    ("John Smith", "john.smith@example.com", "Smith Consulting"),
    ("Sarah Johnson", "sarah@johnsondesign.com", "Johnson Design Co"),
    ("Acme Corporation", "billing@acme.example", "Acme Corporation"),
    ("New Client Corp", "accounts@newclient.example", "New Client Corp"),
];

/// (description, quantity in milli-units, unit price in cents) per invoice.
const INVOICE_LINES: &[&[(&str, i64, i64)]] = &[
    &[
        ("Web Development Services", 40_000, 25_000),
        ("UI/UX Design", 20_000, 12_500),
    ],
    &[("Consulting Hours", 2_500, 12_500)],
    &[
        ("Logo Design", 1_000, 80_000),
        ("Brand Guidelines", 1_000, 45_000),
        ("Business Cards", 500, 15_000),
    ],
];

const ESTIMATE_LINES: &[&[(&str, i64, i64)]] = &[
    &[
        ("Website Development", 30_000, 25_000),
        ("SEO Services", 10_000, 10_000),
    ],
    &[("Annual Maintenance Contract", 12_000, 9_900)],
];

fn build_items(lines: &[(&str, i64, i64)]) -> Result<Vec<LineItem>, facture_core::CoreError> {
    lines
        .iter()
        .map(|(description, qty_milli, price_cents)| {
            LineItem::new(
                *description,
                Quantity::from_milli(*qty_milli),
                Money::from_cents(*price_cents),
            )
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./facture_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Facture Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./facture_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Facture Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let store = db.store();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to double-seed
    let existing: Vec<Invoice> = store.list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} invoices", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let policy = TaxPolicy::default();
    let today = Utc
        .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .ok_or("invalid seed date")?;

    // Clients
    let mut clients = Vec::new();
    for (name, email, company) in CLIENTS {
        let mut client = Client::new(*name);
        client.email = (*email).to_string();
        client.company = (*company).to_string();
        store.put(&client).await?;
        clients.push(client);
    }
    println!("✓ Seeded {} clients", clients.len());

    // Invoices, numbered through the real engine over what's stored so far
    for (offset, lines) in INVOICE_LINES.iter().enumerate() {
        let stored: Vec<Invoice> = store.list().await?;
        let generated = next_number(
            DocumentKind::Invoice,
            stored.iter().map(|i| i.number()),
            today.year(),
        );

        let date = today + Duration::days(offset as i64);
        let client = &clients[offset % clients.len()];
        let invoice = Invoice::new(
            // A blank user field falls back to the generated number
            &resolve_number("", &generated),
            ClientSnapshot::from_client(client),
            build_items(lines)?,
            &policy,
            date,
            None,
            "Thank you for your business!",
        )?;
        store.put(&invoice).await?;
        println!(
            "  {} → {} ({})",
            invoice.number(),
            invoice.client().name,
            invoice.total()
        );
    }

    // Settle the second invoice through the transaction path so a ledger
    // Payment record lands in the store as well
    let invoices: Vec<Invoice> = store.list().await?;
    if let Some(mut paid) = invoices
        .into_iter()
        .find(|i| i.number() == "INV-2025-002")
    {
        let result = TransactionResult {
            status: TransactionStatus::Success,
            amount: paid.total(),
            timestamp: today + Duration::days(10),
            reference: "SEED-TXN-001".to_string(),
        };
        let payment = paid.apply_transaction(PaymentMethod::BankTransfer, &result)?;
        store.put(&paid).await?;
        store.put(&payment).await?;
        println!("✓ Recorded payment on {}", paid.number());
    }

    // Estimates
    for (offset, lines) in ESTIMATE_LINES.iter().enumerate() {
        let stored: Vec<Estimate> = store.list().await?;
        let number = next_number(
            DocumentKind::Estimate,
            stored.iter().map(|e| e.number()),
            today.year(),
        );

        let estimate = Estimate::new(
            &number,
            ClientSnapshot::from_client(&clients[3]),
            build_items(lines)?,
            &policy,
            today + Duration::days(offset as i64),
            None,
            "Valid for 30 days",
        )?;
        store.put(&estimate).await?;
        println!(
            "  {} → {} ({})",
            estimate.number(),
            estimate.client().name,
            estimate.total()
        );
    }

    // Approve the first estimate and convert it
    let estimates: Vec<Estimate> = store.list().await?;
    if let Some(mut approved) = estimates
        .into_iter()
        .find(|e| e.number() == "EST-2025-001")
    {
        approved.approve()?;
        store.put(&approved).await?;

        let invoices: Vec<Invoice> = store.list().await?;
        let converted = approved.convert_to_invoice(
            invoices.iter().map(|i| i.number()),
            today + Duration::days(5),
            None,
        );
        store.put(&converted).await?;
        println!(
            "✓ Converted {} → {} ({})",
            approved.number(),
            converted.number(),
            converted.total()
        );
    }

    println!();
    println!("✓ Seed complete");
    Ok(())
}
