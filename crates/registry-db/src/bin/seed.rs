//! # Seed Data Generator
//!
//! Populates the database with demo students for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 students (default)
//! cargo run -p registry-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p registry-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p registry-db --bin seed -- --db ./data/registry.db
//! ```
//!
//! Each student has:
//! - Name picked from a fixed list
//! - Unique email: `{first}.{last}.{index}@example.edu`
//! - Date of birth between 1990 and 2005
//! - A status cycling through the vocabulary

use chrono::NaiveDate;
use std::env;
use registry_core::{NewStudent, StudentStatus};
use registry_db::{Database, DbConfig};

const FIRST_NAMES: &[&str] = &[
    "Ana", "Boris", "Daria", "Elena", "Fedor", "Galina", "Igor", "Irina", "Kirill", "Maria",
    "Nikita", "Olga", "Pavel", "Sofia", "Timur", "Vera",
];

const LAST_NAMES: &[&str] = &[
    "Lee", "Ivanova", "Petrov", "Smirnova", "Kuznetsov", "Popova", "Sokolov", "Lebedeva",
    "Kozlov", "Novikova", "Morozov", "Volkova",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./registry.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Student Registry Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of students to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./registry.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Student Registry Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Students: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let seeded = db.statuses().seed_status_table().await?;
    println!("✓ Status table ready ({} inserted)", seeded);

    let existing = db.students().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} students", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating students...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for index in 0..count {
        let student = generate_student(index)?;

        if let Err(e) = db.students().create(&student).await {
            eprintln!("Failed to insert {}: {}", student.email, e);
            continue;
        }

        generated += 1;
    }

    println!();
    println!("✓ Generated {} students in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Generates a single student with deterministic data.
fn generate_student(index: usize) -> Result<NewStudent, Box<dyn std::error::Error>> {
    let first_name = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last_name = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];

    let year = 1990 + (index % 16) as i32;
    let month = 1 + (index % 12) as u32;
    let day = 1 + (index % 28) as u32;
    let date_of_birth = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid generated date {year}-{month}-{day}"))?;

    let status = StudentStatus::ALL[index % StudentStatus::ALL.len()];

    Ok(NewStudent {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth,
        email: format!(
            "{}.{}.{}@example.edu",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            index
        ),
        status_code: status.code().to_string(),
    })
}
