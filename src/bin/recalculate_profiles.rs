//! Recalculate every stored nutrition profile from saved biometrics
//! Usage: cargo run --bin recalculate_profiles

use smarteats::config;
use smarteats::db::{migrations, Database};
use smarteats::tools::profiles::recalculate_all_profiles;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let db_path = config::database_path();
    println!("Database: {}", db_path.display());

    let database = Database::new(&db_path)?;
    database.with_conn(|conn| migrations::run_migrations(conn))?;

    let summary = recalculate_all_profiles(&database)?;

    println!("Users:     {}", summary.users);
    println!("Updated:   {}", summary.updated);
    println!("Unchanged: {}", summary.unchanged);
    println!("Invalid:   {}", summary.invalid);

    Ok(())
}
