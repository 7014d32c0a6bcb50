//! SmartEats
//!
//! An MCP server for nutrition profiles, meal logging and wellness tracking.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use smarteats::config::{self, DEFAULT_LOG_DIRECTIVE};
use smarteats::db::{migrations, Database};
use smarteats::mcp::SmartEatsService;
use smarteats::build_info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = config::database_path();
    tracing::info!(path = %db_path.display(), "opening database");
    config::ensure_parent_dir(&db_path)?;

    let database = Database::new(&db_path)?;
    database.with_conn(|conn| {
        migrations::run_migrations(conn)?;
        let version = migrations::get_schema_version(conn)?;
        tracing::info!(version, "database schema ready");
        Ok(())
    })?;

    let service = SmartEatsService::new(db_path, database);

    tracing::info!("serving MCP on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
