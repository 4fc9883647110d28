use clap::Parser;
use rusqlite::Connection;
use server::{cli::Cli, db, seed};
use shared::*;
use tracing::{debug, info};

fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing();

    let args = Cli::parse();
    debug!(?args);

    if args.debug_delete_database {
        db::delete_database(&args.sqlite_connection_string)?;
    }

    let ran = db::run_migrations(&args.sqlite_connection_string)?;
    info!("Ran {ran} db migrations");

    let mut conn = Connection::open(&args.sqlite_connection_string)?;
    db::run_pragmas(&conn)?;

    let summary = seed::seed_database(&mut conn)?;
    info!(?summary, "Database seeded");

    db::close_database(conn)?;

    Ok(())
}
