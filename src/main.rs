mod config;
mod db;
mod error;
mod import;
mod logging;
mod models;
mod money;
mod planning;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let dirs = config::Dirs::discover()?;
    let config = config::Config::load_from(&dirs.config_dir)?;
    logging::init(&config.log_filter, &dirs.log_path());

    let db_path = config.resolve_db_path(&dirs.data_dir);
    let mut db = db::Database::open(&db_path)?;

    if args.len() > 1 {
        run::as_cli(&args, &mut db, &dirs, &config)
    } else {
        run::as_tui(&mut db)
    }
}
