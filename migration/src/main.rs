use common::config::Config;
use common::logger::init_logger;
use std::{fs, path::Path, process};

mod runner;

#[tokio::main]
async fn main() {
    let config = Config::init(".env");
    if let Err(err) = init_logger(&config.log_level, &config.log_file) {
        eprintln!("Failed to initialise logger: {err}");
    }
    let db_path = config.database_path.as_str();
    let url = config.database_url();

    let result = match std::env::args().nth(1).as_deref() {
        Some("clean") => {
            remove_db_file(db_path);
            Ok(())
        }
        Some("fresh") => {
            remove_db_file(db_path);
            create_db_dir(db_path);
            runner::run_all_migrations(&url).await
        }
        Some("down") => runner::rollback_all_migrations(&url).await,
        _ => {
            create_db_dir(db_path);
            runner::run_all_migrations(&url).await
        }
    };

    if let Err(err) = result {
        eprintln!("Migration failed: {err}");
        process::exit(1);
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("DB file does not exist: {}", db_path.display());
        return;
    }
    match fs::remove_file(db_path) {
        Ok(()) => println!("Deleted DB: {}", db_path.display()),
        Err(err) => eprintln!("Failed to delete {}: {err}", db_path.display()),
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Failed to create DB directory {}: {err}", parent.display());
        }
    }
}
