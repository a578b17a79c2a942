//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `flock_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use flock_core::db::migrations::latest_version;
use flock_core::db::open_db_in_memory;

fn main() {
    println!("flock_core ping={}", flock_core::ping());
    println!("flock_core version={}", flock_core::core_version());

    match open_db_in_memory() {
        Ok(_conn) => println!("flock_core schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("flock_core db bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
