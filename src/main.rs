// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, open the store, then either run a
//   one-shot export or hand the store to the interactive menu.
// - Returns `anyhow::Result` so startup errors are reported with context.

use anyhow::Context;
use clap::Parser;
use employeeflow::{config::Cli, store::EmployeeStore, ui};
use log::info;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; keep them quiet unless RUST_LOG asks for more.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = EmployeeStore::open(&cli.db)
        .with_context(|| format!("opening database {}", cli.db.display()))?;

    if !cli.no_seed {
        if store.seed_defaults()? > 0 {
            ui::success("Default Employee Data Added Successfully!");
        } else {
            info!("employee data already exists, skipping seed");
        }
    }
    store.remove_duplicates()?;

    if let Some(file) = cli.export {
        return ui::export_all(&store, &file);
    }

    ui::ensure_admin(&store)?;
    if !ui::login(&store)? {
        ui::failure("Exiting due to failed login.");
        std::process::exit(1);
    }

    ui::main_menu(&store)
}
