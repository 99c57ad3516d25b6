// Command-line configuration.

use crate::export::AUTO_EXPORT_FILE;
use crate::store::DEFAULT_DB_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "employeeflow",
    version,
    about = "EmployeeFlow: employee management in the terminal"
)]
pub struct Cli {
    /// Path to the SQLite database file (created on first run).
    #[arg(long, env = "EMPLOYEEFLOW_DB", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Do not insert the sample employees into an empty database.
    #[arg(long)]
    pub no_seed: bool,

    /// Export all employees to CSV and exit, without logging in.
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = AUTO_EXPORT_FILE)]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["employeeflow"]).unwrap();
        assert!(!cli.no_seed);
        assert!(cli.export.is_none());
    }

    #[test]
    fn export_without_value_uses_auto_file() {
        let cli = Cli::try_parse_from(["employeeflow", "--export"]).unwrap();
        assert_eq!(cli.export, Some(PathBuf::from(AUTO_EXPORT_FILE)));
    }

    #[test]
    fn explicit_values() {
        let cli = Cli::try_parse_from([
            "employeeflow",
            "--db",
            "data/staff.db",
            "--no-seed",
            "--export",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("data/staff.db"));
        assert!(cli.no_seed);
        assert_eq!(cli.export, Some(PathBuf::from("out.csv")));
    }
}
