// CSV export of employee records.

use crate::error::ExportError;
use crate::model::Employee;
use chrono::{DateTime, TimeZone};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// File written by `--export` when no name is given.
pub const AUTO_EXPORT_FILE: &str = "auto_export.csv";

/// Which rows an export covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFilter {
    All,
    Department(String),
    /// Salary greater than or equal to the value.
    MinSalary(i64),
    Ids(Vec<i64>),
}

/// `employees_export_YYYYMMDD_HHMMSS.csv` for the given instant.
pub fn default_export_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("employees_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write a header row followed by one row per employee. Returns the number
/// of data rows written.
pub fn write_csv<W: Write>(writer: W, employees: &[Employee]) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if employees.is_empty() {
        wtr.write_record(Employee::HEADERS)?;
    }
    for e in employees {
        wtr.serialize(e)?;
    }
    wtr.flush()?;
    Ok(employees.len())
}

/// Create (or truncate) `path` and write `employees` into it.
pub fn export_to_path(path: &Path, employees: &[Employee]) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    let n = write_csv(file, employees)?;
    info!("exported {n} rows to {}", path.display());
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EmployeeStore;
    use chrono::Utc;

    fn emp(id: i64, name: &str, salary: i64) -> Employee {
        Employee {
            id,
            name: name.into(),
            department: "IT".into(),
            position: "Dev, Backend".into(),
            salary,
        }
    }

    #[test]
    fn header_then_rows() {
        let mut buf = Vec::new();
        let n = write_csv(&mut buf, &[emp(1, "Ann Lee", 10), emp(2, "Bo Ray", 20)]).unwrap();
        assert_eq!(n, 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID,Name,Department,Position,Salary");
        // Embedded commas are quoted.
        assert_eq!(lines[1], "1,Ann Lee,IT,\"Dev, Backend\",10");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_export_still_has_header() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
        assert_eq!(String::from_utf8(buf).unwrap().trim_end(), "ID,Name,Department,Position,Salary");
    }

    #[test]
    fn exported_row_count_matches_store() {
        let store = EmployeeStore::open_in_memory().unwrap();
        store.seed_defaults().unwrap();
        let rows = store.select(&ExportFilter::All).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let n = export_to_path(&path, &rows).unwrap();
        assert_eq!(n as i64, store.count().unwrap());

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.records().count() as i64, store.count().unwrap());
    }

    #[test]
    fn default_name_uses_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(default_export_name(&at), "employees_export_20240309_070501.csv");
    }
}
