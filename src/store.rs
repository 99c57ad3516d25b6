// Storage module: owns the SQLite connection and every statement the tool
// runs. The UI never builds SQL itself; it calls one method per operation.

use crate::auth::Credentials;
use crate::error::{StoreError, StoreResult};
use crate::export::ExportFilter;
use crate::model::{
    DepartmentAverage, DepartmentCount, Employee, EmployeeUpdate, NewEmployee, SortKey,
};
use log::{debug, info};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DB_FILE: &str = "Employees.db";
pub const IN_MEMORY: &str = ":memory:";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    department TEXT NOT NULL,
    position TEXT NOT NULL,
    salary INTEGER NOT NULL,
    UNIQUE(name, department)
);
CREATE TABLE IF NOT EXISTS Admins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    salt TEXT NOT NULL,
    passhash TEXT NOT NULL,
    iterations INTEGER NOT NULL DEFAULT 150000
);
";

const SELECT_EMPLOYEES: &str = "SELECT id, name, department, position, salary FROM Employees";

/// Sample rows inserted on first run unless seeding is disabled.
const SEED: [(&str, &str, &str, i64); 10] = [
    ("Albert Einstein", "IT", "Manager", 55_000),
    ("Segio Abar", "Finance", "Manager", 50_000),
    ("Paul Skywalker", "IT", "Developer", 35_000),
    ("John Smith", "IT", "Director", 80_000),
    ("Michael Sheen", "Health", "Administrator", 20_000),
    ("Muhammed Ashar", "IT", "Data Analyst", 40_000),
    ("Malcom Mayer", "Health", "Data Analyst", 40_000),
    ("Bumpy Jay", "Finance", "Accountant", 80_000),
    ("Ryan Booth", "Finance", "Director", 50_000),
    ("James Reece", "IT", "PS", 90_000),
];

/// Handle to the employee database. One connection is held for the whole
/// session.
pub struct EmployeeStore {
    conn: Connection,
}

impl EmployeeStore {
    /// Open (or create) the database at `path` and make sure the tables
    /// exist. `":memory:"` gives a throwaway database.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = if path.as_os_str() == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    std::fs::create_dir_all(dir)?;
                }
            }
            Connection::open(path)?
        };
        conn.busy_timeout(Duration::from_secs(10))?;
        conn.execute_batch(SCHEMA)?;
        debug!("opened employee database at {}", path.display());
        Ok(EmployeeStore { conn })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(IN_MEMORY)
    }

    /// Insert the sample employees if the table is empty. Returns the number
    /// of rows inserted (zero when data already exists).
    pub fn seed_defaults(&self) -> StoreResult<usize> {
        if self.count()? > 0 {
            debug!("employee table not empty, skipping seed");
            return Ok(0);
        }
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO Employees (name, department, position, salary) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (name, department, position, salary) in SEED {
                inserted += stmt.execute(params![name, department, position, salary])?;
            }
        }
        tx.commit()?;
        info!("seeded {inserted} sample employees");
        Ok(inserted)
    }

    /// Delete rows that repeat a (name, department) pair, keeping the lowest
    /// id of each group.
    pub fn remove_duplicates(&self) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM Employees WHERE id NOT IN (
                SELECT MIN(id) FROM Employees GROUP BY name, department
            )",
            [],
        )?;
        if removed > 0 {
            info!("removed {removed} duplicate employee rows");
        }
        Ok(removed)
    }

    pub fn add(&self, new: &NewEmployee) -> StoreResult<Employee> {
        let exists: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM Employees WHERE name = ?1 AND department = ?2",
                params![new.name, new.department],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(duplicate(&new.name, &new.department));
        }
        self.conn
            .execute(
                "INSERT INTO Employees (name, department, position, salary) VALUES (?1, ?2, ?3, ?4)",
                params![new.name, new.department, new.position, new.salary],
            )
            .map_err(|e| map_constraint(e, &new.name, &new.department))?;
        let id = self.conn.last_insert_rowid();
        debug!("inserted employee {id}");
        Ok(Employee {
            id,
            name: new.name.clone(),
            department: new.department.clone(),
            position: new.position.clone(),
            salary: new.salary,
        })
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<Employee>> {
        let sql = format!("{SELECT_EMPLOYEES} WHERE id = ?1");
        Ok(self.conn.query_row(&sql, [id], employee_from_row).optional()?)
    }

    /// All employees, by id unless a sort key is given.
    pub fn list(&self, sort: Option<SortKey>) -> StoreResult<Vec<Employee>> {
        let order = match sort {
            None => "id ASC",
            Some(SortKey::Name) => "name ASC",
            Some(SortKey::Salary) => "salary DESC",
        };
        self.query(&format!("{SELECT_EMPLOYEES} ORDER BY {order}"), [])
    }

    pub fn by_department(&self, department: &str) -> StoreResult<Vec<Employee>> {
        self.query(
            &format!("{SELECT_EMPLOYEES} WHERE department = ?1 ORDER BY id"),
            [department],
        )
    }

    pub fn salary_at_least(&self, min: i64) -> StoreResult<Vec<Employee>> {
        self.query(
            &format!("{SELECT_EMPLOYEES} WHERE salary >= ?1 ORDER BY id"),
            [min],
        )
    }

    pub fn by_ids(&self, ids: &[i64]) -> StoreResult<Vec<Employee>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(",");
        self.query(
            &format!("{SELECT_EMPLOYEES} WHERE id IN ({placeholders}) ORDER BY id"),
            params_from_iter(ids.iter()),
        )
    }

    /// Rows matching an export filter.
    pub fn select(&self, filter: &ExportFilter) -> StoreResult<Vec<Employee>> {
        match filter {
            ExportFilter::All => self.list(None),
            ExportFilter::Department(d) => self.by_department(d),
            ExportFilter::MinSalary(min) => self.salary_at_least(*min),
            ExportFilter::Ids(ids) => self.by_ids(ids),
        }
    }

    /// Apply `update` to employee `id`. Returns the stored record, or `None`
    /// if no employee has that id.
    pub fn update(&self, id: i64, update: &EmployeeUpdate) -> StoreResult<Option<Employee>> {
        let Some(current) = self.get(id)? else {
            return Ok(None);
        };
        let next = update.apply(&current);
        self.conn
            .execute(
                "UPDATE Employees SET name = ?1, department = ?2, position = ?3, salary = ?4 WHERE id = ?5",
                params![next.name, next.department, next.position, next.salary, id],
            )
            .map_err(|e| map_constraint(e, &next.name, &next.department))?;
        debug!("updated employee {id}");
        Ok(Some(next))
    }

    /// Remove employee `id`. Returns whether a row was deleted; a missing id
    /// is not an error.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let n = self.conn.execute("DELETE FROM Employees WHERE id = ?1", [id])?;
        debug!("delete employee {id}: {n} row(s)");
        Ok(n > 0)
    }

    pub fn count(&self) -> StoreResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM Employees", [], |r| r.get(0))?)
    }

    pub fn count_by_department(&self) -> StoreResult<Vec<DepartmentCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT department, COUNT(*) FROM Employees GROUP BY department ORDER BY department",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(DepartmentCount {
                department: r.get(0)?,
                count: r.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn average_salary_by_department(&self) -> StoreResult<Vec<DepartmentAverage>> {
        let mut stmt = self.conn.prepare(
            "SELECT department, ROUND(AVG(salary), 2), COUNT(*) FROM Employees
             GROUP BY department ORDER BY department",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(DepartmentAverage {
                department: r.get(0)?,
                average_salary: r.get(1)?,
                count: r.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn admin_exists(&self) -> StoreResult<bool> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Admins", [], |r| r.get(0))?;
        Ok(n > 0)
    }

    /// Create the admin account or replace its password.
    pub fn set_admin(&self, username: &str, creds: &Credentials) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO Admins (username, salt, passhash, iterations) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(username) DO UPDATE SET
                salt = excluded.salt,
                passhash = excluded.passhash,
                iterations = excluded.iterations",
            params![username, creds.salt_b64(), creds.key_b64(), creds.iterations],
        )?;
        info!("admin credentials stored for '{username}'");
        Ok(())
    }

    pub fn admin_credentials(&self, username: &str) -> StoreResult<Option<Credentials>> {
        let row: Option<(String, String, u32)> = self
            .conn
            .query_row(
                "SELECT salt, passhash, iterations FROM Admins WHERE username = ?1",
                [username],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .optional()?;
        match row {
            None => Ok(None),
            Some((salt, key, iterations)) => Credentials::from_b64(&salt, &key, iterations)
                .map(Some)
                .ok_or(StoreError::CorruptCredentials),
        }
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> StoreResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, employee_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn employee_from_row(r: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: r.get(0)?,
        name: r.get(1)?,
        department: r.get(2)?,
        position: r.get(3)?,
        salary: r.get(4)?,
    })
}

fn duplicate(name: &str, department: &str) -> StoreError {
    StoreError::Duplicate {
        name: name.to_string(),
        department: department.to_string(),
    }
}

fn map_constraint(err: rusqlite::Error, name: &str, department: &str) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            duplicate(name, department)
        }
        _ => StoreError::Sqlite(err),
    }
}
