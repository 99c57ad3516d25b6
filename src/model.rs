// Data shapes shared by the store, the exporter and the UI.

use serde::Serialize;

/// One staff member as stored in the `Employees` table. Field renames give
/// the CSV header row (`ID,Name,Department,Position,Salary`).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Salary")]
    pub salary: i64,
}

impl Employee {
    pub const HEADERS: [&'static str; 5] = ["ID", "Name", "Department", "Position", "Salary"];

    /// Cells in header order, for the table renderer.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.department.clone(),
            self.position.clone(),
            self.salary.to_string(),
        ]
    }
}

/// Payload for inserting a record; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub position: String,
    pub salary: i64,
}

/// Partial update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<i64>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.salary.is_none()
    }

    /// Merge this update over `current`, returning the record to write.
    pub fn apply(&self, current: &Employee) -> Employee {
        Employee {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            department: self
                .department
                .clone()
                .unwrap_or_else(|| current.department.clone()),
            position: self
                .position
                .clone()
                .unwrap_or_else(|| current.position.clone()),
            salary: self.salary.unwrap_or(current.salary),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentAverage {
    pub department: String,
    /// Rounded to two decimal places.
    pub average_salary: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical, ascending.
    Name,
    /// Highest paid first.
    Salary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: 7,
            name: "Ada Lovelace".into(),
            department: "IT".into(),
            position: "Developer".into(),
            salary: 42_000,
        }
    }

    #[test]
    fn apply_changes_only_given_fields() {
        let update = EmployeeUpdate {
            salary: Some(50_000),
            ..Default::default()
        };
        let merged = update.apply(&sample());
        assert_eq!(merged.salary, 50_000);
        assert_eq!(merged.name, "Ada Lovelace");
        assert_eq!(merged.department, "IT");
        assert_eq!(merged.position, "Developer");
        assert_eq!(merged.id, 7);
    }

    #[test]
    fn empty_update_is_identity() {
        let update = EmployeeUpdate::default();
        assert!(update.is_empty());
        assert_eq!(update.apply(&sample()), sample());
    }

    #[test]
    fn cells_follow_header_order() {
        let cells = sample().cells();
        assert_eq!(cells.len(), Employee::HEADERS.len());
        assert_eq!(cells[0], "7");
        assert_eq!(cells[4], "42000");
    }
}
