// UI layer: the interactive menu and one small function per operation.
// Prompts use `dialoguer`; every database call goes through `EmployeeStore`.
// Invalid input prints a message and returns to the menu.

use crate::auth::{check_password_policy, Credentials, DEFAULT_ITERATIONS};
use crate::error::StoreError;
use crate::export::{default_export_name, export_to_path, ExportFilter};
use crate::model::{Employee, EmployeeUpdate, NewEmployee, SortKey};
use crate::store::EmployeeStore;
use crate::table::render_grid;
use crate::validate::{
    parse_id, parse_id_list, parse_salary, validate_department, validate_name, validate_position,
};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MENU: [&str; 11] = [
    "1. Add New Employee",
    "2. View All Employees",
    "3. Search Employees by Department",
    "4. Count Employees Per Department",
    "5. Show Employees With Salary Above",
    "6. Sort Employees By Name And Salary",
    "7. Update Employee",
    "8. Delete An Employee Record",
    "9. Average Salary Per Department",
    "10. Export Employees to CSV",
    "11. Exit",
];

pub fn heading(text: &str) {
    println!("\n{}", format!("=== {text} ===").as_str().cyan().bold());
}

pub fn success(text: &str) {
    println!("{}", text.green());
}

pub fn failure(text: &str) {
    println!("{}", text.red());
}

pub fn notice(text: &str) {
    println!("{}", text.yellow());
}

/// Main interactive menu. Runs until the operator picks "Exit".
///
/// A failing operation (for example a database error) is reported and the
/// menu is shown again; only prompt I/O errors end the loop.
pub fn main_menu(store: &EmployeeStore) -> Result<()> {
    loop {
        heading("EMPLOYEE MANAGEMENT SYSTEM");
        let choice = Select::new()
            .with_prompt("Enter Choice")
            .items(&MENU)
            .default(0)
            .interact()?;
        let outcome = match choice {
            0 => add_employee(store),
            1 => view_all(store),
            2 => search_department(store),
            3 => count_by_department(store),
            4 => salary_above(store),
            5 => sort_employees(store),
            6 => update_employee(store),
            7 => delete_employee(store),
            8 => average_salary(store),
            9 => export_employees(store),
            _ => {
                println!("{}", "Exiting... Goodbye Admin!".blue());
                break;
            }
        };
        if let Err(e) = outcome {
            warn!("operation failed: {e:#}");
            failure(&format!("[Error] {e:#}"));
        }
    }
    Ok(())
}

/// Prompt for a first admin account when none exists yet.
pub fn ensure_admin(store: &EmployeeStore) -> Result<()> {
    if store.admin_exists()? {
        return Ok(());
    }
    notice("No admin account found. Please set one now.");
    set_admin_password(store)
}

pub fn set_admin_password(store: &EmployeeStore) -> Result<()> {
    heading("Set Admin Password");
    let username: String = Input::new()
        .with_prompt("Admin username")
        .default("admin".to_string())
        .interact_text()?;
    let username = username.trim().to_string();
    loop {
        let password = Password::new()
            .with_prompt("Enter new password")
            .with_confirmation("Confirm password", "Passwords do not match, try again.")
            .interact()?;
        if let Err(msg) = check_password_policy(&password) {
            failure(msg);
            continue;
        }
        let creds = Credentials::derive(&password, DEFAULT_ITERATIONS);
        store
            .set_admin(&username, &creds)
            .context("saving admin credentials")?;
        success("Admin password set.");
        return Ok(());
    }
}

/// Ask for credentials once. Returns whether they were accepted.
pub fn login(store: &EmployeeStore) -> Result<bool> {
    heading("Admin Login");
    let username: String = Input::new().with_prompt("Admin username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    let Some(creds) = store.admin_credentials(username.trim())? else {
        failure("Unknown admin username.");
        return Ok(false);
    };
    if creds.verify(&password) {
        success("\n--- Welcome back Admin! ---");
        Ok(true)
    } else {
        failure("\nWrong Credentials!");
        Ok(false)
    }
}

/// Export every employee to `file` without prompting (the `--export` mode).
pub fn export_all(store: &EmployeeStore, file: &Path) -> Result<()> {
    let rows = store.list(None)?;
    if rows.is_empty() {
        failure("No rows to export.");
        return Ok(());
    }
    let n = export_to_path(file, &rows)
        .with_context(|| format!("writing {}", file.display()))?;
    success(&format!("Exported {n} rows to '{}'.", display_abs(file)));
    Ok(())
}

fn ask(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn print_employees(rows: &[Employee], empty_msg: &str) {
    if rows.is_empty() {
        failure(empty_msg);
        return;
    }
    let cells: Vec<Vec<String>> = rows.iter().map(Employee::cells).collect();
    print!("{}", render_grid(&Employee::HEADERS, &cells));
}

fn add_employee(store: &EmployeeStore) -> Result<()> {
    heading("Add Employee");
    let name = match validate_name(&ask("Enter Name")?) {
        Ok(v) => v,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    let department = match validate_department(&ask("Enter Department")?) {
        Ok(v) => v,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    let position = match validate_position(&ask("Enter Position")?) {
        Ok(v) => v,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    let salary = match parse_salary(&ask("Enter Salary (integer)")?) {
        Ok(v) => v,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    let new = NewEmployee {
        name,
        department,
        position,
        salary,
    };
    match store.add(&new) {
        Ok(e) => success(&format!("\nEmployee '{}' added successfully! (ID {})", e.name, e.id)),
        Err(dup @ StoreError::Duplicate { .. }) => failure(&format!("\n{dup}")),
        Err(other) => return Err(other).context("adding employee"),
    }
    Ok(())
}

fn view_all(store: &EmployeeStore) -> Result<()> {
    heading("View All Employees");
    print_employees(&store.list(None)?, "No records found.");
    Ok(())
}

fn search_department(store: &EmployeeStore) -> Result<()> {
    heading("Search Employees By Department");
    let dept = match validate_department(&ask("Enter Department, e.g. 'HR'")?) {
        Ok(v) => v,
        Err(_) => {
            failure("Invalid department input.");
            return Ok(());
        }
    };
    print_employees(
        &store.by_department(&dept)?,
        "No Employees found in that department!",
    );
    Ok(())
}

fn count_by_department(store: &EmployeeStore) -> Result<()> {
    heading("Count Employees Per Department");
    let rows: Vec<Vec<String>> = store
        .count_by_department()?
        .into_iter()
        .map(|c| vec![c.department, c.count.to_string()])
        .collect();
    if rows.is_empty() {
        failure("No Employees found!");
    } else {
        print!("{}", render_grid(&["Department", "Employee Count"], &rows));
    }
    Ok(())
}

fn salary_above(store: &EmployeeStore) -> Result<()> {
    heading("Show Employees With Salary Over X");
    let min = match parse_salary(&ask("Enter Salary (integer)")?) {
        Ok(v) => v,
        Err(_) => {
            failure("Invalid salary input.");
            return Ok(());
        }
    };
    print_employees(&store.salary_at_least(min)?, "No Salary Matches!");
    Ok(())
}

fn sort_employees(store: &EmployeeStore) -> Result<()> {
    heading("Sort Employees By Name or Salary");
    let choice = Select::new()
        .with_prompt("Sort by")
        .items(&["1. Name", "2. Salary", "3. Back"])
        .default(0)
        .interact()?;
    let key = match choice {
        0 => SortKey::Name,
        1 => SortKey::Salary,
        _ => return Ok(()),
    };
    print_employees(&store.list(Some(key))?, "No records found.");
    Ok(())
}

fn update_employee(store: &EmployeeStore) -> Result<()> {
    heading("Update Employee");
    let id = match parse_id(&ask("Enter Employee ID to update")?) {
        Ok(v) => v,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    let Some(current) = store.get(id)? else {
        failure("Employee not found.");
        return Ok(());
    };
    print_employees(std::slice::from_ref(&current), "");
    println!("Leave field empty to keep current value.");

    let mut update = EmployeeUpdate::default();
    let raw = ask("New name")?;
    if !raw.is_empty() {
        match validate_name(&raw) {
            Ok(v) => update.name = Some(v),
            Err(_) => {
                failure("Invalid name format.");
                return Ok(());
            }
        }
    }
    let raw = ask("New department")?;
    if !raw.is_empty() {
        match validate_department(&raw) {
            Ok(v) => update.department = Some(v),
            Err(_) => {
                failure("Invalid department.");
                return Ok(());
            }
        }
    }
    let raw = ask("New position")?;
    if !raw.is_empty() {
        match validate_position(&raw) {
            Ok(v) => update.position = Some(v),
            Err(_) => {
                failure("Invalid position.");
                return Ok(());
            }
        }
    }
    let raw = ask("New salary")?;
    if !raw.is_empty() {
        match parse_salary(&raw) {
            Ok(v) => update.salary = Some(v),
            Err(_) => {
                failure("Invalid salary.");
                return Ok(());
            }
        }
    }
    if update.is_empty() {
        notice("Nothing to change.");
        return Ok(());
    }

    match store.update(id, &update) {
        Ok(Some(_)) => success("Employee updated successfully."),
        Ok(None) => failure("Employee not found."),
        Err(dup @ StoreError::Duplicate { .. }) => failure(&dup.to_string()),
        Err(other) => return Err(other).context("updating employee"),
    }
    Ok(())
}

fn delete_employee(store: &EmployeeStore) -> Result<()> {
    println!("\n{}", "=== Delete An Employee From The Database ===".red().bold());
    let id = match parse_id(&ask("Enter Employee ID To Delete")?) {
        Ok(v) => v,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    let Some(current) = store.get(id)? else {
        notice("No employee with that ID, nothing deleted.");
        return Ok(());
    };
    print_employees(std::slice::from_ref(&current), "");
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete '{}' permanently?", current.name))
        .default(false)
        .interact()?;
    if !confirmed {
        notice("Delete cancelled.");
        return Ok(());
    }
    if store.delete(id)? {
        success("Employee deleted!");
    } else {
        notice("Employee was already gone.");
    }
    Ok(())
}

fn average_salary(store: &EmployeeStore) -> Result<()> {
    heading("Average Salary Per Department");
    let rows: Vec<Vec<String>> = store
        .average_salary_by_department()?
        .into_iter()
        .map(|a| {
            vec![
                a.department,
                format!("{:.2}", a.average_salary),
                a.count.to_string(),
            ]
        })
        .collect();
    if rows.is_empty() {
        failure("No data available.");
    } else {
        print!(
            "{}",
            render_grid(&["Department", "Average Salary", "Employee Count"], &rows)
        );
    }
    Ok(())
}

/// Interactive CSV export: choose a filter, a file name, then write.
fn export_employees(store: &EmployeeStore) -> Result<()> {
    heading("Export Employees To CSV");
    let choice = Select::new()
        .with_prompt("Choose export type")
        .items(&[
            "1) All",
            "2) By department",
            "3) Salary >= X",
            "4) Specific IDs (comma-separated)",
            "5) Back",
        ])
        .default(0)
        .interact()?;
    let filter = match choice {
        0 => ExportFilter::All,
        1 => match validate_department(&ask("Enter department")?) {
            Ok(d) => ExportFilter::Department(d),
            Err(e) => {
                failure(&e.to_string());
                return Ok(());
            }
        },
        2 => match parse_salary(&ask("Enter minimum salary")?) {
            Ok(min) => ExportFilter::MinSalary(min),
            Err(_) => {
                failure("Invalid salary.");
                return Ok(());
            }
        },
        3 => match parse_id_list(&ask("Enter IDs (e.g. 1,3,5)")?) {
            Ok(ids) => ExportFilter::Ids(ids),
            Err(e) => {
                failure(&e.to_string());
                return Ok(());
            }
        },
        _ => return Ok(()),
    };

    let rows = store.select(&filter)?;
    if rows.is_empty() {
        failure("No records found, nothing to export.");
        return Ok(());
    }

    let default_name = default_export_name(&chrono::Local::now());
    let filename: String = Input::new()
        .with_prompt("Enter filename")
        .default(default_name)
        .interact_text()?;
    let path = PathBuf::from(filename.trim());
    if path.exists() {
        let overwrite = Confirm::new()
            .with_prompt("File exists. Overwrite?")
            .default(false)
            .interact()?;
        if !overwrite {
            notice("Export cancelled.");
            return Ok(());
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Writing CSV...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    let written = export_to_path(&path, &rows);
    spinner.finish_and_clear();

    let n = written.with_context(|| format!("writing {}", path.display()))?;
    success(&format!("Exported {n} rows to '{}'.", display_abs(&path)));
    Ok(())
}

fn display_abs(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
