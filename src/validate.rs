// Input validation helpers. Every function trims its input and returns the
// cleaned value, so callers store exactly what was validated.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z .'-]{2,70}$").expect("name pattern"));
static DEPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 &_-]{1,40}$").expect("department pattern"));
static POSITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .,&'/-]{1,60}$").expect("position pattern"));

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let s = raw.trim();
    if NAME_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(ValidationError::Name)
    }
}

pub fn validate_department(raw: &str) -> Result<String, ValidationError> {
    let s = raw.trim();
    if DEPT_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(ValidationError::Department)
    }
}

pub fn validate_position(raw: &str) -> Result<String, ValidationError> {
    let s = raw.trim();
    if POSITION_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(ValidationError::Position)
    }
}

/// Parse a salary such as `50000` or `50,000`. Signs, decimals and anything
/// that is not an ASCII digit after removing commas are rejected.
pub fn parse_salary(raw: &str) -> Result<i64, ValidationError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    parse_digits(&cleaned).ok_or(ValidationError::Salary)
}

pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    parse_digits(raw.trim()).ok_or(ValidationError::Id)
}

/// Parse `1, 3,5` into ids. Entries that are not plain numbers are skipped;
/// an input with no usable id is an error.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::NoIds);
    }
    let ids: Vec<i64> = raw
        .split(',')
        .filter_map(|part| parse_digits(part.trim()))
        .collect();
    if ids.is_empty() {
        return Err(ValidationError::Id);
    }
    Ok(ids)
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(validate_name("  Albert Einstein "), Ok("Albert Einstein".into()));
        assert!(validate_name("O'Neil-Smith Jr.").is_ok());
        assert_eq!(validate_name("A"), Err(ValidationError::Name));
        assert_eq!(validate_name("   "), Err(ValidationError::Name));
        assert_eq!(validate_name("R2D2"), Err(ValidationError::Name));
        assert!(validate_name(&"a".repeat(71)).is_err());
    }

    #[test]
    fn departments() {
        assert_eq!(validate_department("R&D"), Ok("R&D".into()));
        assert!(validate_department("Ops_2 - East").is_ok());
        assert_eq!(validate_department(""), Err(ValidationError::Department));
        assert!(validate_department("Sales!").is_err());
        assert!(validate_department(&"x".repeat(41)).is_err());
    }

    #[test]
    fn positions() {
        assert!(validate_position("Data Analyst").is_ok());
        assert!(validate_position("Sr. Engineer, Backend/Infra").is_ok());
        assert_eq!(validate_position(" "), Err(ValidationError::Position));
        assert!(validate_position("CEO?").is_err());
    }

    #[test]
    fn salaries() {
        assert_eq!(parse_salary("50,000"), Ok(50_000));
        assert_eq!(parse_salary(" 0 "), Ok(0));
        assert_eq!(parse_salary("-5"), Err(ValidationError::Salary));
        assert_eq!(parse_salary("12.5"), Err(ValidationError::Salary));
        assert_eq!(parse_salary(""), Err(ValidationError::Salary));
        assert_eq!(parse_salary(","), Err(ValidationError::Salary));
        assert_eq!(parse_salary("99999999999999999999"), Err(ValidationError::Salary));
    }

    #[test]
    fn ids() {
        assert_eq!(parse_id("12"), Ok(12));
        assert_eq!(parse_id("+3"), Err(ValidationError::Id));
        assert_eq!(parse_id("abc"), Err(ValidationError::Id));
    }

    #[test]
    fn id_lists() {
        assert_eq!(parse_id_list("1, 3,5"), Ok(vec![1, 3, 5]));
        assert_eq!(parse_id_list("1,x,2"), Ok(vec![1, 2]));
        assert_eq!(parse_id_list("  "), Err(ValidationError::NoIds));
        assert_eq!(parse_id_list("a,b"), Err(ValidationError::Id));
    }
}
