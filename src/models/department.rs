use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct NewDepartment {
    // Counted in characters, matching `VARCHAR(10)`.
    #[validate(length(min = 1, max = 10), custom = "validate_name")]
    pub name: String,
}

/// Body of `PUT /depts` and `PUT /depts/{id}`.
///
/// `PUT /depts` requires `id`. On `PUT /depts/{id}` it may be omitted, but
/// if present it must equal the path id.
#[derive(Deserialize, Validate, Debug)]
pub struct DepartmentUpdate {
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 10), custom = "validate_name")]
    pub name: String,
}

fn name_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(name_error("blank", "Name must not be blank"));
    }
    // Postgres text cannot hold NUL.
    if name.chars().any(char::is_control) {
        return Err(name_error("control_character", "Name must not contain control characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let now = Utc::now();
        let dept = Department {
            id: 7,
            name: "ops".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&dept).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "ops");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn name_length_is_bounded() {
        assert!(NewDepartment { name: "finance".into() }.validate().is_ok());
        assert!(NewDepartment { name: "".into() }.validate().is_err());
        assert!(NewDepartment { name: "   ".into() }.validate().is_err());
        assert!(NewDepartment { name: "x".repeat(11) }.validate().is_err());
        assert!(NewDepartment { name: "a\0b".into() }.validate().is_err());
        assert!(NewDepartment { name: "a\tb".into() }.validate().is_err());
        // Length is counted in characters, not bytes.
        assert!(NewDepartment { name: "研发部研发部研发部研".into() }.validate().is_ok());
    }

    #[test]
    fn blank_name_reports_code_and_message() {
        let errors = NewDepartment { name: " ".into() }.validate().unwrap_err();
        let fields = errors.field_errors();
        let blank = fields["name"].iter().find(|e| e.code == "blank").unwrap();
        assert_eq!(blank.message.as_deref(), Some("Name must not be blank"));
    }
}
