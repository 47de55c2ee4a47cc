use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub date_of_birth: Date,
    pub status: StudentStatus,
    pub student_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Enrollment status, stored as its upper-case name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    #[sea_orm(string_value = "GRADUATED")]
    Graduated,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 4] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Graduated,
        StudentStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Inactive => "INACTIVE",
            StudentStatus::Graduated => "GRADUATED",
            StudentStatus::Suspended => "SUSPENDED",
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six mutable fields of a student. Carries no id: ids are only ever
/// assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Date,
    pub status: StudentStatus,
    pub student_id: String,
}

impl NewStudent {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: i64) -> Model {
        Model {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            status: self.status,
            student_id: self.student_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn status_wire_and_db_values_match() {
        for status in StudentStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().to_string()));
            assert_eq!(status.to_value(), status.as_str());
        }
    }

    #[test]
    fn unknown_status_is_rejected_by_serde() {
        let parsed: Result<StudentStatus, _> = serde_json::from_str("\"EXPELLED\"");
        assert!(parsed.is_err());
        let parsed: StudentStatus = serde_json::from_str("\"GRADUATED\"").unwrap();
        assert_eq!(parsed, StudentStatus::Graduated);
    }

    #[test]
    fn with_id_keeps_fields() {
        let new = NewStudent {
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane.smith@example.com".into(),
            date_of_birth: Date::from_ymd_opt(2001, 2, 15).unwrap(),
            status: StudentStatus::Active,
            student_id: "ST789012".into(),
        };
        let m = new.clone().with_id(2);
        assert_eq!(m.id, 2);
        assert_eq!(m.email, new.email);
        assert_eq!(m.student_id, new.student_id);
    }
}
