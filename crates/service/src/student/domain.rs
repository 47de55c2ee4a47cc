use chrono::NaiveDate;
use models::student::StudentStatus;
use serde::{Deserialize, Serialize};

/// Wire representation of a student.
///
/// Every client-supplied field is optional so that missing values surface as
/// validation messages instead of deserialization errors. `id` is output-only:
/// it is never read from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<StudentStatus>,
    #[serde(default)]
    pub student_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_supplied_id_is_ignored() {
        let dto: StudentDto = serde_json::from_value(json!({
            "id": 99,
            "firstName": "John",
            "lastName": "Doe",
            "email": "john.doe@example.com",
            "dateOfBirth": "2000-01-01",
            "status": "ACTIVE",
            "studentId": "ST123456"
        }))
        .unwrap();
        assert_eq!(dto.id, None);
        assert_eq!(dto.first_name.as_deref(), Some("John"));
        assert_eq!(dto.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1));
        assert_eq!(dto.status, Some(StudentStatus::Active));
    }

    #[test]
    fn missing_and_null_fields_deserialize_as_none() {
        let dto: StudentDto = serde_json::from_value(json!({ "firstName": null })).unwrap();
        assert_eq!(dto, StudentDto::default());
    }

    #[test]
    fn out_of_enum_status_fails_deserialization() {
        let res: Result<StudentDto, _> = serde_json::from_value(json!({ "status": "EXPELLED" }));
        assert!(res.is_err());
    }

    #[test]
    fn serializes_camel_case_with_id() {
        let dto = StudentDto {
            id: Some(1),
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            email: Some("john.doe@example.com".into()),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
            status: Some(StudentStatus::Active),
            student_id: Some("ST123456".into()),
        };
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            v,
            json!({
                "id": 1,
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "dateOfBirth": "2000-01-01",
                "status": "ACTIVE",
                "studentId": "ST123456"
            })
        );
    }
}
