//! Mapping between the wire DTO and the persisted entity.

use models::student::{self, NewStudent};
use sea_orm::{ActiveValue::NotSet, Set};

use super::domain::StudentDto;

/// Entity -> DTO, all seven fields copied as-is.
pub fn to_record(m: student::Model) -> StudentDto {
    StudentDto {
        id: Some(m.id),
        first_name: Some(m.first_name),
        last_name: Some(m.last_name),
        email: Some(m.email),
        date_of_birth: Some(m.date_of_birth),
        status: Some(m.status),
        student_id: Some(m.student_id),
    }
}

/// Fresh active model for insert. The id is left unset so the store assigns it.
pub fn to_entity(new: NewStudent) -> student::ActiveModel {
    student::ActiveModel {
        id: NotSet,
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        email: Set(new.email),
        date_of_birth: Set(new.date_of_birth),
        status: Set(new.status),
        student_id: Set(new.student_id),
    }
}

/// Full replace of the mutable fields; the id is untouched.
pub fn overwrite(am: &mut student::ActiveModel, new: NewStudent) {
    am.first_name = Set(new.first_name);
    am.last_name = Set(new.last_name);
    am.email = Set(new.email);
    am.date_of_birth = Set(new.date_of_birth);
    am.status = Set(new.status);
    am.student_id = Set(new.student_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::student::StudentStatus;
    use sea_orm::{ActiveValue, IntoActiveModel};

    fn jane() -> NewStudent {
        NewStudent {
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane.smith@example.com".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 2, 15).unwrap(),
            status: StudentStatus::Active,
            student_id: "ST789012".into(),
        }
    }

    #[test]
    fn to_record_copies_everything() {
        let m = jane().with_id(7);
        let dto = to_record(m.clone());
        assert_eq!(dto.id, Some(7));
        assert_eq!(dto.first_name.as_deref(), Some("Jane"));
        assert_eq!(dto.last_name.as_deref(), Some("Smith"));
        assert_eq!(dto.email.as_deref(), Some("jane.smith@example.com"));
        assert_eq!(dto.date_of_birth, Some(m.date_of_birth));
        assert_eq!(dto.status, Some(StudentStatus::Active));
        assert_eq!(dto.student_id.as_deref(), Some("ST789012"));
    }

    #[test]
    fn to_entity_leaves_id_unset() {
        let am = to_entity(jane());
        assert!(matches!(am.id, ActiveValue::NotSet));
        assert_eq!(am.email, Set("jane.smith@example.com".to_string()));
        assert_eq!(am.status, Set(StudentStatus::Active));
    }

    #[test]
    fn overwrite_keeps_id_and_replaces_fields() {
        let mut am = jane().with_id(3).into_active_model();
        let replacement = NewStudent { status: StudentStatus::Graduated, first_name: "Janet".into(), ..jane() };
        overwrite(&mut am, replacement);
        assert_eq!(am.id, ActiveValue::Unchanged(3));
        assert_eq!(am.first_name, Set("Janet".to_string()));
        assert_eq!(am.status, Set(StudentStatus::Graduated));
    }
}
