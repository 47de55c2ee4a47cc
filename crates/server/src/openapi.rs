use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "UPPERCASE", example = "ACTIVE")]
pub enum StudentStatusDoc {
    Active,
    Inactive,
    Graduated,
    Suspended,
}

/// Student Data Transfer Object
#[derive(ToSchema)]
#[schema(rename_all = "camelCase", example = json!({
    "id": 1,
    "firstName": "John",
    "lastName": "Doe",
    "email": "john.doe@example.com",
    "dateOfBirth": "2000-01-01",
    "status": "ACTIVE",
    "studentId": "ST123456"
}))]
pub struct StudentDoc {
    /// Student's unique identifier, assigned by the server
    #[schema(read_only, minimum = 1, example = 1)]
    pub id: Option<i64>,
    /// Student's first name
    #[schema(min_length = 2, max_length = 50, pattern = "^[a-zA-Z]+$", example = "John")]
    pub first_name: String,
    /// Student's last name
    #[schema(min_length = 2, max_length = 50, pattern = "^[a-zA-Z]+$", example = "Doe")]
    pub last_name: String,
    /// Student's email address, unique across students
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Student's date of birth, strictly in the past
    #[schema(format = Date, example = "2000-01-01")]
    pub date_of_birth: String,
    pub status: StudentStatusDoc,
    /// Student's ID number
    #[schema(pattern = "^[A-Z]{2}\\d{6}$", example = "ST123456")]
    pub student_id: String,
}

#[derive(ToSchema)]
#[schema(example = json!({
    "status": 404,
    "message": "Student not found with id: 1",
    "timestamp": "2023-11-08T12:00:00Z"
}))]
pub struct ErrorResponseDoc {
    pub status: u16,
    pub message: String,
    #[schema(format = DateTime)]
    pub timestamp: String,
}

#[derive(ToSchema)]
#[schema(example = json!({
    "status": 400,
    "message": "Validation failed",
    "timestamp": "2023-11-08T12:00:00Z",
    "errors": {
        "firstName": "First name is required",
        "email": "Invalid email format"
    }
}))]
pub struct ValidationErrorResponseDoc {
    pub status: u16,
    pub message: String,
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub errors: BTreeMap<String, String>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Registry API", description = "APIs for managing student information"),
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::students::search,
        crate::routes::students::by_status,
        crate::routes::students::by_email,
        crate::routes::students::by_student_id,
    ),
    components(
        schemas(
            HealthResponse,
            StudentDoc,
            StudentStatusDoc,
            ErrorResponseDoc,
            ValidationErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students", description = "Student Management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_student_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for p in [
            "/health",
            "/api/students",
            "/api/students/{id}",
            "/api/students/search",
            "/api/students/status/{status}",
            "/api/students/email/{email}",
            "/api/students/student-id/{studentId}",
        ] {
            assert!(paths.iter().any(|k| k.as_str() == p), "missing {p}");
        }
    }
}
