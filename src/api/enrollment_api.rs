use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};

use crate::data_structs::course::CourseNo;
use crate::data_structs::requests::course_selection::CourseSelection;
use crate::data_structs::responses::status_response::{EnrolledCoursesResponse, StatusResponse};
use crate::data_structs::token_payload::TokenPayload;
use crate::error::{ApiError, ApiResult};
use crate::SharedResources;

const STUDENTS_ONLY: &str = "Only students can access this API route";
const STUDENT_ONLY_DROP: &str = "Only Student can access this API route";

/// Authenticates the caller and rejects admins with `forbidden_message`. Runs before
/// the body is looked at.
fn authorize_student(data: &SharedResources, req: &HttpRequest, forbidden_message: &'static str) -> ApiResult<TokenPayload> {
    let payload = data.jwt_secret.authenticate(req)?;
    if payload.role.is_admin() {
        log::debug!("Rejected {} token for student {}", payload.role, payload.student_id);
        return Err(ApiError::StudentsOnly(forbidden_message));
    }
    Ok(payload)
}

fn selected_course_no(body: &[u8]) -> ApiResult<CourseNo> {
    let selection = CourseSelection::from_body(body).map_err(|_| ApiError::MalformedBody)?;
    selection.course_no().ok_or(ApiError::InvalidCourseNo)
}

#[post("/enrollments")]
pub async fn enroll(data: web::Data<SharedResources>, req: HttpRequest, body: web::Bytes) -> ApiResult<HttpResponse> {
    let student = authorize_student(&data, &req, STUDENTS_ONLY)?;
    let course_no = selected_course_no(&body)?;

    data.database.enroll(&student.student_id, &course_no)?;
    log::info!("Student {} enrolled in {}", student.student_id, course_no);

    Ok(HttpResponse::Ok().json(StatusResponse::success("You has enrolled a course successfully")))
}

#[delete("/enrollments")]
pub async fn drop_course(data: web::Data<SharedResources>, req: HttpRequest, body: web::Bytes) -> ApiResult<HttpResponse> {
    let student = authorize_student(&data, &req, STUDENT_ONLY_DROP)?;
    let course_no = selected_course_no(&body)?;

    data.database.drop_enrollment(&student.student_id, &course_no)?;
    log::info!("Student {} dropped {}", student.student_id, course_no);

    Ok(HttpResponse::Ok().json(StatusResponse::success("You has dropped from this course. See you next semester.")))
}

#[get("/enrollments")]
pub async fn enrolled_courses(data: web::Data<SharedResources>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let student = authorize_student(&data, &req, STUDENTS_ONLY)?;
    let courses = data.database.enrolled_courses(&student.student_id)?;
    Ok(HttpResponse::Ok().json(EnrolledCoursesResponse::new(courses)))
}
