use actix_web::dev::ServiceResponse;
use actix_web::http::{header, Method, StatusCode};
use actix_web::{test, web, App};
use jwt::AlgorithmType;
use serde_json::json;

use course_enrollment_server::api;
use course_enrollment_server::data_structs::app_config::AppConfig;
use course_enrollment_server::data_structs::responses::status_response::{EnrolledCoursesResponse, StatusResponse};
use course_enrollment_server::data_structs::role::Role;
use course_enrollment_server::data_structs::token_payload::TokenPayload;
use course_enrollment_server::jwt_auth::JwtSecretKey;
use course_enrollment_server::SharedResources;

const SECRET: &str = "This is my special secret";
const STUDENT_ID: &str = "650610001";

fn resources() -> SharedResources {
    SharedResources::from_config(&AppConfig::default()).unwrap()
}

fn token_for(student_id: &str, role: Role) -> String {
    JwtSecretKey::new(SECRET)
        .sign_token(&TokenPayload::new(student_id, role))
        .unwrap()
}

fn student_token() -> String {
    token_for(STUDENT_ID, Role::Student)
}

fn request(method: Method, token: Option<&str>, body: serde_json::Value) -> test::TestRequest {
    let req = test::TestRequest::default()
        .method(method)
        .uri("/enrollments")
        .set_json(body);
    match token {
        Some(token) => req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token))),
        None => req,
    }
}

async fn status_body(response: ServiceResponse) -> StatusResponse {
    test::read_body_json(response).await
}

macro_rules! send {
    ($app:expr, $req:expr) => {
        test::call_service(&$app, $req.to_request()).await
    };
}

macro_rules! init_app {
    ($resources:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($resources))
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_token_is_401_for_both_routes() {
    let app = init_app!(resources());
    for method in [Method::POST, Method::DELETE] {
        let response = send!(app, request(method, None, json!({ "courseNo": "261207" })));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_body(response).await,
            StatusResponse::failure("Authorization header is required")
        );
    }
}

#[actix_web::test]
async fn non_bearer_scheme_is_401() {
    let app = init_app!(resources());
    let req = test::TestRequest::post()
        .uri("/enrollments")
        .insert_header((header::AUTHORIZATION, format!("Token {}", student_token())))
        .set_json(json!({ "courseNo": "261207" }));
    let response = send!(app, req);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn invalid_token_is_401_for_both_routes() {
    let app = init_app!(resources());
    let forged = JwtSecretKey::new("not the server secret")
        .sign_token(&TokenPayload::new(STUDENT_ID, Role::Student))
        .unwrap();
    for method in [Method::POST, Method::DELETE] {
        for token in ["garbage", forged.as_str()] {
            let response = send!(app, request(method.clone(), Some(token), json!({ "courseNo": "261207" })));
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(status_body(response).await, StatusResponse::failure("Invalid token"));
        }
    }
}

#[actix_web::test]
async fn expired_token_is_401() {
    let app = init_app!(resources());
    let expired = JwtSecretKey::new(SECRET)
        .sign_token(&TokenPayload::new(STUDENT_ID, Role::Student).expiring_at(1_600_000_000))
        .unwrap();
    let response = send!(app, request(Method::POST, Some(&expired), json!({ "courseNo": "261207" })));
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_token_is_403_for_both_routes() {
    let app = init_app!(resources());
    let admin = token_for("admin", Role::Admin);
    let cases = [
        (Method::POST, "Only students can access this API route"),
        (Method::DELETE, "Only Student can access this API route"),
    ];
    for (method, message) in cases {
        let response = send!(app, request(method, Some(&admin), json!({ "courseNo": "261207" })));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(status_body(response).await, StatusResponse::failure(message));
    }
}

#[actix_web::test]
async fn hs384_and_hs512_tokens_are_accepted() {
    let shared = resources();
    let app = init_app!(shared.clone());
    let key = JwtSecretKey::new(SECRET);
    let payload = TokenPayload::new(STUDENT_ID, Role::Student);

    for (algorithm, course_no) in [(AlgorithmType::Hs384, "261207"), (AlgorithmType::Hs512, "001101")] {
        let token = key.sign_token_with_algorithm(&payload, algorithm).unwrap();
        let response = send!(app, request(Method::POST, Some(&token), json!({ "courseNo": course_no })));
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(shared.database.enrollments().unwrap().len(), 2);
}

#[actix_web::test]
async fn auth_is_checked_before_the_body() {
    let app = init_app!(resources());
    let req = test::TestRequest::post()
        .uri("/enrollments")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json");
    let response = send!(app, req);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn course_no_of_wrong_shape_is_400() {
    let app = init_app!(resources());
    let token = student_token();
    for method in [Method::POST, Method::DELETE] {
        for body in [json!({ "courseNo": "26120" }), json!({ "courseNo": "2612077" }), json!({ "courseNo": 261207 }), json!({})] {
            let response = send!(app, request(method.clone(), Some(&token), body));
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                status_body(response).await,
                StatusResponse::failure("courseNo must contain 6 characters")
            );
        }
    }
}

#[actix_web::test]
async fn non_object_json_body_is_400_and_changes_nothing() {
    let shared = resources();
    shared.database.enroll(STUDENT_ID, &"261207".parse().unwrap()).unwrap();
    let before = shared.database.enrollments().unwrap();

    let app = init_app!(shared.clone());
    let token = student_token();
    for method in [Method::POST, Method::DELETE] {
        for body in [json!(["261207"]), json!(null), json!("261207"), json!(261207)] {
            let response = send!(app, request(method.clone(), Some(&token), body));
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                status_body(response).await,
                StatusResponse::failure("courseNo must contain 6 characters")
            );
        }
    }
    assert_eq!(shared.database.enrollments().unwrap(), before);
}

#[actix_web::test]
async fn malformed_json_is_400() {
    let app = init_app!(resources());
    let req = test::TestRequest::post()
        .uri("/enrollments")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", student_token())))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json");
    let response = send!(app, req);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_course_is_400() {
    let app = init_app!(resources());
    let response = send!(app, request(Method::POST, Some(&student_token()), json!({ "courseNo": "999999" })));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(status_body(response).await, StatusResponse::failure("courseNo does not exist"));
}

#[actix_web::test]
async fn enrolling_twice_is_400() {
    let app = init_app!(resources());
    let token = student_token();

    let first = send!(app, request(Method::POST, Some(&token), json!({ "courseNo": "261207" })));
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        status_body(first).await,
        StatusResponse::success("You has enrolled a course successfully")
    );

    let second = send!(app, request(Method::POST, Some(&token), json!({ "courseNo": "261207" })));
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_body(second).await,
        StatusResponse::failure("You are already enrolled in this course")
    );
}

#[actix_web::test]
async fn dropping_unenrolled_course_is_404() {
    let app = init_app!(resources());
    let response = send!(app, request(Method::DELETE, Some(&student_token()), json!({ "courseNo": "261207" })));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        status_body(response).await,
        StatusResponse::failure("You cannot drop from this course. You have not enrolled it yet!")
    );
}

#[actix_web::test]
async fn enroll_then_drop_restores_the_enrollment_list() {
    let shared = resources();
    shared.database.enroll(STUDENT_ID, &"001101".parse().unwrap()).unwrap();
    let before = shared.database.enrollments().unwrap();

    let app = init_app!(shared.clone());
    let token = student_token();

    let enrolled = send!(app, request(Method::POST, Some(&token), json!({ "courseNo": "261497" })));
    assert_eq!(enrolled.status(), StatusCode::OK);
    assert_eq!(shared.database.enrollments().unwrap().len(), before.len() + 1);

    let dropped = send!(app, request(Method::DELETE, Some(&token), json!({ "courseNo": "261497" })));
    assert_eq!(dropped.status(), StatusCode::OK);
    assert_eq!(
        status_body(dropped).await,
        StatusResponse::success("You has dropped from this course. See you next semester.")
    );
    assert_eq!(shared.database.enrollments().unwrap(), before);
}

#[actix_web::test]
async fn enrollments_are_kept_per_student() {
    let shared = resources();
    let app = init_app!(shared.clone());
    let other = token_for("650610002", Role::Student);

    let response = send!(app, request(Method::POST, Some(&student_token()), json!({ "courseNo": "261207" })));
    assert_eq!(response.status(), StatusCode::OK);

    let response = send!(app, request(Method::DELETE, Some(&other), json!({ "courseNo": "261207" })));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send!(app, request(Method::POST, Some(&other), json!({ "courseNo": "261207" })));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(shared.database.enrollments().unwrap().len(), 2);
}

#[actix_web::test]
async fn listing_returns_the_callers_courses() {
    let app = init_app!(resources());
    let token = student_token();
    for course_no in ["261207", "001101"] {
        let response = send!(app, request(Method::POST, Some(&token), json!({ "courseNo": course_no })));
        assert_eq!(response.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/enrollments")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)));
    let response = send!(app, req);
    assert_eq!(response.status(), StatusCode::OK);

    let listing: EnrolledCoursesResponse = test::read_body_json(response).await;
    assert!(listing.ok);
    let course_nos: Vec<&str> = listing.courses.iter().map(|course| course.course_no.as_str()).collect();
    assert_eq!(course_nos, vec!["261207", "001101"]);
}

#[actix_web::test]
async fn listing_is_forbidden_for_admins() {
    let app = init_app!(resources());
    let req = test::TestRequest::get()
        .uri("/enrollments")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token_for("admin", Role::Admin))));
    let response = send!(app, req);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn ping_answers_pong() {
    let app = init_app!(resources());
    let response = send!(app, test::TestRequest::get().uri("/ping"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(test::read_body(response).await, web::Bytes::from_static(b"Pong!"));
}
