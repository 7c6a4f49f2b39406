use actix_web::middleware::Logger;
use actix_web::{http::header, test, web, App};
use dotenv::dotenv;
use serde_json::json;
use shiftmaster::auth::{AuthMiddleware, AuthResponse};
use shiftmaster::models::{Role, Vacation, VacationStatus, VacationWithWorker};
use shiftmaster::routes::{self, health};
use sqlx::PgPool;

const TEST_PASSWORD: &str = "Password123!";

async fn setup_pool() -> PgPool {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

async fn cleanup_prefix(pool: &PgPool, tag: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE username LIKE $1")
        .bind(format!("{}%", tag))
        .execute(pool)
        .await;
    let _ = sqlx::query("DELETE FROM companies WHERE name LIKE $1")
        .bind(format!("{}%", tag))
        .execute(pool)
        .await;
}

async fn seed_member(pool: &PgPool, username: &str, role: Role, company_id: i32) -> i32 {
    let hash = shiftmaster::auth::hash_password(TEST_PASSWORD).unwrap();
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO users (username, password_hash, full_name, role, company_id)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(username)
    .bind(&hash)
    .bind("Dana Levi")
    .bind(role)
    .bind(company_id)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "login failed for {}", username);
    let auth: AuthResponse = test::read_body_json(resp).await;
    auth.token
}

#[actix_rt::test]
async fn test_vacation_request_and_decision_flow() {
    let pool = setup_pool().await;
    cleanup_prefix(&pool, "vac_a_").await;
    cleanup_prefix(&pool, "vac_b_").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let (company_a,): (i32,) =
        sqlx::query_as("INSERT INTO companies (name, color) VALUES ($1, $2) RETURNING id")
            .bind("vac_a_ Company")
            .bind("#3B82F6")
            .fetch_one(&pool)
            .await
            .unwrap();
    let (company_b,): (i32,) =
        sqlx::query_as("INSERT INTO companies (name, color) VALUES ($1, $2) RETURNING id")
            .bind("vac_b_ Company")
            .bind("#3B82F6")
            .fetch_one(&pool)
            .await
            .unwrap();

    seed_member(&pool, "vac_a_mgr", Role::Manager, company_a).await;
    let worker_id = seed_member(&pool, "vac_a_wrk", Role::Worker, company_a).await;
    seed_member(&pool, "vac_b_mgr", Role::Manager, company_b).await;

    let manager_token = login(&app, "vac_a_mgr").await;
    let worker_token = login(&app, "vac_a_wrk").await;
    let foreign_manager_token = login(&app, "vac_b_mgr").await;

    // End before start is refused up front
    let req = test::TestRequest::post()
        .uri("/api/vacations")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", worker_token)))
        .set_json(&json!({ "start_date": "2026-09-05", "end_date": "2026-09-01" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // The worker files a request for themselves
    let req = test::TestRequest::post()
        .uri("/api/vacations")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", worker_token)))
        .set_json(&json!({
            "start_date": "2026-09-01",
            "end_date": "2026-09-05",
            "reason": "family trip"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let vacation: Vacation = test::read_body_json(resp).await;
    assert_eq!(vacation.status, VacationStatus::Pending);
    assert_eq!(vacation.worker_id, worker_id);
    assert_eq!(vacation.company_id, company_a);

    // Visible on the company calendar while pending
    let req = test::TestRequest::get()
        .uri("/api/vacations")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", manager_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let listed: Vec<VacationWithWorker> = test::read_body_json(resp).await;
    let row = listed.iter().find(|v| v.id == vacation.id).unwrap();
    assert_eq!(row.worker_name.as_deref(), Some("Dana Levi"));

    // Workers cannot decide, and a foreign manager sees no such request
    let approve = json!({ "status": "approved" });
    let req = test::TestRequest::put()
        .uri(&format!("/api/vacations/{}/status", vacation.id))
        .append_header((header::AUTHORIZATION, format!("Bearer {}", worker_token)))
        .set_json(&approve)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/vacations/{}/status", vacation.id))
        .append_header((header::AUTHORIZATION, format!("Bearer {}", foreign_manager_token)))
        .set_json(&approve)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    // "pending" is not a decision
    let req = test::TestRequest::put()
        .uri(&format!("/api/vacations/{}/status", vacation.id))
        .append_header((header::AUTHORIZATION, format!("Bearer {}", manager_token)))
        .set_json(&json!({ "status": "pending" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // The company's own manager approves
    let req = test::TestRequest::put()
        .uri(&format!("/api/vacations/{}/status", vacation.id))
        .append_header((header::AUTHORIZATION, format!("Bearer {}", manager_token)))
        .set_json(&approve)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let decided: Vacation = test::read_body_json(resp).await;
    assert_eq!(decided.status, VacationStatus::Approved);

    // Deciding twice is a conflict
    let req = test::TestRequest::put()
        .uri(&format!("/api/vacations/{}/status", vacation.id))
        .append_header((header::AUTHORIZATION, format!("Bearer {}", manager_token)))
        .set_json(&approve)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

    cleanup_prefix(&pool, "vac_a_").await;
    cleanup_prefix(&pool, "vac_b_").await;
}

#[actix_rt::test]
async fn test_rejected_vacations_leave_the_calendar() {
    let pool = setup_pool().await;
    cleanup_prefix(&pool, "vacrej_").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let (company_id,): (i32,) =
        sqlx::query_as("INSERT INTO companies (name, color) VALUES ($1, $2) RETURNING id")
            .bind("vacrej_ Company")
            .bind("#3B82F6")
            .fetch_one(&pool)
            .await
            .unwrap();
    seed_member(&pool, "vacrej_mgr", Role::Manager, company_id).await;
    seed_member(&pool, "vacrej_wrk", Role::Worker, company_id).await;
    let manager_token = login(&app, "vacrej_mgr").await;
    let worker_token = login(&app, "vacrej_wrk").await;

    let req = test::TestRequest::post()
        .uri("/api/vacations")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", worker_token)))
        .set_json(&json!({ "start_date": "2026-10-01", "end_date": "2026-10-02" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let vacation: Vacation = test::read_body_json(resp).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/vacations/{}/status", vacation.id))
        .append_header((header::AUTHORIZATION, format!("Bearer {}", manager_token)))
        .set_json(&json!({ "status": "rejected" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/vacations")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", worker_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let listed: Vec<VacationWithWorker> = test::read_body_json(resp).await;
    assert!(
        !listed.iter().any(|v| v.id == vacation.id),
        "rejected requests must not be listed"
    );

    cleanup_prefix(&pool, "vacrej_").await;
}
