use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "ada@college.edu")]
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(example = 7)]
    pub uid: u64,
    #[schema(example = "Ada")]
    pub name: String,
}

/// Login endpoint
///
/// Compares the submitted password against the stored `pass` column as-is,
/// matching the deployed credential store.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(name = "login", skip(pool, body), fields(email = %body.email))]
pub async fn login(pool: web::Data<MySqlPool>, body: web::Json<LoginReq>) -> impl Responder {
    info!("Login request received");

    if body.email.trim().is_empty() || body.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().json(json!({
            "error": "Email and password are required"
        }));
    }

    let row = sqlx::query_as::<_, (u64, String)>(
        "SELECT uid, name FROM student WHERE email = ? AND pass = ?",
    )
    .bind(body.email.trim())
    .bind(&body.password)
    .fetch_optional(pool.get_ref())
    .await;

    match row {
        Ok(Some((uid, name))) => {
            info!(uid, "Login successful");
            HttpResponse::Ok().json(LoginResponse {
                message: "Login successful".to_string(),
                uid,
                name,
            })
        }
        Ok(None) => {
            info!("Invalid credentials");
            HttpResponse::Unauthorized().json(json!({
                "message": "Invalid credentials"
            }))
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            }))
        }
    }
}
