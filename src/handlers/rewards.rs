use crate::error::AppError;
use crate::middlewares::current_user;
use crate::models::*;
use crate::services::RewardService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/rewards",
    tag = "rewards",
    responses(
        (status = 200, description = "Active rewards, cheapest first", body = [RewardResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_rewards(reward_service: web::Data<RewardService>) -> Result<HttpResponse> {
    match reward_service.list_rewards().await {
        Ok(rewards) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "rewards": rewards
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/rewards/seed",
    tag = "rewards",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Count inserted, or already seeded"),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn seed_rewards(
    reward_service: web::Data<RewardService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if current_user(&req).is_none() {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    }

    match reward_service.seed_rewards().await {
        Ok(SeedOutcome::Seeded { count }) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "count": count
            },
            "message": "Rewards seeded successfully"
        }))),
        Ok(SeedOutcome::AlreadySeeded) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Rewards already seeded"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn rewards_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rewards")
            .route("", web::get().to(list_rewards))
            .route("/seed", web::post().to(seed_rewards)),
    );
}
