use crate::error::AppError;
use crate::middlewares::current_user;
use crate::models::*;
use crate::services::LedgerService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/points/award",
    tag = "points",
    request_body = AwardPointsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points awarded", body = PointsBalanceResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn award_points(
    ledger_service: web::Data<LedgerService>,
    req: HttpRequest,
    request: web::Json<AwardPointsRequest>,
) -> Result<HttpResponse> {
    let Some(user) = current_user(&req) else {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    };
    if !user.is_admin() {
        return Ok(AppError::PermissionDenied.error_response());
    }

    match ledger_service.award_points(request.into_inner()).await {
        Ok(new_points) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "newPoints": new_points
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/points/redeem",
    tag = "points",
    request_body = RedeemPointsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points redeemed", body = PointsBalanceResponse),
        (status = 400, description = "Missing fields or insufficient points"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn redeem_points(
    ledger_service: web::Data<LedgerService>,
    req: HttpRequest,
    request: web::Json<RedeemPointsRequest>,
) -> Result<HttpResponse> {
    if current_user(&req).is_none() {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    }

    match ledger_service.redeem_points(request.into_inner()).await {
        Ok(new_points) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "newPoints": new_points
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn points_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/points")
            .route("/award", web::post().to(award_points))
            .route("/redeem", web::post().to(redeem_points)),
    );
}
