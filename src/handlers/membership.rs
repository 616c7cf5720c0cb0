use crate::error::AppError;
use crate::middlewares::current_user;
use crate::models::*;
use crate::services::MembershipService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/membership/create",
    tag = "membership",
    request_body = CreateMembershipRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Membership created", body = MembershipResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_membership(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
    request: web::Json<CreateMembershipRequest>,
) -> Result<HttpResponse> {
    let Some(user) = current_user(&req) else {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    };

    match membership_service
        .create_membership(&user.id, request.into_inner())
        .await
    {
        Ok(membership) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "membership": membership
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/membership",
    tag = "membership",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's membership", body = MembershipResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn get_membership(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(user) = current_user(&req) else {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    };

    match membership_service.get_membership(&user.id).await {
        Ok(membership) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "membership": membership
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn membership_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/membership")
            .route("/create", web::post().to(create_membership))
            .route("", web::get().to(get_membership)),
    );
}
