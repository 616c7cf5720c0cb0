use crate::error::AppError;
use crate::middlewares::current_user;
use crate::models::*;
use crate::services::MembershipService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/admin/members",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All memberships with their owners", body = [MemberResponse]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_members(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(user) = current_user(&req) else {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    };
    if !user.is_admin() {
        return Ok(AppError::PermissionDenied.error_response());
    }

    match membership_service.list_members().await {
        Ok(members) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "members": members
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").route("/members", web::get().to(list_members)));
}
