use crate::error::AppError;
use crate::middlewares::current_user;
use crate::models::*;
use crate::services::LedgerService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "transactions",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Up to 50 most recent transactions, newest first", body = [TransactionResponse]),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn list_transactions(
    ledger_service: web::Data<LedgerService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(user) = current_user(&req) else {
        return Ok(AppError::AuthError("Unauthorized".to_string()).error_response());
    };

    match ledger_service.list_transactions(&user.id).await {
        Ok(transactions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "transactions": transactions
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn transactions_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/transactions", web::get().to(list_transactions));
}
