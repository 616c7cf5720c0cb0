use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::membership::create_membership,
        handlers::membership::get_membership,
        handlers::points::award_points,
        handlers::points::redeem_points,
        handlers::transactions::list_transactions,
        handlers::rewards::list_rewards,
        handlers::rewards::seed_rewards,
        handlers::admin::list_members,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            UserResponse,
            Role,
            CreateMembershipRequest,
            MembershipResponse,
            MembershipTier,
            MembershipStatus,
            MemberResponse,
            MemberUser,
            AwardPointsRequest,
            RedeemPointsRequest,
            PointsBalanceResponse,
            TransactionResponse,
            TransactionType,
            RewardResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and token management"),
        (name = "membership", description = "Membership cards"),
        (name = "points", description = "Point awards and redemptions"),
        (name = "transactions", description = "Ledger history"),
        (name = "rewards", description = "Reward catalog"),
        (name = "admin", description = "Administrative operations"),
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
