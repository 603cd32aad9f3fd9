use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{BadgeConditionType, UserRole};
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
        handlers::auth::me,
        handlers::class::create_class,
        handlers::class::list_classes,
        handlers::class::join_class,
        handlers::class::get_roster,
        handlers::class::update_enrollment,
        handlers::character::create_character,
        handlers::character::get_my_character,
        handlers::character::reward_character,
        handlers::character::get_character_badges,
        handlers::selection::select_random,
        handlers::selection::get_selection_history,
        handlers::level::get_levels,
        handlers::level::resolve,
    ),
    components(
        schemas(
            UserRole,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            UserResponse,
            AuthResponse,
            CreateClassRequest,
            JoinClassRequest,
            UpdateEnrollmentRequest,
            ClassResponse,
            EnrollmentResponse,
            RosterMemberResponse,
            CreateCharacterRequest,
            RewardRequest,
            CharacterResponse,
            RewardResponse,
            BadgeConditionType,
            BadgeResponse,
            BadgeUnlockResponse,
            RandomSelectRequest,
            SelectionRecordResponse,
            SelectionOutcomeResponse,
            SelectionRecordPage,
            PaginationInfo,
            LevelThresholdResponse,
            ResolveLevelResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "class", description = "Class and enrollment API"),
        (name = "character", description = "Character and reward API"),
        (name = "selection", description = "Random selection API"),
        (name = "level", description = "Level threshold API"),
    ),
    info(
        title = "ClassQuest Backend API",
        version = "1.0.0",
        description = "Gamified classroom backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
