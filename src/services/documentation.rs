use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Party Draw Back.
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::games::list_games,
        crate::routes::games::random_game,
        crate::routes::games::get_game,
        crate::routes::games::create_game,
        crate::routes::games::update_game,
        crate::routes::games::delete_game,
        crate::routes::admin::login,
        crate::routes::admin::check,
        crate::routes::upload::upload_image,
        crate::routes::upload::upload_video,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::game::GameRecord,
            crate::dto::game::GameInput,
            crate::dto::game::PlayerCountDto,
            crate::dto::game::VideoDto,
            crate::dto::game::MessageResponse,
            crate::dto::admin::LoginRequest,
            crate::dto::admin::LoginResponse,
            crate::dto::admin::AdminSummary,
            crate::dto::admin::AdminCheckResponse,
            crate::dto::upload::UploadResponse,
            crate::dao::models::Difficulty,
            crate::dao::models::GameStatus,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "games", description = "Catalog listing, random draws and maintenance"),
        (name = "admin", description = "Administrator sign-in"),
        (name = "upload", description = "Media uploads"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by admin-only operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
