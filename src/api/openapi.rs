//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{copies, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark",
        version = "0.1.0",
        description = "Library catalog server: book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Copies
        copies::list_copies,
        copies::copy_detail,
        copies::create_copy_form,
        copies::create_copy,
        copies::delete_copy_form,
        copies::delete_copy,
        copies::update_copy_form,
        copies::update_copy,
    ),
    components(
        schemas(
            crate::models::copy::CopyForm,
            crate::models::copy::DeleteCopyForm,
            crate::models::copy::CopyStatus,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "copies", description = "Book copy pages and forms")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
