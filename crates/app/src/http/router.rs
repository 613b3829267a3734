use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::http::middleware::admin_auth;
use crate::http::routes::{admin, health, pages};
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    let cors = build_cors(&state);
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/", get(pages::home::home))
        .route("/discussions", get(pages::discussions::list))
        .route("/discussions/{id}", get(pages::discussions::detail))
        .route(
            "/discussions/{id}/context",
            get(pages::discussions::context_text),
        )
        .route(
            "/submit",
            get(pages::submit::form).post(pages::submit::create),
        )
        .route(
            "/propose",
            get(pages::propose::form).post(pages::propose::create),
        )
        .route("/reading-room", get(pages::reading::reading_room))
        .route("/texts/{id}", get(pages::reading::text_page))
        .route("/texts/{id}/context", get(pages::reading::context_text))
        .route(
            "/texts/{id}/marginalia",
            post(pages::reading::create_marginalia),
        )
        .route(
            "/contact",
            get(pages::contact::form).post(pages::contact::create),
        )
        .route("/quiet", get(pages::quiet::quiet))
        .route("/admin", get(admin::dashboard::dashboard))
        .route("/admin/login", post(admin::auth::login))
        .route("/admin/logout", post(admin::auth::logout))
        .route(
            "/admin/posts/{id}/hide",
            post(admin::moderation::hide_post),
        )
        .route(
            "/admin/posts/{id}/restore",
            post(admin::moderation::restore_post),
        )
        .route(
            "/admin/marginalia/{id}/hide",
            post(admin::moderation::hide_marginalia),
        )
        .route(
            "/admin/marginalia/{id}/restore",
            post(admin::moderation::restore_marginalia),
        )
        .route(
            "/admin/discussions/{id}/deactivate",
            post(admin::moderation::deactivate_discussion),
        )
        .route(
            "/admin/discussions/{id}/activate",
            post(admin::moderation::activate_discussion),
        )
        .route(
            "/admin/contacts/{id}/delete",
            post(admin::moderation::delete_contact),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::require_admin,
        ))
        .with_state(state);
    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    router
}

fn build_cors(state: &AppState) -> Option<CorsLayer> {
    let mut origins = Vec::new();
    let mut allow_any = false;
    for origin in state.config.cors_allow_origins.iter() {
        if is_wildcard_origin(origin) {
            allow_any = true;
            break;
        }
        match HeaderValue::from_str(origin.trim()) {
            Ok(value) => origins.push(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "invalid CORS origin ignored");
            }
        }
    }

    let cors = CorsLayer::new().allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    if !should_enable_cors(allow_any, &origins) {
        return None;
    }

    if allow_any {
        Some(cors.allow_origin(Any).allow_headers(Any))
    } else {
        Some(
            cors.allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
                .allow_headers([CONTENT_TYPE]),
        )
    }
}

fn is_wildcard_origin(origin: &str) -> bool {
    origin.trim() == "*"
}

fn should_enable_cors(allow_any: bool, origins: &[HeaderValue]) -> bool {
    allow_any || !origins.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{is_wildcard_origin, should_enable_cors};
    use axum::http::HeaderValue;

    #[test]
    fn wildcard_origin_matches_trimmed_star() {
        assert!(is_wildcard_origin("*"));
        assert!(is_wildcard_origin(" * "));
        assert!(!is_wildcard_origin("https://example.com"));
    }

    #[test]
    fn cors_enablement_requires_origin_or_wildcard() {
        assert!(!should_enable_cors(false, &[]));
        assert!(should_enable_cors(true, &[]));
        assert!(should_enable_cors(false, &[HeaderValue::from_static("https://example.com")]));
    }
}
