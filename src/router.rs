// src/router.rs

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, db::Store, docs::ApiDoc, handlers};

pub fn router<S: Store>(app_state: AppState<S>) -> Router {
    let asset_routes: Router<AppState<S>> = Router::new()
        .route(
            "/api/assets",
            post(handlers::assets::register_asset::<S>).get(handlers::assets::list_assets::<S>),
        )
        .route(
            "/api/assets/{id}",
            get(handlers::assets::get_asset::<S>).delete(handlers::assets::remove_asset::<S>),
        )
        .route("/api/assets/{id}/quantity", patch(handlers::assets::adjust_quantity::<S>));

    let request_routes: Router<AppState<S>> = Router::new()
        .route("/api/requests", post(handlers::requests::create_request::<S>))
        .route("/api/requests/{id}", get(handlers::requests::get_request::<S>))
        .route("/api/requests/{id}/approve", patch(handlers::requests::approve_request::<S>))
        .route("/api/requests/{id}/reject", patch(handlers::requests::reject_request::<S>));

    let assignment_routes: Router<AppState<S>> = Router::new()
        .route(
            "/api/assignments",
            post(handlers::assignments::direct_assign::<S>)
                .get(handlers::assignments::list_my_assignments::<S>),
        )
        .route("/api/assignments/{id}", get(handlers::assignments::get_assignment::<S>))
        .route("/api/assignments/{id}/return", patch(handlers::assignments::request_return::<S>))
        .route(
            "/api/assignments/{id}/approve-return",
            patch(handlers::assignments::approve_return::<S>),
        );

    let affiliation_routes: Router<AppState<S>> = Router::new()
        .route("/api/affiliations", get(handlers::affiliations::list_my_affiliations::<S>))
        .route("/api/affiliations/employees", get(handlers::affiliations::list_employees::<S>))
        .route(
            "/api/affiliations/{employee_id}",
            delete(handlers::affiliations::remove_employee::<S>),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(asset_routes)
        .merge(request_routes)
        .merge(assignment_routes)
        .merge(affiliation_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
