// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Inventory ---
        handlers::assets::register_asset,
        handlers::assets::list_assets,
        handlers::assets::get_asset,
        handlers::assets::adjust_quantity,
        handlers::assets::remove_asset,

        // --- Requests ---
        handlers::requests::create_request,
        handlers::requests::get_request,
        handlers::requests::approve_request,
        handlers::requests::reject_request,

        // --- Assignments ---
        handlers::assignments::direct_assign,
        handlers::assignments::list_my_assignments,
        handlers::assignments::get_assignment,
        handlers::assignments::request_return,
        handlers::assignments::approve_return,

        // --- Affiliations ---
        handlers::affiliations::list_my_affiliations,
        handlers::affiliations::list_employees,
        handlers::affiliations::remove_employee,
    ),
    components(
        schemas(
            // --- Inventory ---
            models::asset::AssetType,
            models::asset::AssetSnapshot,
            models::asset::Asset,
            handlers::assets::RegisterAssetPayload,
            handlers::assets::AdjustQuantityPayload,

            // --- Requests ---
            models::request::RequestStatus,
            models::request::Decision,
            models::request::AssetRequest,
            handlers::requests::CreateRequestPayload,
            handlers::requests::DecisionResponse,

            // --- Assignments ---
            models::assignment::AssignmentStatus,
            models::assignment::Assignment,
            handlers::assignments::DirectAssignPayload,

            // --- Affiliations ---
            models::affiliation::AffiliationStatus,
            models::affiliation::Affiliation,
            models::allocation::Allocation,
            models::allocation::ReclaimFailure,
            models::allocation::RemovalReport,
        )
    ),
    tags(
        (name = "Inventory", description = "Assets and stock"),
        (name = "Requests", description = "Asset requests and their approval"),
        (name = "Assignments", description = "Who holds what, and returns"),
        (name = "Affiliations", description = "Employees per company and seat usage")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "gateway_user_id",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-user-id"))),
        );
        components.add_security_scheme(
            "gateway_user_role",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-user-role"))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/assets",
            "/api/assets/{id}",
            "/api/assets/{id}/quantity",
            "/api/requests",
            "/api/requests/{id}",
            "/api/requests/{id}/approve",
            "/api/requests/{id}/reject",
            "/api/assignments",
            "/api/assignments/{id}",
            "/api/assignments/{id}/return",
            "/api/assignments/{id}/approve-return",
            "/api/affiliations",
            "/api/affiliations/employees",
            "/api/affiliations/{employee_id}",
        ] {
            assert!(paths.contains_key(path), "{path} missing from the OpenAPI document");
        }

        let assets = &paths["/api/assets"];
        assert!(assets.post.is_some());
        assert!(assets.get.is_some());
        assert!(paths["/api/assets/{id}"].delete.is_some());
        assert!(paths["/api/requests/{id}/approve"].patch.is_some());
    }

    #[test]
    fn operations_require_gateway_identity() {
        let doc = ApiDoc::openapi();
        let approve = doc.paths.paths["/api/requests/{id}/approve"]
            .patch
            .as_ref()
            .expect("approve is documented");

        assert_eq!(approve.tags.as_deref(), Some(&["Requests".to_string()][..]));
        assert!(approve.security.as_ref().is_some_and(|s| !s.is_empty()));

        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("gateway_user_id"));
        assert!(components.security_schemes.contains_key("gateway_user_role"));
    }
}
