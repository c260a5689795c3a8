//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the fund and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives.
//!
//! The generated document is served by Swagger UI in debug builds and
//! printed by `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    FundSchema, InternalErrorBodySchema, NotFoundBodySchema, PublisherSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Civic platform backend API",
        description = "Read access to fundraising campaigns and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::funds::get_one_fund,
        crate::inbound::http::funds::get_funds,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        FundSchema,
        PublisherSchema,
        NotFoundBodySchema,
        InternalErrorBodySchema
    )),
    tags(
        (name = "funds", description = "Fundraising campaigns"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
