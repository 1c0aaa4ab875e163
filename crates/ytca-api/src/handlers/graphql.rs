//! GraphQL handlers.

use async_graphql::http::GraphiQLSource;
use axum::extract::State;
use axum::response::Html;
use axum::{Extension, Json};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::middleware::RequestId;
use crate::schema::RequestContext;
use crate::state::AppState;

/// Execute a GraphQL query.
///
/// The caller's bearer token travels with the request so the inference
/// gateway, not this server, decides whether it is valid.
pub async fn graphql_handler(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let context = RequestContext {
        bearer: bearer.map(|TypedHeader(Authorization(b))| b.token().to_string()),
        request_id: request_id.map(|Extension(RequestId(id))| id),
    };

    Json(state.schema.execute(request.data(context)).await)
}

/// Interactive query page.
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/").finish())
}
