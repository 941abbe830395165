use serde::Deserialize;
use utoipa::IntoParams;

/// Browsers cannot set headers on a WebSocket handshake, so the token may ride in the query.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StreamQueryParamsResource {
    pub access_token: Option<String>,
}
