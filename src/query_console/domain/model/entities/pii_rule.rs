use crate::query_console::domain::model::value_objects::connection_id::ConnectionId;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PiiRule {
    pub connection_id: ConnectionId,
    pub resource: String,
    pub field: String,
    pub mask_type: String,
}
