use std::collections::HashMap;

use crate::query_console::domain::model::{
    enums::backend_kind::BackendKind, value_objects::connection_id::ConnectionId,
};

/// Registered external database as seen by the query pipeline.
#[derive(Clone, Debug)]
pub struct ConnectionDescriptor {
    pub id: ConnectionId,
    pub name: String,
    pub backend: BackendKind,
    pub tags: HashMap<String, String>,
    /// Name of the environment variable holding the connection string.
    pub credential_ref: Option<String>,
}

impl ConnectionDescriptor {
    /// Value of the `environment` tag, falling back to `env`.
    pub fn environment(&self) -> &str {
        self.tags
            .get("environment")
            .or_else(|| self.tags.get("env"))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        let environment = self.environment().trim().to_ascii_lowercase();
        environment == "prod" || environment == "production"
    }

    /// Resource covering every statement run against this connection.
    pub fn query_resource(&self) -> String {
        format!("connection/{}/db/*", self.id.value())
    }

    pub fn namespace_resource(&self, namespace: &str) -> String {
        format!("connection/{}/db/{}/entity/*", self.id.value(), namespace)
    }

    pub fn entity_resource(&self, namespace: &str, entity: &str) -> String {
        format!(
            "connection/{}/db/{}/entity/{}",
            self.id.value(),
            namespace,
            entity
        )
    }

    pub fn connection_resource(&self) -> String {
        format!("connection/{}", self.id.value())
    }
}
