use crate::query_console::domain::model::enums::query_console_domain_error::QueryConsoleDomainError;

/// Namespace/entity pair addressed by the catalog endpoints.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityPath {
    namespace: String,
    entity: Option<String>,
}

impl EntityPath {
    pub fn namespace(namespace: String) -> Result<Self, QueryConsoleDomainError> {
        Ok(Self {
            namespace: Self::validate(namespace)?,
            entity: None,
        })
    }

    pub fn entity(namespace: String, entity: String) -> Result<Self, QueryConsoleDomainError> {
        Ok(Self {
            namespace: Self::validate(namespace)?,
            entity: Some(Self::validate(entity)?),
        })
    }

    fn validate(value: String) -> Result<String, QueryConsoleDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains('/') || trimmed.chars().any(char::is_control) {
            return Err(QueryConsoleDomainError::InvalidEntityName);
        }
        Ok(trimmed.to_string())
    }

    pub fn namespace_name(&self) -> &str {
        &self.namespace
    }
    pub fn entity_name(&self) -> Option<&str> {
        self.entity.as_deref()
    }
}
