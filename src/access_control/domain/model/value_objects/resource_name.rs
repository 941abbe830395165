use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

/// Hierarchical resource identifier, e.g. `connection/<id>/db/<ns>/entity/<name>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AccessControlDomainError::InvalidResourceName);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
