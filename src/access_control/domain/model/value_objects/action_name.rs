use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

/// Permission string such as `query:write`, shared by role checks and policy rules.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionName(String);

impl ActionName {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-' | '*'));

        if !valid {
            return Err(AccessControlDomainError::InvalidActionName);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
