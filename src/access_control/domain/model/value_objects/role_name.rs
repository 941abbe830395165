use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

const MAX_ROLE_NAME_LENGTH: usize = 64;

/// Role identifier as it appears in `/access-control/roles/{name}`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= MAX_ROLE_NAME_LENGTH
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(AccessControlDomainError::InvalidRoleName);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
