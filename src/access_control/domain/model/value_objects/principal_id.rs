use uuid::Uuid;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| AccessControlDomainError::InvalidPrincipalId)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for PrincipalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}
