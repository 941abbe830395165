use std::str::FromStr;

use crate::query_console::domain::model::enums::query_console_domain_error::QueryConsoleDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Denied,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = QueryConsoleDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "denied" => Ok(Self::Denied),
            other => Err(QueryConsoleDomainError::InfrastructureError(format!(
                "unknown approval status {other}"
            ))),
        }
    }
}
