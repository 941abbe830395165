use std::str::FromStr;

use crate::query_console::domain::model::enums::query_console_domain_error::QueryConsoleDomainError;

/// Dialect family of a registered connection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BackendKind {
    Relational,
    Document,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relational => "postgres",
            Self::Document => "mongodb",
        }
    }
}

impl FromStr for BackendKind {
    type Err = QueryConsoleDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Relational),
            "mongodb" | "mongo" => Ok(Self::Document),
            other => Err(QueryConsoleDomainError::UnsupportedBackend(other.to_string())),
        }
    }
}
