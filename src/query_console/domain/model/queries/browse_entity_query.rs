use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::{connection_id::ConnectionId, entity_path::EntityPath},
};

const DEFAULT_PAGE_SIZE: u32 = 100;
const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Clone, Debug)]
pub struct BrowseEntityQuery {
    connection_id: ConnectionId,
    path: EntityPath,
    page: u32,
    page_size: u32,
    sort: Option<String>,
}

pub struct BrowseEntityQueryParts {
    pub connection_id: String,
    pub namespace: String,
    pub entity: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
}

impl BrowseEntityQuery {
    pub fn new(parts: BrowseEntityQueryParts) -> Result<Self, QueryConsoleDomainError> {
        let page_size = match parts.page_size {
            Some(size) if size > 0 && size <= MAX_PAGE_SIZE => size,
            _ => DEFAULT_PAGE_SIZE,
        };

        let sort = parts
            .sort
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .filter(|s| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.'));

        Ok(Self {
            connection_id: ConnectionId::new(parts.connection_id)?,
            path: EntityPath::entity(parts.namespace, parts.entity)?,
            page: parts.page.filter(|p| *p > 0).unwrap_or(1),
            page_size,
            sort,
        })
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
    pub fn path(&self) -> &EntityPath {
        &self.path
    }
    pub fn page(&self) -> u32 {
        self.page
    }
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }
}
