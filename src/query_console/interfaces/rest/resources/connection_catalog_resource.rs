use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::query_console::domain::model::{
    entities::entity_info::{BrowsePage, EntityInfo},
    value_objects::column_descriptor::ColumnDescriptor,
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NamespaceListResource {
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EntityListResource {
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ColumnResource {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl From<ColumnDescriptor> for ColumnResource {
    fn from(column: ColumnDescriptor) -> Self {
        Self {
            name: column.name,
            data_type: column.data_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EntityInfoResource {
    pub columns: Vec<ColumnResource>,
    pub indexes: Vec<String>,
}

impl From<EntityInfo> for EntityInfoResource {
    fn from(info: EntityInfo) -> Self {
        Self {
            columns: info.columns.into_iter().map(ColumnResource::from).collect(),
            indexes: info.indexes,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BrowseEntityQueryResource {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePageResource {
    pub columns: Vec<ColumnResource>,
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<Value>,
    pub page: u32,
    pub page_size: u32,
}

impl BrowsePageResource {
    pub fn from_page(page: BrowsePage, page_number: u32, page_size: u32) -> Self {
        Self {
            columns: page.columns.into_iter().map(ColumnResource::from).collect(),
            rows: page.rows,
            page: page_number,
            page_size,
        }
    }
}
