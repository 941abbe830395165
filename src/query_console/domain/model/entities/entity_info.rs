use serde_json::Value;

use crate::query_console::domain::model::value_objects::column_descriptor::ColumnDescriptor;

#[derive(Clone, Debug)]
pub struct EntityInfo {
    pub columns: Vec<ColumnDescriptor>,
    pub indexes: Vec<String>,
}

/// One page of browsed rows, already masked.
#[derive(Clone, Debug)]
pub struct BrowsePage {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Value>,
}
