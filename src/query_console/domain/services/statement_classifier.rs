use regex::Regex;
use sha2::{Digest, Sha256};

use crate::query_console::domain::model::{
    enums::backend_kind::BackendKind,
    value_objects::statement_classification::StatementClassification,
};

lazy_static::lazy_static! {
    static ref WHERE_CLAUSE_REGEX: Regex = Regex::new(r"(?i)\bwhere\b").expect("valid regex");
}

const WRITE_PREFIXES: [&str; 7] = [
    "insert", "update", "delete", "create", "alter", "drop", "truncate",
];
const DANGEROUS_PREFIXES: [&str; 3] = ["drop", "alter", "truncate"];
const DOCUMENT_WRITE_ACTIONS: [&str; 3] = ["insert", "update", "delete"];

/// Shallow, per-dialect classification. Not a parser.
pub fn classify(backend: BackendKind, statement: &str) -> StatementClassification {
    match backend {
        BackendKind::Relational => classify_relational(statement),
        BackendKind::Document => StatementClassification {
            is_write: is_document_write(statement),
            is_dangerous: false,
            has_where: false,
        },
    }
}

fn classify_relational(statement: &str) -> StatementClassification {
    let normalized = statement.trim().to_lowercase();

    StatementClassification {
        is_write: WRITE_PREFIXES.iter().any(|p| normalized.starts_with(p)),
        is_dangerous: DANGEROUS_PREFIXES.iter().any(|p| normalized.starts_with(p)),
        has_where: WHERE_CLAUSE_REGEX.is_match(statement),
    }
}

/// Document statements are JSON requests carrying an `action` field.
/// Anything that does not parse is treated as a read.
fn is_document_write(statement: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(statement)
        .ok()
        .and_then(|value| {
            value
                .get("action")
                .and_then(|a| a.as_str())
                .map(str::to_lowercase)
        })
        .is_some_and(|action| DOCUMENT_WRITE_ACTIONS.iter().any(|w| *w == action))
}

/// Appends a row cap unless the statement already mentions `limit` anywhere.
pub fn enforce_limit(statement: &str, max_rows: u32) -> String {
    if max_rows == 0 || statement.to_lowercase().contains("limit") {
        return statement.to_string();
    }
    format!("{} LIMIT {}", statement.trim(), max_rows)
}

pub fn statement_hash(statement: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(statement.as_bytes());
    format!("{:x}", hasher.finalize())
}
