/// Execution restrictions granted by the authorizer for one request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QueryConstraints {
    pub require_where: bool,
    pub read_only: bool,
    pub max_rows: u32,
    pub timeout_ms: u64,
}
