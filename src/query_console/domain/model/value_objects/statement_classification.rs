#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatementClassification {
    pub is_write: bool,
    pub is_dangerous: bool,
    pub has_where: bool,
}

impl StatementClassification {
    pub fn action_name(&self) -> &'static str {
        if self.is_write {
            "query:write"
        } else {
            "query:read"
        }
    }
}
