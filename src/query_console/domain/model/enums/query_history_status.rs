#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryHistoryStatus {
    PendingApproval,
    Running,
    Completed,
    Failed,
}

impl QueryHistoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}
