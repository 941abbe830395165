#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryAuditAction {
    ApprovalRequested,
    ApprovalApproved,
    ApprovalDenied,
    ApprovalsListed,
    QueryStart,
    QueryEnd,
    QueryFailed,
}

impl QueryAuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApprovalRequested => "query_approval_requested",
            Self::ApprovalApproved => "query_approval_approved",
            Self::ApprovalDenied => "query_approval_denied",
            Self::ApprovalsListed => "query_approval_listed",
            Self::QueryStart => "query_start",
            Self::QueryEnd => "query_end",
            Self::QueryFailed => "query_failed",
        }
    }
}
