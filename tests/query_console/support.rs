mod fakes;

pub use fakes::{FailingSink, FakeAccessControlBcFacade, RecordingSink};
pub use fixtures::{
    CONNECTION_ID, admin_identity, columns, connection_id, identity, pii_rule, stale_identity,
    submit_command, submit_command_with_approval,
};
pub use harness::{GLOBAL_MAX_ROWS, QueryConsoleHarness, create_harness};
