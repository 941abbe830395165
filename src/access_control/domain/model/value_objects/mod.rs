pub mod action_name;
pub mod environment_name;
pub mod policy_constraints;
pub mod principal_id;
pub mod resource_name;
pub mod role_name;
