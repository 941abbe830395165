pub mod access_control_domain_error;
pub mod permission_effect;
