pub mod access_control_command_service_impl;
