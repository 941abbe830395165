pub mod access_control_facade_real_impl;
