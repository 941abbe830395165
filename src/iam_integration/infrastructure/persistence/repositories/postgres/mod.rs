pub mod sqlx_session_lookup_repository_impl;
