pub mod authenticated_session;
