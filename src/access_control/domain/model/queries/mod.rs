pub mod authorize_query;
