mod session_cache_tests;
mod support;
