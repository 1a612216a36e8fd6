//! Integration tests against a mock admin API

mod authenticated_fetch_tests;
mod cookie_store_tests;
mod session_tests;
