//! tests/api/main.rs
//! One test binary for every endpoint, laid out like the app's own modules.
mod health_check;
mod helpers;
