//! Unit tests for the identity module.

mod domain_tests;
mod role_tests;
