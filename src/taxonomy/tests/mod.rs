//! Unit tests for the taxonomy module.

mod category_tests;
mod project_tests;
