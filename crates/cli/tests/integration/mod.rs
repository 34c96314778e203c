pub mod common;
pub mod failure_tests;
pub mod inputs_tests;
pub mod plan_tests;
