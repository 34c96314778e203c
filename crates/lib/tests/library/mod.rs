pub mod common;
pub mod publish_tests;
pub mod windows_tests;
