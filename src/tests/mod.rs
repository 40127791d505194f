#![warn(clippy::all, clippy::pedantic)]

pub mod integration_tests;
pub mod ui_tests;
