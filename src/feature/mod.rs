//! The feature modules of the application.

pub mod hello;
