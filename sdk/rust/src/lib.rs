//! Typed async client for the student records API.

pub mod client;

pub use client::{CreatedStudent, SdkError, Student, StudentClient};
