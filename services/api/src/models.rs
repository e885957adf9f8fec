//! API models for request and response payloads

pub mod budget;
pub mod content;
pub mod dashboard;
pub mod gamification;
pub mod goal;
pub mod progress;
pub mod scenario;
