/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User record lifecycle (create, list/filter, delete, update)
/// - `managers`: Active manager listing

pub mod health;
pub mod managers;
pub mod users;
