//! Core NewsApp library (forms, session, routes, API client, config).

pub mod api;
pub mod config;
pub mod forms;
pub mod logging;
pub mod routes;
pub mod session;
pub mod submission;
