//! Streaming catalog browser service: catalog search, recommendations,
//! profile-scoped watchlists and watch progress, and a headless player.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
