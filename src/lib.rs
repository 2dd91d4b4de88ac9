//! AgriSmart web frontend: landing page, crop prediction, AI care guide and
//! assistant chat.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod flows;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod session;
pub mod view;
