//! Edge server for the Aaitek website.
//!
//! Serves the single-page app, answers social and search crawlers with
//! pre-rendered Open Graph documents, proxies read-only CMS collections, and
//! relays contact form submissions.

pub mod cms;
pub mod config;
pub mod crawler;
pub mod email;
pub mod error;
pub mod handlers;
pub mod meta;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
