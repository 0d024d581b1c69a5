//! # evaltrack
//!
//! Typed client for the student evaluation backend: assignments and their
//! grades, the internship diary, and the teacher's course board.
//!
//! ## Modules
//!
//! - [`client`]: authenticated JSON-over-HTTP client
//! - [`session`]: where the bearer token lives between requests
//! - [`api`]: one function per backend endpoint
//! - [`models`]: wire types and form input with validation
//! - [`views`]: screen state built from API responses
//! - [`auth`]: routing decisions around login and expired sessions
//! - [`state`]: request lifecycle and cancellation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use evaltrack::api::users;
//! use evaltrack::client::{ApiClient, ClientConfig};
//! use evaltrack::models::LoginForm;
//! use evaltrack::session::MemorySession;
//! use evaltrack::views::{self, Landing};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default(), Arc::new(MemorySession::new()))?;
//!
//!     users::login(&client, &LoginForm {
//!         email: "student@example.com".into(),
//!         password: "secret".into(),
//!     }).await?;
//!
//!     if let Landing::Student { dashboard, .. } = views::dashboard::load(&client).await? {
//!         println!("{} upcoming assignments", dashboard.upcoming.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;
pub mod state;
pub mod validation;
pub mod views;

pub use client::{ApiClient, ApiError, ApiResult, ClientConfig};
pub use config::Config;
pub use session::{FileSession, MemorySession, SessionStore};
