//! Plant disease classification proxy and its capture/upload client.
//!
//! The proxy half (`handlers`, `upload`, `backend`, `demo`) validates an
//! uploaded image and forwards it to an external prediction service, falling
//! back to canned demo results when that service is unavailable. The client
//! half (`capture`) picks or photographs an image, submits it and tracks the
//! analysis through an explicit state machine.

pub mod backend;
pub mod capture;
pub mod config;
pub mod demo;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod upload;
