//! REST client module for the hosted Supabase backend.
//!
//! This module provides the `Client` for talking to the two service
//! surfaces the app depends on:
//!
//! - PostgREST (`{base}/rest/v1`) for table queries and the attendance upsert
//! - GoTrue (`{base}/auth/v1`) for email/password identity
//!
//! Requests authenticate with the project anon key plus, once signed in,
//! the session's JWT bearer token.

pub mod client;
pub mod error;

pub use client::Client;
pub use error::ApiError;
