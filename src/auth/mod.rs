//! Authentication module for sessions, credentials, and the teacher binding.
//!
//! This module provides:
//! - `Session`: persisted GoTrue session with expiry and refresh checks
//! - `CredentialStore`: OS-level credential storage via keyring
//! - `TeacherBinding`: finite state machine tying the authenticated account
//!   to its teacher profile

pub mod binding;
pub mod credentials;
pub mod session;

pub use binding::{AuthEvent, TeacherBinding};
pub use credentials::CredentialStore;
pub use session::{Session, SessionData};
