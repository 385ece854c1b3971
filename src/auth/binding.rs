//! Finite state machine tying the authenticated account to a teacher row.
//!
//! Identity changes arrive as discrete events; each one re-resolves (or
//! clears) the teacher profile. Resolution failure is a degraded state, not
//! a sign-out: the session stays authenticated, the UI shows "no teacher
//! profile" and write paths stay disabled.

use crate::models::Teacher;

/// Identity-service events the binding reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { user_id: String },
    UserUpdated { user_id: String },
    SignedOut,
}

/// Where the teacher binding currently stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TeacherBinding {
    /// No authenticated identity
    #[default]
    Anonymous,
    /// Identity known, profile lookup in flight
    Resolving { user_id: String },
    /// Profile resolved; reconciliation and saving are possible
    Bound(Teacher),
    /// Identity authenticated but no matching teacher row exists
    Unresolved { user_id: String },
}

impl TeacherBinding {
    /// Apply an identity event. Sign-in and user-updated both force a fresh
    /// resolution; sign-out drops everything.
    pub fn apply(&self, event: &AuthEvent) -> TeacherBinding {
        match event {
            AuthEvent::SignedIn { user_id } | AuthEvent::UserUpdated { user_id } => {
                TeacherBinding::Resolving {
                    user_id: user_id.clone(),
                }
            }
            AuthEvent::SignedOut => TeacherBinding::Anonymous,
        }
    }

    /// Record the outcome of a profile lookup. Ignored unless we are still
    /// resolving the same account the lookup was started for, so a stale
    /// lookup can never overwrite a newer state.
    pub fn resolved(&self, user_id: &str, teacher: Option<Teacher>) -> TeacherBinding {
        match self {
            TeacherBinding::Resolving { user_id: pending } if pending == user_id => match teacher
            {
                Some(t) => TeacherBinding::Bound(t),
                None => TeacherBinding::Unresolved {
                    user_id: user_id.to_string(),
                },
            },
            other => other.clone(),
        }
    }

    /// The bound teacher, if resolution succeeded
    pub fn teacher(&self) -> Option<&Teacher> {
        match self {
            TeacherBinding::Bound(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, TeacherBinding::Anonymous)
    }

    /// Status line text for the degraded and transitional states
    pub fn status_label(&self) -> Option<&'static str> {
        match self {
            TeacherBinding::Resolving { .. } => Some("Resolving teacher profile..."),
            TeacherBinding::Unresolved { .. } => Some("No teacher profile for this account"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(id: i64) -> Teacher {
        Teacher {
            id,
            nombre: "Laura".to_string(),
            user_id: Some("abc".to_string()),
            email: None,
            telefono: None,
        }
    }

    #[test]
    fn test_sign_in_starts_resolution() {
        let state = TeacherBinding::Anonymous.apply(&AuthEvent::SignedIn {
            user_id: "abc".to_string(),
        });
        assert_eq!(
            state,
            TeacherBinding::Resolving {
                user_id: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_resolution_success_binds() {
        let state = TeacherBinding::Resolving {
            user_id: "abc".to_string(),
        }
        .resolved("abc", Some(teacher(2)));
        assert_eq!(state.teacher().map(|t| t.id), Some(2));
    }

    #[test]
    fn test_resolution_failure_degrades_without_sign_out() {
        let state = TeacherBinding::Resolving {
            user_id: "abc".to_string(),
        }
        .resolved("abc", None);
        assert_eq!(
            state,
            TeacherBinding::Unresolved {
                user_id: "abc".to_string()
            }
        );
        assert!(!state.is_anonymous());
    }

    #[test]
    fn test_stale_resolution_is_ignored() {
        // A lookup for an old account resolves after the user switched
        let state = TeacherBinding::Resolving {
            user_id: "new".to_string(),
        }
        .resolved("old", Some(teacher(9)));
        assert_eq!(
            state,
            TeacherBinding::Resolving {
                user_id: "new".to_string()
            }
        );
    }

    #[test]
    fn test_user_updated_re_resolves_from_bound() {
        let state = TeacherBinding::Bound(teacher(2)).apply(&AuthEvent::UserUpdated {
            user_id: "abc".to_string(),
        });
        assert!(matches!(state, TeacherBinding::Resolving { .. }));
    }

    #[test]
    fn test_sign_out_clears_binding() {
        let state = TeacherBinding::Bound(teacher(2)).apply(&AuthEvent::SignedOut);
        assert_eq!(state, TeacherBinding::Anonymous);
    }
}
