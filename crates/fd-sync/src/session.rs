//! The advisory admin access gate: a two-step challenge compared verbatim
//! against values in the config document. Plain-text comparison is a
//! deliberate placeholder in this system, not a security boundary; there is
//! no lockout, no rate limiting, and no persisted session.

use fd_core::error::{AppError, Result};
use fd_core::models::SiteConfig;

/// Which prompt the challenge is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    Email,
    Password,
    Authenticated,
}

/// Ephemeral process state. Dropping (or restarting the process) is the
/// logout; nothing is persisted and nothing expires.
#[derive(Debug)]
pub struct LoginChallenge {
    step: LoginStep,
}

impl Default for LoginChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginChallenge {
    pub fn new() -> Self {
        Self {
            step: LoginStep::Email,
        }
    }

    pub fn step(&self) -> LoginStep {
        self.step
    }

    pub fn is_authenticated(&self) -> bool {
        self.step == LoginStep::Authenticated
    }

    /// Step 1: exact match against `allowed_email`. A mismatch (or an
    /// unconfigured gate) keeps the challenge at step 1. Submitting an
    /// email always restarts the challenge from the top.
    pub fn submit_email(&mut self, config: &SiteConfig, email: &str) -> Result<()> {
        self.step = LoginStep::Email;
        if !config.allowed_email.is_empty() && email == config.allowed_email {
            self.step = LoginStep::Password;
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Access Denied: Identity not recognized.".into(),
            ))
        }
    }

    /// Step 2: exact match against the stored password. Only reachable
    /// after the identity check passed; a wrong password stays at step 2.
    pub fn submit_password(&mut self, config: &SiteConfig, password: &str) -> Result<()> {
        if self.step != LoginStep::Password {
            return Err(AppError::Unauthorized(
                "Access Denied: Identity check required first.".into(),
            ));
        }
        if !config.password.is_empty() && password == config.password {
            self.step = LoginStep::Authenticated;
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Access Denied: Incorrect credentials.".into(),
            ))
        }
    }

    pub fn logout(&mut self) {
        self.step = LoginStep::Email;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::bootstrap()
    }

    #[test]
    fn wrong_email_stays_at_step_one() {
        let mut gate = LoginChallenge::new();
        let err = gate.submit_email(&config(), "nobody@example.com").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(gate.step(), LoginStep::Email);
    }

    #[test]
    fn password_step_is_unreachable_without_identity() {
        let mut gate = LoginChallenge::new();
        let err = gate.submit_password(&config(), "password123").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn correct_email_wrong_password_is_denied_at_step_two() {
        let mut gate = LoginChallenge::new();
        gate.submit_email(&config(), "admin@fender.ai").unwrap();
        assert_eq!(gate.step(), LoginStep::Password);

        let err = gate.submit_password(&config(), "letmein").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        // Still at step 2; another attempt is allowed.
        assert_eq!(gate.step(), LoginStep::Password);
    }

    #[test]
    fn both_steps_in_sequence_authenticate() {
        let mut gate = LoginChallenge::new();
        gate.submit_email(&config(), "admin@fender.ai").unwrap();
        gate.submit_password(&config(), "password123").unwrap();
        assert!(gate.is_authenticated());

        gate.logout();
        assert_eq!(gate.step(), LoginStep::Email);
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn unconfigured_gate_rejects_everything() {
        let mut gate = LoginChallenge::new();
        let empty = SiteConfig::default();
        assert!(gate.submit_email(&empty, "").is_err());
        assert_eq!(gate.step(), LoginStep::Email);
    }
}
