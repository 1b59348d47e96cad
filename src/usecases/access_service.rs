//! Viewer sign-in. Delegates identifier validation to the access gate.

use crate::domain::DomainError;
use crate::ports::AccessGatePort;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Proof that a viewer passed the gate. The viewer surface requires one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSession {
    pub email: String,
    pub granted_at: DateTime<Utc>,
}

pub struct AccessService {
    gate: Arc<dyn AccessGatePort>,
}

impl AccessService {
    pub fn new(gate: Arc<dyn AccessGatePort>) -> Self {
        Self { gate }
    }

    pub fn sign_in(&self, candidate: &str) -> Result<ViewerSession, DomainError> {
        match self.gate.check(candidate) {
            Ok(email) => {
                info!(email = %email, "viewer signed in");
                Ok(ViewerSession {
                    email,
                    granted_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(error = %e, "viewer sign-in rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllowOnly(&'static str);

    impl AccessGatePort for AllowOnly {
        fn check(&self, candidate: &str) -> Result<String, DomainError> {
            if candidate == self.0 {
                Ok(candidate.to_string())
            } else {
                Err(DomainError::AccessDenied(candidate.to_string()))
            }
        }
    }

    #[test]
    fn test_sign_in() {
        let service = AccessService::new(Arc::new(AllowOnly("ana@gmail.com")));
        let session = service.sign_in("ana@gmail.com").unwrap();
        assert_eq!(session.email, "ana@gmail.com");
        assert!(matches!(
            service.sign_in("bob@gmail.com"),
            Err(DomainError::AccessDenied(_))
        ));
    }
}
