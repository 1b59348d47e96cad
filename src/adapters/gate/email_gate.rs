//! Implements AccessGatePort for email-shaped identifiers.
//!
//! Format rule first, then the domain policy: an exact allow-list match, or a
//! domain containing one of the allowed fragments (".com" admits ".com.br").

use crate::domain::DomainError;
use crate::ports::AccessGatePort;
use crate::shared::config::{DEFAULT_ALLOWED_DOMAINS, DEFAULT_ALLOWED_FRAGMENTS};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone)]
pub struct EmailGate {
    allowed_domains: Vec<String>,
    allowed_fragments: Vec<String>,
}

impl Default for EmailGate {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            DEFAULT_ALLOWED_FRAGMENTS.iter().map(|d| d.to_string()).collect(),
        )
    }
}

impl EmailGate {
    pub fn new(allowed_domains: Vec<String>, allowed_fragments: Vec<String>) -> Self {
        Self {
            allowed_domains: allowed_domains.iter().map(|d| d.to_lowercase()).collect(),
            allowed_fragments: allowed_fragments.iter().map(|f| f.to_lowercase()).collect(),
        }
    }

    fn domain_allowed(&self, domain: &str) -> bool {
        self.allowed_domains.iter().any(|d| d == domain)
            || self.allowed_fragments.iter().any(|f| domain.contains(f.as_str()))
    }
}

impl AccessGatePort for EmailGate {
    fn check(&self, candidate: &str) -> Result<String, DomainError> {
        let email = candidate.trim();
        if !EMAIL_FORMAT.is_match(email) {
            return Err(DomainError::AccessDenied(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        // The format rule guarantees exactly one '@'.
        let domain = email
            .split_once('@')
            .map(|(_, d)| d.to_lowercase())
            .unwrap_or_default();
        if !self.domain_allowed(&domain) {
            return Err(DomainError::AccessDenied(format!(
                "email domain '{}' is not allowed",
                domain
            )));
        }
        Ok(email.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_and_dot_com_domains() {
        let gate = EmailGate::default();
        assert_eq!(gate.check(" ana@gmail.com ").unwrap(), "ana@gmail.com");
        assert!(gate.check("ana@GMAIL.COM").is_ok());
        assert!(gate.check("ana@empresa.com.br").is_ok());
        assert!(gate.check("ana@startup.com").is_ok());
    }

    #[test]
    fn test_rejects_bad_format() {
        let gate = EmailGate::default();
        for bad in ["", "ana", "ana@gmail", "ana @gmail.com", "a@b@gmail.com", "@gmail.com"] {
            assert!(
                matches!(gate.check(bad), Err(DomainError::AccessDenied(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_domain_outside_policy() {
        let gate = EmailGate::default();
        assert!(matches!(
            gate.check("ana@universidade.edu"),
            Err(DomainError::AccessDenied(_))
        ));
    }

    #[test]
    fn test_custom_policy() {
        let gate = EmailGate::new(vec!["Example.org".into()], vec![]);
        assert!(gate.check("ana@example.org").is_ok());
        assert!(gate.check("ana@gmail.com").is_err());
    }
}
