// src/auth.rs

//! Shared-secret check for the scrape trigger.

/// Authorization for scrape triggers.
///
/// With no secret configured every trigger is accepted. Otherwise the
/// caller must send the secret as `?secret=` or as a bearer token.
#[derive(Debug, Clone, Default)]
pub struct TriggerAuth {
    secret: Option<String>,
}

impl TriggerAuth {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Read the secret from `CRON_SECRET`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("CRON_SECRET").ok())
    }

    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// Check a trigger's query secret and `Authorization` header.
    pub fn is_authorized(&self, query_secret: Option<&str>, authorization: Option<&str>) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            return true;
        };

        if query_secret == Some(secret) {
            return true;
        }

        authorization
            .and_then(|header| header.strip_prefix("Bearer "))
            .is_some_and(|token| token == secret)
    }
}
