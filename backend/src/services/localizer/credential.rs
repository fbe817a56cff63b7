//! Credential resolution
//!
//! A deployment-provided key always wins over the key the user saved.
//! The user key only takes effect when no deployment key exists.

/// Environment variable holding the deployment key
pub const DEPLOYMENT_KEY_ENV: &str = "API_KEY";

#[derive(Clone, Default)]
pub struct CredentialResolver {
    deployment_key: Option<String>,
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("has_deployment_key", &self.has_deployment_key())
            .finish()
    }
}

impl CredentialResolver {
    /// Blank deployment keys count as absent.
    pub fn new(deployment_key: Option<String>) -> Self {
        Self { deployment_key: deployment_key.filter(|k| !k.trim().is_empty()) }
    }

    pub fn has_deployment_key(&self) -> bool {
        self.deployment_key.is_some()
    }

    pub fn resolve(&self, user_key: Option<&str>) -> Option<String> {
        resolve_credential(self.deployment_key.as_deref(), user_key)
    }
}

/// Two-input decision table: deployment key, else non-blank user key, else none.
pub fn resolve_credential(deployment_key: Option<&str>, user_key: Option<&str>) -> Option<String> {
    match (deployment_key, user_key) {
        (Some(key), _) if !key.trim().is_empty() => Some(key.to_string()),
        (_, Some(key)) if !key.trim().is_empty() => Some(key.to_string()),
        _ => None,
    }
}
