use crate::config::AdminConfig;

/// Gate for the admin dashboard.
pub trait Authenticator: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed username/password pair from config. A placeholder, not a security
/// boundary.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl Authenticator for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_must_match() {
        let creds = StaticCredentials::new("operator", "s3cret");
        assert!(creds.verify("operator", "s3cret"));
        assert!(!creds.verify("operator", "wrong"));
        assert!(!creds.verify("other", "s3cret"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn test_from_config_defaults() {
        let creds = StaticCredentials::from_config(&AdminConfig::default());
        assert!(creds.verify("ADMIN", "ADMIN"));
        assert!(!creds.verify("admin", "admin"));
    }
}
