/// Username and password as typed at a login prompt
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Gate in front of the interactive session. The pipeline never consults it.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> bool;
}

/// Accepts one configured username/password pair
pub struct StaticCredentials {
    expected: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            expected: Credentials::new(username, password),
        }
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, credentials: &Credentials) -> bool {
        credentials.username == self.expected.username
            && credentials.password == self.expected.password
    }
}

/// For deployments without a login step
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn authenticate(&self, _credentials: &Credentials) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials() {
        let auth = StaticCredentials::new("reader", "s3cret");
        assert!(auth.authenticate(&Credentials::new("reader", "s3cret")));
        assert!(!auth.authenticate(&Credentials::new("reader", "wrong")));
        assert!(!auth.authenticate(&Credentials::new("Reader", "s3cret")));
    }

    #[test]
    fn test_allow_all() {
        assert!(AllowAll.authenticate(&Credentials::new("", "")));
    }
}
