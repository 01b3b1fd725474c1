/// Session-scoped authentication context
///
/// One value of this type travels with the UI state instead of an ambient
/// "authenticated" global: handlers read it, the auth flow replaces it.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    authenticated: bool,
    email: Option<String>,
    access_token: Option<String>,
}

impl Session {
    /// The state before any sign-in
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Build the context from a successful sign-in
    pub fn signed_in(email: String, access_token: Option<String>) -> Self {
        Session {
            authenticated: true,
            email: Some(email),
            access_token,
        }
    }

    /// Whether the studio screen is unlocked
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Signed-in email, for the status line
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Bearer token from the identity provider, if one was issued
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Drop back to the signed-out state
    pub fn sign_out(&mut self) {
        *self = Self::signed_out();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_signed_out() {
        let session = Session::signed_out();
        assert!(!session.is_authenticated());
        assert_eq!(session.email(), None);
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn test_sign_in_then_out() {
        let mut session = Session::signed_in("a@b.c".into(), Some("token".into()));
        assert!(session.is_authenticated());
        assert_eq!(session.email(), Some("a@b.c"));
        assert_eq!(session.access_token(), Some("token"));

        session.sign_out();
        assert_eq!(session, Session::signed_out());
    }
}
