//! Service principal and user credentials.
//!
//! Credentials implement custom Debug to redact secrets.

use crate::error::{Error, ErrorKind, Result};

/// OAuth2 grant used to obtain a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Resource owner password credentials, on behalf of a user.
    Password,
    /// Client credentials, as the service principal itself.
    ClientCredentials,
}

impl Grant {
    /// The `grant_type` form value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grant::Password => "password",
            Grant::ClientCredentials => "client_credentials",
        }
    }
}

/// Azure AD credentials for the Power BI API.
///
/// The password grant is used when both a username and a password are
/// present; otherwise the client credentials grant is used.
#[derive(Clone)]
pub struct Credentials {
    tenant_id: String,
    client_id: String,
    client_secret: String,
    username: Option<String>,
    password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Credentials {
    /// Service principal credentials (client credentials grant).
    pub fn client_credentials(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: None,
            password: None,
        }
    }

    /// User credentials (password grant).
    pub fn password(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::client_credentials(tenant_id, client_id, client_secret)
            .with_user(username, password)
    }

    /// Attach a username and password.
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Load credentials from environment variables.
    ///
    /// Reads `POWERBI_TENANT_ID`, `POWERBI_CLIENT_ID` and
    /// `POWERBI_CLIENT_SECRET`, plus the optional `POWERBI_USERNAME` and
    /// `POWERBI_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::new(ErrorKind::EnvVar(name.to_string())))
        };

        let tenant_id = required("POWERBI_TENANT_ID")?;
        let client_id = required("POWERBI_CLIENT_ID")?;
        let client_secret = required("POWERBI_CLIENT_SECRET")?;

        let mut creds = Self::client_credentials(tenant_id, client_id, client_secret);
        creds.username = lookup("POWERBI_USERNAME").filter(|v| !v.is_empty());
        creds.password = lookup("POWERBI_PASSWORD").filter(|v| !v.is_empty());
        Ok(creds)
    }

    /// Check that the required fields are present.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tenant_id", &self.tenant_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ] {
            if value.is_empty() {
                return Err(Error::new(ErrorKind::InvalidCredentials(format!(
                    "{} must not be empty",
                    name
                ))));
            }
        }
        Ok(())
    }

    /// The grant these credentials authenticate with.
    pub fn grant(&self) -> Grant {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Grant::Password,
            _ => Grant::ClientCredentials,
        }
    }

    /// Azure AD tenant.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Application (client) id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Username for the password grant.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub(crate) fn user_password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}
