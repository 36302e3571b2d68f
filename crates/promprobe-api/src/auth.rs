use secrecy::{ExposeSecret, SecretString};

/// Credentials for authenticating with a metrics backend.
///
/// Prometheus itself ships without auth; these cover the common
/// reverse-proxy setups in front of it.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// No `Authorization` header.
    #[default]
    Anonymous,

    /// `Authorization: Bearer <token>`.
    Bearer { token: SecretString },

    /// HTTP basic auth.
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Credentials {
    /// Apply these credentials to an outgoing request.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Anonymous => builder,
            Self::Bearer { token } => builder.bearer_auth(token.expose_secret()),
            Self::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }

    /// Short, secret-free label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Bearer { .. } => "bearer",
            Self::Basic { .. } => "basic",
        }
    }
}
