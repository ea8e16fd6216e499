use url::Url;

use crate::error::{Error, Result};

const COMMANDS_PATH: &str = "/api/commands";
const EXECUTE_PATH: &str = "/ws/execute";

/// The two server endpoints, both derived from one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] unless the base is `http` or `https`.
    pub fn new(base: Url) -> Result<Self> {
        match base.scheme() {
            "http" | "https" => Ok(Self { base }),
            other => Err(Error::UnsupportedScheme(other.to_string())),
        }
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base.scheme() == "https"
    }

    #[must_use]
    pub fn commands_url(&self) -> Url {
        let mut url = self.base.clone();
        url.set_path(COMMANDS_PATH);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// The execution endpoint, `wss` when the base is secure and `ws` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] if the scheme can not be switched.
    pub fn execute_url(&self) -> Result<Url> {
        let scheme = if self.is_secure() { "wss" } else { "ws" };

        let mut url = self.base.clone();
        url.set_scheme(scheme)
            .map_err(|()| Error::UnsupportedScheme(self.base.scheme().to_string()))?;
        url.set_path(EXECUTE_PATH);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}
