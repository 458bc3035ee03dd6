//! Named provider registry.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::{
    auth::{
        auth::{AuthFailure, AuthOutcome, StaticPrincipal, StaticTokenAuthenticator},
        challenge::Challenge,
    },
    config::{StaticAuthConfig, source::PropertySource},
    prelude::*,
};

/// Registry of static token providers, keyed by name.
///
/// Providers are resolved when registered: a provider without a token never
/// enters the registry.
pub struct Authentication {
    source: Arc<dyn PropertySource>,
    providers: BTreeMap<String, Arc<StaticTokenAuthenticator>>,
}

impl Authentication {
    /// Creates an empty registry resolving unset settings from `source`.
    pub fn new(source: impl PropertySource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            providers: BTreeMap::new(),
        }
    }

    /// Registers a static token provider.
    ///
    /// `configure` may set the token, realm and scheme; whatever it leaves
    /// unset is read from the registry's property source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use static_auth::{Authentication, AuthScheme};
    /// use static_auth::config::source::MapSource;
    ///
    /// # fn example() -> static_auth::prelude::Result<()> {
    /// let source = MapSource::default().with("static-auth.token", "from-config");
    /// let mut auth = Authentication::new(source);
    ///
    /// auth.register_static(None, |_| {})?;
    /// auth.register_static(Some("legacy"), |config| {
    ///     config.token = Some(String::from("legacy-token"));
    ///     config.scheme = AuthScheme::Static;
    /// })?;
    ///
    /// assert_eq!(auth.provider("static")?.realm(), "Server");
    /// assert_eq!(auth.provider("legacy")?.scheme(), AuthScheme::Static);
    /// # Ok(())
    /// # }
    /// ```
    pub fn register_static<F>(&mut self, name: Option<&str>, configure: F) -> Result<()>
    where
        F: FnOnce(&mut StaticAuthConfig),
    {
        let mut config = StaticAuthConfig::new(name);
        configure(&mut config);
        let authenticator = StaticTokenAuthenticator::from_config(&config, self.source.as_ref())?;
        self.register(authenticator)
    }

    /// Registers an already built authenticator under its own name.
    pub fn register(&mut self, authenticator: StaticTokenAuthenticator) -> Result<()> {
        let name = authenticator.name().to_string();
        if self.providers.contains_key(&name) {
            return Err(Error::DuplicateProvider(name));
        }

        info!(
            provider = %name,
            scheme = %authenticator.scheme(),
            realm = %authenticator.realm(),
            "Registered static token provider"
        );
        self.providers.insert(name, Arc::new(authenticator));
        Ok(())
    }

    pub fn provider(&self, name: &str) -> Result<Arc<StaticTokenAuthenticator>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Builds the ordered provider chain a protected route runs.
    pub fn chain<I>(&self, names: I) -> Result<AuthChain>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let providers = names
            .into_iter()
            .map(|name| self.provider(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        AuthChain::new(providers)
    }
}

/// Providers tried in order for one protected route.
#[derive(Debug, Clone)]
pub struct AuthChain {
    providers: Arc<[Arc<StaticTokenAuthenticator>]>,
}

/// A request that no provider of the chain accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// `InvalidCredentials` if any provider saw a wrong token.
    pub cause: AuthFailure,
    /// Challenge of the first provider in the chain.
    pub challenge: Challenge,
}

impl AuthChain {
    pub fn new(providers: Vec<Arc<StaticTokenAuthenticator>>) -> Result<Self> {
        if providers.is_empty() {
            return Err(Error::EmptyProviderChain);
        }
        Ok(Self {
            providers: providers.into(),
        })
    }

    pub fn providers(&self) -> &[Arc<StaticTokenAuthenticator>] {
        &self.providers
    }

    /// Runs every provider until one accepts the request.
    pub fn authenticate(&self, headers: &HeaderMap) -> std::result::Result<StaticPrincipal, Rejection> {
        let mut cause = AuthFailure::NoCredentials;
        for provider in self.providers.iter() {
            match provider.authenticate(headers) {
                AuthOutcome::Authenticated(principal) => return Ok(principal),
                AuthOutcome::Unauthenticated(AuthFailure::InvalidCredentials) => {
                    cause = AuthFailure::InvalidCredentials;
                }
                AuthOutcome::Unauthenticated(AuthFailure::NoCredentials) => {}
            }
        }

        Err(Rejection {
            cause,
            challenge: self.providers[0].challenge(),
        })
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.challenge.into_response()
    }
}
