//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /* Config Errors */
    #[error("Token is not set for provider '{provider}'")]
    TokenNotConfigured { provider: String },

    /* Registry Errors */
    #[error("Provider '{0}' is already registered")]
    DuplicateProvider(String),
    #[error("Provider '{0}' is not registered")]
    UnknownProvider(String),
    #[error("At least one provider is required")]
    EmptyProviderChain,

    #[error("Principal Missing")]
    PrincipalMissing,
}
