mod credentials;
mod token;

pub use credentials::{Credentials, ExchangeCredentials, RawCredentials};
pub use token::{AuthError, Token, TokenGrant, TokenManager, TokenState};
