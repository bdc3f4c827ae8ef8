//! Credential model, client-credentials exchange, and the authenticated transport wrapper.

pub mod credential;
pub mod provider;
pub mod transport;

pub use credential::*;
pub use provider::*;
pub use transport::*;
