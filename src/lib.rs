//! Async client for the pricing and inventory APIs with transparent client-credentials
//! authentication, single-flight token refresh, and a one-shot retry on HTTP 401.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AuthenticatedTransport, ClientCredentialsProvider},
		http::ReqwestTransport,
	};

	/// Authenticated transport type alias used by reqwest-backed integration tests.
	pub type ReqwestTestTransport =
		AuthenticatedTransport<ReqwestTransport, ClientCredentialsProvider<ReqwestTransport>>;

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Constructs an [`AuthenticatedTransport`] whose token endpoint lives under `auth_endpoint`,
	/// sharing one reqwest transport between the credential exchange and the wrapped calls.
	pub fn build_reqwest_test_transport(
		auth_endpoint: &str,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestTransport {
		let transport = Arc::new(test_reqwest_transport());
		let endpoint =
			Url::parse(auth_endpoint).expect("Mock auth endpoint should parse successfully.");
		let provider = ClientCredentialsProvider::new(
			Arc::clone(&transport),
			&endpoint,
			client_id,
			client_secret,
		);

		AuthenticatedTransport::new(transport, provider)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))]
use {color_eyre as _, httpmock as _, pricing_api_client as _};

// self
#[cfg(feature = "reqwest")]
use crate::{
	_prelude::*,
	auth::{AuthenticatedTransport, ClientCredentialsProvider},
	client::PricingApiClient,
	config::ClientConfig,
	http::ReqwestTransport,
};

#[cfg(feature = "reqwest")]
/// Pricing client specialized for the crate's default reqwest transport stack.
pub type ReqwestPricingClient = PricingApiClient<
	AuthenticatedTransport<ReqwestTransport, ClientCredentialsProvider<ReqwestTransport>>,
>;

/// Assembles the default client stack: one reqwest transport shared by the credential
/// exchange and the authenticated API calls.
#[cfg(feature = "reqwest")]
pub fn create_client(
	client_id: impl Into<String>,
	client_secret: impl Into<String>,
	config: ClientConfig,
) -> ReqwestPricingClient {
	let transport = Arc::new(ReqwestTransport::default());
	let provider = ClientCredentialsProvider::new(
		Arc::clone(&transport),
		&config.auth_endpoint,
		client_id,
		client_secret,
	);

	PricingApiClient::new(AuthenticatedTransport::new(transport, provider), config)
}
