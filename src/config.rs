//! Endpoint configuration for the identity, inventory, and pricing services.

// self
use crate::{_prelude::*, error::ConfigError};

const DEFAULT_AUTH_ENDPOINT: &str = "https://identity.convious.com";
const DEFAULT_INVENTORY_ENDPOINT: &str = "https://inventory.convious.com";
const DEFAULT_PRICING_ENDPOINT: &str = "https://pricer.convious.com";

/// Service endpoints used by [`create_client`](crate::create_client).
///
/// Every field defaults to the production endpoint, so a deserialized config only needs to
/// name the endpoints it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
	/// Identity service hosting `/oauth/token/`.
	pub auth_endpoint: Url,
	/// Inventory service receiving product events.
	pub inventory_endpoint: Url,
	/// Pricing service answering real-time price lookups.
	pub pricing_endpoint: Url,
}
impl ClientConfig {
	/// Overrides the identity service endpoint.
	pub fn with_auth_endpoint(mut self, endpoint: &str) -> Result<Self> {
		self.auth_endpoint = parse_endpoint(endpoint)?;

		Ok(self)
	}

	/// Overrides the inventory service endpoint.
	pub fn with_inventory_endpoint(mut self, endpoint: &str) -> Result<Self> {
		self.inventory_endpoint = parse_endpoint(endpoint)?;

		Ok(self)
	}

	/// Overrides the pricing service endpoint.
	pub fn with_pricing_endpoint(mut self, endpoint: &str) -> Result<Self> {
		self.pricing_endpoint = parse_endpoint(endpoint)?;

		Ok(self)
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			auth_endpoint: Url::parse(DEFAULT_AUTH_ENDPOINT)
				.expect("Default auth endpoint should be a valid URL."),
			inventory_endpoint: Url::parse(DEFAULT_INVENTORY_ENDPOINT)
				.expect("Default inventory endpoint should be a valid URL."),
			pricing_endpoint: Url::parse(DEFAULT_PRICING_ENDPOINT)
				.expect("Default pricing endpoint should be a valid URL."),
		}
	}
}

/// Joins `path` onto `base` as plain text, so base paths are preserved and slashes never
/// double up.
pub fn endpoint_url(base: &Url, path: &str) -> String {
	format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
	Url::parse(endpoint)
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), source })
		.map_err(Error::from)
}
