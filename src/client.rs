//! Pricing and inventory API calls layered over any [`Transport`].
//!
//! [`PricingApiClient`] is normally built on an
//! [`AuthenticatedTransport`](crate::auth::AuthenticatedTransport), but any transport works.
//! Unlike the transport layer, the client treats every non-2xx status as
//! [`Error::Api`], carrying the response body as diagnostic detail.

pub mod events;
pub mod pricing;

pub use events::*;
pub use pricing::*;

// self
use crate::{
	_prelude::*,
	config::{self, ClientConfig},
	error::ConfigError,
	http::{Method, RequestOptions, Response, Transport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Version negotiated with the pricing service through `Accept-Version`.
pub const PRICING_API_VERSION: &str = "1.0.0";
/// Version negotiated with the inventory service through `Accept-Version`.
pub const INVENTORY_API_VERSION: &str = "1.0.0";

const EVENTS_PATH: &str = "events";
const REAL_TIME_PRICE_PATH: &str = "api/price/rtp";

/// Client for the inventory and pricing services.
pub struct PricingApiClient<T>
where
	T: ?Sized + Transport,
{
	transport: Arc<T>,
	config: ClientConfig,
}
impl<T> PricingApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Creates a client that sends every call through `transport`.
	pub fn new(transport: impl Into<Arc<T>>, config: ClientConfig) -> Self {
		Self { transport: transport.into(), config }
	}

	/// Returns the transport used for API calls.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Returns the endpoint configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Posts a batch of inventory events.
	pub async fn post_events(&self, events: &[InventoryEvent]) -> Result<()> {
		const KIND: CallKind = CallKind::PostEvents;

		let span = CallSpan::new(KIND, "post_events");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = config::endpoint_url(&self.config.inventory_endpoint, EVENTS_PATH);
				let options = RequestOptions::new(Method::Post)
					.with_header("Content-Type", "application/json")
					.with_header("Accept-Version", INVENTORY_API_VERSION)
					.with_body(to_json(events)?);

				self.fetch(&url, options).await.map(|_| ())
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Posts a single inventory event.
	pub async fn post_event(&self, event: &InventoryEvent) -> Result<()> {
		self.post_events(std::slice::from_ref(event)).await
	}

	/// Requests real-time prices.
	pub async fn get_prices(&self, request: &PricingRequest) -> Result<PricingResponse> {
		const KIND: CallKind = CallKind::GetPrices;

		let span = CallSpan::new(KIND, "get_prices");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url =
					config::endpoint_url(&self.config.pricing_endpoint, REAL_TIME_PRICE_PATH);
				let options = RequestOptions::new(Method::Post)
					.with_header("Content-Type", "application/json")
					.with_header("Accept", "application/json")
					.with_header("Accept-Version", PRICING_API_VERSION)
					.with_body(to_json(request)?);
				let response = self.fetch(&url, options).await?;

				Ok(response.json::<PricingResponse>()?)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	async fn fetch(&self, url: &str, options: RequestOptions) -> Result<Response> {
		let response = self.transport.request(url, options).await?;

		if !response.is_success() {
			return Err(Error::Api {
				url: url.to_owned(),
				status: response.status(),
				body: response.text(),
			});
		}

		Ok(response)
	}
}
impl<T> Debug for PricingApiClient<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PricingApiClient").field("config", &self.config).finish()
	}
}

fn to_json<V>(value: &V) -> Result<String>
where
	V: ?Sized + Serialize,
{
	serde_json::to_string(value).map_err(|e| ConfigError::serialize(e).into())
}
