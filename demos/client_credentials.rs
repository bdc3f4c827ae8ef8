//! Demonstrates the default client stack against a local mock of the identity and pricing
//! services: the first call exchanges client credentials, later calls reuse the cached token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::macros::datetime;
// self
use pricing_api_client::{
	client::{PricingRequest, PricingRequestProduct},
	config::ClientConfig,
	create_client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"token_type\":\"bearer\"}");
		})
		.await;
	let price_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/price/rtp").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"{\"prices\":[{\"priceDate\":\"2024-06-01\",\"priceTime\":null,\"products\":[{\"productReference\":\"day-pass\",\"numberOfItems\":1,\"price\":\"24.50\"}]}]}",
			);
		})
		.await;
	let config = ClientConfig::default()
		.with_auth_endpoint(&server.base_url())?
		.with_pricing_endpoint(&server.base_url())?;
	let client = create_client("demo-client", "super-secret", config);
	let request = PricingRequest {
		cookie_id: "demo-visitor".into(),
		ip: None,
		date_from: datetime!(2024-06-01 00:00 UTC),
		date_to: datetime!(2024-06-01 23:59 UTC),
		timezone: "Europe/Amsterdam".into(),
		products: vec![PricingRequestProduct {
			product_reference: "day-pass".into(),
			number_of_items: 1,
		}],
		times: None,
	};

	for _ in 0..2 {
		let response = client.get_prices(&request).await?;

		for item in response.prices {
			for product in item.products {
				println!("{} on {}: {}.", product.product_reference, item.price_date, product.price);
			}
		}
	}

	token_mock.assert_calls_async(1).await;
	price_mock.assert_calls_async(2).await;

	Ok(())
}
