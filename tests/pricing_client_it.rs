// crates.io
use httpmock::prelude::*;
use time::macros::datetime;
// self
use pricing_api_client::{
	_preludet::*,
	client::{
		InventoryEvent, PricingRequest, PricingRequestProduct, ProductAvailabilityChanged,
		ProductRemoved,
	},
	config::ClientConfig,
	create_client,
};

fn local_config(server: &MockServer) -> ClientConfig {
	let base = server.base_url();

	ClientConfig::default()
		.with_auth_endpoint(&base)
		.and_then(|config| config.with_inventory_endpoint(&base))
		.and_then(|config| config.with_pricing_endpoint(&base))
		.expect("Mock endpoints should parse successfully.")
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"client-token\",\"token_type\":\"bearer\"}");
		})
		.await
}

#[tokio::test]
async fn get_prices_round_trips_through_the_pricing_service() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server).await;
	let prices = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/price/rtp")
				.header("authorization", "Bearer client-token")
				.header("accept-version", "1.0.0")
				.header("content-type", "application/json")
				.json_body(serde_json::json!({
					"cookieId": "cookie-42",
					"ip": null,
					"dateFrom": "2024-06-01T09:00:00Z",
					"dateTo": "2024-06-01T17:00:00Z",
					"timezone": "Europe/Amsterdam",
					"products": [{ "productReference": "day-pass", "numberOfItems": 2 }],
					"times": null
				}));
			then.status(200).header("content-type", "application/json").body(
				"{\"prices\":[{\"priceDate\":\"2024-06-01\",\"priceTime\":\"09:00\",\"products\":[{\"productReference\":\"day-pass\",\"numberOfItems\":2,\"price\":\"39.00\"}]}]}",
			);
		})
		.await;
	let client = create_client("pricing-client", "pricing-secret", local_config(&server));
	let request = PricingRequest {
		cookie_id: "cookie-42".into(),
		ip: None,
		date_from: datetime!(2024-06-01 09:00 UTC),
		date_to: datetime!(2024-06-01 17:00 UTC),
		timezone: "Europe/Amsterdam".into(),
		products: vec![PricingRequestProduct {
			product_reference: "day-pass".into(),
			number_of_items: 2,
		}],
		times: None,
	};
	let first = client.get_prices(&request).await.expect("Price lookup should succeed.");
	let second = client.get_prices(&request).await.expect("Second price lookup should succeed.");

	assert_eq!(first, second);
	assert_eq!(first.prices[0].price_time.as_deref(), Some("09:00"));
	assert_eq!(first.prices[0].products[0].price, "39.00");

	token.assert_calls_async(1).await;
	prices.assert_calls_async(2).await;
}

#[tokio::test]
async fn post_events_sends_tagged_batches() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server).await;
	let events = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/events")
				.header("authorization", "Bearer client-token")
				.header("accept-version", "1.0.0")
				.json_body(serde_json::json!([
					{ "type": "ProductRemoved", "payload": { "productReference": "day-pass" } },
					{
						"type": "ProductAvailabilityChanged",
						"payload": {
							"productReference": "night-pass",
							"eventDate": "2024-06-01",
							"startTime": null,
							"availability": 0
						}
					}
				]));
			then.status(202);
		})
		.await;
	let client = create_client("pricing-client", "pricing-secret", local_config(&server));

	client
		.post_events(&[
			InventoryEvent::ProductRemoved(ProductRemoved { product_reference: "day-pass".into() }),
			InventoryEvent::ProductAvailabilityChanged(ProductAvailabilityChanged {
				product_reference: "night-pass".into(),
				event_date: "2024-06-01".into(),
				start_time: None,
				availability: 0,
			}),
		])
		.await
		.expect("Event batch should be accepted.");

	token.assert_calls_async(1).await;
	events.assert_calls_async(1).await;
}

#[tokio::test]
async fn api_failures_keep_status_and_body() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let events = server
		.mock_async(|when, then| {
			when.method(POST).path("/events");
			then.status(500).body("inventory unavailable");
		})
		.await;
	let client = create_client("pricing-client", "pricing-secret", local_config(&server));
	let err = client
		.post_event(&InventoryEvent::ProductRemoved(ProductRemoved {
			product_reference: "day-pass".into(),
		}))
		.await
		.expect_err("A 500 must surface as an API error.");

	match err {
		Error::Api { status, body, .. } => {
			assert_eq!(status, 500);
			assert_eq!(body, "inventory unavailable");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	events.assert_calls_async(1).await;
}
