// crates.io
use httpmock::prelude::*;
// self
use pricing_api_client::{
	_preludet::*,
	auth::{ClientCredentialsProvider, CredentialProvider},
	error::AuthError,
	http::ReqwestTransport,
};

const CLIENT_ID: &str = "pricing-service";
const CLIENT_SECRET: &str = "secret credentials";

fn build_provider(server: &MockServer) -> ClientCredentialsProvider<ReqwestTransport> {
	let endpoint =
		Url::parse(&server.base_url()).expect("Mock auth endpoint should parse successfully.");

	ClientCredentialsProvider::new(test_reqwest_transport(), &endpoint, CLIENT_ID, CLIENT_SECRET)
}

#[tokio::test]
async fn exchange_sends_form_encoded_grant() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token/")
				.header("content-type", "application/x-www-form-urlencoded")
				.body(
					"grant_type=client_credentials&client_id=pricing-service&client_secret=secret%20credentials",
				);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"issued-token\",\"token_type\":\"bearer\"}");
		})
		.await;
	let credential =
		build_provider(&server).exchange().await.expect("Credential exchange should succeed.");

	assert_eq!(credential.expose(), "issued-token");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn exchange_surfaces_rejections() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token/");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let err = build_provider(&server)
		.exchange()
		.await
		.expect_err("Rejected credentials must fail the exchange.");

	match err {
		Error::Auth(AuthError::Rejected { status, body }) => {
			assert_eq!(status, 400);
			assert!(body.contains("invalid_client"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn exchange_does_not_retry_on_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token/");
			then.status(503).body("maintenance");
		})
		.await;
	let provider = build_provider(&server);

	provider.exchange().await.expect_err("A 503 must fail the exchange.");
	provider.exchange().await.expect_err("A 503 must fail the exchange again.");

	mock.assert_calls_async(2).await;
}
