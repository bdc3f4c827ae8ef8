//! Client-credentials exchange against the identity service's token endpoint.
//!
//! [`ClientCredentialsProvider`] turns a client id/secret pair into a [`Credential`] with a
//! single form-encoded `POST {endpoint}/oauth/token/`. It never caches and never retries:
//! caching belongs to [`AuthenticatedTransport`](crate::auth::AuthenticatedTransport), so the
//! provider can be reused or tested on its own.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::{
	_prelude::*,
	auth::Credential,
	config,
	error::AuthError,
	http::{Method, RequestOptions, Transport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

// RFC 3986 unreserved characters plus `!*'()` stay literal in form values.
const FORM_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Boxed future returned by [`CredentialProvider::exchange`].
pub type CredentialFuture<'a> = Pin<Box<dyn Future<Output = Result<Credential>> + 'a + Send>>;

/// Source of fresh bearer credentials.
///
/// Each call to [`exchange`](CredentialProvider::exchange) performs exactly one network round
/// trip and surfaces failures to the caller instead of swallowing them.
pub trait CredentialProvider
where
	Self: 'static + Send + Sync,
{
	/// Exchanges the configured client identity for a new credential.
	fn exchange(&self) -> CredentialFuture<'_>;
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
}

/// OAuth 2.0 `client_credentials` grant over any [`Transport`].
pub struct ClientCredentialsProvider<T>
where
	T: ?Sized + Transport,
{
	transport: Arc<T>,
	token_url: String,
	client_id: String,
	client_secret: String,
}
impl<T> ClientCredentialsProvider<T>
where
	T: ?Sized + Transport,
{
	const TOKEN_PATH: &'static str = "oauth/token/";

	/// Creates a provider that posts to `{endpoint}/oauth/token/`.
	pub fn new(
		transport: impl Into<Arc<T>>,
		endpoint: &Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		Self {
			transport: transport.into(),
			token_url: config::endpoint_url(endpoint, Self::TOKEN_PATH),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
		}
	}

	/// Returns the resolved token endpoint URL.
	pub fn token_url(&self) -> &str {
		&self.token_url
	}

	/// Returns the OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	fn form_body(&self) -> String {
		format!(
			"grant_type=client_credentials&client_id={}&client_secret={}",
			utf8_percent_encode(&self.client_id, FORM_VALUE_SET),
			utf8_percent_encode(&self.client_secret, FORM_VALUE_SET),
		)
	}

	async fn exchange_client_credentials(&self) -> Result<Credential> {
		let options = RequestOptions::new(Method::Post)
			.with_header("Content-Type", "application/x-www-form-urlencoded")
			.with_body(self.form_body());
		let response = self.transport.request(&self.token_url, options).await?;

		if !response.is_success() {
			return Err(AuthError::Rejected { status: response.status(), body: response.text() }
				.into());
		}

		let token = response.json::<TokenResponse>().map_err(AuthError::MalformedResponse)?;

		Ok(Credential::new(token.access_token))
	}
}
impl<T> CredentialProvider for ClientCredentialsProvider<T>
where
	T: ?Sized + Transport,
{
	fn exchange(&self) -> CredentialFuture<'_> {
		const KIND: CallKind = CallKind::CredentialExchange;

		let span = CallSpan::new(KIND, "exchange");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		Box::pin(async move {
			let result = span.instrument(self.exchange_client_credentials()).await;

			obs::record_result(KIND, &result);

			result
		})
	}
}
impl<T> Debug for ClientCredentialsProvider<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsProvider")
			.field("token_url", &self.token_url)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.finish()
	}
}
