//! Transport primitives shared by the credential exchange and the API calls.
//!
//! The module exposes [`Transport`] alongside [`RequestOptions`] and [`Response`] so
//! downstream crates can plug in custom HTTP stacks. A transport performs exactly one
//! request per call: it never retries and never touches credentials. Authorization is
//! layered on top by [`AuthenticatedTransport`](crate::auth::AuthenticatedTransport), which
//! implements the same trait so callers stay agnostic to whether auth is applied.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	error::{DecodeError, TransportError},
};

/// Boxed future returned by [`Transport::request`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Response>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute a single request.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared (behind
/// `Arc`) by the credential provider and the authenticated wrapper. A request either yields a
/// [`Response`] of any status or fails with [`Error::Transport`] when nothing was received.
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Performs a request against `url`.
	fn request<'a>(&'a self, url: &'a str, options: RequestOptions) -> TransportFuture<'a>;
}

/// HTTP methods used by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	#[default]
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-request options: method, headers, and an optional text body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// HTTP method, `GET` unless overridden.
	pub method: Method,
	/// Request headers keyed by name.
	pub headers: BTreeMap<String, String>,
	/// Optional request body.
	pub body: Option<String>,
}
impl RequestOptions {
	/// Creates options for the provided method.
	pub fn new(method: Method) -> Self {
		Self { method, ..Default::default() }
	}

	/// Overrides the method.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;

		self
	}

	/// Sets or replaces a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Sets the request body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Returns the header value matching `name` case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Inserts a header, dropping any existing entry whose name matches case-insensitively.
	///
	/// Every other header is kept.
	pub fn merge_header(&mut self, name: &str, value: impl Into<String>) {
		self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
		self.headers.insert(name.to_owned(), value.into());
	}
}

/// HTTP response captured by a [`Transport`].
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
	status: u16,
	body: Vec<u8>,
}
impl Response {
	/// Builds a response from a status code and raw body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns the HTTP status code.
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Returns `true` for any 2xx status.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns the raw body bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.body
	}

	/// Returns the body as text, replacing invalid UTF-8 sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Parses the body as JSON into `T`, reporting the failing path on mismatch.
	pub fn json<T>(&self) -> Result<T, DecodeError>
	where
		T: for<'de> Deserialize<'de>,
	{
		let de = &mut serde_json::Deserializer::from_slice(&self.body);

		Ok(serde_path_to_error::deserialize(de)?)
	}
}
impl Debug for Response {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Response")
			.field("status", &self.status)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The same client is normally shared by the credential exchange and the API calls, so any
/// custom [`ReqwestClient`] should keep connection pooling enabled.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn execute(&self, url: &str, options: RequestOptions) -> Result<Response> {
		let network = |e: ReqwestError| TransportError::network(url, e);
		let method = match options.method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		};
		let mut builder = self.0.request(method, url);

		for (name, value) in &options.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(body) = options.body {
			builder = builder.body(body);
		}

		let response = builder.send().await.map_err(network)?;
		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(network)?;

		Ok(Response::new(status, body.to_vec()))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn request<'a>(&'a self, url: &'a str, options: RequestOptions) -> TransportFuture<'a> {
		Box::pin(self.execute(url, options))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn merge_header_replaces_case_insensitively_and_keeps_others() {
		let mut options = RequestOptions::new(Method::Post)
			.with_header("authorization", "Bearer stale")
			.with_header("X-Trace", "abc");

		options.merge_header("Authorization", "Bearer fresh");

		assert_eq!(options.headers.len(), 2);
		assert_eq!(options.header("AUTHORIZATION"), Some("Bearer fresh"));
		assert_eq!(options.header("x-trace"), Some("abc"));
	}

	#[test]
	fn response_helpers_cover_status_and_body() {
		let ok = Response::new(204, Vec::new());
		let unauthorized = Response::new(401, "nope");

		assert!(ok.is_success());
		assert!(!unauthorized.is_success());
		assert!(!Response::new(300, Vec::new()).is_success());
		assert_eq!(unauthorized.text(), "nope");
		assert_eq!(format!("{unauthorized:?}"), "Response { status: 401, body_len: 4 }");
	}

	#[test]
	fn json_decoding_surfaces_the_failing_path() {
		#[derive(Debug, Deserialize)]
		struct Token {
			access_token: String,
		}

		let response = Response::new(200, "{\"access_token\":\"abc\"}");
		let token: Token = response.json().expect("Token body should decode.");

		assert_eq!(token.access_token, "abc");

		let err = Response::new(200, "{\"access_token\":7}")
			.json::<Token>()
			.expect_err("A numeric token must be rejected.");
		let DecodeError::Json { path, .. } = err;

		assert_eq!(path, "access_token");
	}
}
