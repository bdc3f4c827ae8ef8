//! Client-level error types shared across the transport, credential, and API layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Shared error source; kept behind `Arc` so a single failure can be handed to every caller
/// waiting on the same credential exchange.
pub type SharedError = Arc<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// HTTP-level rejections are not errors at the transport layer; they surface as ordinary
/// [`Response`](crate::http::Response) values. Only [`PricingApiClient`] turns non-success
/// statuses into [`Error::Api`].
///
/// [`PricingApiClient`]: crate::client::PricingApiClient
#[derive(Clone, Debug, ThisError)]
pub enum Error {
	/// Credential exchange failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS); no response was produced.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// API endpoint answered with a non-success status.
	#[error("Request to {url} failed with status code {status}. Response body: {body}")]
	Api {
		/// Requested URL.
		url: String,
		/// HTTP status code returned by the API.
		status: u16,
		/// Raw response body kept as diagnostic detail.
		body: String,
	},
}

/// Credential exchange failures raised by [`CredentialProvider`](crate::auth::CredentialProvider)
/// implementations.
#[derive(Clone, Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint returned a non-success status.
	#[error("Authentication failed with status code {status}: {body}")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Response body returned by the token endpoint.
		body: String,
	},
	/// Token endpoint answered 2xx but the body carried no usable access token.
	#[error("Token endpoint returned a malformed response.")]
	MalformedResponse(#[source] DecodeError),
}

/// Configuration and validation failures.
#[derive(Clone, Debug, ThisError)]
pub enum ConfigError {
	/// Endpoint URL cannot be parsed.
	#[error("Endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Raw endpoint string supplied by the caller.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Serialize {
		/// Underlying serializer failure.
		#[source]
		source: SharedError,
	},
}
impl ConfigError {
	/// Wraps a serializer failure inside [`ConfigError`].
	pub fn serialize(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Serialize { source: Arc::new(src) }
	}
}

/// Response decoding failures.
#[derive(Clone, Debug, ThisError)]
pub enum DecodeError {
	/// Body was not valid JSON for the expected shape.
	#[error("Response body is not valid JSON for the expected shape at `{path}`.")]
	Json {
		/// Path to the offending field.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: SharedError,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Json { path, source: Arc::new(e.into_inner()) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Clone, Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Requested URL.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: SharedError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { url: url.into(), source: Arc::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_error_keeps_body_as_detail() {
		let err: Error =
			AuthError::Rejected { status: 400, body: "{\"error\":\"invalid_client\"}".into() }
				.into();

		assert!(matches!(err, Error::Auth(AuthError::Rejected { status: 400, .. })));
		assert!(err.to_string().contains("invalid_client"));
	}

	#[test]
	fn decode_error_reports_path() {
		#[derive(Debug, Deserialize)]
		#[allow(dead_code)]
		struct Shape {
			count: u32,
		}

		let de = &mut serde_json::Deserializer::from_str("{\"count\":\"many\"}");
		let err = serde_path_to_error::deserialize::<_, Shape>(de)
			.expect_err("A string count must fail to decode.");
		let decoded = DecodeError::from(err);
		let DecodeError::Json { path, .. } = &decoded;

		assert_eq!(path, "count");
		assert!(StdError::source(&decoded).is_some());
	}

	#[test]
	fn cloned_errors_share_their_source() {
		let err = TransportError::network(
			"http://localhost",
			std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
		);
		let cloned = err.clone();
		let (TransportError::Network { source: a, .. }, TransportError::Network { source: b, .. }) =
			(&err, &cloned);

		assert!(Arc::ptr_eq(a, b));
	}
}
