//! Authenticated transport with credential caching, single-flight refresh, and retry-on-401.
//!
//! [`AuthenticatedTransport`] wraps any [`Transport`] and a [`CredentialProvider`]. Every
//! request reuses the cached credential; when none is cached, callers share a single pending
//! exchange instead of stampeding the token endpoint. A 401 clears the cache, obtains a fresh
//! credential through the same single-flight path, and retries exactly once. If that refresh
//! fails the caller receives the original 401 response rather than the refresh error.
//!
//! The cached credential is never expired proactively: only a 401 invalidates it.

mod metrics;

pub use metrics::RefreshMetrics;

// crates.io
use futures::future::{BoxFuture, FutureExt, Shared};
// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialProvider},
	http::{RequestOptions, Response, Transport, TransportFuture},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const AUTHORIZATION: &str = "Authorization";
const UNAUTHORIZED: u16 = 401;

type SharedExchange = Shared<BoxFuture<'static, Result<Credential>>>;

struct InFlightExchange {
	generation: u64,
	exchange: SharedExchange,
}

#[derive(Default)]
struct CredentialCache {
	credential: Option<Credential>,
	in_flight: Option<InFlightExchange>,
	next_generation: u64,
}
impl CredentialCache {
	fn settle(&mut self, generation: u64, result: &Result<Credential>) {
		if self.in_flight.as_ref().is_some_and(|pending| pending.generation == generation) {
			self.in_flight = None;
		}
		if let Ok(credential) = result {
			self.credential = Some(credential.clone());
		}
	}
}

/// [`Transport`] decorator that authorizes every request with a cached bearer credential.
///
/// The cache holds at most one credential plus at most one in-flight exchange, both owned by
/// this value (clones share them). Transport errors from the wrapped transport propagate
/// unchanged; non-401 statuses are returned untouched.
pub struct AuthenticatedTransport<T, P>
where
	T: ?Sized + Transport,
	P: ?Sized + CredentialProvider,
{
	inner: Arc<T>,
	provider: Arc<P>,
	cache: Arc<Mutex<CredentialCache>>,
	metrics: Arc<RefreshMetrics>,
}
impl<T, P> AuthenticatedTransport<T, P>
where
	T: ?Sized + Transport,
	P: ?Sized + CredentialProvider,
{
	/// Wraps `inner`, authorizing requests with credentials exchanged through `provider`.
	pub fn new(inner: impl Into<Arc<T>>, provider: impl Into<Arc<P>>) -> Self {
		Self {
			inner: inner.into(),
			provider: provider.into(),
			cache: Default::default(),
			metrics: Default::default(),
		}
	}

	/// Returns the currently cached credential, if any.
	pub fn cached_credential(&self) -> Option<Credential> {
		self.cache.lock().credential.clone()
	}

	/// Returns the exchange/retry counters for this instance.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	/// Returns the wrapped transport.
	pub fn inner(&self) -> &T {
		&self.inner
	}

	fn invalidate(&self) {
		self.cache.lock().credential = None;
	}

	async fn resolve_credential(&self) -> Result<Credential> {
		let exchange = {
			let mut cache = self.cache.lock();

			if let Some(credential) = &cache.credential {
				return Ok(credential.clone());
			}

			self.start_or_join_exchange(&mut cache)
		};

		exchange.await
	}

	fn start_or_join_exchange(&self, cache: &mut CredentialCache) -> SharedExchange {
		if let Some(pending) = &cache.in_flight {
			self.metrics.record_joined();
			obs::trace_refresh_joined(pending.generation);

			return pending.exchange.clone();
		}

		let generation = cache.next_generation;

		cache.next_generation += 1;

		let provider = Arc::clone(&self.provider);
		let metrics = Arc::clone(&self.metrics);
		let state = Arc::downgrade(&self.cache);
		let exchange = async move {
			let result = provider.exchange().await;

			match &result {
				Ok(_) => metrics.record_success(),
				Err(_) => metrics.record_failure(),
			}

			if let Some(state) = state.upgrade() {
				state.lock().settle(generation, &result);
			}

			result
		}
		.boxed()
		.shared();

		self.metrics.record_started();
		obs::trace_refresh_started(generation);

		cache.in_flight = Some(InFlightExchange { generation, exchange: exchange.clone() });

		exchange
	}

	async fn send(&self, url: &str, options: RequestOptions) -> Result<Response> {
		let credential = self.resolve_credential().await?;
		let response = self.inner.request(url, authorize(options.clone(), &credential)).await?;

		if response.status() != UNAUTHORIZED {
			return Ok(response);
		}

		self.invalidate();
		obs::trace_invalidated(url);

		let fresh = match self.resolve_credential().await {
			Ok(credential) => credential,
			Err(e) => {
				obs::trace_refresh_swallowed(url, &e);

				return Ok(response);
			},
		};

		self.metrics.record_retry();
		obs::record_call_outcome(CallKind::AuthenticatedRequest, CallOutcome::Retry);

		self.inner.request(url, authorize(options, &fresh)).await
	}
}
impl<T, P> Transport for AuthenticatedTransport<T, P>
where
	T: ?Sized + Transport,
	P: ?Sized + CredentialProvider,
{
	fn request<'a>(&'a self, url: &'a str, options: RequestOptions) -> TransportFuture<'a> {
		const KIND: CallKind = CallKind::AuthenticatedRequest;

		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		Box::pin(async move {
			let result = span.instrument(self.send(url, options)).await;

			obs::record_result(KIND, &result);

			result
		})
	}
}
impl<T, P> Clone for AuthenticatedTransport<T, P>
where
	T: ?Sized + Transport,
	P: ?Sized + CredentialProvider,
{
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
			provider: Arc::clone(&self.provider),
			cache: Arc::clone(&self.cache),
			metrics: Arc::clone(&self.metrics),
		}
	}
}
impl<T, P> Debug for AuthenticatedTransport<T, P>
where
	T: ?Sized + Transport,
	P: ?Sized + CredentialProvider,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let cache = self.cache.lock();

		f.debug_struct("AuthenticatedTransport")
			.field("credential_cached", &cache.credential.is_some())
			.field("exchange_in_flight", &cache.in_flight.is_some())
			.field("metrics", &self.metrics)
			.finish()
	}
}

fn authorize(mut options: RequestOptions, credential: &Credential) -> RequestOptions {
	options.merge_header(AUTHORIZATION, credential.bearer());

	options
}
