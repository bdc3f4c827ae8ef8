// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("pricing_api_client.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Marks the start of a new credential exchange.
pub(crate) fn trace_refresh_started(generation: u64) {
	#[cfg(feature = "tracing")]
	tracing::debug!(generation, "Starting credential exchange.");
	#[cfg(not(feature = "tracing"))]
	let _ = generation;
}

/// Marks a caller attaching to an exchange that is already in flight.
pub(crate) fn trace_refresh_joined(generation: u64) {
	#[cfg(feature = "tracing")]
	tracing::debug!(generation, "Joining in-flight credential exchange.");
	#[cfg(not(feature = "tracing"))]
	let _ = generation;
}

/// Marks a cached credential being dropped after a 401.
pub(crate) fn trace_invalidated(url: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(url, "Credential rejected with 401; cache cleared.");
	#[cfg(not(feature = "tracing"))]
	let _ = url;
}

/// Marks a failed post-401 refresh that falls back to the original response.
pub(crate) fn trace_refresh_swallowed(url: &str, err: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		url,
		error = %err,
		"Credential refresh failed; returning the original 401 response."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (url, err);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::AuthenticatedRequest, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn refresh_events_accept_any_input() {
		trace_refresh_started(0);
		trace_refresh_joined(0);
		trace_invalidated("http://localhost/prices");
		trace_refresh_swallowed(
			"http://localhost/prices",
			&Error::Api { url: "http://localhost".into(), status: 500, body: String::new() },
		);
	}
}
