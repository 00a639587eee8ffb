//! Optional observability helpers for scheme operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_scheme.op` with the `op`
//!   (operation) and `provider` (provider label) fields.
//! - Enable `metrics` to increment the `oauth2_scheme_operation_total` counter for every
//!   attempt/success/failure, labeled by `op`, `outcome`, and `provider`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Scheme operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeOp {
	/// Authorization redirect URL construction.
	AuthorizeUrl,
	/// Token-exchange failure normalization.
	ProviderError,
	/// Redirect callback error extraction.
	RedirectError,
	/// Token-exchange request description.
	TokenRequest,
	/// Token endpoint response parsing.
	TokenResponse,
}
impl SchemeOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SchemeOp::AuthorizeUrl => "authorize_url",
			SchemeOp::ProviderError => "provider_error",
			SchemeOp::RedirectError => "redirect_error",
			SchemeOp::TokenRequest => "token_request",
			SchemeOp::TokenResponse => "token_response",
		}
	}
}
impl Display for SchemeOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeOutcome {
	/// Entry to a scheme operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl SchemeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SchemeOutcome::Attempt => "attempt",
			SchemeOutcome::Success => "success",
			SchemeOutcome::Failure => "failure",
		}
	}
}
impl Display for SchemeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `f` inside an operation span, recording the attempt and its outcome.
pub fn observe<T, E, F>(op: SchemeOp, provider: &str, f: F) -> Result<T, E>
where
	E: Display,
	F: FnOnce() -> Result<T, E>,
{
	let _guard = SchemeSpan::new(op, provider).entered();

	record_scheme_outcome(op, provider, SchemeOutcome::Attempt);

	let result = f();

	match &result {
		Ok(_) => record_scheme_outcome(op, provider, SchemeOutcome::Success),
		Err(e) => {
			trace_failure(op, e);
			record_scheme_outcome(op, provider, SchemeOutcome::Failure);
		},
	}

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn observe_passes_results_through() {
		let ok: Result<u8, String> = observe(SchemeOp::AuthorizeUrl, "facebook", || Ok(7));
		let err: Result<u8, String> =
			observe(SchemeOp::TokenResponse, "github", || Err("boom".into()));

		assert_eq!(ok, Ok(7));
		assert_eq!(err, Err("boom".into()));
		assert_eq!(SchemeOp::ProviderError.to_string(), "provider_error");
		assert_eq!(SchemeOutcome::Failure.as_str(), "failure");
	}
}
