// self
use crate::{_prelude::*, obs::SchemeOp};

/// A span builder used by scheme operations.
#[derive(Clone, Debug)]
pub struct SchemeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SchemeSpan {
	/// Creates a new span tagged with the provided operation + provider label.
	pub fn new(op: SchemeOp, provider: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!("oauth2_scheme.op", op = op.as_str(), provider);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (op, provider);

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> SchemeSpanGuard {
		#[cfg(feature = "tracing")]
		{
			SchemeSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			SchemeSpanGuard {}
		}
	}
}

/// RAII guard returned by [`SchemeSpan::entered`].
pub struct SchemeSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for SchemeSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SchemeSpanGuard(..)")
	}
}

/// Emits a debug event describing a failed operation (when enabled).
pub fn trace_failure(op: SchemeOp, error: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(op = op.as_str(), error = %error, "scheme operation failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, error);
	}
}
