// self
use crate::obs::{SchemeOp, SchemeOutcome};

/// Counter incremented once per recorded operation outcome.
pub const SCHEME_OPERATION_TOTAL: &str = "oauth2_scheme_operation_total";

/// Records an operation outcome for `provider` via the installed metrics recorder (when enabled).
///
/// Labels: `op`, `outcome`, and `provider`.
pub fn record_scheme_outcome(op: SchemeOp, provider: &str, outcome: SchemeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			SCHEME_OPERATION_TOTAL,
			"op" => op.as_str(),
			"outcome" => outcome.as_str(),
			"provider" => provider.to_owned()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, provider, outcome);
	}
}
