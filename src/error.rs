//! Scheme-level error types: precondition failures and the canonical provider exception.

// self
use crate::_prelude::*;

/// Scheme-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Precondition failures raised synchronously by scheme APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The abstract base scheme was targeted directly.
	#[error("OAuth2 class cannot be instantiated directly and must be extended")]
	CannotInstantiate,
	/// A required argument or credential was absent or empty.
	#[error(transparent)]
	MissingParameter(#[from] MissingParameter),
	/// The provider extension does not supply an endpoint the call needs.
	#[error("Provider does not define the {endpoint} endpoint.")]
	MissingEndpoint {
		/// Accessor name the provider left undefined.
		endpoint: &'static str,
	},
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the stable error code associated with the variant.
	pub fn code(&self) -> &'static str {
		match self {
			Self::CannotInstantiate => "E_CANNOT_INSTANTIATE",
			Self::MissingParameter(_) => "E_MISSING_PARAMETER",
			Self::MissingEndpoint { .. } => "E_MISSING_ENDPOINT",
			Self::Config(_) => "E_INVALID_CONFIG",
		}
	}
}

/// Arguments whose absence aborts a call before any URL or request is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum MissingParameter {
	/// Client identifier was empty.
	#[error("Cannot initiate oauth2 instance without client id")]
	ClientId,
	/// Client secret was empty.
	#[error("Cannot initiate oauth2 instance without client secret")]
	ClientSecret,
	/// Redirect URI was empty.
	#[error("Redirect uri is required to initiate oauth2 request")]
	RedirectUri,
	/// Authorization code was empty.
	#[error("Authorization code is required to exchange for an access token")]
	AuthorizationCode,
}

/// Configuration failures raised while loading or resolving drivers.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration document could not be deserialized.
	#[error("Services configuration is malformed at `{path}`.")]
	Parse {
		/// Path to the offending field.
		path: String,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// Configuration document parsed but was followed by non-whitespace input.
	#[error("Services configuration has trailing characters.")]
	TrailingCharacters {
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// No driver with the requested name is configured.
	#[error("Driver `{name}` is not configured.")]
	MissingDriver {
		/// Requested driver name.
		name: String,
	},
	/// Driver is configured but has neither a preset nor custom endpoints.
	#[error("Driver `{name}` is not a known provider and defines no endpoints.")]
	UnknownDriver {
		/// Requested driver name.
		name: String,
	},
	/// Driver named after a built-in preset also declares its own endpoints.
	#[error("Driver `{name}` is a built-in provider and cannot declare endpoints.")]
	PresetEndpoints {
		/// Requested driver name.
		name: String,
	},
	/// Custom provider base URL is not an absolute URL.
	#[error("Provider base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Offending base URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}

/// Canonical representation of any provider token-exchange failure.
///
/// Every provider-specific failure shape collapses into this one value so error-reporting
/// middleware only ever inspects [`name`](Self::name) and [`message`](Self::message).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct OAuthException {
	message: String,
}
impl OAuthException {
	/// Exception name shared by every instance.
	pub const NAME: &'static str = "OAuthException";
	/// Code prefixed to token-exchange messages.
	pub const TOKEN_EXCHANGE: &'static str = "E_OAUTH_TOKEN_EXCHANGE";

	/// Builds a token-exchange exception from an already-rendered description.
	pub fn token_exchange(description: impl Display) -> Self {
		Self { message: format!("{}: {description}", Self::TOKEN_EXCHANGE) }
	}

	/// Returns the exception name (always `OAuthException`).
	pub fn name(&self) -> &'static str {
		Self::NAME
	}

	/// Returns the full `E_*: description` message.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Returns the code portion of the message.
	pub fn code(&self) -> &str {
		self.message.split_once(": ").map_or(self.message.as_str(), |(code, _)| code)
	}
}
