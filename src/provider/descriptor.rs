//! Provider extension contract consumed by [`OAuth2Scheme`](crate::scheme::OAuth2Scheme).

// self
use crate::{_prelude::*, error::ConfigError};

/// Endpoint strings supplied by a concrete provider integration.
///
/// Each accessor is required; returning `None` marks the endpoint as undefined, which only
/// becomes an error when a call actually needs it (see
/// [`Error::MissingEndpoint`](crate::error::Error::MissingEndpoint)). Values are fixed per
/// provider and must not change between calls.
pub trait Provider: Send + Sync {
	/// Absolute base URL shared by the authorize and token endpoints.
	fn base_url(&self) -> Option<&str>;

	/// Authorization endpoint path, relative to [`base_url`](Self::base_url).
	fn authorize_url(&self) -> Option<&str>;

	/// Token endpoint path, relative to [`base_url`](Self::base_url).
	fn access_token_url(&self) -> Option<&str>;

	/// Stable label used for spans and metrics.
	fn name(&self) -> &str {
		"custom"
	}

	/// Whether this provider is the abstract base identity that must never back a scheme.
	fn is_abstract(&self) -> bool {
		false
	}
}
impl<P> Provider for &P
where
	P: ?Sized + Provider,
{
	fn base_url(&self) -> Option<&str> {
		(**self).base_url()
	}

	fn authorize_url(&self) -> Option<&str> {
		(**self).authorize_url()
	}

	fn access_token_url(&self) -> Option<&str> {
		(**self).access_token_url()
	}

	fn name(&self) -> &str {
		(**self).name()
	}

	fn is_abstract(&self) -> bool {
		(**self).is_abstract()
	}
}
impl<P> Provider for Box<P>
where
	P: ?Sized + Provider,
{
	fn base_url(&self) -> Option<&str> {
		(**self).base_url()
	}

	fn authorize_url(&self) -> Option<&str> {
		(**self).authorize_url()
	}

	fn access_token_url(&self) -> Option<&str> {
		(**self).access_token_url()
	}

	fn name(&self) -> &str {
		(**self).name()
	}

	fn is_abstract(&self) -> bool {
		(**self).is_abstract()
	}
}
impl<P> Provider for Arc<P>
where
	P: ?Sized + Provider,
{
	fn base_url(&self) -> Option<&str> {
		(**self).base_url()
	}

	fn authorize_url(&self) -> Option<&str> {
		(**self).authorize_url()
	}

	fn access_token_url(&self) -> Option<&str> {
		(**self).access_token_url()
	}

	fn name(&self) -> &str {
		(**self).name()
	}

	fn is_abstract(&self) -> bool {
		(**self).is_abstract()
	}
}

/// Abstract base identity.
///
/// It defines no endpoints; any attempt to build a scheme on top of it fails with
/// [`Error::CannotInstantiate`](crate::error::Error::CannotInstantiate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OAuth2;
impl Provider for OAuth2 {
	fn base_url(&self) -> Option<&str> {
		None
	}

	fn authorize_url(&self) -> Option<&str> {
		None
	}

	fn access_token_url(&self) -> Option<&str> {
		None
	}

	fn name(&self) -> &str {
		"oauth2"
	}

	fn is_abstract(&self) -> bool {
		true
	}
}

/// Provider described entirely by data, typically loaded from configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomProvider {
	/// Absolute base URL.
	#[serde(alias = "baseUrl")]
	pub base_url: Option<String>,
	/// Authorization endpoint path.
	#[serde(alias = "authorizeUrl")]
	pub authorize_url: Option<String>,
	/// Token endpoint path.
	#[serde(alias = "accessTokenUrl")]
	pub access_token_url: Option<String>,
	/// Label reported by [`Provider::name`]; `custom` when unset.
	#[serde(skip)]
	pub name: Option<String>,
}
impl CustomProvider {
	/// Creates a provider with all three endpoints defined.
	pub fn new(
		base_url: impl Into<String>,
		authorize_url: impl Into<String>,
		access_token_url: impl Into<String>,
	) -> Self {
		Self {
			base_url: Some(base_url.into()),
			authorize_url: Some(authorize_url.into()),
			access_token_url: Some(access_token_url.into()),
			name: None,
		}
	}

	/// Labels the provider, usually with the driver name it was configured under.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Checks that a defined base URL is absolute.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if let Some(base) = self.base_url.as_deref() {
			Url::parse(base)
				.map_err(|source| ConfigError::InvalidBaseUrl { url: base.to_owned(), source })?;
		}

		Ok(())
	}
}
impl Provider for CustomProvider {
	fn base_url(&self) -> Option<&str> {
		self.base_url.as_deref()
	}

	fn authorize_url(&self) -> Option<&str> {
		self.authorize_url.as_deref()
	}

	fn access_token_url(&self) -> Option<&str> {
		self.access_token_url.as_deref()
	}

	fn name(&self) -> &str {
		self.name.as_deref().unwrap_or("custom")
	}
}

/// Joins a base URL and a relative endpoint path with exactly one `/` between them.
pub fn join_endpoint(base: &str, path: &str) -> String {
	let path = path.trim_start_matches('/');
	let mut joined = String::with_capacity(base.len() + path.len() + 1);

	joined.push_str(base);

	if !base.ends_with('/') {
		joined.push('/');
	}

	joined.push_str(path);

	joined
}
