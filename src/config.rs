//! Services configuration: one entry per social-auth driver.
//!
//! ```json
//! {
//!   "facebook": { "clientId": "…", "clientSecret": "…", "redirectUri": "…", "scopes": ["email"] },
//!   "acme": { "clientId": "…", "clientSecret": "…", "endpoints": { "baseUrl": "…", … } }
//! }
//! ```
//!
//! Driver names resolve to the built-in presets first, and a preset driver that also declares
//! `endpoints` is rejected. Any other driver needs `endpoints` and becomes a [`CustomProvider`]
//! labelled with the driver name. The name `oauth2` always denotes the abstract base and never
//! resolves to a usable scheme.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{self, CustomProvider, OAuth2, Provider},
	scheme::{OAuth2Scheme, QueryValue},
};

/// Per-driver settings.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
	/// OAuth client identifier.
	#[serde(alias = "clientId")]
	pub client_id: Option<String>,
	/// OAuth client secret.
	#[serde(alias = "clientSecret")]
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	#[serde(alias = "redirectUri")]
	pub redirect_uri: Option<String>,
	/// Scopes requested on every authorization redirect.
	pub scopes: Vec<String>,
	/// Headers forwarded with token-exchange requests.
	pub headers: BTreeMap<String, String>,
	/// Endpoints for providers without a built-in preset.
	pub endpoints: Option<CustomProvider>,
}
impl DriverConfig {
	/// Resolves the provider extension for a driver registered under `name`.
	pub fn provider(&self, name: &str) -> Result<Box<dyn Provider>> {
		if name == OAuth2.name() {
			return Ok(Box::new(OAuth2));
		}
		if let Some(preset) = provider::preset(name) {
			if self.endpoints.is_some() {
				return Err(ConfigError::PresetEndpoints { name: name.to_owned() }.into());
			}

			return Ok(preset);
		}

		let endpoints = self
			.endpoints
			.as_ref()
			.ok_or_else(|| ConfigError::UnknownDriver { name: name.to_owned() })?;

		endpoints.validate()?;

		Ok(Box::new(endpoints.clone().with_name(name)))
	}

	/// Builds a scheme for the driver registered under `name`.
	pub fn scheme(&self, name: &str) -> Result<OAuth2Scheme> {
		let provider = self.provider(name)?;
		let scheme = OAuth2Scheme::new(
			provider,
			self.client_id.clone().unwrap_or_default(),
			self.client_secret.clone().unwrap_or_default(),
		)?;

		Ok(scheme.with_headers(self.headers.clone()))
	}

	/// Builds the authorization URL from the configured redirect URI and scopes.
	pub fn authorize_url<P>(
		&self,
		scheme: &OAuth2Scheme<P>,
		extra_params: &[(&str, QueryValue)],
	) -> Result<String>
	where
		P: Provider,
	{
		let scopes = self.scopes.iter().map(String::as_str).collect::<Vec<_>>();

		scheme.get_url(self.redirect_uri.as_deref().unwrap_or_default(), &scopes, extra_params)
	}
}
impl Debug for DriverConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DriverConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("scopes", &self.scopes)
			.field("headers", &self.headers)
			.field("endpoints", &self.endpoints)
			.finish()
	}
}

/// Driver name → settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServicesConfig {
	drivers: BTreeMap<String, DriverConfig>,
}
impl ServicesConfig {
	/// Parses a JSON document, reporting the path of the first malformed field.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(json);
		let services = serde_path_to_error::deserialize(&mut *de)?;

		de.end().map_err(|source| ConfigError::TrailingCharacters { source })?;

		Ok(services)
	}

	/// Adds or replaces a driver.
	pub fn insert(&mut self, name: impl Into<String>, driver: DriverConfig) -> &mut Self {
		self.drivers.insert(name.into(), driver);

		self
	}

	/// Looks up a driver's settings.
	pub fn driver(&self, name: &str) -> Result<&DriverConfig> {
		self.drivers
			.get(name)
			.ok_or_else(|| ConfigError::MissingDriver { name: name.to_owned() }.into())
	}

	/// Names of every configured driver, sorted.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.drivers.keys().map(String::as_str)
	}

	/// Builds a scheme for the named driver.
	pub fn scheme(&self, name: &str) -> Result<OAuth2Scheme> {
		self.driver(name)?.scheme(name)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::MissingParameter;

	const SERVICES: &str = r#"{
		"facebook": {
			"clientId": "10012020",
			"clientSecret": "1000w0sa",
			"redirectUri": "http://localhost:8000/logged",
			"scopes": ["email", "friends"],
			"headers": { "Accept": "application/json" }
		},
		"acme": {
			"client_id": "acme-client",
			"client_secret": "acme-secret",
			"endpoints": {
				"baseUrl": "https://auth.acme.test/oauth/",
				"authorizeUrl": "authorize",
				"accessTokenUrl": "token"
			}
		},
		"oauth2": { "clientId": "10012020", "clientSecret": "1000w0sa" },
		"dropbox": { "clientId": "id", "clientSecret": "secret" },
		"github": { "clientId": "id" }
	}"#;

	fn services() -> ServicesConfig {
		ServicesConfig::from_json(SERVICES).expect("Services fixture should parse.")
	}

	#[test]
	fn preset_driver_builds_configured_url() {
		let services = services();
		let driver = services.driver("facebook").expect("Facebook driver should exist.");
		let scheme = driver.scheme("facebook").expect("Facebook scheme should build.");
		let url = driver
			.authorize_url(&scheme, &[("state", 101010.into())])
			.expect("Configured URL should build.");

		assert_eq!(
			url,
			"https://graph.facebook.com/v2.1/oauth/authorize?redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Flogged&scope=email%2Cfriends&state=101010&client_id=10012020"
		);
		assert_eq!(scheme.headers(), [("Accept".to_owned(), "application/json".to_owned())]);
	}

	#[test]
	fn custom_endpoints_resolve_to_custom_provider() {
		let scheme = services().scheme("acme").expect("Custom scheme should build.");

		assert_eq!(scheme.provider().name(), "acme");
		assert_eq!(
			scheme.access_token_url().expect("Token URL should resolve."),
			"https://auth.acme.test/oauth/token"
		);
	}

	#[test]
	fn resolution_failures_are_reported() {
		let services = services();

		assert!(matches!(services.scheme("oauth2"), Err(Error::CannotInstantiate)));
		assert!(matches!(
			services.scheme("dropbox"),
			Err(Error::Config(ConfigError::UnknownDriver { .. }))
		));
		assert!(matches!(
			services.scheme("twitter"),
			Err(Error::Config(ConfigError::MissingDriver { .. }))
		));
		assert!(matches!(
			services.scheme("github"),
			Err(Error::MissingParameter(MissingParameter::ClientSecret))
		));
	}

	#[test]
	fn presets_win_and_reject_endpoint_overrides() {
		let services = ServicesConfig::from_json(
			r#"{
				"facebook": {
					"clientId": "10012020",
					"clientSecret": "1000w0sa",
					"endpoints": { "baseUrl": "https://evil.test", "authorizeUrl": "authorize" }
				},
				"google": { "clientId": "10012020", "clientSecret": "1000w0sa" }
			}"#,
		)
		.expect("Services document should parse.");

		assert!(matches!(
			services.scheme("facebook"),
			Err(Error::Config(ConfigError::PresetEndpoints { name })) if name == "facebook"
		));

		let scheme = services.scheme("google").expect("Google scheme should build.");

		assert_eq!(scheme.provider().name(), "google");
		assert_eq!(
			scheme.access_token_url().expect("Token URL should resolve."),
			"https://accounts.google.com/o/oauth2/token"
		);
	}

	#[test]
	fn trailing_input_is_rejected() {
		assert!(matches!(
			ServicesConfig::from_json("{} trailing"),
			Err(ConfigError::TrailingCharacters { .. })
		));
		assert!(ServicesConfig::from_json(" {}\n ").is_ok());
	}

	#[test]
	fn missing_redirect_uri_surfaces_from_configured_url() {
		let services = services();
		let driver = services.driver("acme").expect("Acme driver should exist.");
		let scheme = driver.scheme("acme").expect("Custom scheme should build.");

		assert!(matches!(
			driver.authorize_url(&scheme, &[]),
			Err(Error::MissingParameter(MissingParameter::RedirectUri))
		));
	}

	#[test]
	fn invalid_documents_report_paths() {
		let err = ServicesConfig::from_json(r#"{"facebook":{"scopes":"email"}}"#)
			.expect_err("String scopes should be rejected.");

		assert!(matches!(&err, ConfigError::Parse { path, .. } if path == "facebook.scopes"));

		let mut services = ServicesConfig::default();

		services.insert(
			"acme",
			DriverConfig {
				client_id: Some("id".into()),
				client_secret: Some("secret".into()),
				endpoints: Some(CustomProvider::new("/relative", "authorize", "token")),
				..Default::default()
			},
		);

		assert!(matches!(
			services.scheme("acme"),
			Err(Error::Config(ConfigError::InvalidBaseUrl { .. }))
		));
		assert_eq!(services.names().collect::<Vec<_>>(), ["acme"]);
	}

	#[test]
	fn debug_output_hides_secret() {
		let services = services();
		let rendered = format!("{services:?}");

		assert!(!rendered.contains("1000w0sa"));
		assert!(rendered.contains("10012020"));
	}
}
