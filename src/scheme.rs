//! The OAuth 2.0 authorization-code scheme shared by every provider integration.
//!
//! [`OAuth2Scheme`] is immutable once built and every operation is a pure function of its
//! credentials, the provider's endpoint strings, and the call arguments, so a single instance
//! can be shared freely across threads.

pub mod query;

pub use query::*;

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ClientSecret, Credentials},
	error::{MissingParameter, OAuthException},
	exchange::{self, AccessToken, RawProviderError, TokenExchangeRequest},
	obs::{self, SchemeOp, SchemeOutcome},
	provider::{self, Provider},
};

/// Fallback returned by [`OAuth2Scheme::parse_redirect_error`] when the provider gave no
/// description.
pub const REDIRECT_ERROR_FALLBACK: &str = "Oauth failed during redirect";

/// Authorization-code scheme bound to one provider and one set of client credentials.
#[derive(Clone)]
pub struct OAuth2Scheme<P = Box<dyn Provider>>
where
	P: Provider,
{
	provider: P,
	credentials: Credentials,
	headers: Vec<(String, String)>,
}
impl<P> OAuth2Scheme<P>
where
	P: Provider,
{
	/// Builds a scheme for a concrete provider.
	///
	/// Fails with [`Error::CannotInstantiate`] when `provider` is the abstract base, regardless
	/// of the credentials, then checks the client id and the client secret in that order.
	pub fn new(
		provider: P,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self> {
		if provider.is_abstract() {
			return Err(Error::CannotInstantiate);
		}

		let credentials = Credentials::new(client_id, client_secret)?;

		Ok(Self { provider, credentials, headers: Vec::new() })
	}

	/// Builds a scheme from already-validated credentials.
	pub fn with_credentials(provider: P, credentials: Credentials) -> Result<Self> {
		if provider.is_abstract() {
			return Err(Error::CannotInstantiate);
		}

		Ok(Self { provider, credentials, headers: Vec::new() })
	}

	/// Appends headers forwarded with every token-exchange request.
	pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.headers.extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));

		self
	}

	/// Provider extension backing this scheme.
	pub fn provider(&self) -> &P {
		&self.provider
	}

	/// Client identifier.
	pub fn client_id(&self) -> &ClientId {
		&self.credentials.client_id
	}

	/// Client secret.
	pub fn client_secret(&self) -> &ClientSecret {
		&self.credentials.client_secret
	}

	/// Extra token-exchange headers, in insertion order.
	pub fn headers(&self) -> &[(String, String)] {
		&self.headers
	}

	/// Absolute authorization endpoint, without a query string.
	pub fn authorize_endpoint(&self) -> Result<String> {
		self.endpoint("authorize_url", self.provider.authorize_url())
	}

	/// Absolute token endpoint.
	pub fn access_token_url(&self) -> Result<String> {
		self.endpoint("access_token_url", self.provider.access_token_url())
	}

	/// Builds the URL the user agent is redirected to for consent.
	///
	/// Query parameters are emitted in a fixed order: `redirect_uri`, `scope` (comma-joined, only
	/// when `scopes` is non-empty), each extra parameter in the order supplied, and finally the
	/// unencoded `client_id`. An extra parameter reusing an earlier key replaces that value in
	/// place; one named `client_id` is ignored.
	pub fn get_url(
		&self,
		redirect_uri: &str,
		scopes: &[&str],
		extra_params: &[(&str, QueryValue)],
	) -> Result<String> {
		obs::observe(SchemeOp::AuthorizeUrl, self.provider.name(), || {
			if redirect_uri.is_empty() {
				return Err(MissingParameter::RedirectUri.into());
			}

			let base = self.authorize_endpoint()?;
			let mut query = QueryPairs::new();

			query.set("redirect_uri", redirect_uri);
			query.set_opt("scope", (!scopes.is_empty()).then(|| scopes.join(",")));

			for (key, value) in extra_params {
				query.set(*key, value);
			}

			query.push_raw("client_id", self.credentials.client_id.as_str());

			Ok(format!("{base}?{query}"))
		})
	}

	/// Normalizes a failed token exchange into the canonical [`OAuthException`].
	///
	/// Total: malformed or missing bodies produce `E_OAUTH_TOKEN_EXCHANGE: null`.
	pub fn parse_provider_error(&self, raw: &RawProviderError) -> OAuthException {
		const OP: SchemeOp = SchemeOp::ProviderError;

		let provider = self.provider.name();
		let _guard = obs::SchemeSpan::new(OP, provider).entered();

		obs::record_scheme_outcome(OP, provider, SchemeOutcome::Attempt);

		let exception = raw.to_exception();

		obs::record_scheme_outcome(OP, provider, SchemeOutcome::Success);

		exception
	}

	/// Extracts the provider's reason from the query pairs of a failed consent redirect.
	pub fn parse_redirect_error<I, K, V>(&self, query: I) -> String
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		const OP: SchemeOp = SchemeOp::RedirectError;

		let provider = self.provider.name();
		let _guard = obs::SchemeSpan::new(OP, provider).entered();

		obs::record_scheme_outcome(OP, provider, SchemeOutcome::Attempt);

		let reason = query
			.into_iter()
			.find(|(k, v)| k.as_ref() == "error_description" && !v.as_ref().is_empty())
			.map(|(_, v)| v.as_ref().to_owned())
			.unwrap_or_else(|| REDIRECT_ERROR_FALLBACK.to_owned());

		obs::record_scheme_outcome(OP, provider, SchemeOutcome::Success);

		reason
	}

	/// Same as [`parse_redirect_error`](Self::parse_redirect_error), reading the callback URL.
	pub fn parse_redirect_error_url(&self, callback: &Url) -> String {
		self.parse_redirect_error(callback.query_pairs())
	}

	/// Describes the token-exchange POST for an authorization `code`.
	///
	/// Form order: `grant_type`, `redirect_uri`, extra parameters, then `client_id`,
	/// `client_secret`, and `code`, which extra parameters cannot override.
	pub fn token_request(
		&self,
		code: &str,
		redirect_uri: &str,
		extra_params: &[(&str, QueryValue)],
	) -> Result<TokenExchangeRequest> {
		obs::observe(SchemeOp::TokenRequest, self.provider.name(), || {
			if code.is_empty() {
				return Err(MissingParameter::AuthorizationCode.into());
			}
			if redirect_uri.is_empty() {
				return Err(MissingParameter::RedirectUri.into());
			}

			let url = self.access_token_url()?;
			let mut form = QueryPairs::new();

			form.set("grant_type", "authorization_code");
			form.set("redirect_uri", redirect_uri);

			for (key, value) in extra_params {
				form.set(*key, value);
			}

			form.remove("client_id").set("client_id", self.credentials.client_id.as_str());
			form.remove("client_secret")
				.set("client_secret", self.credentials.client_secret.expose());
			form.remove("code").set("code", code);

			Ok(TokenExchangeRequest { url, form, headers: self.headers.clone() })
		})
	}

	/// Parses the token endpoint's response body.
	pub fn parse_token_response(&self, body: &str) -> Result<AccessToken, OAuthException> {
		obs::observe(SchemeOp::TokenResponse, self.provider.name(), || {
			exchange::parse_token_response(body)
		})
	}

	fn endpoint(&self, name: &'static str, path: Option<&str>) -> Result<String> {
		let base =
			self.provider.base_url().ok_or(Error::MissingEndpoint { endpoint: "base_url" })?;
		let path = path.ok_or(Error::MissingEndpoint { endpoint: name })?;

		Ok(provider::join_endpoint(base, path))
	}
}
impl<P> Debug for OAuth2Scheme<P>
where
	P: Provider,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Scheme")
			.field("provider", &self.provider.name())
			.field("client_id", &self.credentials.client_id)
			.field("client_secret", &self.credentials.client_secret)
			.field("headers", &self.headers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::{CustomProvider, Facebook, OAuth2};

	const CLIENT_ID: &str = "10012020";
	const CLIENT_SECRET: &str = "1000w0sa";
	const REDIRECT_URI: &str = "http://localhost:8000/logged";

	fn facebook() -> OAuth2Scheme<Facebook> {
		OAuth2Scheme::new(Facebook, CLIENT_ID, CLIENT_SECRET)
			.expect("Facebook scheme should construct with valid credentials.")
	}

	#[test]
	fn abstract_base_is_rejected_before_credentials() {
		for (id, secret) in [(CLIENT_ID, CLIENT_SECRET), ("", ""), (CLIENT_ID, "")] {
			let err = OAuth2Scheme::new(OAuth2, id, secret)
				.expect_err("Abstract base should never construct.");

			assert!(matches!(err, Error::CannotInstantiate));
		}

		let credentials =
			Credentials::new(CLIENT_ID, CLIENT_SECRET).expect("Credentials should be valid.");

		assert!(matches!(
			OAuth2Scheme::with_credentials(OAuth2, credentials),
			Err(Error::CannotInstantiate)
		));
	}

	#[test]
	fn redirect_uri_is_checked_before_endpoints() {
		let scheme = OAuth2Scheme::new(CustomProvider::default(), CLIENT_ID, CLIENT_SECRET)
			.expect("Endpoint-less provider should still construct.");
		let err = scheme.get_url("", &["email"], &[]).expect_err("Empty redirect should fail.");

		assert!(matches!(err, Error::MissingParameter(MissingParameter::RedirectUri)));

		let err =
			scheme.get_url(REDIRECT_URI, &[], &[]).expect_err("Missing endpoints should fail.");

		assert!(matches!(err, Error::MissingEndpoint { endpoint: "base_url" }));
	}

	#[test]
	fn extra_params_override_in_place_but_client_id_stays_last() {
		let url = facebook()
			.get_url(
				REDIRECT_URI,
				&["email"],
				&[("scope", "public_profile".into()), ("client_id", "spoofed".into())],
			)
			.expect("URL should build.");

		assert_eq!(
			url,
			"https://graph.facebook.com/v2.1/oauth/authorize?redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Flogged&scope=public_profile&client_id=10012020"
		);
	}

	#[test]
	fn token_request_orders_form_and_protects_credentials() {
		let request = facebook()
			.with_headers([("Accept", "application/json")])
			.token_request(
				"the-code",
				REDIRECT_URI,
				&[("code", "spoofed".into()), ("foo", 1.into())],
			)
			.expect("Token request should build.");

		assert_eq!(request.url, "https://graph.facebook.com/v2.1/oauth/access_token");
		assert_eq!(
			request.body(),
			"grant_type=authorization_code&redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Flogged&foo=1&client_id=10012020&client_secret=1000w0sa&code=the-code"
		);
		assert_eq!(request.headers, [("Accept".to_owned(), "application/json".to_owned())]);
	}

	#[test]
	fn token_request_requires_code_and_redirect() {
		let scheme = facebook();

		assert!(matches!(
			scheme.token_request("", REDIRECT_URI, &[]),
			Err(Error::MissingParameter(MissingParameter::AuthorizationCode))
		));
		assert!(matches!(
			scheme.token_request("the-code", "", &[]),
			Err(Error::MissingParameter(MissingParameter::RedirectUri))
		));
	}

	#[test]
	fn redirect_errors_fall_back_to_generic_message() {
		let scheme = facebook();
		let callback = Url::parse(
			"http://localhost:8000/logged?error=access_denied&error_description=Permissions+error",
		)
		.expect("Callback URL fixture should parse.");

		assert_eq!(scheme.parse_redirect_error_url(&callback), "Permissions error");
		assert_eq!(
			scheme.parse_redirect_error([("error", "access_denied"), ("error_description", "")]),
			REDIRECT_ERROR_FALLBACK
		);
		assert_eq!(
			scheme.parse_redirect_error(Vec::<(String, String)>::new()),
			REDIRECT_ERROR_FALLBACK
		);
	}

	#[test]
	fn debug_output_hides_secret() {
		let rendered = format!("{:?}", facebook());

		assert!(rendered.contains("facebook"));
		assert!(!rendered.contains(CLIENT_SECRET));
	}
}
