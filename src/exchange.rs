//! Token-exchange data: the request a transport should send, the raw failure it hands back,
//! and parsing of the token endpoint's success body.
//!
//! Nothing here performs I/O. A transport collaborator posts [`TokenExchangeRequest::body`] to
//! [`TokenExchangeRequest::url`], then feeds either the response body to
//! [`parse_token_response`] or a [`RawProviderError`] to
//! [`OAuth2Scheme::parse_provider_error`](crate::scheme::OAuth2Scheme::parse_provider_error).

// crates.io
use serde_json::{Map, Value};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::OAuthException, scheme::QueryPairs};

/// Failed token-exchange response as reported by the transport.
///
/// Only `data` participates in normalization; the status code is kept for callers that log it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProviderError {
	/// HTTP status code, when the transport got that far.
	pub status_code: Option<u16>,
	/// Response body, expected to be a JSON document.
	pub data: Option<String>,
}
impl RawProviderError {
	/// Creates an empty failure with neither status nor body.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds the HTTP status code.
	pub fn with_status_code(mut self, status_code: u16) -> Self {
		self.status_code = Some(status_code);

		self
	}

	/// Adds the response body.
	pub fn with_data(mut self, data: impl Into<String>) -> Self {
		self.data = Some(data.into());

		self
	}

	/// Textual form of the body's `error_description`, or `null` when it cannot be read.
	///
	/// Never fails: a missing body, malformed JSON, a non-object document, and an absent field
	/// all collapse to `null`. Non-string descriptions render as compact JSON.
	pub fn description(&self) -> String {
		self.data
			.as_deref()
			.and_then(|data| serde_json::from_str::<Value>(data).ok())
			.and_then(|mut body| body.get_mut("error_description").map(Value::take))
			.map(value_text)
			.unwrap_or_else(|| Value::Null.to_string())
	}

	/// Normalizes the failure into the canonical [`OAuthException`].
	pub fn to_exception(&self) -> OAuthException {
		OAuthException::token_exchange(self.description())
	}
}

/// Form POST a transport must send to the token endpoint.
#[derive(Clone, PartialEq)]
pub struct TokenExchangeRequest {
	/// Absolute token endpoint URL.
	pub url: String,
	/// Ordered form parameters, unencoded.
	pub form: QueryPairs,
	/// Extra request headers configured on the scheme.
	pub headers: Vec<(String, String)>,
}
impl TokenExchangeRequest {
	/// Content type of [`body`](Self::body).
	pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

	/// Renders the form as an `application/x-www-form-urlencoded` body.
	pub fn body(&self) -> String {
		self.form.render()
	}
}
impl Debug for TokenExchangeRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let keys = self.form.iter().map(|(key, _)| key).collect::<Vec<_>>();

		f.debug_struct("TokenExchangeRequest")
			.field("url", &self.url)
			.field("form_keys", &keys)
			.field("headers", &self.headers)
			.finish()
	}
}

/// Successful token endpoint response.
#[derive(Clone, PartialEq)]
pub struct AccessToken {
	/// Bearer token issued by the provider.
	pub access_token: String,
	/// Refresh token, when the provider issued one.
	pub refresh_token: Option<String>,
	/// Token type (usually `bearer`).
	pub token_type: Option<String>,
	/// Granted scopes, split on spaces or commas.
	pub scopes: Vec<String>,
	/// Lifetime relative to the response.
	pub expires_in: Option<Duration>,
	/// Every field the provider returned, including provider-specific extras.
	pub raw: BTreeMap<String, Value>,
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token_set", &self.refresh_token.is_some())
			.field("token_type", &self.token_type)
			.field("scopes", &self.scopes)
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenFields {
	access_token: String,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	scope: Option<String>,
	#[serde(default, alias = "expires")]
	expires_in: Option<Value>,
}

/// Parses a token endpoint body.
///
/// JSON objects are preferred; anything else is read as a form-encoded body, which some
/// providers still return. An `error` field, even on a successful status, is reported as a
/// token-exchange failure.
pub fn parse_token_response(body: &str) -> Result<AccessToken, OAuthException> {
	let raw = parse_fields(body);

	if let Some(error) = raw.get("error") {
		let description = raw.get("error_description").unwrap_or(error);

		return Err(OAuthException::token_exchange(value_text(description.clone())));
	}

	let document = Value::Object(raw.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
	let fields: TokenFields = serde_path_to_error::deserialize(document).map_err(|e| {
		OAuthException::token_exchange(format!(
			"token response is invalid at `{}`: {}",
			e.path(),
			e.inner()
		))
	})?;
	let expires_in = fields.expires_in.map(parse_expires_in).transpose()?;
	let scopes = fields
		.scope
		.as_deref()
		.map(|scope| {
			scope
				.split([' ', ','])
				.filter(|s| !s.is_empty())
				.map(ToOwned::to_owned)
				.collect::<Vec<_>>()
		})
		.unwrap_or_default();

	Ok(AccessToken {
		access_token: fields.access_token,
		refresh_token: fields.refresh_token,
		token_type: fields.token_type,
		scopes,
		expires_in,
		raw,
	})
}

fn parse_fields(body: &str) -> BTreeMap<String, Value> {
	if let Ok(map) = serde_json::from_str::<Map<String, Value>>(body) {
		return map.into_iter().collect();
	}

	form_urlencoded::parse(body.trim().as_bytes())
		.map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
		.collect()
}

fn parse_expires_in(value: Value) -> Result<Duration, OAuthException> {
	let seconds = match &value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse::<i64>().ok(),
		_ => None,
	};

	seconds.map(Duration::seconds).ok_or_else(|| {
		OAuthException::token_exchange(format!(
			"token response has a non-integer expires_in: {value}"
		))
	})
}

fn value_text(value: Value) -> String {
	match value {
		Value::String(s) => s,
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn description_reads_error_description() {
		let raw = RawProviderError::new()
			.with_status_code(400)
			.with_data(r#"{"error":"invalid_grant","error_description":"foo"}"#);

		assert_eq!(raw.description(), "foo");
		assert_eq!(raw.to_exception().message(), "E_OAUTH_TOKEN_EXCHANGE: foo");
	}

	#[test]
	fn description_degrades_to_null() {
		let cases = [
			RawProviderError::new().with_status_code(400),
			RawProviderError::new().with_data("<html>502 Bad Gateway</html>"),
			RawProviderError::new().with_data(r#"{"error":"invalid_grant"}"#),
			RawProviderError::new().with_data(r#"["error_description"]"#),
			RawProviderError::new().with_data(r#"{"error_description":null}"#),
			RawProviderError::new().with_data(""),
		];

		for raw in cases {
			assert_eq!(raw.description(), "null", "{raw:?}");
		}
	}

	#[test]
	fn non_string_descriptions_render_as_json() {
		let number = RawProviderError::new().with_data(r#"{"error_description":190}"#);
		let object = RawProviderError::new().with_data(r#"{"error_description":{"code":1}}"#);

		assert_eq!(number.description(), "190");
		assert_eq!(object.description(), r#"{"code":1}"#);
	}

	#[test]
	fn raw_error_deserializes_from_transport_shape() {
		let raw: RawProviderError =
			serde_json::from_str(r#"{"statusCode":400,"data":"{\"error_description\":\"foo\"}"}"#)
				.expect("Raw provider error should deserialize.");

		assert_eq!(raw.status_code, Some(400));
		assert_eq!(raw.description(), "foo");
	}

	#[test]
	fn parses_json_token_response() {
		let token = parse_token_response(
			r#"{"access_token":"abc","refresh_token":"def","token_type":"bearer","expires_in":3600,"scope":"email profile","id_token":"x"}"#,
		)
		.expect("JSON token response should parse.");

		assert_eq!(token.access_token, "abc");
		assert_eq!(token.refresh_token.as_deref(), Some("def"));
		assert_eq!(token.token_type.as_deref(), Some("bearer"));
		assert_eq!(token.expires_in, Some(Duration::seconds(3600)));
		assert_eq!(token.scopes, ["email", "profile"]);
		assert_eq!(token.raw.get("id_token"), Some(&Value::String("x".into())));
	}

	#[test]
	fn parses_form_token_response() {
		let token = parse_token_response("access_token=abc&expires=5183999&scope=user%2Crepo")
			.expect("Form token response should parse.");

		assert_eq!(token.access_token, "abc");
		assert_eq!(token.expires_in, Some(Duration::seconds(5_183_999)));
		assert_eq!(token.scopes, ["user", "repo"]);
		assert!(token.refresh_token.is_none());
	}

	#[test]
	fn error_fields_in_success_bodies_become_exceptions() {
		let err = parse_token_response(
			"error=bad_verification_code&error_description=The+code+passed+is+incorrect",
		)
		.expect_err("Error body should be rejected.");

		assert_eq!(err.message(), "E_OAUTH_TOKEN_EXCHANGE: The code passed is incorrect");

		let err = parse_token_response(r#"{"error":"invalid_request"}"#)
			.expect_err("Error body should be rejected.");

		assert_eq!(err.message(), "E_OAUTH_TOKEN_EXCHANGE: invalid_request");
	}

	#[test]
	fn missing_access_token_and_bad_expiry_are_rejected() {
		let err = parse_token_response(r#"{"token_type":"bearer"}"#)
			.expect_err("Missing access token should be rejected.");

		assert_eq!(err.name(), "OAuthException");
		assert!(err.message().contains("access_token"), "{}", err.message());

		let err = parse_token_response(r#"{"access_token":"abc","expires_in":"soon"}"#)
			.expect_err("Non-numeric expiry should be rejected.");

		assert!(err.message().contains("expires_in"), "{}", err.message());
	}

	#[test]
	fn request_debug_hides_form_values() {
		let mut form = QueryPairs::new();

		form.set("client_secret", "1000w0sa");

		let request = TokenExchangeRequest {
			url: "https://example.com/token".into(),
			form,
			headers: Vec::new(),
		};
		let rendered = format!("{request:?}");

		assert!(rendered.contains("client_secret"));
		assert!(!rendered.contains("1000w0sa"));
		assert_eq!(request.body(), "client_secret=1000w0sa");
	}
}
