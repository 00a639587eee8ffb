//! Client identifier and redacted secret, validated together at construction time.

// self
use crate::{_prelude::*, error::MissingParameter};

/// OAuth 2.0 client identifier, assumed URL-safe.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);
impl ClientId {
	/// Wraps a client identifier, rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, MissingParameter> {
		let value = value.into();

		if value.is_empty() { Err(MissingParameter::ClientId) } else { Ok(Self(value)) }
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ClientId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ClientId> for String {
	fn from(value: ClientId) -> Self {
		value.0
	}
}
impl TryFrom<String> for ClientId {
	type Error = MissingParameter;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for ClientId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ClientId({})", self.0)
	}
}
impl Display for ClientId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Redacted client secret wrapper keeping sensitive material out of logs.
///
/// Deserializes through the same emptiness check as [`ClientSecret::new`]; it never serializes.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a client secret, rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, MissingParameter> {
		let value = value.into();

		if value.is_empty() { Err(MissingParameter::ClientSecret) } else { Ok(Self(value)) }
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for ClientSecret {
	type Error = MissingParameter;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Validated client id/secret pair.
///
/// The id is checked before the secret, so a caller missing both always sees the client id
/// failure first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Client identifier sent in authorize URLs and token requests.
	pub client_id: ClientId,
	/// Client secret sent only in token requests.
	pub client_secret: ClientSecret,
}
impl Credentials {
	/// Validates both values in positional order.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, MissingParameter> {
		let client_id = ClientId::new(client_id)?;
		let client_secret = ClientSecret::new(client_secret)?;

		Ok(Self { client_id, client_secret })
	}

	/// Validates optional values, treating `None` the same as an empty string.
	pub fn from_options(
		client_id: Option<&str>,
		client_secret: Option<&str>,
	) -> Result<Self, MissingParameter> {
		Self::new(client_id.unwrap_or_default(), client_secret.unwrap_or_default())
	}
}
