//! Walks through building a Facebook consent URL from configuration, describing the token
//! exchange, and normalizing a failed exchange.

// crates.io
use color_eyre::Result;
// self
use oauth2_scheme::{
	config::ServicesConfig,
	exchange::{RawProviderError, TokenExchangeRequest},
	scheme::QueryValue,
};

const SERVICES: &str = r#"{
	"facebook": {
		"clientId": "10012020",
		"clientSecret": "1000w0sa",
		"redirectUri": "http://localhost:8000/logged",
		"scopes": ["email", "public_profile"]
	}
}"#;

fn main() -> Result<()> {
	color_eyre::install()?;

	let services = ServicesConfig::from_json(SERVICES)?;
	let driver = services.driver("facebook")?;
	let scheme = driver.scheme("facebook")?;
	let url = driver.authorize_url(&scheme, &[("state", QueryValue::from(101010))])?;

	println!("Send your user to {url}.");

	let request = scheme.token_request("code-from-callback", "http://localhost:8000/logged", &[])?;

	println!("POST {} ({})", request.url, TokenExchangeRequest::CONTENT_TYPE);
	println!("{}", request.body());

	let failure = RawProviderError::new().with_status_code(400).with_data(
		r#"{"error":"invalid_grant","error_description":"Invalid verification code format."}"#,
	);
	let exception = scheme.parse_provider_error(&failure);

	eprintln!("{}: {}", exception.name(), exception.message());

	Ok(())
}
