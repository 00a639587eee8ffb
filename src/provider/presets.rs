//! Built-in provider descriptors.

// self
use crate::provider::Provider;

macro_rules! def_preset {
	($name:ident, $doc:literal, $label:literal, $base:literal, $authorize:literal, $token:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
		pub struct $name;
		impl $name {
			/// Driver label used in configuration.
			pub const NAME: &'static str = $label;
		}
		impl Provider for $name {
			fn base_url(&self) -> Option<&str> {
				Some($base)
			}

			fn authorize_url(&self) -> Option<&str> {
				Some($authorize)
			}

			fn access_token_url(&self) -> Option<&str> {
				Some($token)
			}

			fn name(&self) -> &str {
				$label
			}
		}
	};
}

def_preset!(
	Facebook,
	"Facebook Graph API login dialog.",
	"facebook",
	"https://graph.facebook.com/v2.1",
	"oauth/authorize",
	"oauth/access_token"
);
def_preset!(
	Google,
	"Google accounts OAuth 2.0 endpoints.",
	"google",
	"https://accounts.google.com/o/oauth2",
	"auth",
	"token"
);
def_preset!(
	GitHub,
	"GitHub OAuth app endpoints.",
	"github",
	"https://github.com/login/oauth",
	"authorize",
	"access_token"
);

/// Resolves a preset by its driver label.
pub fn preset(name: &str) -> Option<Box<dyn Provider>> {
	match name {
		Facebook::NAME => Some(Box::new(Facebook)),
		Google::NAME => Some(Box::new(Google)),
		GitHub::NAME => Some(Box::new(GitHub)),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn presets_resolve_by_label() {
		for label in ["facebook", "google", "github"] {
			let provider = preset(label).expect("Preset should resolve by label.");

			assert_eq!(provider.name(), label);
			assert!(!provider.is_abstract());
			assert!(provider.base_url().is_some());
			assert!(provider.authorize_url().is_some());
			assert!(provider.access_token_url().is_some());
		}

		assert!(preset("oauth2").is_none());
		assert!(preset("Facebook").is_none());
	}
}
