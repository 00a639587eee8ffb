//! Provider-agnostic OAuth 2.0 authorization-code scheme.
//!
//! An [`OAuth2Scheme`](scheme::OAuth2Scheme) pairs a [`Provider`](provider::Provider) extension
//! (three endpoint strings) with a client id/secret and offers the pure halves of a social-auth
//! integration: building the authorization redirect URL, describing the token-exchange request,
//! and normalizing whatever the provider returns on failure into one
//! [`OAuthException`](error::OAuthException). Transport, storage, and session wiring stay with
//! the caller.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod exchange;
pub mod obs;
pub mod provider;
pub mod scheme;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, tracing_subscriber as _};
