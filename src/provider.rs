//! Provider-facing extension contract and the built-in provider presets.
//!
//! `descriptor` defines [`Provider`], the three-accessor contract every concrete integration
//! implements, along with the abstract base identity [`OAuth2`] and the data-driven
//! [`CustomProvider`]. `presets` ships the Facebook, Google, and GitHub descriptors.

pub mod descriptor;
pub mod presets;

pub use descriptor::*;
pub use presets::*;
