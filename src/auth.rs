//! Client credentials shared by every scheme instance.

pub mod credentials;

pub use credentials::*;
