//! Ordered query-string assembly with query-component percent-encoding.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::_prelude::*;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encodes a single query key or value.
pub fn escape(value: &str) -> String {
	utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Scalar value accepted as an extra query parameter.
///
/// Nested structures are deliberately unrepresentable; only scalars have a defined textual
/// form.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
	/// Text, used as-is.
	Str(String),
	/// Signed integer, rendered in decimal.
	Int(i64),
	/// Unsigned integer, rendered in decimal.
	UInt(u64),
	/// Float, rendered in its shortest round-trip form.
	///
	/// Magnitudes in `[1e-6, 1e21)` use plain decimal notation (`2.0` → `2`, `0.5` → `0.5`);
	/// anything outside that range uses exponent notation with an explicit sign (`1e21` →
	/// `1e+21`, `1e-7` → `1e-7`). `-0.0` renders as `0`, and non-finite values as `NaN`,
	/// `Infinity` or `-Infinity`.
	Float(f64),
	/// Boolean, rendered as `true`/`false`.
	Bool(bool),
}
impl Display for QueryValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Str(v) => f.write_str(v),
			Self::Int(v) => write!(f, "{v}"),
			Self::UInt(v) => write!(f, "{v}"),
			Self::Float(v) if v.is_nan() => f.write_str("NaN"),
			Self::Float(v) if v.is_infinite() =>
				f.write_str(if v.is_sign_positive() { "Infinity" } else { "-Infinity" }),
			// Negative zero renders as `0`.
			Self::Float(v) if *v == 0.0 => f.write_str("0"),
			Self::Float(v) if (1e-6..1e21).contains(&v.abs()) => write!(f, "{v}"),
			Self::Float(v) => {
				let exponent = format!("{v:e}");

				match exponent.split_once('e') {
					Some((mantissa, power)) if !power.starts_with('-') =>
						write!(f, "{mantissa}e+{power}"),
					_ => f.write_str(&exponent),
				}
			},
			Self::Bool(v) => write!(f, "{v}"),
		}
	}
}
impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}
impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}
impl From<&String> for QueryValue {
	fn from(value: &String) -> Self {
		Self::Str(value.clone())
	}
}
impl From<bool> for QueryValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<f32> for QueryValue {
	fn from(value: f32) -> Self {
		Self::Float(value.into())
	}
}
impl From<f64> for QueryValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

macro_rules! impl_from_int {
	($variant:ident, $target:ty, $($ty:ty),+) => {
		$(
			impl From<$ty> for QueryValue {
				fn from(value: $ty) -> Self {
					Self::$variant(<$target>::from(value))
				}
			}
		)+
	};
}
impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(UInt, u64, u8, u16, u32, u64);

#[derive(Clone, Debug, PartialEq)]
struct QueryPair {
	key: String,
	value: String,
	escape_value: bool,
}

/// Insertion-ordered parameter list where each key appears at most once.
///
/// Setting an existing key replaces its value in place, keeping the original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryPairs(Vec<QueryPair>);
impl QueryPairs {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a value that will be percent-encoded when rendered.
	pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
		self.upsert(key.into(), value.to_string(), true)
	}

	/// Sets a value only when one is present; `None` leaves the list untouched.
	pub fn set_opt(&mut self, key: impl Into<String>, value: Option<impl Display>) -> &mut Self {
		if let Some(value) = value {
			self.set(key, value);
		}

		self
	}

	/// Removes any existing entry and appends a value rendered without encoding.
	pub fn push_raw(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		let key = key.into();

		self.remove(&key);
		self.0.push(QueryPair { key, value: value.into(), escape_value: false });

		self
	}

	/// Removes `key` if present.
	pub fn remove(&mut self, key: &str) -> &mut Self {
		self.0.retain(|pair| pair.key != key);

		self
	}

	/// Returns the unencoded value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|pair| pair.key == key).map(|pair| pair.value.as_str())
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over unencoded `(key, value)` pairs in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|pair| (pair.key.as_str(), pair.value.as_str()))
	}

	/// Renders `key=value` pairs joined by `&`.
	pub fn render(&self) -> String {
		let mut buf = String::new();

		for (idx, pair) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push('&');
			}

			buf.push_str(&escape(&pair.key));
			buf.push('=');

			if pair.escape_value {
				buf.push_str(&escape(&pair.value));
			} else {
				buf.push_str(&pair.value);
			}
		}

		buf
	}

	fn upsert(&mut self, key: String, value: String, escape_value: bool) -> &mut Self {
		match self.0.iter_mut().find(|pair| pair.key == key) {
			Some(pair) => {
				pair.value = value;
				pair.escape_value = escape_value;
			},
			None => self.0.push(QueryPair { key, value, escape_value }),
		}

		self
	}
}
impl Display for QueryPairs {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.render())
	}
}
