//! Token-to-value conversion.
//!
//! Every field a schema binds to is filled through [`FromToken`]. The
//! conversion is all-or-nothing: a token either converts completely into the
//! target type or yields `None`. Nothing is trimmed, and string fields borrow
//! the token instead of copying it.
//!
//! # Examples
//!
//! ```
//! use argschema_core::convert;
//!
//! assert_eq!(convert::<bool>("yes"), Some(true));
//! assert_eq!(convert::<i32>("-10"), Some(-10));
//! assert_eq!(convert::<i32>("12abc"), None);
//! assert_eq!(convert::<&str>(""), Some(""));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tokens accepted as `true` by boolean fields.
pub const TRUE_LITERALS: [&str; 5] = ["true", "1", "yes", "on", "y"];

/// Tokens accepted as `false` by boolean fields.
pub const FALSE_LITERALS: [&str; 5] = ["false", "0", "no", "off", "n"];

/// Category of value a field converts tokens into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// `true`/`false` literal sets; options of this kind need no value.
    Bool,
    /// Signed or unsigned integer of any width.
    Integer,
    /// `f32` or `f64`.
    Float,
    /// Borrowed token text.
    String,
}

/// A type that can be produced from a single argument token.
///
/// Implemented for `bool`, all primitive integers, `f32`, `f64` and
/// `&'a str`. Field types without an implementation cannot be declared in a
/// schema at all.
pub trait FromToken<'a>: Sized {
    /// The value category, used to decide whether an option takes a value.
    const KIND: ValueKind;

    /// Converts the whole token, or returns `None`.
    fn from_token(token: &'a str) -> Option<Self>;

    /// Value assigned when an option of this type appears without a value.
    ///
    /// Only `bool` has one: presence means `true`.
    fn when_present() -> Option<Self> {
        None
    }
}

/// Converts `token` into `T`.
pub fn convert<'a, T: FromToken<'a>>(token: &'a str) -> Option<T> {
    T::from_token(token)
}

impl<'a> FromToken<'a> for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_token(token: &'a str) -> Option<Self> {
        if TRUE_LITERALS.contains(&token) {
            Some(true)
        } else if FALSE_LITERALS.contains(&token) {
            Some(false)
        } else {
            None
        }
    }

    fn when_present() -> Option<Self> {
        Some(true)
    }
}

impl<'a> FromToken<'a> for &'a str {
    const KIND: ValueKind = ValueKind::String;

    fn from_token(token: &'a str) -> Option<Self> {
        Some(token)
    }
}

// `FromStr` for numbers accepts a leading `+`; argument tokens only allow `-`.
fn parse_number<T: FromStr>(token: &str) -> Option<T> {
    if token.starts_with('+') {
        return None;
    }
    token.parse().ok()
}

// `FromStr` saturates out-of-range floats to infinity or zero. Only the
// spelled-out `inf`/`infinity`/`nan` words may produce a non-finite value,
// and a mantissa with a nonzero digit must not round to zero.
fn parse_float<T: FromStr + Into<f64> + Copy>(token: &str) -> Option<T> {
    let value: T = parse_number(token)?;
    let wide: f64 = value.into();

    if !wide.is_finite() {
        let word = token.strip_prefix('-').unwrap_or(token);
        let spelled = ["inf", "infinity", "nan"]
            .iter()
            .any(|special| word.eq_ignore_ascii_case(special));
        return spelled.then_some(value);
    }

    if wide == 0.0 {
        let mantissa = token.split(['e', 'E']).next().unwrap_or(token);
        if mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            return None;
        }
    }

    Some(value)
}

macro_rules! impl_from_token_numeric {
    ($kind:expr, $parse:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl<'a> FromToken<'a> for $ty {
                const KIND: ValueKind = $kind;

                fn from_token(token: &'a str) -> Option<Self> {
                    $parse(token)
                }
            }
        )+
    };
}

impl_from_token_numeric!(ValueKind::Integer, parse_number =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);
impl_from_token_numeric!(ValueKind::Float, parse_float => f32, f64);

/// A field type a declaration can write into.
///
/// Plain scalars are required values. `Option<T>` marks the field as
/// optional: leaving it unset is a valid outcome, and a converted value is
/// stored as `Some(v)`.
pub trait FieldValue<'a>: Sized {
    /// The scalar type tokens are converted into.
    type Inner: FromToken<'a>;

    /// Whether absence of this field is acceptable.
    const OPTIONAL: bool;

    /// Wraps a converted scalar into the field type.
    fn wrap(inner: Self::Inner) -> Self;
}

impl<'a, T: FromToken<'a>> FieldValue<'a> for Option<T> {
    type Inner = T;
    const OPTIONAL: bool = true;

    fn wrap(inner: T) -> Self {
        Some(inner)
    }
}

macro_rules! impl_field_value_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'a> FieldValue<'a> for $ty {
                type Inner = $ty;
                const OPTIONAL: bool = false;

                fn wrap(inner: $ty) -> Self {
                    inner
                }
            }
        )+
    };
}

impl_field_value_scalar!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<'a> FieldValue<'a> for &'a str {
    type Inner = &'a str;
    const OPTIONAL: bool = false;

    fn wrap(inner: &'a str) -> Self {
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literals() {
        for token in TRUE_LITERALS {
            assert_eq!(convert::<bool>(token), Some(true), "token {token}");
        }
        for token in FALSE_LITERALS {
            assert_eq!(convert::<bool>(token), Some(false), "token {token}");
        }
    }

    #[test]
    fn test_bool_is_case_sensitive() {
        assert_eq!(convert::<bool>("TRUE"), None);
        assert_eq!(convert::<bool>("Yes"), None);
        assert_eq!(convert::<bool>("invalid"), None);
        assert_eq!(convert::<bool>(""), None);
    }

    #[test]
    fn test_integer_whole_token() {
        assert_eq!(convert::<i32>("42"), Some(42));
        assert_eq!(convert::<i32>("-10"), Some(-10));
        assert_eq!(convert::<i32>("0"), Some(0));
        assert_eq!(convert::<i32>("abc"), None);
        assert_eq!(convert::<i32>("12abc"), None);
        assert_eq!(convert::<i32>(""), None);
        assert_eq!(convert::<i32>(" 12"), None);
        assert_eq!(convert::<i32>("12 "), None);
    }

    #[test]
    fn test_integer_rejects_plus_sign() {
        assert_eq!(convert::<i32>("+5"), None);
        assert_eq!(convert::<u8>("+5"), None);
        assert_eq!(convert::<f64>("+1.5"), None);
    }

    #[test]
    fn test_integer_overflow_and_sign() {
        assert_eq!(convert::<u8>("255"), Some(255));
        assert_eq!(convert::<u8>("256"), None);
        assert_eq!(convert::<i8>("-128"), Some(-128));
        assert_eq!(convert::<i8>("-129"), None);
        assert_eq!(convert::<u32>("-1"), None);
        assert_eq!(convert::<u32>("4294967295"), Some(u32::MAX));
        assert_eq!(convert::<i64>("9999999999"), Some(9_999_999_999));
    }

    #[test]
    fn test_float() {
        assert_eq!(convert::<f64>("3.5"), Some(3.5));
        assert_eq!(convert::<f64>("-0.25"), Some(-0.25));
        assert_eq!(convert::<f64>("1e3"), Some(1000.0));
        assert_eq!(convert::<f32>("3.14x"), None);
        assert_eq!(convert::<f32>(""), None);
    }

    #[test]
    fn test_float_out_of_range() {
        assert_eq!(convert::<f32>("1e40"), None);
        assert_eq!(convert::<f32>("-1e40"), None);
        assert_eq!(convert::<f64>("1e400"), None);
        assert_eq!(convert::<f32>("1e-50"), None);
        assert_eq!(convert::<f64>("2.5e-400"), None);
        assert_eq!(convert::<f32>("3.4e38"), Some(3.4e38));
        assert_eq!(convert::<f64>("1e308"), Some(1e308));
    }

    #[test]
    fn test_float_zero_and_special_words() {
        assert_eq!(convert::<f64>("0"), Some(0.0));
        assert_eq!(convert::<f64>("0.000e5"), Some(0.0));
        assert_eq!(convert::<f32>("-0.0"), Some(0.0));
        assert_eq!(convert::<f32>("inf"), Some(f32::INFINITY));
        assert_eq!(convert::<f64>("-infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(convert::<f64>("INF"), Some(f64::INFINITY));
        assert!(convert::<f64>("nan").is_some_and(f64::is_nan));
        assert_eq!(convert::<f64>("+inf"), None);
    }

    #[test]
    fn test_string_borrows_token() {
        let token = String::from("with spaces");
        let converted = convert::<&str>(&token).unwrap();
        assert_eq!(converted, "with spaces");
        assert!(std::ptr::eq(converted, token.as_str()));
    }

    #[test]
    fn test_kinds_and_optionality() {
        assert_eq!(<bool as FromToken<'_>>::KIND, ValueKind::Bool);
        assert_eq!(<u16 as FromToken<'_>>::KIND, ValueKind::Integer);
        assert_eq!(<f32 as FromToken<'_>>::KIND, ValueKind::Float);
        assert_eq!(<&str as FromToken<'_>>::KIND, ValueKind::String);
        assert!(!<i32 as FieldValue<'_>>::OPTIONAL);
        assert!(<Option<i32> as FieldValue<'_>>::OPTIONAL);
        assert_eq!(<Option<bool> as FieldValue<'_>>::wrap(true), Some(true));
    }
}
