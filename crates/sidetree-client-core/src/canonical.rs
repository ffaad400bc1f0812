//! JSON Canonicalization Scheme (RFC 8785) for deterministic serialization.
//!
//! Every hash in the Sidetree protocol is taken over canonical JSON:
//! - Object members sorted by key, comparing UTF-16 code units
//! - No insignificant whitespace
//! - Minimal string escaping, everything else emitted as UTF-8
//! - Numbers in ECMAScript shortest round-trip form
//!
//! Two structurally equal values always produce byte-identical output,
//! regardless of their original member order or formatting.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{CoreError, Result};

/// Canonicalize any serializable value.
///
/// Fails with [`CoreError::Encoding`] if the value contains a NaN or
/// infinite float, which `serde_json` would otherwise turn into `null`.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    value
        .serialize(finite::FiniteCheck)
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    let value = serde_json::to_value(value)?;
    canonicalize_value(&value)
}

/// Canonicalize an already-parsed JSON value.
pub fn canonicalize_value(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Canonicalize into a `String`.
pub fn canonicalize_str<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = canonicalize(value)?;
    // The encoder only ever writes valid UTF-8.
    String::from_utf8(bytes).map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Recursively encode a JSON value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => encode_number(buf, n)?,
        Value::String(s) => encode_string(buf, s),
        Value::Array(arr) => encode_array(buf, arr)?,
        Value::Object(map) => encode_object_canonical(buf, map)?,
    }
    Ok(())
}

/// Encode a number.
///
/// All numbers go through their IEEE-754 double value, so integers beyond
/// 2^53 lose precision exactly as they would in an ECMAScript runtime.
fn encode_number(buf: &mut Vec<u8>, n: &Number) -> Result<()> {
    let f = n
        .as_f64()
        .ok_or_else(|| CoreError::Encoding(format!("unrepresentable number: {}", n)))?;
    buf.extend_from_slice(format_number(f)?.as_bytes());
    Ok(())
}

/// Format a double the way ECMAScript `Number.prototype.toString` does.
fn format_number(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(CoreError::Encoding(format!("non-finite number: {}", f)));
    }
    // Covers -0 as well.
    if f == 0.0 {
        return Ok("0".to_string());
    }

    let abs = f.abs();
    if (1e-6..1e21).contains(&abs) {
        // Rust's Display already yields the shortest round-trip digits
        // without an exponent, and drops a trailing ".0".
        return Ok(format!("{}", f));
    }

    let s = format!("{:e}", f);
    Ok(match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    })
}

/// Encode a string with the minimal JSON escapes.
fn encode_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    for c in s.chars() {
        match c {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\u{08}' => buf.extend_from_slice(b"\\b"),
            '\u{0c}' => buf.extend_from_slice(b"\\f"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if (c as u32) < 0x20 => {
                buf.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes());
            }
            c => {
                let mut tmp = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            }
        }
    }
    buf.push(b'"');
}

/// Encode an array, preserving element order.
fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) -> Result<()> {
    buf.push(b'[');
    for (i, item) in arr.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_value_to(buf, item)?;
    }
    buf.push(b']');
    Ok(())
}

/// Encode an object canonically.
///
/// Members are sorted by the UTF-16 code units of their keys, which differs
/// from UTF-8 byte order for characters outside the Basic Multilingual Plane.
fn encode_object_canonical(buf: &mut Vec<u8>, map: &Map<String, Value>) -> Result<()> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));

    buf.push(b'{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_string(buf, key);
        buf.push(b':');
        encode_value_to(buf, value)?;
    }
    buf.push(b'}');
    Ok(())
}

/// A serializer that only walks a value looking for non-finite floats.
mod finite {
    use serde::ser::{self, Serialize};
    use std::fmt;

    #[derive(Debug)]
    pub struct NonFinite(String);

    impl fmt::Display for NonFinite {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl std::error::Error for NonFinite {}

    impl ser::Error for NonFinite {
        fn custom<T: fmt::Display>(msg: T) -> Self {
            Self(msg.to_string())
        }
    }

    type Walk = Result<(), NonFinite>;

    #[derive(Clone, Copy)]
    pub struct FiniteCheck;

    fn check(f: f64) -> Walk {
        if f.is_finite() {
            Ok(())
        } else {
            Err(NonFinite(format!("non-finite number: {}", f)))
        }
    }

    impl ser::Serializer for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        type SerializeSeq = Self;
        type SerializeTuple = Self;
        type SerializeTupleStruct = Self;
        type SerializeTupleVariant = Self;
        type SerializeMap = Self;
        type SerializeStruct = Self;
        type SerializeStructVariant = Self;

        fn serialize_bool(self, _: bool) -> Walk {
            Ok(())
        }
        fn serialize_i8(self, _: i8) -> Walk {
            Ok(())
        }
        fn serialize_i16(self, _: i16) -> Walk {
            Ok(())
        }
        fn serialize_i32(self, _: i32) -> Walk {
            Ok(())
        }
        fn serialize_i64(self, _: i64) -> Walk {
            Ok(())
        }
        fn serialize_u8(self, _: u8) -> Walk {
            Ok(())
        }
        fn serialize_u16(self, _: u16) -> Walk {
            Ok(())
        }
        fn serialize_u32(self, _: u32) -> Walk {
            Ok(())
        }
        fn serialize_u64(self, _: u64) -> Walk {
            Ok(())
        }
        fn serialize_f32(self, v: f32) -> Walk {
            check(f64::from(v))
        }
        fn serialize_f64(self, v: f64) -> Walk {
            check(v)
        }
        fn serialize_char(self, _: char) -> Walk {
            Ok(())
        }
        fn serialize_str(self, _: &str) -> Walk {
            Ok(())
        }
        fn serialize_bytes(self, _: &[u8]) -> Walk {
            Ok(())
        }
        fn serialize_none(self) -> Walk {
            Ok(())
        }
        fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Walk {
            value.serialize(self)
        }
        fn serialize_unit(self) -> Walk {
            Ok(())
        }
        fn serialize_unit_struct(self, _: &'static str) -> Walk {
            Ok(())
        }
        fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Walk {
            Ok(())
        }
        fn serialize_newtype_struct<T: ?Sized + Serialize>(
            self,
            _: &'static str,
            value: &T,
        ) -> Walk {
            value.serialize(self)
        }
        fn serialize_newtype_variant<T: ?Sized + Serialize>(
            self,
            _: &'static str,
            _: u32,
            _: &'static str,
            value: &T,
        ) -> Walk {
            value.serialize(self)
        }
        fn serialize_seq(self, _: Option<usize>) -> Result<Self, NonFinite> {
            Ok(self)
        }
        fn serialize_tuple(self, _: usize) -> Result<Self, NonFinite> {
            Ok(self)
        }
        fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, NonFinite> {
            Ok(self)
        }
        fn serialize_tuple_variant(
            self,
            _: &'static str,
            _: u32,
            _: &'static str,
            _: usize,
        ) -> Result<Self, NonFinite> {
            Ok(self)
        }
        fn serialize_map(self, _: Option<usize>) -> Result<Self, NonFinite> {
            Ok(self)
        }
        fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, NonFinite> {
            Ok(self)
        }
        fn serialize_struct_variant(
            self,
            _: &'static str,
            _: u32,
            _: &'static str,
            _: usize,
        ) -> Result<Self, NonFinite> {
            Ok(self)
        }
    }

    impl ser::SerializeSeq for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }

    impl ser::SerializeTuple for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }

    impl ser::SerializeTupleStruct for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }

    impl ser::SerializeTupleVariant for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }

    impl ser::SerializeMap for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Walk {
            key.serialize(*self)
        }
        fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }

    impl ser::SerializeStruct for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_field<T: ?Sized + Serialize>(&mut self, _: &'static str, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }

    impl ser::SerializeStructVariant for FiniteCheck {
        type Ok = ();
        type Error = NonFinite;
        fn serialize_field<T: ?Sized + Serialize>(&mut self, _: &'static str, value: &T) -> Walk {
            value.serialize(*self)
        }
        fn end(self) -> Walk {
            Ok(())
        }
    }
}
