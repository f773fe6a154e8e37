// ── Capture fields & report lines ─────────────────────────────────────────────
//
// A probe's result is a flat, ordered list of `name=value` fields.  Each value
// keeps the width and signedness of the native type it came from, so the text
// form is lossless and identical on every run of every implementation.
// No `unsafe` here.

use std::fmt;

use serde::Serialize;

// ── Address ───────────────────────────────────────────────────────────────────

/// An opaque pointer-sized address (symbol, module handle, …).
///
/// Rendered the way the C runtime prints `%p` on Windows: zero-padded
/// upper-case hex, two digits per byte, no prefix.  The null sentinel is the
/// all-zero string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Address(pub usize);

impl Address {
    /// The "unavailable" sentinel.
    pub const NULL: Self = Self(0);

    /// Hex digits in the rendered form.
    pub const WIDTH: usize = 2 * std::mem::size_of::<usize>();

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$X}", self.0, width = Self::WIDTH)
    }
}

// ── FieldValue ────────────────────────────────────────────────────────────────

/// A captured value, tagged with the width and signedness of its native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// `WORD`
    U16(u16),
    /// `DWORD` / `UINT`
    U32(u32),
    /// `SHORT`
    I16(i16),
    /// `LONG` / `int`
    I32(i32),
    /// `LONGLONG` (`LARGE_INTEGER.QuadPart`)
    I64(i64),
    /// Pointer or handle; null is the sentinel.
    Address(Address),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Address(a) => write!(f, "{a}"),
        }
    }
}

// ── CaptureField ──────────────────────────────────────────────────────────────

/// One `name=value` pair of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureField {
    pub name: &'static str,
    #[serde(flatten)]
    pub value: FieldValue,
}

impl CaptureField {
    pub fn new(name: &'static str, value: FieldValue) -> Self {
        Self { name, value }
    }
}

impl fmt::Display for CaptureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// The single summary line a probe prints.
///
/// `label`, when present, is fixed text printed before the fields (the cursor
/// probe's line starts with one).  Field order is whatever order the probe
/// pushed them in; each probe's capture type fixes that order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub fields: Vec<CaptureField>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labelled(label: &'static str) -> Self {
        Self {
            label: Some(label),
            fields: Vec::new(),
        }
    }

    /// Append a field (builder style).
    pub fn field(mut self, name: &'static str, value: FieldValue) -> Self {
        self.fields.push(CaptureField::new(name, value));
        self
    }

    /// Field names in print order.
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(label) = self.label {
            f.write_str(label)?;
            sep = " ";
        }
        for field in &self.fields {
            write!(f, "{sep}{field}")?;
            sep = " ";
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_address_is_all_zeros() {
        let s = Address::NULL.to_string();
        assert_eq!(s.len(), Address::WIDTH);
        assert!(s.chars().all(|c| c == '0'));
        assert!(Address::NULL.is_null());
    }

    #[test]
    fn address_is_upper_hex_zero_padded() {
        let s = Address(0x7ffa_bc01).to_string();
        assert_eq!(s.len(), Address::WIDTH);
        assert!(s.ends_with("7FFABC01"));
        assert!(s.trim_end_matches("7FFABC01").chars().all(|c| c == '0'));
    }

    #[test]
    fn signed_values_keep_their_sign() {
        assert_eq!(FieldValue::I16(-32767).to_string(), "-32767");
        assert_eq!(FieldValue::I16(i16::MIN).to_string(), "-32768");
        assert_eq!(FieldValue::I64(-1).to_string(), "-1");
    }

    #[test]
    fn unsigned_values_never_wrap_negative() {
        assert_eq!(FieldValue::U32(u32::MAX).to_string(), "4294967295");
        assert_eq!(FieldValue::U16(30).to_string(), "30");
    }

    #[test]
    fn report_line_without_label() {
        let r = Report::new()
            .field("freq", FieldValue::I64(10_000_000))
            .field("sys_h", FieldValue::U16(7));
        assert_eq!(r.to_string(), "freq=10000000 sys_h=7");
        assert_eq!(r.names(), ["freq", "sys_h"]);
    }

    #[test]
    fn report_line_with_label() {
        let r = Report::labelled("cursor after SetCursorPos:")
            .field("x", FieldValue::I32(500))
            .field("y", FieldValue::I32(-3));
        assert_eq!(r.to_string(), "cursor after SetCursorPos: x=500 y=-3");
    }

    #[test]
    fn empty_report_renders_empty() {
        assert_eq!(Report::new().to_string(), "");
        assert_eq!(Report::labelled("only").to_string(), "only");
    }

    #[test]
    fn get_finds_by_name() {
        let r = Report::new().field("tick", FieldValue::U32(5));
        assert_eq!(r.get("tick"), Some(FieldValue::U32(5)));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn field_serializes_with_kind_tag() {
        let f = CaptureField::new("GetKeyState", FieldValue::I16(-127));
        let json = serde_json::to_value(f).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "GetKeyState", "kind": "i16", "value": -127})
        );
    }

    #[test]
    fn report_label_is_omitted_when_absent() {
        let json = serde_json::to_value(Report::new()).expect("serialize");
        assert_eq!(json, serde_json::json!({"fields": []}));
    }
}
