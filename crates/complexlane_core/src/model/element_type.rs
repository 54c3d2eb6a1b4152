//! Element type descriptors for host array handles.
//!
//! # Responsibility
//! - Describe the element type carried by a host array handle.
//! - Parse numpy-style dtype names and type strings into descriptors.
//!
//! # Invariants
//! - Equality with complex64 is structural (kind + itemsize + native order),
//!   never by descriptor identity.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static TYPE_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<order>[<>=|])?(?P<kind>[biufcV])(?P<size>[1-9][0-9]*)$")
        .expect("valid type string regex")
});

/// Element kind, mirroring the numpy kind characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    /// Raw bytes, records or anything the kernels cannot interpret.
    Other,
}

impl TypeKind {
    /// Type-string kind character (`b'c'` for complex).
    pub fn code(self) -> u8 {
        match self {
            Self::Bool => b'b',
            Self::Int => b'i',
            Self::Uint => b'u',
            Self::Float => b'f',
            Self::Complex => b'c',
            Self::Other => b'V',
        }
    }

    /// Parses a type-string kind character.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'b' => Some(Self::Bool),
            b'i' => Some(Self::Int),
            b'u' => Some(Self::Uint),
            b'f' => Some(Self::Float),
            b'c' => Some(Self::Complex),
            b'V' => Some(Self::Other),
            _ => None,
        }
    }
}

/// Byte order marker of a multi-byte element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    Little,
    Big,
    Native,
    /// Single-byte elements have no byte order.
    NotApplicable,
}

impl ByteOrder {
    /// Type-string order character.
    pub fn code(self) -> u8 {
        match self {
            Self::Little => b'<',
            Self::Big => b'>',
            Self::Native => b'=',
            Self::NotApplicable => b'|',
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'<' => Some(Self::Little),
            b'>' => Some(Self::Big),
            b'=' => Some(Self::Native),
            b'|' => Some(Self::NotApplicable),
            _ => None,
        }
    }

    /// Returns whether lanes stored in this order can be read directly on
    /// the running host.
    pub fn is_native(self) -> bool {
        match self {
            Self::Native | Self::NotApplicable => true,
            Self::Little => cfg!(target_endian = "little"),
            Self::Big => cfg!(target_endian = "big"),
        }
    }
}

/// Element type descriptor carried by an array handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementType {
    pub kind: TypeKind,
    /// Size of one element in bytes.
    pub itemsize: usize,
    pub byte_order: ByteOrder,
}

impl ElementType {
    /// Interleaved single-precision complex: two adjacent `f32` lanes.
    pub const COMPLEX64: Self = Self::new(TypeKind::Complex, 8, ByteOrder::Native);
    pub const COMPLEX128: Self = Self::new(TypeKind::Complex, 16, ByteOrder::Native);
    pub const FLOAT32: Self = Self::new(TypeKind::Float, 4, ByteOrder::Native);
    pub const FLOAT64: Self = Self::new(TypeKind::Float, 8, ByteOrder::Native);

    pub const fn new(kind: TypeKind, itemsize: usize, byte_order: ByteOrder) -> Self {
        Self {
            kind,
            itemsize,
            byte_order,
        }
    }

    /// Returns whether this descriptor denotes complex64 readable in place.
    pub fn is_complex64(&self) -> bool {
        self.kind == TypeKind::Complex && self.itemsize == 8 && self.byte_order.is_native()
    }

    /// Parses a dtype name (`complex64`), a single-character code (`F`) or a
    /// type string (`<c8`).
    ///
    /// # Errors
    /// - `Empty` for blank input.
    /// - `Unsupported` for anything else that does not match a known form.
    pub fn parse(value: &str) -> Result<Self, ElementTypeParseError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(ElementTypeParseError::Empty);
        }

        if let Some(found) = parse_name(normalized).or_else(|| parse_char_code(normalized)) {
            return Ok(found);
        }

        let captures = TYPE_STRING_RE
            .captures(normalized)
            .ok_or_else(|| ElementTypeParseError::Unsupported(normalized.to_string()))?;
        let kind = TypeKind::from_code(captures["kind"].as_bytes()[0])
            .ok_or_else(|| ElementTypeParseError::Unsupported(normalized.to_string()))?;
        let itemsize = captures["size"]
            .parse::<usize>()
            .map_err(|_| ElementTypeParseError::Unsupported(normalized.to_string()))?;
        let byte_order = match captures.name("order") {
            Some(order) => ByteOrder::from_code(order.as_str().as_bytes()[0])
                .ok_or_else(|| ElementTypeParseError::Unsupported(normalized.to_string()))?,
            None => default_order(itemsize),
        };

        Ok(Self::new(kind, itemsize, byte_order))
    }

    /// Canonical type string, e.g. `=c8`.
    pub fn type_string(&self) -> String {
        format!(
            "{}{}{}",
            char::from(self.byte_order.code()),
            char::from(self.kind.code()),
            self.itemsize
        )
    }

    fn name(&self) -> Option<&'static str> {
        if !self.byte_order.is_native() {
            return None;
        }
        let name = match (self.kind, self.itemsize) {
            (TypeKind::Bool, 1) => "bool",
            (TypeKind::Int, 1) => "int8",
            (TypeKind::Int, 2) => "int16",
            (TypeKind::Int, 4) => "int32",
            (TypeKind::Int, 8) => "int64",
            (TypeKind::Uint, 1) => "uint8",
            (TypeKind::Uint, 2) => "uint16",
            (TypeKind::Uint, 4) => "uint32",
            (TypeKind::Uint, 8) => "uint64",
            (TypeKind::Float, 2) => "float16",
            (TypeKind::Float, 4) => "float32",
            (TypeKind::Float, 8) => "float64",
            (TypeKind::Complex, 8) => "complex64",
            (TypeKind::Complex, 16) => "complex128",
            _ => return None,
        };
        Some(name)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.type_string()),
        }
    }
}

fn default_order(itemsize: usize) -> ByteOrder {
    if itemsize == 1 {
        ByteOrder::NotApplicable
    } else {
        ByteOrder::Native
    }
}

fn parse_name(value: &str) -> Option<ElementType> {
    let (kind, itemsize) = match value {
        "bool" => (TypeKind::Bool, 1),
        "int8" => (TypeKind::Int, 1),
        "int16" => (TypeKind::Int, 2),
        "int32" => (TypeKind::Int, 4),
        "int64" => (TypeKind::Int, 8),
        "uint8" => (TypeKind::Uint, 1),
        "uint16" => (TypeKind::Uint, 2),
        "uint32" => (TypeKind::Uint, 4),
        "uint64" => (TypeKind::Uint, 8),
        "float16" => (TypeKind::Float, 2),
        "float32" => (TypeKind::Float, 4),
        "float64" => (TypeKind::Float, 8),
        "complex64" => (TypeKind::Complex, 8),
        "complex128" => (TypeKind::Complex, 16),
        _ => return None,
    };
    Some(ElementType::new(kind, itemsize, default_order(itemsize)))
}

// Single-character codes are case-sensitive: `b` is int8, `B` is uint8.
fn parse_char_code(value: &str) -> Option<ElementType> {
    let (kind, itemsize) = match value {
        "?" => (TypeKind::Bool, 1),
        "b" => (TypeKind::Int, 1),
        "B" => (TypeKind::Uint, 1),
        "h" => (TypeKind::Int, 2),
        "H" => (TypeKind::Uint, 2),
        "i" => (TypeKind::Int, 4),
        "I" => (TypeKind::Uint, 4),
        "q" => (TypeKind::Int, 8),
        "Q" => (TypeKind::Uint, 8),
        "e" => (TypeKind::Float, 2),
        "f" => (TypeKind::Float, 4),
        "d" => (TypeKind::Float, 8),
        "F" => (TypeKind::Complex, 8),
        "D" => (TypeKind::Complex, 16),
        _ => return None,
    };
    Some(ElementType::new(kind, itemsize, default_order(itemsize)))
}

/// Element type parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementTypeParseError {
    Empty,
    Unsupported(String),
}

impl Display for ElementTypeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "element type must not be empty"),
            Self::Unsupported(value) => write!(f, "element type is unsupported: `{value}`"),
        }
    }
}

impl Error for ElementTypeParseError {}

#[cfg(test)]
mod tests {
    use super::{ByteOrder, ElementType, ElementTypeParseError, TypeKind};

    #[test]
    fn differently_spelled_complex64_descriptors_are_equivalent() {
        for spelling in ["complex64", "F", "c8", "=c8", " complex64 "] {
            let parsed = ElementType::parse(spelling).expect("complex64 spelling should parse");
            assert!(parsed.is_complex64(), "`{spelling}` should be complex64");
        }

        let native = if cfg!(target_endian = "little") {
            "<c8"
        } else {
            ">c8"
        };
        assert!(ElementType::parse(native)
            .expect("native order should parse")
            .is_complex64());
    }

    #[test]
    fn foreign_byte_order_is_not_complex64() {
        let foreign = if cfg!(target_endian = "little") {
            ">c8"
        } else {
            "<c8"
        };
        let parsed = ElementType::parse(foreign).expect("foreign order should parse");
        assert_eq!(parsed.kind, TypeKind::Complex);
        assert!(!parsed.is_complex64());
    }

    #[test]
    fn other_types_are_not_complex64() {
        for spelling in ["complex128", "float32", "float64", "f8", "|u1", "D"] {
            let parsed = ElementType::parse(spelling).expect("known dtype should parse");
            assert!(!parsed.is_complex64(), "`{spelling}` must not be complex64");
        }
    }

    #[test]
    fn single_byte_types_default_to_no_byte_order() {
        let parsed = ElementType::parse("u1").expect("u1 should parse");
        assert_eq!(parsed.byte_order, ByteOrder::NotApplicable);
        assert_eq!(parsed.type_string(), "|u1");
        assert_eq!(parsed.to_string(), "uint8");
    }

    #[test]
    fn display_prefers_dtype_names() {
        assert_eq!(ElementType::COMPLEX64.to_string(), "complex64");
        assert_eq!(ElementType::FLOAT32.to_string(), "float32");
        let odd = ElementType::new(TypeKind::Other, 12, ByteOrder::NotApplicable);
        assert_eq!(odd.to_string(), "|V12");
    }

    #[test]
    fn rejects_empty_and_unknown_values() {
        assert_eq!(
            ElementType::parse("  ").expect_err("blank must fail"),
            ElementTypeParseError::Empty
        );
        assert_eq!(
            ElementType::parse("complex32").expect_err("unknown name must fail"),
            ElementTypeParseError::Unsupported("complex32".to_string())
        );
        assert_eq!(
            ElementType::parse("<c0").expect_err("zero itemsize must fail"),
            ElementTypeParseError::Unsupported("<c0".to_string())
        );
    }

    #[test]
    fn kind_and_order_codes_round_trip() {
        for kind in [
            TypeKind::Bool,
            TypeKind::Int,
            TypeKind::Uint,
            TypeKind::Float,
            TypeKind::Complex,
            TypeKind::Other,
        ] {
            assert_eq!(TypeKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ByteOrder::from_code(b'!'), None);
    }
}
