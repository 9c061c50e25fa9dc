//! Schema records produced by the parser.
//!
//! A `.comp` file holds any number of [`Comp`] blocks, each with an ordered
//! list of [`CompField`]s. Field order is significant and preserved.

use std::fmt;

use serde::{Serialize, Serializer};

/// A component record: `comp Name "description" { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comp {
    pub name: String,
    pub descr: String,
    pub fields: Vec<CompField>,
}

/// A single field: `Type name "description";`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub cpp_type: String,
    pub descr: String,
}

impl CompField {
    pub fn new(ty: FieldType, name: impl Into<String>, descr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpp_type: ty.cpp_type(),
            ty,
            descr: descr.into(),
        }
    }
}

/// The closed vocabulary of field datatypes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
    Str4,
    Str8,
    Str16,
    Str32,
    /// `Res<Kind>`: a reference to a resource of the named kind.
    Res(String),
}

impl FieldType {
    /// Every non-parameterized type, in the order they are tried by the lexer.
    pub const PLAIN: [FieldType; 21] = [
        FieldType::I8,
        FieldType::I16,
        FieldType::I32,
        FieldType::I64,
        FieldType::U8,
        FieldType::U16,
        FieldType::U32,
        FieldType::U64,
        FieldType::F32,
        FieldType::F64,
        FieldType::Bool,
        FieldType::Char,
        FieldType::Vec2,
        FieldType::Vec3,
        FieldType::Vec4,
        FieldType::Mat3,
        FieldType::Mat4,
        FieldType::Str4,
        FieldType::Str8,
        FieldType::Str16,
        FieldType::Str32,
    ];

    /// Spelling used in `.comp` sources, e.g. `F32` or `Res<Mesh>`.
    pub fn spelling(&self) -> String {
        match self {
            FieldType::Res(kind) => format!("Res<{kind}>"),
            other => other.keyword().to_string(),
        }
    }

    /// Spelling used in generated C++ code.
    pub fn cpp_type(&self) -> String {
        match self {
            FieldType::Res(kind) => format!("ResourceRef<{kind}>"),
            other => other.keyword().to_string(),
        }
    }

    /// Entry of the C++ `CompField::Type` reflection enum, if the type has one.
    ///
    /// Fixed-capacity strings and resource references are not reflected.
    pub fn meta_type(&self) -> Option<&'static str> {
        match self {
            FieldType::Str4
            | FieldType::Str8
            | FieldType::Str16
            | FieldType::Str32
            | FieldType::Res(_) => None,
            other => Some(other.keyword()),
        }
    }

    /// Human-readable list of all accepted spellings, for diagnostics.
    pub fn vocabulary() -> String {
        let mut names: Vec<&str> = FieldType::PLAIN.iter().map(FieldType::keyword).collect();
        names.push("Res<ResourceKind>");
        names.join(", ")
    }

    fn keyword(&self) -> &'static str {
        match self {
            FieldType::I8 => "I8",
            FieldType::I16 => "I16",
            FieldType::I32 => "I32",
            FieldType::I64 => "I64",
            FieldType::U8 => "U8",
            FieldType::U16 => "U16",
            FieldType::U32 => "U32",
            FieldType::U64 => "U64",
            FieldType::F32 => "F32",
            FieldType::F64 => "F64",
            FieldType::Bool => "Bool",
            FieldType::Char => "Char",
            FieldType::Vec2 => "Vec2",
            FieldType::Vec3 => "Vec3",
            FieldType::Vec4 => "Vec4",
            FieldType::Mat3 => "Mat3",
            FieldType::Mat4 => "Mat4",
            FieldType::Str4 => "Str4",
            FieldType::Str8 => "Str8",
            FieldType::Str16 => "Str16",
            FieldType::Str32 => "Str32",
            FieldType::Res(_) => "Res",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.spelling())
    }
}
