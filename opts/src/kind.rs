//! Underlying storage kinds.

use std::fmt;

/// The underlying storage kind of a field or option value.
///
/// Two values fit each other exactly when their kinds are equal, regardless
/// of the named types wrapping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    String,
    /// Nullable pointer-like value, `Option<T>`.
    Ptr,
    /// Ordered sequence, `Vec<T>`.
    Slice,
    /// Key-value map, `HashMap` or `BTreeMap`.
    Map,
    /// Any other concrete type, stored opaquely.
    Struct,
}

impl Kind {
    /// Returns the lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Ptr => "ptr",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Struct => "struct",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
