//! Kind-tagged values and the field types that hold them.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::kind::Kind;

/// A dynamically-kinded option payload.
///
/// Options hand their payload to the extractor as a `Value`; the extractor
/// compares kinds and converts it back into the destination field's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Ptr {
        elem: Kind,
        value: Option<Box<Value>>,
    },
    Slice {
        elem: Kind,
        items: Vec<Value>,
    },
    /// A `map`, `struct` or shared-pointer payload of any concrete type.
    Opaque(Opaque),
}

impl Value {
    /// Returns the underlying kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Char(_) => Kind::Char,
            Value::String(_) => Kind::String,
            Value::Ptr { .. } => Kind::Ptr,
            Value::Slice { .. } => Kind::Slice,
            Value::Opaque(o) => o.kind(),
        }
    }
}

/// A type-erased payload.
///
/// Converting back succeeds only into the exact concrete type that was
/// stored. Clones share the payload.
#[derive(Clone)]
pub struct Opaque {
    kind: Kind,
    type_name: &'static str,
    value: Arc<dyn Any>,
}

impl Opaque {
    /// Wraps `value` under the given kind.
    pub fn new<T: Any>(kind: Kind, value: T) -> Self {
        Self {
            kind,
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Returns the kind the payload was stored under.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the full type name of the payload.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the payload if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Payloads are equal when they share the same allocation.
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && std::ptr::addr_eq(Arc::as_ptr(&self.value), Arc::as_ptr(&other.value))
    }
}

/// A type that can be stored in a tagged destination field.
///
/// Implemented for `bool`, the integer and float primitives, `char`,
/// `String`, recursively for `Option<T>` and `Vec<T>`, and opaquely for
/// `Duration`, `SystemTime`, `HashMap`, `BTreeMap`, `Arc<T>` and `Rc<T>`.
/// Other types opt in with [`field!`](crate::field).
pub trait Field: Sized {
    /// Underlying kind of the type.
    const KIND: Kind;

    /// Kind of the contained element, for `Option<T>` and `Vec<T>`.
    fn elem_kind() -> Option<Kind> {
        None
    }

    /// Converts into a kind-tagged value.
    fn into_value(self) -> Value;

    /// Converts a value back into this type.
    ///
    /// Returns `None` when the kind, or any nested element kind, differs.
    fn from_value(value: &Value) -> Option<Self>;

    /// Appends `value` as a new element. Only sequences accept this.
    fn push_value(&mut self, _value: &Value) -> bool {
        false
    }
}

macro_rules! for_each_scalar {
    ($m:ident) => {
        $m! {
            bool => Bool,
            i8 => I8,
            i16 => I16,
            i32 => I32,
            i64 => I64,
            isize => Isize,
            u8 => U8,
            u16 => U16,
            u32 => U32,
            u64 => U64,
            usize => Usize,
            f32 => F32,
            f64 => F64,
            char => Char,
            String => String,
        }
    };
}

pub(crate) use for_each_scalar;

macro_rules! impl_scalar_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Field for $ty {
                const KIND: Kind = Kind::$variant;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

for_each_scalar!(impl_scalar_field);

impl<T: Field> Field for Option<T> {
    const KIND: Kind = Kind::Ptr;

    fn elem_kind() -> Option<Kind> {
        Some(T::KIND)
    }

    fn into_value(self) -> Value {
        Value::Ptr {
            elem: T::KIND,
            value: self.map(|v| Box::new(v.into_value())),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ptr { elem, value } if *elem == T::KIND => match value {
                Some(inner) => T::from_value(inner).map(Some),
                None => Some(None),
            },
            _ => None,
        }
    }
}

impl<T: Field> Field for Vec<T> {
    const KIND: Kind = Kind::Slice;

    fn elem_kind() -> Option<Kind> {
        Some(T::KIND)
    }

    fn into_value(self) -> Value {
        Value::Slice {
            elem: T::KIND,
            items: self.into_iter().map(Field::into_value).collect(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Slice { elem, items } if *elem == T::KIND => {
                items.iter().map(T::from_value).collect()
            }
            _ => None,
        }
    }

    fn push_value(&mut self, value: &Value) -> bool {
        match T::from_value(value) {
            Some(item) => {
                self.push(item);
                true
            }
            None => false,
        }
    }
}

/// Implements [`Field`] for types stored as [`Value::Opaque`].
///
/// Takes the kind (`Struct`, `Map` or `Ptr`) followed by the types. The
/// types must be `Clone + 'static`.
///
/// ```rust
/// use giztoy_opts::{Field, Kind};
///
/// #[derive(Clone, Debug, PartialEq)]
/// pub struct Endpoint {
///     pub host: String,
///     pub port: u16,
/// }
///
/// giztoy_opts::field!(Struct: Endpoint);
///
/// let value = Endpoint { host: "localhost".into(), port: 1883 }.into_value();
/// assert_eq!(value.kind(), Kind::Struct);
/// assert_eq!(Endpoint::from_value(&value).map(|e| e.port), Some(1883));
/// assert_eq!(String::from_value(&value), None);
/// ```
#[macro_export]
macro_rules! field {
    ($kind:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Field for $ty {
                const KIND: $crate::Kind = $crate::Kind::$kind;

                fn into_value(self) -> $crate::Value {
                    $crate::Value::Opaque($crate::Opaque::new($crate::Kind::$kind, self))
                }

                fn from_value(value: &$crate::Value) -> ::std::option::Option<Self> {
                    match value {
                        $crate::Value::Opaque(o) if o.kind() == $crate::Kind::$kind => {
                            o.downcast_ref::<Self>().cloned()
                        }
                        _ => ::std::option::Option::None,
                    }
                }
            }
        )+
    };
}

crate::field!(Struct: Duration, SystemTime);

macro_rules! impl_opaque_generic {
    ($kind:ident: $ty:ty, [$($bounds:tt)*]) => {
        impl<$($bounds)*> Field for $ty {
            const KIND: Kind = Kind::$kind;

            fn into_value(self) -> Value {
                Value::Opaque(Opaque::new(Kind::$kind, self))
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Opaque(o) if o.kind() == Kind::$kind => o.downcast_ref::<Self>().cloned(),
                    _ => None,
                }
            }
        }
    };
}

impl_opaque_generic!(
    Map: HashMap<K, V, S>,
    [K: Clone + 'static, V: Clone + 'static, S: Clone + 'static]
);
impl_opaque_generic!(Map: BTreeMap<K, V>, [K: Clone + 'static, V: Clone + 'static]);
impl_opaque_generic!(Ptr: Arc<T>, [T: ?Sized + 'static]);
impl_opaque_generic!(Ptr: Rc<T>, [T: ?Sized + 'static]);

/// Object-safe mutable view of a destination field.
///
/// The extractor only ever touches fields through this trait. Every
/// [`Field`] type is a `Slot`.
pub trait Slot {
    /// Declared kind of the field.
    fn kind(&self) -> Kind;

    /// Element kind when the field is a `ptr` or `slice`.
    fn elem_kind(&self) -> Option<Kind>;

    /// Overwrites the field with `value`. Returns false, leaving the field
    /// untouched, when `value` does not convert to the field's type.
    fn assign(&mut self, value: &Value) -> bool;

    /// Appends `value` to a sequence field. Returns false, leaving the field
    /// untouched, when the field is not a sequence or the element does not
    /// convert.
    fn append(&mut self, value: &Value) -> bool;
}

impl<T: Field> Slot for T {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn elem_kind(&self) -> Option<Kind> {
        T::elem_kind()
    }

    fn assign(&mut self, value: &Value) -> bool {
        match T::from_value(value) {
            Some(v) => {
                *self = v;
                true
            }
            None => false,
        }
    }

    fn append(&mut self, value: &Value) -> bool {
        self.push_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_kinds_must_match() {
        let value = Some(42i64).into_value();
        assert_eq!(value.kind(), Kind::Ptr);
        assert_eq!(Option::<i64>::from_value(&value), Some(Some(42)));
        assert_eq!(Option::<String>::from_value(&value), None);

        let value = Vec::<String>::new().into_value();
        assert_eq!(Vec::<String>::from_value(&value), Some(vec![]));
        assert_eq!(Vec::<i64>::from_value(&value), None);
    }

    #[test]
    fn test_slot_append_keeps_field_on_mismatch() {
        let mut items = vec!["a".to_string()];
        let slot: &mut dyn Slot = &mut items;

        assert_eq!(slot.kind(), Kind::Slice);
        assert_eq!(slot.elem_kind(), Some(Kind::String));
        assert!(slot.append(&Value::String("b".into())));
        assert!(!slot.append(&Value::I64(1)));
        assert!(!slot.assign(&Value::String("c".into())));
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_opaque_payloads_convert_to_exact_type_only() {
        let mut headers = HashMap::from([("a".to_string(), "1".to_string())]);
        let value = HashMap::from([("b".to_string(), "2".to_string())]).into_value();
        assert_eq!(value.kind(), Kind::Map);
        assert!(headers.assign(&value));
        assert_eq!(headers.get("b").map(String::as_str), Some("2"));
        assert!(!headers.contains_key("a"));

        let mut ids: HashMap<String, u32> = HashMap::new();
        assert_eq!(ids.kind(), Kind::Map);
        assert!(!ids.assign(&value));

        let mut timeout = Duration::from_secs(1);
        assert!(!timeout.assign(&value));
        assert!(timeout.assign(&Duration::from_secs(30).into_value()));
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_arc_payload_is_shared() {
        let shared = Arc::new(vec![1u8, 2, 3]);
        let value = shared.clone().into_value();
        assert_eq!(value.kind(), Kind::Ptr);
        assert_eq!(value, value.clone());

        let restored = Arc::<Vec<u8>>::from_value(&value).unwrap();
        assert!(Arc::ptr_eq(&shared, &restored));
        assert_eq!(Option::<Vec<u8>>::from_value(&value), None);
    }

    #[test]
    fn test_scalar_assign() {
        let mut port = 0u16;
        assert!(port.assign(&Value::U16(8080)));
        assert!(!port.assign(&Value::U32(9090)));
        assert!(!port.append(&Value::U16(1)));
        assert_eq!(port, 8080);
    }
}
