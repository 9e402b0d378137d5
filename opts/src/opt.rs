//! Option values and their names.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::value::{Field, Value, for_each_scalar};

/// An option value passed to an extraction call.
///
/// The name selects the destination field, the value is what gets stored.
/// Use [`option!`](crate::option) to declare option types.
pub trait Opt {
    /// Name matched against the destination's declared option names.
    ///
    /// Defaults to the bare type name of the implementing type.
    fn name(&self) -> Cow<'_, str> {
        bare_type_name::<Self>()
    }

    /// The payload to store.
    fn value(&self) -> Value;
}

/// Returns the type name of `T` with every module path removed.
///
/// ```rust
/// use giztoy_opts::bare_type_name;
///
/// assert_eq!(bare_type_name::<String>(), "String");
/// assert_eq!(bare_type_name::<Vec<Option<String>>>(), "Vec<Option<String>>");
/// assert_eq!(bare_type_name::<(u8, &str)>(), "(u8, &str)");
/// ```
pub fn bare_type_name<T: ?Sized>() -> Cow<'static, str> {
    let full = std::any::type_name::<T>();
    if full.chars().all(|c| c.is_alphanumeric() || c == '_' || c == ':') {
        return Cow::Borrowed(full.rsplit("::").next().unwrap_or(full));
    }
    Cow::Owned(strip_paths(full))
}

fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    for c in full.chars() {
        out.push(c);
        if out.ends_with("::") {
            out.truncate(out.len() - 2);
            while out.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                out.pop();
            }
        }
    }
    out
}

/// Declares option types.
///
/// Each option is a single-field tuple struct whose name is its identifier,
/// so two options wrapping the same type stay distinct. The macro derives
/// `Clone` and adds `From<inner>`; other derives go in the attributes. The
/// inner type must be a [`Field`].
///
/// ```rust
/// giztoy_opts::option! {
///     /// Login name.
///     #[derive(Debug, PartialEq)]
///     pub struct WithUsername(pub String);
///     pub struct WithRetries(pub u32);
/// }
///
/// use giztoy_opts::Opt;
///
/// let opt = WithUsername::from("bob".to_string());
/// assert_eq!(opt.name(), "WithUsername");
/// assert_eq!(opt, WithUsername("bob".into()));
/// assert_eq!(WithRetries(3).value(), giztoy_opts::Value::U32(3));
/// ```
#[macro_export]
macro_rules! option {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($ivis:vis $inner:ty);
    )*) => {$(
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name($ivis $inner);

        impl $crate::Opt for $name {
            fn name(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(stringify!($name))
            }

            fn value(&self) -> $crate::Value {
                $crate::Field::into_value(::std::clone::Clone::clone(&self.0))
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    )*};
}

macro_rules! impl_scalar_opt {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Opt for $ty {
                fn value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }
        )*
    };
}

for_each_scalar!(impl_scalar_opt);

impl<T: Field + Clone> Opt for Option<T> {
    fn value(&self) -> Value {
        self.clone().into_value()
    }
}

impl<T: Field + Clone> Opt for Vec<T> {
    fn value(&self) -> Value {
        self.clone().into_value()
    }
}

macro_rules! impl_opaque_opt {
    ($($ty:ty, [$($bounds:tt)*]);* $(;)?) => {
        $(
            impl<$($bounds)*> Opt for $ty {
                fn value(&self) -> Value {
                    self.clone().into_value()
                }
            }
        )*
    };
}

impl_opaque_opt! {
    Duration, [];
    SystemTime, [];
    HashMap<K, V, S>, [K: Clone + 'static, V: Clone + 'static, S: Clone + 'static];
    BTreeMap<K, V>, [K: Clone + 'static, V: Clone + 'static];
    Arc<T>, [T: ?Sized + 'static];
}
