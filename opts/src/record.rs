//! Destination records and their tagged fields.

use crate::value::{Field, Slot, for_each_scalar};

/// One declared field of a destination record.
pub struct FieldRef<'a> {
    pub(crate) ident: &'static str,
    pub(crate) optname: &'static str,
    pub(crate) slot: &'a mut dyn Slot,
}

impl<'a> FieldRef<'a> {
    /// Creates a field reference.
    ///
    /// `ident` is the Rust field name, used in diagnostics only. An empty
    /// `optname` marks the field as untagged; the extractor ignores it.
    pub fn new(ident: &'static str, optname: &'static str, slot: &'a mut dyn Slot) -> Self {
        Self {
            ident,
            optname,
            slot,
        }
    }

    /// Returns the Rust field name.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Returns the declared option name, empty when untagged.
    pub fn optname(&self) -> &'static str {
        self.optname
    }
}

impl std::fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRef")
            .field("ident", &self.ident)
            .field("optname", &self.optname)
            .field("kind", &self.slot.kind())
            .finish()
    }
}

/// A value that options can be extracted into.
///
/// Records return their fields in declaration order. Everything else keeps
/// the default and is rejected with [`Error::NotAStruct`](crate::Error::NotAStruct).
/// `Box<D>` and `&mut D` forward to `D`.
///
/// Records are normally declared with [`options!`](crate::options); a
/// hand-written implementation looks like this:
///
/// ```rust
/// use giztoy_opts::{Dest, FieldRef};
///
/// #[derive(Default)]
/// struct DialOptions {
///     host: String,
///     retries: u32,
/// }
///
/// impl Dest for DialOptions {
///     fn fields(&mut self) -> Option<Vec<FieldRef<'_>>> {
///         Some(vec![
///             FieldRef::new("host", "WithHost", &mut self.host),
///             FieldRef::new("retries", "WithRetries", &mut self.retries),
///         ])
///     }
/// }
/// ```
pub trait Dest {
    /// Returns the record's fields, or `None` if this is not a record.
    fn fields(&mut self) -> Option<Vec<FieldRef<'_>>> {
        None
    }
}

macro_rules! impl_scalar_dest {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl Dest for $ty {})*
    };
}

for_each_scalar!(impl_scalar_dest);

impl<T: Field> Dest for Option<T> {}

impl<T: Field> Dest for Vec<T> {}

impl<D: Dest + ?Sized> Dest for Box<D> {
    fn fields(&mut self) -> Option<Vec<FieldRef<'_>>> {
        (**self).fields()
    }
}

impl<D: Dest + ?Sized> Dest for &mut D {
    fn fields(&mut self) -> Option<Vec<FieldRef<'_>>> {
        (**self).fields()
    }
}

/// Declares destination records.
///
/// Each field may be followed by `=> "OptName"` to accept options of that
/// name. Tagged fields must hold a [`Field`] type; untagged fields can hold
/// anything and are never touched.
///
/// ```rust
/// giztoy_opts::options! {
///     #[derive(Debug, Default)]
///     pub struct ClientOptions {
///         /// Server address.
///         pub addr: String => "WithAddr",
///         pub tags: Vec<String> => "WithTag",
///         pub verbose: bool => "WithVerbose",
///         pub created_by: &'static str,
///     }
/// }
///
/// giztoy_opts::option! {
///     pub struct WithTag(String);
/// }
///
/// let mut opts = ClientOptions::default();
/// giztoy_opts::extract(&mut opts, &[&WithTag("a".into()), &WithTag("b".into())]).unwrap();
/// assert_eq!(opts.tags, vec!["a", "b"]);
/// assert_eq!(opts.addr, "");
/// ```
#[macro_export]
macro_rules! options {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $optname:literal)?
            ),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Dest for $name {
            #[allow(unused_mut)]
            fn fields(&mut self) -> ::std::option::Option<::std::vec::Vec<$crate::FieldRef<'_>>> {
                let mut fields: ::std::vec::Vec<$crate::FieldRef<'_>> = ::std::vec::Vec::new();
                $(
                    $crate::__push_field!(fields, stringify!($field), &mut self.$field $(, $optname)?);
                )*
                ::std::option::Option::Some(fields)
            }
        }
    )*};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __push_field {
    ($fields:ident, $ident:expr, $slot:expr) => {};
    ($fields:ident, $ident:expr, $slot:expr, $optname:literal) => {
        $fields.push($crate::FieldRef::new($ident, $optname, $slot));
    };
}
