//! The extraction pass.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::opt::Opt;
use crate::record::{Dest, FieldRef};
use crate::value::{Slot, Value};

/// How an extraction treats options that no field declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Skip unknown options.
    #[default]
    Lenient,
    /// Fail with [`Error::UnknownOption`] on the first unknown option.
    Strict,
}

/// Extracts options into destination records under a fixed [`Mode`].
///
/// ```rust
/// use giztoy_opts::{Extractor, Mode};
///
/// giztoy_opts::options! {
///     #[derive(Default)]
///     struct ServerOptions {
///         port: u16 => "WithPort",
///     }
/// }
///
/// giztoy_opts::option! {
///     struct WithPort(u16);
///     struct WithTimeout(u64);
/// }
///
/// let mut opts = ServerOptions::default();
/// let lenient = Extractor::default();
/// lenient.extract(&mut opts, &[&WithPort(8080), &WithTimeout(30)]).unwrap();
/// assert_eq!(opts.port, 8080);
///
/// let strict = Extractor::new(Mode::Strict);
/// let err = strict.extract(&mut opts, &[&WithTimeout(30)]).unwrap_err();
/// assert_eq!(err.to_string(), "invalid option WithTimeout");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    mode: Mode,
}

impl Extractor {
    /// Creates an extractor with the given mode.
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Creates an extractor that skips unknown options.
    pub fn lenient() -> Self {
        Self::new(Mode::Lenient)
    }

    /// Creates an extractor that rejects unknown options.
    pub fn strict() -> Self {
        Self::new(Mode::Strict)
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Applies `options` to `dest` in order.
    ///
    /// Each option overwrites the field declaring its name when the kinds
    /// match, or is appended when the field is a sequence of the option's
    /// kind. Later options win over earlier ones for the same scalar field.
    ///
    /// # Errors
    ///
    /// Stops at the first error. Options applied before it stay applied.
    pub fn extract<D: Dest + ?Sized>(&self, dest: &mut D, options: &[&dyn Opt]) -> Result<()> {
        let mut fields = dest.fields().ok_or(Error::NotAStruct)?;
        let index = index_fields(&fields)?;

        for opt in options {
            let name = opt.name();
            let Some(&i) = index.get(&*name) else {
                if self.mode == Mode::Strict {
                    return Err(Error::UnknownOption(name.into_owned()));
                }
                debug!(option = %name, "opts: skipping unknown option");
                continue;
            };

            let field = &mut fields[i];
            let fit = fit(&mut *field.slot, &name, &opt.value())?;
            trace!(option = %name, field = field.ident, ?fit, "opts: applied option");
        }
        Ok(())
    }
}

/// Applies options to `dest`, skipping options no field declares.
///
/// # Errors
///
/// See [`Error`]; never returns [`Error::UnknownOption`].
pub fn extract<D: Dest + ?Sized>(dest: &mut D, options: &[&dyn Opt]) -> Result<()> {
    Extractor::lenient().extract(dest, options)
}

/// Applies options to `dest`, failing on options no field declares.
///
/// # Errors
///
/// See [`Error`].
pub fn must_extract<D: Dest + ?Sized>(dest: &mut D, options: &[&dyn Opt]) -> Result<()> {
    Extractor::strict().extract(dest, options)
}

/// Maps option names to field positions, rejecting repeated names.
fn index_fields(fields: &[FieldRef<'_>]) -> Result<HashMap<&'static str, usize>> {
    let mut index = HashMap::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        if field.optname.is_empty() {
            continue;
        }
        if index.insert(field.optname, i).is_some() {
            return Err(Error::DuplicateOptionName(field.optname.to_string()));
        }
    }
    Ok(index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    Exact,
    Append,
}

/// Stores `value` into `slot`, exactly or as a new sequence element.
fn fit(slot: &mut dyn Slot, name: &str, value: &Value) -> Result<Fit> {
    let field = slot.kind();
    let offered = value.kind();

    if field == offered && slot.assign(value) {
        return Ok(Fit::Exact);
    }
    if field == Kind::Slice && slot.elem_kind() == Some(offered) && slot.append(value) {
        return Ok(Fit::Append);
    }

    Err(Error::TypeMismatch {
        name: name.to_string(),
        field,
        offered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_prefers_exact_over_append() {
        let mut lists: Vec<Vec<i32>> = vec![vec![1]];
        let value = Value::Slice {
            elem: Kind::I32,
            items: vec![Value::I32(2)],
        };
        assert_eq!(fit(&mut lists, "WithLists", &value), Ok(Fit::Append));
        assert_eq!(lists, vec![vec![1], vec![2]]);

        let value = Value::Slice {
            elem: Kind::Slice,
            items: vec![],
        };
        assert_eq!(fit(&mut lists, "WithLists", &value), Ok(Fit::Exact));
        assert!(lists.is_empty());
    }

    #[test]
    fn test_fit_mismatch_leaves_slot() {
        let mut port = 80i64;
        let err = fit(&mut port, "WithPort", &Value::String("80".into())).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                name: "WithPort".into(),
                field: Kind::I64,
                offered: Kind::String,
            }
        );
        assert_eq!(port, 80);
    }

    #[test]
    fn test_index_fields_skips_untagged() {
        let (mut a, mut b, mut c) = (0u8, 0u8, 0u8);
        let fields = vec![
            FieldRef::new("a", "", &mut a),
            FieldRef::new("b", "WithB", &mut b),
            FieldRef::new("c", "", &mut c),
        ];
        let index = index_fields(&fields).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("WithB"), Some(&1));
    }
}
