//! Functional options extracted into tagged struct fields.
//!
//! A function that takes options accepts `&[&dyn Opt]` and hands them to
//! [`extract`] or [`must_extract`] together with its own options record.
//! Each option is matched by name against the option names declared on the
//! record's fields:
//!
//! - the option's value is stored when its kind matches the field's kind
//! - it is appended when the field is a `Vec` of the option's kind
//! - anything else is a [`Error::TypeMismatch`]
//!
//! Option names default to the bare type name, so `WithUsername(String)` is
//! matched by `"WithUsername"`, not by `"String"`.
//!
//! # Example
//!
//! ```rust
//! use giztoy_opts::Opt;
//!
//! giztoy_opts::option! {
//!     pub struct WithUsername(pub String);
//!     pub struct WithTopic(pub String);
//!     pub struct WithKeepAlive(pub u16);
//! }
//!
//! giztoy_opts::options! {
//!     #[derive(Debug, Default)]
//!     pub struct ConnectOptions {
//!         pub username: String => "WithUsername",
//!         pub topics: Vec<String> => "WithTopic",
//!         pub keep_alive: u16 => "WithKeepAlive",
//!     }
//! }
//!
//! fn connect(options: &[&dyn Opt]) -> Result<ConnectOptions, giztoy_opts::Error> {
//!     let mut opts = ConnectOptions { keep_alive: 60, ..Default::default() };
//!     giztoy_opts::must_extract(&mut opts, options)?;
//!     Ok(opts)
//! }
//!
//! let opts = connect(&[
//!     &WithUsername("gear-001".into()),
//!     &WithTopic("device/gear-001/state".into()),
//!     &WithTopic("device/gear-001/events".into()),
//! ])
//! .unwrap();
//!
//! assert_eq!(opts.username, "gear-001");
//! assert_eq!(opts.topics, vec!["device/gear-001/state", "device/gear-001/events"]);
//! assert_eq!(opts.keep_alive, 60);
//! ```

mod error;
mod extract;
mod kind;
mod opt;
mod record;
mod value;

pub use error::{Error, Result};
pub use extract::{Extractor, Mode, extract, must_extract};
pub use kind::Kind;
pub use opt::{Opt, bare_type_name};
pub use record::{Dest, FieldRef};
pub use value::{Field, Opaque, Slot, Value};
