//! Generate a JavaScript function that rebuilds a form's `FormData`.
//!
//! Feed a [`FormDescriptor`] (or a JSON value shaped like one) and a
//! [`GenerationOptions`] bundle; get back the script text. The emitted function
//! takes either one parameter per top-level field or a single `options` object
//! whose nested properties mirror bracketed field names such as
//! `address[city]`.
pub mod args;
pub mod cli;
pub mod codegen;
pub mod document;
pub mod error;
pub mod escape;
pub mod form;
pub mod jq_exec;
pub mod line;
pub mod options;
pub mod path;
pub mod path_de;

pub use codegen::{generate, generate_from_value, Codegen};
pub use document::for_every_form;
pub use error::InvalidInputError;
pub use form::{ElementKind, FormDescriptor, FormElementDescriptor};
pub use options::GenerationOptions;
