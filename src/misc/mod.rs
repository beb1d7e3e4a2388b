//! Primitive helpers consumed by the schema engine
//!
//! Everything here is a pure function or a constant table:
//! - Structural equality and cloning over JSON values
//! - Big-integer string classification and comparison
//! - Identifier and directive-name classifiers
//! - Field-name escaping for `$`-prefixed property names
//! - The CSS color-name table

mod bigint;
mod colors;
mod deep;
mod ident;

pub use bigint::{compare_big_int, is_big_int};
pub use colors::{css_color_hex, CSS_COLORS};
pub use deep::{deep_clone, deep_equal};
pub use ident::{
    escape_field_name, escape_regex, is_directive_name, is_variable_name, to_camel_case,
    unescape_field_name,
};
