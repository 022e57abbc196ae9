//! Form rendering module
//!
//! - `field_renderer`: text input, radio group and help text helpers
//! - `field_definition_form`: the field definition form itself

mod field_definition_form;
mod field_renderer;

pub use field_definition_form::draw_field_definition;
