//! View server HTTP handlers.

mod form;
mod view;

pub use form::form_handler;
pub use view::view_handler;
