//! Key handling, one module per input mode.

mod modal_create;
mod normal_mode;

pub use modal_create::handle_create_modal;
pub use normal_mode::handle_normal_mode;
