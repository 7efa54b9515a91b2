// Core components
pub mod common;
pub mod keymap;
pub mod picker;

// Display components
pub mod help_bar;
pub mod text_label;

// System components
pub mod input_router;
