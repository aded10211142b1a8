pub mod args_helper;
pub mod change;
