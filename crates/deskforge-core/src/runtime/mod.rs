//! Local environment detection

pub mod check;

pub use check::{check_go, check_node, check_npm, check_python, RuntimeInfo};
