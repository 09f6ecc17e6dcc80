//! Module for additional helpers shared across the tutor core
pub mod test_helper;
pub mod uom_macros;
