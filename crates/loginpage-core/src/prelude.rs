pub use crate::app::App;
pub use loginpage_types::prelude::*;

// vim: ts=4
