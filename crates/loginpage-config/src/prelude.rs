pub use loginpage_core::prelude::*;

// vim: ts=4
