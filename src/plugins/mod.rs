//! Bundled extensions

mod code;
mod math;

pub use code::{code, CodeOptions, LANG_CLASS_PREFIX};
pub use math::{latex_rules, math};
