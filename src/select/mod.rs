mod selector;

pub use selector::*;
