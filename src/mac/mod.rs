mod mac;

pub use mac::*;
