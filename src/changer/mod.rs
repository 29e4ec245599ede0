mod changer;

pub use changer::*;
