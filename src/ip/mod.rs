mod iface;

pub use iface::*;
