pub use anyhow::bail;
pub use anyhow::Context;

pub type Res<T> = anyhow::Result<T>;
