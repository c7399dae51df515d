mod lookup;
mod serve;

pub use lookup::cmd_lookup;
pub use serve::cmd_serve;
