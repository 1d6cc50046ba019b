mod endpoint;
mod hostinfo;
mod netmap;
mod node;

pub use endpoint::*;
pub use hostinfo::*;
pub use netmap::*;
pub use node::*;
