//! Round-trips the `abc` configuration record through `.conf` files.

pub mod conf;
pub mod driver;
pub mod record;

pub use driver::{run, ConfStore, FileStore, Paths, RunError};
pub use record::{Abc, Mnp, Xyz};
