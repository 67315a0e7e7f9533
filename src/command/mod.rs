mod read_once;
mod start;

pub use read_once::read_once;
pub use start::start;
