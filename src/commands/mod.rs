pub mod fetch;
pub mod serve;

pub use fetch::handle_fetch;
pub use serve::handle_serve;
