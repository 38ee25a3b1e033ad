pub mod cache;
pub mod loader;
pub mod source;

pub use cache::{DotCache, DotData, RequestTicket};
pub use loader::DotLoader;
pub use source::{DotDays, DotSource, DotSourceError, StaticDotSource};
