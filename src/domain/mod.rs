pub mod node;
pub mod normalize;
pub mod property;

pub use normalize::normalize_feed;
pub use property::PropertyRecord;
