mod fetcher;
mod tree;

pub use fetcher::FeedFetcher;
pub use tree::{parse_tree, ATTRS_KEY, TEXT_KEY};
