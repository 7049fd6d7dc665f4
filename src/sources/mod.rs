pub mod html;
pub mod http;
pub mod images;
pub mod registry;
pub mod rss_atom;
pub mod traits;

pub use http::HttpFetcher;
pub use registry::FeedRegistry;
pub use rss_atom::RssAtomParser;
pub use traits::FeedFetcher;
