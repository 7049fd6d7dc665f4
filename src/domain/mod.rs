pub mod article;
pub mod category;
pub mod feed;
pub mod limit;

pub use article::Article;
pub use category::Category;
pub use feed::Feed;
pub use limit::Limit;
