pub mod error;
pub mod ranking;
pub mod source;
pub mod storage;
pub mod types;

pub use error::Error;
pub use ranking::ArticleRanker;
pub use source::ArticleSource;
pub use storage::ArticleStore;
pub use types::{Article, RankedArticle, SaveReceipt, SearchResponse};

pub type Result<T> = std::result::Result<T, Error>;
