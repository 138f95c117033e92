pub mod fallback;
pub mod href;
pub mod item;
pub mod page;
pub mod query;

pub use fallback::{FallbackPolicy, filter_candidates};
pub use href::{PageLinks, build_href};
pub use item::{Item, LexicalPage, RawCandidate, ResultPage, ScoredCandidate, ShapeError};
pub use page::{fallback_limit, lexical_window, merge_page, should_fallback};
pub use query::{QueryDescriptor, RawParam, RawParams, normalize};

pub const QUERY_PARAM: &str = "query";
pub const PAGE_PARAM: &str = "page";
pub const SEMANTIC_PARAM: &str = "semanticSearch";
