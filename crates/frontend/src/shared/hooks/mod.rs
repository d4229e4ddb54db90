//! Reactive hooks shared by the pages.

pub mod debounce;
pub mod loading;
pub mod media_query;
pub mod mutation;
pub mod pagination;
pub mod query;

pub use debounce::use_debounced;
pub use loading::{use_loading, LoadingCounter};
pub use media_query::{use_media_query, MediaQueryWatch};
pub use mutation::{use_mutation, Mutation, MutationOptions};
pub use pagination::{use_pagination, Pagination};
pub use query::{use_query, QueryOptions, QueryResult};
