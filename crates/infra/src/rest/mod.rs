pub mod client;
pub mod query;

pub use client::{
    tables, Credential, DataApiClient, DataApiError, NewContactMessage, NewDiscussion,
    NewMarginalia, NewPost, PostRef,
};
pub use query::{OrderDir, Select};
