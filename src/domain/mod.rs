pub mod article;

pub use article::{format_wire_timestamp, ist, Article, Author, Reaction, Tag};
