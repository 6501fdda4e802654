pub mod discuss;
pub mod traits;

pub use discuss::GraphqlDiscussFeed;
pub use traits::DiscussFeed;
