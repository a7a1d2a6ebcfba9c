pub mod mock_data;
pub mod normalize;
pub mod resolver;

pub use crate::domain::model::{ContentItem, Section};
pub use crate::domain::ports::ContentSource;
pub use crate::utils::error::Result;
