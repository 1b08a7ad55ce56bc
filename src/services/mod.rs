pub mod editor;
pub mod error;
pub mod media;
pub mod posts;
pub mod read_time;
pub mod seo;
pub mod slug;

pub use error::{ServiceError, ServiceResult};
