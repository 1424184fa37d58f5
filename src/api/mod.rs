pub mod cloudinary;
pub mod rest;
pub mod traits;
pub mod types;

pub use cloudinary::CloudinaryUploader;
pub use rest::RestCollection;
pub use traits::{CollectionApi, ImageUploader};
pub use types::ImageFile;
