mod collection;
mod photo;
mod video;

pub use collection::Collection;
pub use photo::{Photo, PhotoSize};
pub use video::{Quality, Video, VideoFile, VideoPicture, VideoUser};
