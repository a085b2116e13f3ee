use serde::{Deserialize, Serialize};

/// A video hosted on the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    /// The video's page on the site
    pub url: String,
    /// A still of the video
    pub image: String,
    /// Length, in seconds
    pub duration: u32,
    pub user: VideoUser,
    /// Renditions of the video, in the order the service lists them
    #[serde(rename = "video_files")]
    pub files: Vec<VideoFile>,
    #[serde(rename = "video_pictures")]
    pub pictures: Vec<VideoPicture>,
}

impl Video {
    /// The widest rendition of the given quality
    pub fn best_file(&self, quality: Quality) -> Option<&VideoFile> {
        self.files
            .iter()
            .filter(|file| file.quality == quality)
            .max_by_key(|file| file.width.unwrap_or_default())
    }
}

/// Who uploaded a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUser {
    pub id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFile {
    pub id: u64,
    pub quality: Quality,
    /// The mime type, e.g. `video/mp4`
    pub file_type: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    pub link: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Hd,
    Sd,
    Hls,
    /// A tier this crate doesn't know about yet
    #[serde(other)]
    Other,
}

/// A preview frame of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPicture {
    pub id: u64,
    #[serde(rename = "picture")]
    pub link: String,
    #[serde(rename = "nr")]
    pub index: u32,
}
