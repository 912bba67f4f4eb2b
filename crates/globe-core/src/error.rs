use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse location dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode texture image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
}
