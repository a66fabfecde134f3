//! Extraction client boundary: one flyer image in, analysis text out.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

use std::path::Path;

use crate::error::ClientError;

/// Prompt asking the vision model for the template the parser understands.
pub const ANALYSIS_PROMPT: &str = r#"Analyze this image and provide a detailed structured analysis. Format your response like this:

**Store Name:** [Store/Business name]

**Slogan/Motto:** [Any taglines or slogans]

**Featured Products & Prices:**
* **Product Name:** Size/Weight for $Price (Description/Features)
* **Product Name:** Size/Weight for $Price (Description/Features)
[Continue for all products]

**Contact Information:**
* **Address:** [Full address if visible]
* **Website:** [Website URL if visible]
* **Phone Number:** [Phone number if visible]

**Overall Impression:**
[Describe the design, colors, main message, and overall marketing approach]

Please analyze this image thoroughly and provide all visible information in this structured format."#;

/// Image file extensions accepted as flyers.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// A flyer image ready to be analyzed.
#[derive(Debug, Clone)]
pub struct FlyerImage {
    /// Display name, used as the flyer's source id.
    pub name: String,
    /// Encoded image bytes in any common raster format.
    pub bytes: Vec<u8>,
}

impl FlyerImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an image file; the file name becomes the flyer name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("flyer")
            .to_string();
        Ok(Self { name, bytes })
    }
}

/// Whether a path has one of the accepted image extensions.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Turns a flyer image into free-text structured analysis.
#[allow(async_fn_in_trait)]
pub trait ExtractionClient {
    /// Analyze one image. Each call is independent; failures are not retried.
    async fn analyze(&self, image: &FlyerImage) -> Result<String, ClientError>;
}
