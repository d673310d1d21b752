use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ApiError;
use crate::size::SizeType;

/// A background-removed PNG as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub base64: String,
    pub size_type: SizeType,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ProcessedImage {
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>, ApiError> {
        Ok(STANDARD.decode(self.base64.trim())?)
    }

    /// `Image dimensions: W × H px`, or `None` when the service did not report them.
    pub fn dimensions_label(&self) -> Option<String> {
        let (w, h) = (self.width?, self.height?);
        Some(format!("Image dimensions: {w} × {h} px"))
    }

    /// Caption under a batch result: `W × H px (size size)`.
    pub fn batch_caption(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{w} × {h} px ({} size)", self.size_type),
            _ => format!("{} size", self.size_type),
        }
    }
}

/// The image on screen together with the upload it was made from.
///
/// Both halves are replaced in one step when a reply arrives, so a full-size
/// reprocess always sends the file behind the visible result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentImage<F> {
    pub image: ProcessedImage,
    pub source: F,
}

/// Result of one file in a batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Processed {
        original_name: String,
        image: ProcessedImage,
    },
    Failed {
        original_name: String,
        error: String,
    },
}

impl BatchOutcome {
    pub fn original_name(&self) -> &str {
        match self {
            BatchOutcome::Processed { original_name, .. }
            | BatchOutcome::Failed { original_name, .. } => original_name,
        }
    }

    pub fn image(&self) -> Option<&ProcessedImage> {
        match self {
            BatchOutcome::Processed { image, .. } => Some(image),
            BatchOutcome::Failed { .. } => None,
        }
    }

    /// File name for the per-result download button.
    pub fn download_name(&self) -> Option<String> {
        let image = self.image()?;
        Some(item_download_name(self.original_name(), image.size_type))
    }
}

pub fn single_download_name(size: SizeType) -> String {
    format!("rembg-output-{size}.png")
}

/// `index` is zero-based over successful results only.
pub fn batch_download_name(index: usize, size: SizeType) -> String {
    format!("rembg-output-{}-{size}.png", index + 1)
}

/// Everything before the first `.` of the uploaded name, then `-nobg-{size}.png`.
pub fn item_download_name(original_name: &str, size: SizeType) -> String {
    let stem = original_name.split('.').next().unwrap_or(original_name);
    format!("{stem}-nobg-{size}.png")
}

/// Matches what the drop zone accepts: any `image/*` MIME type.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(w: Option<u32>, h: Option<u32>) -> ProcessedImage {
        ProcessedImage {
            base64: "iVBORw0KGgo=".to_string(),
            size_type: SizeType::Reduced,
            width: w,
            height: h,
        }
    }

    #[test]
    fn data_url_is_png() {
        assert_eq!(img(None, None).data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn png_bytes_decode_signature() {
        let bytes = img(None, None).png_bytes().unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn png_bytes_reject_garbage() {
        let mut bad = img(None, None);
        bad.base64 = "***".to_string();
        assert!(matches!(bad.png_bytes(), Err(ApiError::Base64(_))));
    }

    #[test]
    fn dimensions_need_both_sides() {
        assert_eq!(
            img(Some(640), Some(480)).dimensions_label().as_deref(),
            Some("Image dimensions: 640 × 480 px")
        );
        assert_eq!(img(Some(640), None).dimensions_label(), None);
        assert_eq!(img(Some(1), Some(2)).batch_caption(), "1 × 2 px (reduced size)");
        assert_eq!(img(None, None).batch_caption(), "reduced size");
    }

    #[test]
    fn download_names() {
        assert_eq!(single_download_name(SizeType::Full), "rembg-output-full.png");
        assert_eq!(
            batch_download_name(0, SizeType::Reduced),
            "rembg-output-1-reduced.png"
        );
        assert_eq!(
            item_download_name("holiday.photo.jpg", SizeType::Full),
            "holiday-nobg-full.png"
        );
        assert_eq!(item_download_name("noext", SizeType::Reduced), "noext-nobg-reduced.png");
    }

    #[test]
    fn failed_outcomes_have_no_download() {
        let failed = BatchOutcome::Failed {
            original_name: "x.png".to_string(),
            error: "bad".to_string(),
        };
        assert_eq!(failed.download_name(), None);
        assert_eq!(failed.original_name(), "x.png");

        let ok = BatchOutcome::Processed {
            original_name: "x.png".to_string(),
            image: img(None, None),
        };
        assert_eq!(ok.download_name().as_deref(), Some("x-nobg-reduced.png"));
    }

    #[test]
    fn mime_filter() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime(""));
    }
}
