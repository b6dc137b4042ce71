//! Icon export: fetch the vector source, then save it as-is (SVG) or
//! rasterize it to a PNG of a user-chosen size.
//!
//! All failures here are non-fatal to a browse session: they surface as a
//! status-line error, the in-flight flag is cleared, and the user may retry.
//! No partial file is written on failure.

mod raster;

pub use raster::rasterize_svg;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::cdn::{self, FetchError};
use crate::core::IconStyle;

/// Raster size bounds and slider step (pixels).
pub const MIN_SIZE: u32 = 16;
pub const MAX_SIZE: u32 = 512;
pub const SIZE_STEP: u32 = 16;
pub const DEFAULT_SIZE: u32 = 128;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Png => "PNG",
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::Svg => Self::Png,
            Self::Png => Self::Svg,
        }
    }
}

/// Export errors, in pipeline order.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("icon `{category}/{icon}` is not in the catalog")]
    UnknownIcon { category: String, icon: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to parse the fetched SVG")]
    Decode(#[source] usvg::Error),

    #[error("fetched SVG has a degenerate viewport")]
    EmptyViewport,

    #[error("cannot allocate a {size}x{size} raster surface")]
    Surface { size: u32 },

    #[error("PNG encoding failed")]
    Encode(#[source] image::ImageError),

    #[error("failed to write `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Clamp a requested raster size into 16..=512, snapped to the 16px step.
pub fn clamp_size(size: u32) -> u32 {
    let snapped = size.saturating_add(SIZE_STEP / 2) / SIZE_STEP * SIZE_STEP;
    snapped.clamp(MIN_SIZE, MAX_SIZE)
}

/// Output file name for an export: `<name>.svg` or `<name>_<size>px.png`.
pub fn file_name(icon: &str, format: ExportFormat, size: u32) -> String {
    match format {
        ExportFormat::Svg => format!("{icon}.svg"),
        ExportFormat::Png => format!("{icon}_{size}px.png"),
    }
}

// =============================================================================
// Export request
// =============================================================================

/// One fully-specified export action. The triple is fixed at selection time.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub category: &'a str,
    pub icon: &'a str,
    pub style: IconStyle,
    pub format: ExportFormat,
    pub size: u32,
    pub base_url: &'a str,
    pub out_dir: &'a Path,
}

impl ExportRequest<'_> {
    /// The deterministic fetch URL for this request.
    pub fn url(&self) -> String {
        cdn::icon_url(self.base_url, self.category, self.icon, self.style)
    }

    /// The output path this export will write.
    pub fn out_path(&self) -> PathBuf {
        self.out_dir
            .join(file_name(self.icon, self.format, self.size))
    }
}

/// Validate the (category, icon) pair against the catalog.
///
/// The CDN would 404 an invalid triple anyway; checking up front gives a
/// clearer error than an opaque fetch failure.
pub fn validate_icon(catalog: &Catalog, category: &str, icon: &str) -> Result<(), ExportError> {
    if catalog.contains(category, icon) {
        return Ok(());
    }
    Err(ExportError::UnknownIcon {
        category: category.to_string(),
        icon: icon.to_string(),
    })
}

/// Run an export to completion: fetch, convert if needed, write the file.
///
/// Returns the written path. Single fetch attempt; any failure leaves no
/// file behind.
pub fn export_icon(request: &ExportRequest<'_>) -> Result<PathBuf, ExportError> {
    let svg_text = cdn::fetch_svg(&request.url())?;

    let bytes = match request.format {
        ExportFormat::Svg => svg_text.into_bytes(),
        ExportFormat::Png => rasterize_svg(&svg_text, request.size)?,
    };

    let path = request.out_path();
    std::fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    crate::debug!("export"; "{} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

// =============================================================================
// Export dialog state
// =============================================================================

/// Local state of the export dialog: the target icon, chosen format,
/// raster size, and an in-flight flag. The icon is captured when the
/// dialog opens and never re-read, so a list recompute underneath the
/// dialog cannot retarget it. Re-triggering while in flight is ignored
/// (no cancel, no queue).
#[derive(Debug)]
pub struct ExportDialog {
    pub icon: String,
    pub format: ExportFormat,
    pub size: u32,
    in_flight: bool,
}

impl ExportDialog {
    pub fn new(icon: impl Into<String>, size: u32) -> Self {
        Self {
            icon: icon.into(),
            format: ExportFormat::default(),
            size: clamp_size(size),
            in_flight: false,
        }
    }

    pub fn toggle_format(&mut self) {
        self.format = self.format.toggle();
    }

    /// Step the raster size up, saturating at the maximum.
    pub fn size_up(&mut self) {
        self.size = (self.size + SIZE_STEP).min(MAX_SIZE);
    }

    /// Step the raster size down, saturating at the minimum.
    pub fn size_down(&mut self) {
        self.size = self.size.saturating_sub(SIZE_STEP).max(MIN_SIZE);
    }

    /// Claim the in-flight flag. Returns false if a download is already
    /// running; the caller must skip the action.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Clear the in-flight flag, on success and failure alike.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_svg() {
        assert_eq!(file_name("home", ExportFormat::Svg, 128), "home.svg");
        // Size is irrelevant for vector exports
        assert_eq!(file_name("home", ExportFormat::Svg, 256), "home.svg");
    }

    #[test]
    fn test_file_name_png_includes_size() {
        assert_eq!(file_name("home", ExportFormat::Png, 256), "home_256px.png");
        assert_eq!(file_name("home", ExportFormat::Png, 16), "home_16px.png");
    }

    #[test]
    fn test_clamp_size_bounds() {
        assert_eq!(clamp_size(0), MIN_SIZE);
        assert_eq!(clamp_size(4), MIN_SIZE);
        assert_eq!(clamp_size(128), 128);
        assert_eq!(clamp_size(9999), MAX_SIZE);
        // Snapping must not overflow before the clamp applies
        assert_eq!(clamp_size(u32::MAX), MAX_SIZE);
        assert_eq!(clamp_size(u32::MAX - SIZE_STEP), MAX_SIZE);
    }

    #[test]
    fn test_clamp_size_snaps_to_step() {
        assert_eq!(clamp_size(100), 96); // 100 rounds down to 6*16
        assert_eq!(clamp_size(104), 112); // rounds up to 7*16
        assert_eq!(clamp_size(130), 128);
    }

    #[test]
    fn test_dialog_size_stepping_saturates() {
        let mut dialog = ExportDialog::new("home", DEFAULT_SIZE);
        assert_eq!(dialog.size, 128);

        dialog.size_up();
        assert_eq!(dialog.size, 144);
        dialog.size_down();
        dialog.size_down();
        assert_eq!(dialog.size, 112);

        for _ in 0..100 {
            dialog.size_up();
        }
        assert_eq!(dialog.size, MAX_SIZE);
        for _ in 0..100 {
            dialog.size_down();
        }
        assert_eq!(dialog.size, MIN_SIZE);
    }

    #[test]
    fn test_dialog_format_toggle() {
        let mut dialog = ExportDialog::new("home", DEFAULT_SIZE);
        assert_eq!(dialog.format, ExportFormat::Svg);
        dialog.toggle_format();
        assert_eq!(dialog.format, ExportFormat::Png);
        dialog.toggle_format();
        assert_eq!(dialog.format, ExportFormat::Svg);
    }

    #[test]
    fn test_dialog_in_flight_guard() {
        let mut dialog = ExportDialog::new("home", DEFAULT_SIZE);
        assert!(dialog.try_begin());
        // Re-trigger while in flight is ignored
        assert!(!dialog.try_begin());

        dialog.finish();
        assert!(!dialog.is_in_flight());
        assert!(dialog.try_begin());
    }

    #[test]
    fn test_request_url_and_path() {
        let request = ExportRequest {
            category: "action",
            icon: "home",
            style: IconStyle::Filled,
            format: ExportFormat::Png,
            size: 256,
            base_url: "https://example.com/src",
            out_dir: Path::new("/tmp/out"),
        };
        assert_eq!(
            request.url(),
            "https://example.com/src/action/home/materialicons/24px.svg"
        );
        assert_eq!(request.out_path(), PathBuf::from("/tmp/out/home_256px.png"));
    }

    #[test]
    fn test_validate_icon() {
        let catalog = Catalog::from_groups(vec![("action".into(), vec!["home".into()])]);
        assert!(validate_icon(&catalog, "action", "home").is_ok());

        let err = validate_icon(&catalog, "action", "casa").unwrap_err();
        assert!(format!("{err}").contains("action/casa"));
    }
}
