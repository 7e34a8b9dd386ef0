use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::error::ExportResult;
use crate::raster::RasterBuffer;

/// Encodings the canvas can be saved as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// An encoded canvas ready to hand to the host
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// `<millis>.<ext>`
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode the canvas, naming the file after `timestamp_millis`
pub fn encode(canvas: &RasterBuffer, format: ExportFormat, timestamp_millis: u64) -> ExportResult<ExportedImage> {
    let mut cursor = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => canvas.image().write_to(&mut cursor, format.image_format())?,
        // JPEG has no alpha channel
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(canvas.image().clone())
            .to_rgb8()
            .write_to(&mut cursor, format.image_format())?,
    }

    let bytes = cursor.into_inner();
    log::debug!(
        "Encoded {}x{} canvas as {} ({} bytes)",
        canvas.width(),
        canvas.height(),
        format.mime_type(),
        bytes.len()
    );

    Ok(ExportedImage {
        file_name: format!("{}.{}", timestamp_millis, format.extension()),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Delivers an exported image to the user
pub trait ExportSink {
    fn deliver(&mut self, image: &ExportedImage) -> ExportResult<()>;
}

/// Writes exports into a directory on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectorySink {
    fn deliver(&mut self, image: &ExportedImage) -> ExportResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&image.file_name);
        std::fs::write(&path, &image.bytes)?;
        log::info!("Saved image to {}", path.display());
        Ok(())
    }
}

/// Object URLs outlive the click by this long
#[cfg(target_arch = "wasm32")]
const REVOKE_DELAY_MS: i32 = 1_000;

/// Triggers a browser download through a temporary `<a download>` element
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl ExportSink for BrowserDownload {
    fn deliver(&mut self, image: &ExportedImage) -> ExportResult<()> {
        use eframe::wasm_bindgen::JsCast as _;
        use crate::error::ExportError;

        fn js_err(err: eframe::wasm_bindgen::JsValue) -> ExportError {
            ExportError::Browser(format!("{:?}", err))
        }

        let window = web_sys::window().ok_or_else(|| ExportError::Browser("no window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;

        let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&bytes.buffer());

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(image.mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Browser("element is not an anchor".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(&image.file_name);
        anchor.click();

        // The download reads the blob after click() returns
        let revoke = eframe::wasm_bindgen::closure::Closure::once_into_js(move || {
            if let Err(err) = web_sys::Url::revoke_object_url(&url) {
                log::warn!("Failed to revoke object URL: {:?}", err);
            }
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)
            .map_err(js_err)?;
        log::info!("Downloaded {}", image.file_name);
        Ok(())
    }
}
