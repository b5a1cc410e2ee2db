pub mod local;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use local::LocalEngine;

/// External collaborators behind one seam: the PDF container/page access
/// and the optical recognition engine. The pipeline is generic over this
/// trait so tests can substitute a canned implementation.
pub trait Engine {
    type Doc: Document;

    /// Open a PDF for reading. Never mutates the file.
    fn open(&self, input: &Path) -> Result<Self::Doc>;

    /// Recognize text in one embedded image's raw bytes. Fails per image
    /// without aborting the batch.
    fn recognize(&self, image: &[u8]) -> Result<String>;

    /// Whether the recognition language data is present. When false the
    /// optical path yields nothing, with no partial attempt.
    fn ocr_available(&self) -> bool;

    fn doctor(&self) -> Result<EngineDiag>;
}

/// One opened document: page count plus per-page text and embedded images.
/// Pages are 1-based.
pub trait Document {
    fn page_count(&self) -> u32;
    fn page_text(&self, page: u32) -> Result<String>;
    fn page_images(&self, page: u32) -> Result<Vec<Vec<u8>>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDiag {
    pub pdf_backend: String,
    pub ocr_backend: String,
    pub tessdata_dir: String,
    pub tessdata_present: bool,
    pub traineddata_present: bool,
    pub language: String,
    pub ok: bool,
}
