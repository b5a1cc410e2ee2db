use crate::config::Acquisition;
use crate::engine::{Document, Engine};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

/// Raw text for one document plus the page count it came from.
#[derive(Debug, Clone)]
pub struct AcquiredText {
    pub text: String,
    pub page_count: u32,
}

/// Obtain the best available text for a document, trying cheap native
/// extraction first and falling back to optical recognition of embedded
/// images. Returns `None` when neither path yields usable text.
pub fn acquire_text<E: Engine>(
    cfg: &Acquisition,
    engine: &E,
    input: &Path,
) -> Result<Option<AcquiredText>> {
    let doc = engine.open(input)?;
    let page_count = doc.page_count();

    if page_count > 0 {
        match doc.page_text(1) {
            Ok(native) => {
                if !native.trim().is_empty() && native.chars().count() > cfg.min_native_chars {
                    return Ok(Some(AcquiredText {
                        text: native,
                        page_count,
                    }));
                }
            }
            Err(err) => {
                debug!("native text unavailable for {}: {err:#}", input.display());
            }
        }
    }

    let text = recognize_images(cfg, engine, &doc, input);
    if text.trim().is_empty() {
        return Ok(None);
    }

    info!("text recovered via OCR for {}", input.display());
    Ok(Some(AcquiredText { text, page_count }))
}

/// Optical fallback: every embedded image of every page, in order, until
/// the character budget is exceeded. Per-image recognition failures skip
/// that image; a missing language-data directory yields nothing at all.
fn recognize_images<E: Engine>(
    cfg: &Acquisition,
    engine: &E,
    doc: &E::Doc,
    input: &Path,
) -> String {
    if !engine.ocr_available() {
        warn!("recognition language data unavailable; skipping OCR");
        return String::new();
    }

    let mut accumulated = String::new();
    'pages: for page in 1..=doc.page_count() {
        let images = match doc.page_images(page) {
            Ok(images) => images,
            Err(err) => {
                warn!("listing images on page {page} of {}: {err:#}", input.display());
                continue;
            }
        };

        for image in images {
            if accumulated.chars().count() > cfg.ocr_char_budget {
                break 'pages;
            }
            match engine.recognize(&image) {
                Ok(text) if !text.trim().is_empty() => {
                    accumulated.push_str(&text);
                    accumulated.push(' ');
                }
                Ok(_) => {}
                Err(err) => {
                    debug!("skipping unrecognizable image on page {page}: {err:#}");
                }
            }
        }
    }

    accumulated
}
