use super::{Document, Engine, EngineDiag};
use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use lopdf::{Dictionary, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tesseract::Tesseract;

/// Production engine: lopdf for container/page/image access, tesseract for
/// optical recognition. The tesseract handle is created per image because
/// the binding consumes it on failure; this also gives exact per-image
/// error isolation.
pub struct LocalEngine {
    tessdata_dir: PathBuf,
    language: String,
}

impl LocalEngine {
    pub fn new(cfg: &Config) -> Self {
        Self {
            tessdata_dir: PathBuf::from(&cfg.ocr.tessdata_dir),
            language: cfg.ocr.language.clone(),
        }
    }

    fn traineddata_path(&self) -> PathBuf {
        self.tessdata_dir
            .join(format!("{}.traineddata", self.language))
    }
}

impl Engine for LocalEngine {
    type Doc = LoadedPdf;

    fn open(&self, input: &Path) -> Result<LoadedPdf> {
        let doc = lopdf::Document::load(input)
            .map_err(|e| anyhow!("loading PDF {}: {e}", input.display()))?;
        let pages = doc.get_pages();
        Ok(LoadedPdf { doc, pages })
    }

    fn recognize(&self, image: &[u8]) -> Result<String> {
        let datapath = self.tessdata_dir.to_string_lossy();
        let mut tess = Tesseract::new(Some(datapath.as_ref()), Some(&self.language))
            .map_err(|e| anyhow!("initializing tesseract: {e}"))?
            .set_image_from_mem(image)
            .map_err(|e| anyhow!("loading image into tesseract: {e}"))?;
        tess.get_text()
            .map_err(|e| anyhow!("recognizing image: {e}"))
    }

    fn ocr_available(&self) -> bool {
        self.tessdata_dir.is_dir()
    }

    fn doctor(&self) -> Result<EngineDiag> {
        let tessdata_present = self.tessdata_dir.is_dir();
        let traineddata_present = self.traineddata_path().is_file();
        Ok(EngineDiag {
            pdf_backend: "lopdf".into(),
            ocr_backend: "tesseract".into(),
            tessdata_dir: self.tessdata_dir.display().to_string(),
            tessdata_present,
            traineddata_present,
            language: self.language.clone(),
            ok: tessdata_present && traineddata_present,
        })
    }
}

pub struct LoadedPdf {
    doc: lopdf::Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl Document for LoadedPdf {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        if !self.pages.contains_key(&page) {
            return Err(anyhow!("no such page: {page}"));
        }
        self.doc
            .extract_text(&[page])
            .with_context(|| format!("extracting text from page {page}"))
    }

    /// Raw bytes of every image XObject in the page's resources. The bytes
    /// are the stream content as stored (JPEG for DCTDecode and so on);
    /// formats the recognition engine cannot load fail there and are
    /// skipped by the caller.
    fn page_images(&self, page: u32) -> Result<Vec<Vec<u8>>> {
        let Some(&page_id) = self.pages.get(&page) else {
            return Err(anyhow!("no such page: {page}"));
        };

        let page_dict = match self.doc.get_object(page_id) {
            Ok(Object::Dictionary(dict)) => dict,
            _ => return Ok(Vec::new()),
        };

        let Some(resources) = self.resolve_dict(page_dict.get(b"Resources").ok()) else {
            return Ok(Vec::new());
        };
        let Some(xobjects) = self.resolve_dict(resources.get(b"XObject").ok()) else {
            return Ok(Vec::new());
        };

        let mut images = Vec::new();
        for (_name, entry) in xobjects.iter() {
            let stream = match entry {
                Object::Reference(id) => match self.doc.get_object(*id) {
                    Ok(Object::Stream(s)) => s,
                    _ => continue,
                },
                Object::Stream(s) => s,
                _ => continue,
            };
            let is_image = matches!(
                stream.dict.get(b"Subtype"),
                Ok(Object::Name(name)) if name == b"Image"
            );
            if is_image {
                images.push(stream.content.clone());
            }
        }
        Ok(images)
    }
}

impl LoadedPdf {
    /// Follow an optional dictionary-or-reference object to a dictionary.
    fn resolve_dict<'a>(&'a self, obj: Option<&'a Object>) -> Option<&'a Dictionary> {
        match obj? {
            Object::Dictionary(dict) => Some(dict),
            Object::Reference(id) => match self.doc.get_object(*id) {
                Ok(Object::Dictionary(dict)) => Some(dict),
                _ => None,
            },
            _ => None,
        }
    }
}
