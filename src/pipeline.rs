use crate::{
    acquire,
    classify,
    config::Config,
    engine::Engine,
    extract::FieldExtractor,
    naming,
    normalize::normalize,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct Pipeline<E: Engine> {
    cfg: Config,
    engine: E,
    fields: FieldExtractor,
}

/// The per-document decision: what the document turned out to be and what
/// should happen to it. Pure data; the filing layer performs the effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub source: PathBuf,
    pub page_count: u32,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Verdict {
    /// The document is skipped and left in place.
    Skip { reason: SkipReason },
    /// Rename to `file_name` and file under `route`.
    Rename {
        file_name: String,
        route: Route,
        missing: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Neither native extraction nor optical recognition yielded text.
    NoText,
    /// Text was obtained but is not a recognized certificate document.
    NotRecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Processed,
    Errors,
}

impl<E: Engine> Pipeline<E> {
    pub fn new(cfg: &Config, engine: E) -> Result<Self> {
        let fields = FieldExtractor::new(&cfg.extraction)?;
        Ok(Self {
            cfg: cfg.clone(),
            engine,
            fields,
        })
    }

    /// Run acquisition, normalization, classification and field extraction
    /// for one document and decide its disposition. No filesystem mutation
    /// happens here.
    pub fn evaluate(&self, input: &Path) -> Result<Evaluation> {
        let Some(acquired) = acquire::acquire_text(&self.cfg.acquisition, &self.engine, input)?
        else {
            return Ok(Evaluation {
                source: input.to_path_buf(),
                page_count: 0,
                verdict: Verdict::Skip {
                    reason: SkipReason::NoText,
                },
            });
        };

        let text = normalize(&acquired.text);

        if !classify::is_certificate(&self.cfg.classification, &text) {
            debug!("unrecognized document text: {text}");
            return Ok(Evaluation {
                source: input.to_path_buf(),
                page_count: acquired.page_count,
                verdict: Verdict::Skip {
                    reason: SkipReason::NotRecognized,
                },
            });
        }

        let fields = self.fields.extract(&text);
        debug!(
            "extracted name={:?} type={:?} date={:?}",
            fields.employee_name, fields.exam_type, fields.exam_date
        );

        let file_name = naming::compose_file_name(&self.cfg.naming, acquired.page_count, &fields);
        let missing: Vec<String> = fields
            .missing_fields()
            .into_iter()
            .map(str::to_string)
            .collect();
        let route = if missing.is_empty() {
            Route::Processed
        } else {
            Route::Errors
        };

        Ok(Evaluation {
            source: input.to_path_buf(),
            page_count: acquired.page_count,
            verdict: Verdict::Rename {
                file_name,
                route,
                missing,
            },
        })
    }
}
