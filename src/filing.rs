use crate::config::Config;
use crate::pipeline::{Evaluation, Route, Verdict};
use crate::util::ensure_dir;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What actually happened to one document after its evaluation was applied.
#[derive(Debug, Clone)]
pub enum Applied {
    Skipped,
    Renamed {
        /// Final location, after routing. Routing failures leave the file at
        /// the renamed path, which is still reported here.
        path: PathBuf,
        route: Route,
        routed: bool,
    },
}

/// Perform the side effects an evaluation calls for: collision-safe rename,
/// then routing into the success or error subfolder.
pub fn apply(cfg: &Config, eval: &Evaluation) -> Result<Applied> {
    let Verdict::Rename {
        file_name, route, ..
    } = &eval.verdict
    else {
        return Ok(Applied::Skipped);
    };

    let dir = eval
        .source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let target = resolve_collision(&dir, file_name, &eval.source);

    if target == eval.source {
        info!("file already has its canonical name");
    } else {
        std::fs::rename(&eval.source, &target).with_context(|| {
            format!(
                "renaming {} to {}",
                eval.source.display(),
                target.display()
            )
        })?;
        info!("renamed to {}", target.display());
    }

    let subdir = match route {
        Route::Processed => &cfg.paths.processed_subdir,
        Route::Errors => &cfg.paths.errors_subdir,
    };

    // A failed move is recovered here: the renamed file stays where it is
    // and the batch continues.
    match move_into_subfolder(&target, subdir) {
        Ok(path) => Ok(Applied::Renamed {
            path,
            route: *route,
            routed: true,
        }),
        Err(err) => {
            warn!("could not move {} into {subdir}: {err:#}", target.display());
            Ok(Applied::Renamed {
                path: target,
                route: *route,
                routed: false,
            })
        }
    }
}

/// Find a free target name in `dir`, appending `_1`, `_2`, ... before the
/// extension until nothing would be overwritten. The source path itself is
/// not a collision.
pub fn resolve_collision(dir: &Path, file_name: &str, source: &Path) -> PathBuf {
    let mut target = dir.join(file_name);
    let stem = file_name.strip_suffix(".pdf").unwrap_or(file_name);
    let mut counter = 1u32;
    while target.exists() && target != source {
        target = dir.join(format!("{stem}_{counter}.pdf"));
        counter += 1;
    }
    target
}

fn move_into_subfolder(file: &Path, subdir: &str) -> Result<PathBuf> {
    let parent = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let folder = parent.join(subdir);
    ensure_dir(&folder)?;

    let file_name = file
        .file_name()
        .with_context(|| format!("no file name in {}", file.display()))?;
    let destination = folder.join(file_name);
    std::fs::rename(file, &destination).with_context(|| {
        format!(
            "moving {} to {}",
            file.display(),
            destination.display()
        )
    })?;
    Ok(destination)
}
