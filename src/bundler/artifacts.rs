//! Moving finished release artifacts to their destination.

use crate::bundler::{
    error::{Error, Result},
    settings::Options,
    utils::{fs, template::render_path},
};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

/// Computes the final destination of one artifact.
///
/// Applies the rename policy, then substitutes Options fields into the
/// resulting path.
pub fn artifact_destination(
    options: &Options,
    data: &serde_json::Value,
    file_name: &str,
) -> Result<PathBuf> {
    let templated = (options.rename)(&options.dest, file_name);
    render_path(&templated, data)
}

/// Moves every regular file in `squirrel_dir` to its destination.
///
/// Moves run concurrently; all of them are awaited. Existing files are
/// overwritten. Nothing is rolled back on failure.
///
/// # Returns
///
/// Final paths, sorted.
///
/// # Errors
///
/// [`Error::Move`] wrapping the first failure.
pub async fn move_artifacts(options: &Options, squirrel_dir: &Path) -> Result<Vec<PathBuf>> {
    options.log("Moving package to destination");
    move_all(options, squirrel_dir)
        .await
        .map_err(|e| Error::Move(Box::new(e)))
}

async fn move_all(options: &Options, squirrel_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = squirrel_dir.join("*").to_string_lossy().into_owned();
    let data = options.to_template_data()?;

    // Resolve every destination before any file is touched
    let mut planned = Vec::new();
    for entry in glob::glob(&pattern)? {
        let file = entry?;
        if !file.is_file() {
            continue;
        }
        let Some(file_name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let dest = artifact_destination(options, &data, &file_name)?;
        planned.push((file, dest));
    }

    let mut moves = JoinSet::new();
    for (file, dest) in planned {
        options.log(&format!(
            "Moving file {} to {}",
            file.display(),
            dest.display()
        ));
        moves.spawn(async move {
            fs::move_file(&file, &dest).await?;
            Ok::<_, Error>(dest)
        });
    }

    let mut moved = Vec::new();
    let mut first_error = None;
    while let Some(joined) = moves.join_next().await {
        let result = joined
            .map_err(|e| Error::GenericError(format!("Move task panicked: {}", e)))
            .and_then(|r| r);
        match result {
            Ok(dest) => moved.push(dest),
            Err(e) => {
                options.log(&e.to_string());
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    moved.sort();
    Ok(moved)
}
