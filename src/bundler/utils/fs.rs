//! File system utilities for staging and artifact handling.
//!
//! Provides copy and move operations with automatic directory creation,
//! symlink preservation, and path-aware error reporting.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file, creating the destination's parent directories.
///
/// Fails if the source path is not a file.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?
        .is_file()
    {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Recursively copies a directory tree into `to`.
///
/// Symlinks are recreated rather than followed. Existing files in the
/// destination are overwritten.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?
        .is_dir()
    {
        return Err(Error::GenericError(format!("{from:?} is not a directory")));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;

        for entry in walkdir::WalkDir::new(&from).min_depth(1) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file to", &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Moves a file, replacing any existing file at `to`.
///
/// Falls back to copy and delete when a plain rename is not possible, e.g.
/// across filesystems.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    if fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    fs::remove_file(from).await.fs_context("removing file", from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_dir_preserves_tree() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("resources/app")).expect("mkdir");
        std::fs::write(src.join("footest.exe"), b"exe").expect("write");
        std::fs::write(src.join("resources/app/package.json"), b"{}").expect("write");

        let dest = tmp.path().join("staging/footest");
        copy_dir(&src, &dest).await.expect("copy");

        assert_eq!(std::fs::read(dest.join("footest.exe")).expect("read"), b"exe");
        assert!(dest.join("resources/app/package.json").is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_dir_recreates_symlinks() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).expect("mkdir");
        std::fs::write(src.join("real.txt"), b"x").expect("write");
        std::os::unix::fs::symlink("real.txt", src.join("link.txt")).expect("symlink");

        let dest = tmp.path().join("dest");
        copy_dir(&src, &dest).await.expect("copy");

        let link = std::fs::symlink_metadata(dest.join("link.txt")).expect("meta");
        assert!(link.file_type().is_symlink());
    }

    #[tokio::test]
    async fn test_copy_dir_rejects_file_source() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("file");
        std::fs::write(&file, b"").expect("write");
        assert!(copy_dir(&file, &tmp.path().join("out")).await.is_err());
    }

    #[tokio::test]
    async fn test_move_file_overwrites() {
        let tmp = TempDir::new().expect("tempdir");
        let from = tmp.path().join("Setup.exe");
        let to = tmp.path().join("out/footest-0.0.1-setup.exe");
        std::fs::create_dir_all(tmp.path().join("out")).expect("mkdir");
        std::fs::write(&to, b"old").expect("write");
        std::fs::write(&from, b"new").expect("write");

        move_file(&from, &to).await.expect("move");
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).expect("read"), b"new");
    }

    #[tokio::test]
    async fn test_remove_dir_all_is_idempotent() {
        let tmp = TempDir::new().expect("tempdir");
        let gone = tmp.path().join("gone");
        remove_dir_all(&gone).await.expect("missing dir is fine");
    }
}
