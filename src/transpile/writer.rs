//! Writes rendered documents to disk.

use std::{
    fs::{self, File},
    io::{self, Write as _},
    path::Path,
};

use crate::base::{self, Error};

use super::{RenderedDocuments, TranspileOptions};

/// Writes both documents into `out_dir`, creating the directory if needed.
///
/// Each file is replaced atomically, so a reader sees either the previous or the new content.
///
/// # Errors
/// - If the output directory cannot be created.
/// - If a document cannot be written.
#[tracing::instrument(level = "debug", skip(documents, options))]
pub fn write_documents(
    documents: &RenderedDocuments,
    out_dir: &Path,
    options: &TranspileOptions,
) -> base::Result<()> {
    fs::create_dir_all(out_dir).map_err(|err| io_error(out_dir, &err))?;

    write_atomic(
        &out_dir.join(options.workspace_file_name()),
        documents.workspace(),
    )?;
    write_atomic(
        &out_dir.join(options.build_file_name()),
        documents.build_file(),
    )?;

    Ok(())
}

/// Writes `contents` to a hidden sibling of `path` and renames it over `path` once synced.
fn write_atomic(path: &Path, contents: &str) -> base::Result<()> {
    let file_name = path
        .file_name()
        .ok_or(Error::Other("output path does not name a file"))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    if let Err(err) = write_and_rename(&tmp_path, path, contents) {
        // the temporary file may not exist if creating it failed
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, &err));
    }

    tracing::debug!("Wrote {}", path.display());

    Ok(())
}

fn write_and_rename(tmp_path: &Path, path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)
}

fn io_error(path: &Path, err: &io::Error) -> Error {
    Error::IoError(format!("{}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use crate::{model::TranslationModel, transpile::render};

    use super::*;

    #[test]
    fn test_write_documents() {
        let dir = tempfile::tempdir().unwrap();
        let options = TranspileOptions::default();
        let documents = render(&TranslationModel::new(), &options);

        write_documents(&documents, dir.path(), &options).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("WORKSPACE")).unwrap(),
            *documents.workspace()
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("BUILD.bazel")).unwrap(),
            *documents.build_file()
        );

        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("WORKSPACE"), "stale").unwrap();

        let options = TranspileOptions::default().with_build_file_name("BUILD");
        let documents = render(&TranslationModel::new(), &options);
        write_documents(&documents, dir.path(), &options).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("WORKSPACE")).unwrap(),
            *documents.workspace()
        );
        assert!(dir.path().join("BUILD").exists());
        assert!(!dir.path().join("BUILD.bazel").exists());
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested").join("out");

        let options = TranspileOptions::default();
        write_documents(&render(&TranslationModel::new(), &options), &out_dir, &options).unwrap();

        assert!(out_dir.join("WORKSPACE").is_file());
    }

    #[test]
    fn test_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        // a directory in place of the workspace file makes the rename fail
        fs::create_dir(dir.path().join("WORKSPACE")).unwrap();
        fs::write(dir.path().join("WORKSPACE").join("keep"), "").unwrap();

        let options = TranspileOptions::default();
        let result = write_documents(&render(&TranslationModel::new(), &options), dir.path(), &options);

        assert!(matches!(result, Err(Error::IoError(_))));
        assert!(!dir.path().join(".WORKSPACE.tmp").exists());
    }
}
