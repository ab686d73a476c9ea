use std::path::{Path, PathBuf};

use bioscan_export::share::SharePayload;

/// Write a share payload's body into `dir` under its file name.
///
/// Written through a temp file and rename.
pub fn write_payload(dir: &Path, payload: &SharePayload) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| eyre::eyre!("failed to create {}: {e}", dir.display()))?;

    let path = dir.join(payload.file_name);
    let tmp_path = dir.join(format!("{}.tmp", payload.file_name));
    std::fs::write(&tmp_path, &payload.body)?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(
        path = %path.display(),
        bytes = payload.body.len(),
        mime = payload.mime_type,
        "report written"
    );
    Ok(path)
}
