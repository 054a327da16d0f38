use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file field in upload")]
    MissingFile,

    #[error("upload filename {0:?} is not usable")]
    InvalidFilename(String),

    #[error("malformed multipart body: {0}")]
    Multipart(String),

    #[error("could not store upload: {0}")]
    Io(#[from] io::Error),
}

impl UploadError {
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::MissingFile => "MissingFile",
            UploadError::InvalidFilename(_) => "InvalidFilename",
            UploadError::Multipart(_) => "MultipartError",
            UploadError::Io(_) => "IoError",
        }
    }

    /// Errors caused by the client rather than the server.
    pub fn client_code(&self) -> Option<&'static str> {
        match self {
            UploadError::MissingFile => Some("file_is_missing"),
            UploadError::InvalidFilename(_) => Some("filename_is_invalid"),
            _ => None,
        }
    }
}

/// Creates every directory that does not exist yet. Safe to call repeatedly.
pub fn ensure_dirs<P: AsRef<Path>>(dirs: &[P]) -> io::Result<()> {
    for dir in dirs {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Reduces a client supplied filename to its final path component.
pub fn sanitize_filename(raw: &str) -> Result<String, UploadError> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(UploadError::InvalidFilename(raw.to_string()));
    }
    Ok(name.to_string())
}

/// Writes an upload into `dir`, replacing any file of the same name. Returns the stored name.
pub async fn save_upload(
    dir: &Path,
    raw_filename: &str,
    bytes: &[u8],
) -> Result<String, UploadError> {
    let filename = sanitize_filename(raw_filename)?;
    let dest = dir.join(&filename);
    tokio::fs::write(&dest, bytes).await?;
    tracing::info!(path = %dest.display(), size = bytes.len(), "stored upload");
    Ok(filename)
}
