use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use tokio::{
    fs::{self, File},
    io::{self, AsyncWriteExt},
};

/// Replaces the contents of `path` with `contents` without ever exposing a half written file.
/// Data goes into a sibling temporary file first, which is synced and then renamed over the
/// target. The file handle is closed before the rename.
pub async fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    if let Some(parent) = path.parent().filter(|v| !v.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temporary = temporary_sibling(path);
    {
        let mut file = File::create(&temporary).await?;
        file.write_all(contents).await?;
        file.flush().await?;
        file.sync_all().await?;
    }

    if let Err(e) = fs::rename(&temporary, path).await {
        let _ = fs::remove_file(&temporary).await;
        return Err(e);
    }
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}
