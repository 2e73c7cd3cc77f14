//! Writing the scroll-back to a file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ExportError;

/// File name for an export taken at `at`.
pub fn export_file_name(session_id: &str, at: DateTime<Local>) -> String {
    let safe_id: String = session_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("terminal-{}-{}.log", safe_id, at.format("%Y%m%d-%H%M%S"))
}

/// Write `contents` into `dir` and return the file's path.
pub fn write_export(
    dir: &Path,
    session_id: &str,
    contents: &str,
    at: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    if !dir.is_dir() {
        return Err(ExportError::NoDirectory);
    }
    let path = dir.join(export_file_name(session_id, at));
    let mut data = contents.to_string();
    if !data.is_empty() {
        data.push('\n');
    }
    std::fs::write(&path, data).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!("Exported terminal log to {}", path.display());
    Ok(path)
}

/// Where downloads go when no directory is configured.
pub fn default_export_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_name_format() {
        let at = Local.with_ymd_and_hms(2026, 3, 1, 9, 7, 5).unwrap();
        assert_eq!(
            export_file_name("web-app", at),
            "terminal-web-app-20260301-090705.log"
        );
        assert_eq!(
            export_file_name("a/b", at),
            "terminal-a_b-20260301-090705.log"
        );
    }

    #[test]
    fn test_missing_directory() {
        let at = Local::now();
        let result = write_export(Path::new("/definitely/not/here"), "s", "x", at);
        assert!(matches!(result, Err(ExportError::NoDirectory)));
    }
}
