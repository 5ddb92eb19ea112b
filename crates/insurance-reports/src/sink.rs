//! Writes artifacts into the output directory

use insurance_core::driver::{Artifact, ArtifactSink};
use insurance_core::SinkError;
use std::path::{Path, PathBuf};

/// Saves every artifact as a file named after it. Existing files are replaced.
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the directory if needed
    pub fn create(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Paths written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    fn store(&mut self, artifact: &Artifact) -> Result<(), SinkError> {
        let path = self.dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.contents).map_err(|source| SinkError {
            file_name: artifact.file_name.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = artifact.contents.len(), mime = artifact.mime, "artifact written");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insurance_core::Period;
    use tempfile::TempDir;

    #[test]
    fn test_writes_named_files() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("reports");
        let mut sink = DirectorySink::create(&out).unwrap();
        let period = Period::new(2024, 4).unwrap();

        sink.store(&Artifact::summary(period, "\u{feff}a,b".to_string())).unwrap();

        let path = out.join("202404_월별합산.csv");
        assert_eq!(sink.written(), &[path.clone()]);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xef, 0xbb, 0xbf]);
    }

    #[test]
    fn test_raw_bytes_written_verbatim() {
        let tmp = TempDir::new().unwrap();
        let mut sink = DirectorySink::create(tmp.path()).unwrap();
        let period = Period::new(2024, 4).unwrap();
        let raw = vec![0xb0, 0xa1, b',', b'1'];

        sink.store(&Artifact::raw(period, insurance_core::InsuranceCategory::Health, raw.clone()))
            .unwrap();

        assert_eq!(std::fs::read(tmp.path().join("202404_건강.csv")).unwrap(), raw);
    }

    #[test]
    fn test_unwritable_directory_reports_file() {
        let tmp = TempDir::new().unwrap();
        let mut sink = DirectorySink::create(tmp.path()).unwrap();
        let period = Period::new(2024, 4).unwrap();
        let mut artifact = Artifact::summary(period, String::new());
        artifact.file_name = "missing/sub/dir.csv".to_string();

        let err = sink.store(&artifact).unwrap_err();
        assert_eq!(err.file_name, "missing/sub/dir.csv");
    }
}
