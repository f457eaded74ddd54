use crate::timetable::Timetable;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un emploi du temps depuis un support.
    fn load(&self) -> anyhow::Result<Timetable>;
    /// Sauvegarde de manière atomique.
    fn save(&self, timetable: &Timetable) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Timetable> {
        let data = fs::read(&self.path)
            .with_context(|| format!("reading timetable {}", self.path.display()))?;
        let timetable: Timetable = serde_json::from_slice(&data)
            .with_context(|| format!("parsing timetable {}", self.path.display()))?;
        timetable
            .validate_shape()
            .with_context(|| format!("malformed timetable {}", self.path.display()))?;
        Ok(timetable)
    }

    fn save(&self, timetable: &Timetable) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(timetable)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
