use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::record::HandRecord;

/// Writes hand records as JSON Lines (one object per line, LF only).
pub struct HandWriter<W: Write> {
    writer: W,
    written: u64,
}

impl HandWriter<BufWriter<File>> {
    /// Create (or truncate) `path`, creating missing parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> HandWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> std::fmt::Debug for HandWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandWriter")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ActionRecord;

    #[test]
    fn test_write_to_memory() {
        let mut w = HandWriter::new(Vec::new());
        let rec = HandRecord {
            hand_id: Some("9".into()),
            actions: vec![ActionRecord {
                player: "Bob".into(),
                action: "folds".into(),
            }],
            ..Default::default()
        };
        w.write(&rec).unwrap();
        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(
            text,
            "{\"hand_id\":\"9\",\"players\":[],\"actions\":[{\"player\":\"Bob\",\"action\":\"folds\"}],\"board\":[]}\n"
        );
    }
}
