use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::ArchiveBuilder;
use crate::error::ArchiveError;

/// One named member of the delivery bundle.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// ZIP bundle builder for multi-file delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiveBuilder;

impl ArchiveBuilder for ZipArchiveBuilder {
    fn build(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
        if entries.is_empty() {
            return Err(ArchiveError::Build("no entries to bundle".to_string()));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        // PDFs are already compressed; Deflated still trims the wrappers.
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in entries {
            writer
                .start_file(entry.name.clone(), options)
                .map_err(|e| ArchiveError::Build(e.to_string()))?;
            writer.write_all(&entry.bytes)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| ArchiveError::Build(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_has_zip_magic_and_members() {
        let entries = vec![
            ArchiveEntry {
                name: "compressed_a.pdf".to_string(),
                bytes: b"%PDF-1.5 fake".to_vec(),
            },
            ArchiveEntry {
                name: "compressed_b.pdf".to_string(),
                bytes: b"%PDF-1.5 other".to_vec(),
            },
        ];
        let bytes = ZipArchiveBuilder.build(&entries).unwrap();
        assert!(bytes.starts_with(&[0x50, 0x4B]));
    }

    #[test]
    fn test_empty_bundle_is_an_error() {
        assert!(ZipArchiveBuilder.build(&[]).is_err());
    }
}
