#[cfg(test)]
mod tests;

use std::{fs, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{huffman_table::{HuffmanTable, TableEntry}, HufError, Result};

pub const ARTIFACT_EXTENSION: &str = "huf";

/// A table entry as stored in the artifact: three little-endian int32,
/// `-1` standing for "no glyph" and "no child". The frequency is not stored.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryRecord {
    pub glyph: i32,
    pub left_child: i32,
    pub right_child: i32,
}

impl From<&TableEntry> for EntryRecord {
    fn from(entry: &TableEntry) -> Self {
        let index = |child: Option<usize>| child.map_or(-1, |i| i as i32);

        Self {
            glyph: entry.glyph().map_or(-1, i32::from),
            left_child: index(entry.left_child()),
            right_child: index(entry.right_child()),
        }
    }
}

/// Replaces whatever follows the last `.` of the file name with
/// `extension`. Dots in directory names are left alone.
pub fn replace_extension(source_name: &str, extension: &str) -> String {
    let path = Path::new(source_name);
    let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(pos) => &file_name[..pos],
        None => &file_name[..],
    };

    path.with_file_name(format!("{stem}.{extension}")).to_string_lossy().into_owned()
}

/// `report.txt` becomes `report.huf`, `README` becomes `README.huf`.
pub fn output_name(source_name: &str) -> String {
    replace_extension(source_name, ARTIFACT_EXTENSION)
}

/// The compressed file: name header, merge tree, packed stream.
///
/// ```text
/// [i32 name_len][name][i32 entry_count]
/// entry_count x [i32 glyph][i32 left_child][i32 right_child]
/// [packed stream up to the end of file]
/// ```
pub struct Artifact<'a> {
    pub name: &'a str,
    pub table: &'a HuffmanTable,
    pub payload: &'a [u8],
}

impl<'a> Artifact<'a> {
    pub fn new(name: &'a str, table: &'a HuffmanTable, payload: &'a [u8]) -> Self {
        Self { name, table, payload }
    }

    /// Size in bytes of the serialized artifact.
    pub fn size(&self) -> usize {
        4 + self.name.len() + 4 + 12 * self.table.len() + self.payload.len()
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let name_len = i32::try_from(self.name.len())
            .map_err(|_| HufError::NameTooLong(self.name.len()))?;
        // Never above 513 entries.
        let entry_count = i32::try_from(self.table.len())
            .map_err(|_| HufError::TableTooLarge(self.table.len()))?;

        bincode::serialize_into(&mut writer, &name_len)?;
        writer.write_all(self.name.as_bytes())?;
        bincode::serialize_into(&mut writer, &entry_count)?;

        for entry in self.table.entries() {
            bincode::serialize_into(&mut writer, &EntryRecord::from(entry))?;
        }

        writer.write_all(self.payload)?;
        writer.flush()?;

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.size());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Writes the artifact to `path` through a temporary sibling file, so a
    /// failed run never leaves a truncated artifact behind.
    pub fn store(&self, path: &str) -> Result<usize> {
        let bytes = self.to_bytes()?;
        let temp = format!("{path}.tmp");

        let stored = fs::write(&temp, &bytes).and_then(|_| fs::rename(&temp, path));
        if let Err(e) = stored {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        Ok(bytes.len())
    }
}
