
use std::fs;

use crate::{
    artifact::{self, Artifact},
    encoder::HuffmanEncoder,
    properties::Properties,
    Result,
};

/// Outcome of compressing one file.
pub struct Report {
    pub properties: Properties,
    pub encoder: HuffmanEncoder,
}

/// Compresses one file into `<stem>.huf` next to it.
#[derive(Clone, Debug, Default)]
pub struct Compressor {
    source_name: String,
    write_properties: bool,
}

impl Compressor {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self { source_name: source_name.into(), ..Default::default() }
    }

    /// Also store the run summary as `<artifact>.properties`.
    pub fn set_write_properties(mut self, write_properties: bool) -> Self {
        self.write_properties = write_properties;
        self
    }

    pub fn artifact_name(&self) -> String {
        artifact::output_name(&self.source_name)
    }

    pub fn properties_name(&self) -> String {
        format!("{}.properties", self.artifact_name())
    }

    /// Reads the whole source, encodes it and stores the artifact, preceded
    /// by the properties file when asked for. A failure at any step leaves
    /// neither file behind.
    pub fn compress(&self) -> Result<Report> {
        let data = fs::read(&self.source_name)?;

        let encoder = HuffmanEncoder::build(&data)?;
        let packed = encoder.encode(&data)?;

        let artifact_name = self.artifact_name();
        let artifact = Artifact::new(&self.source_name, encoder.table(), &packed.os);

        let properties = Properties {
            source: self.source_name.clone(),
            artifact: artifact_name.clone(),
            source_bytes: data.len(),
            symbols: encoder.frequencies().len(),
            entries: encoder.table().len(),
            encoded_bits: packed.written_bits,
            packed_bytes: packed.os.len(),
            artifact_bytes: artifact.size(),
        };

        if self.write_properties {
            let properties_name = self.properties_name();
            if let Err(e) = properties.store(&properties_name) {
                let _ = fs::remove_file(&properties_name);
                return Err(e);
            }
        }

        if let Err(e) = artifact.store(&artifact_name) {
            if self.write_properties {
                let _ = fs::remove_file(self.properties_name());
            }
            return Err(e);
        }

        Ok(Report { properties, encoder })
    }
}
