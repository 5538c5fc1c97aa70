use std::{collections::HashMap, fs::File, io::{BufReader, BufWriter, Read, Write}};

use java_properties::{PropertiesError, PropertiesWriter};
use serde::{Deserialize, Serialize};

use crate::{HufError, Result};

/// Summary of one compression run, stored next to the artifact as a
/// Java-style properties file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    pub source: String,
    pub artifact: String,
    #[serde(rename = "sourcebytes")]
    pub source_bytes: usize,
    pub symbols: usize,
    pub entries: usize,
    #[serde(rename = "encodedbits")]
    pub encoded_bits: usize,
    #[serde(rename = "packedbytes")]
    pub packed_bytes: usize,
    #[serde(rename = "artifactbytes")]
    pub artifact_bytes: usize,
}

impl From<PropertiesError> for HufError {
    fn from(e: PropertiesError) -> Self {
        HufError::Properties(e.to_string())
    }
}

impl Properties {
    fn pairs(&self) -> [(&'static str, String); 8] {
        [
            ("source", self.source.clone()),
            ("artifact", self.artifact.clone()),
            ("sourcebytes", self.source_bytes.to_string()),
            ("symbols", self.symbols.to_string()),
            ("entries", self.entries.to_string()),
            ("encodedbits", self.encoded_bits.to_string()),
            ("packedbytes", self.packed_bytes.to_string()),
            ("artifactbytes", self.artifact_bytes.to_string()),
        ]
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = PropertiesWriter::new(writer);

        writer.write_comment("huf properties")?;
        for (key, value) in self.pairs().iter() {
            writer.write(key, value)?;
        }
        writer.finish()?;

        Ok(())
    }

    pub fn store(&self, filename: &str) -> Result<()> {
        self.write_to(BufWriter::new(File::create(filename)?))
    }

    pub fn read<R: Read>(reader: R) -> Result<Self> {
        Self::try_from(java_properties::read(BufReader::new(reader))?)
    }

    pub fn load(filename: &str) -> Result<Self> {
        Self::read(File::open(filename)?)
    }
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = HufError;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        let text = |key: &str| {
            value
                .get(key)
                .cloned()
                .ok_or_else(|| HufError::Properties(format!("missing key {key}")))
        };
        let number = |key: &str| {
            text(key)?
                .trim()
                .parse::<usize>()
                .map_err(|e| HufError::Properties(format!("{key}: {e}")))
        };

        Ok(Properties {
            source: text("source")?,
            artifact: text("artifact")?,
            source_bytes: number("sourcebytes")?,
            symbols: number("symbols")?,
            entries: number("entries")?,
            encoded_bits: number("encodedbits")?,
            packed_bytes: number("packedbytes")?,
            artifact_bytes: number("artifactbytes")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Properties;
    use crate::HufError;

    fn sample() -> Properties {
        Properties {
            source: "dir name/report: v2.txt".to_string(),
            artifact: "dir name/report: v2.huf".to_string(),
            source_bytes: 4,
            symbols: 2,
            entries: 3,
            encoded_bits: 5,
            packed_bytes: 1,
            artifact_bytes: 76,
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let mut text = Vec::new();
        sample().write_to(&mut text).unwrap();

        let text = String::from_utf8(text).unwrap();
        assert!(text.starts_with('#') && text.contains("huf properties"));
        assert!(text.contains("symbols=2"));

        assert_eq!(Properties::read(text.as_bytes()).unwrap(), sample());
    }

    #[test]
    fn test_missing_key() {
        let mut map = HashMap::new();
        map.insert("source".to_string(), "a".to_string());

        match Properties::try_from(map) {
            Err(HufError::Properties(msg)) => assert_eq!(msg, "missing key artifact"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_number() {
        let text = "source=a\nartifact=a.huf\nsourcebytes=many\nsymbols=1\nentries=1\n\
                    encodedbits=0\npackedbytes=0\nartifactbytes=21\n";

        assert!(matches!(Properties::read(text.as_bytes()), Err(HufError::Properties(_))));
    }

    #[test]
    fn test_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"symbols\":2"));
        // Same keys as the properties file.
        for key in ["sourcebytes", "encodedbits", "packedbytes", "artifactbytes"] {
            assert!(json.contains(&format!("\"{key}\":")), "{key} missing from {json}");
        }
        assert_eq!(serde_json::from_str::<Properties>(&json).unwrap(), sample());
    }
}
