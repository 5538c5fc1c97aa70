use std::{env, fs, path::Path};

use crate::{encoder::HuffmanEncoder, huffman_table::TableEntry, HufError, EOS};

use super::{output_name, replace_extension, Artifact, EntryRecord};

#[test]
fn test_output_name_strips_extension() {
    assert_eq!(output_name("report.txt"), "report.huf");
    assert_eq!(output_name("archive.tar.gz"), "archive.tar.huf");
}

#[test]
fn test_output_name_without_extension() {
    assert_eq!(output_name("README"), "README.huf");
}

#[test]
fn test_output_name_ignores_dots_in_directories() {
    assert_eq!(output_name("data.d/README"), "data.d/README.huf");
    assert_eq!(output_name("data.d/report.txt"), "data.d/report.huf");
}

#[test]
fn test_replace_extension() {
    assert_eq!(replace_extension("report.txt", "properties"), "report.properties");
}

#[test]
fn test_entry_records() {
    let leaf = TableEntry::Leaf { glyph: EOS, frequency: 7 };
    let merge = TableEntry::Merge { frequency: 9, left: 3, right: 4 };

    assert_eq!(
        EntryRecord::from(&leaf),
        EntryRecord { glyph: 256, left_child: -1, right_child: -1 }
    );
    assert_eq!(EntryRecord::from(&merge), EntryRecord { glyph: -1, left_child: 3, right_child: 4 });
}

#[test]
fn test_artifact_layout() {
    let input = [0x41; 4];
    let encoder = HuffmanEncoder::build(&input).unwrap();
    let packed = encoder.encode(&input).unwrap();
    let artifact = Artifact::new("a.txt", encoder.table(), &packed.os);

    let mut expected = Vec::new();
    expected.extend(5i32.to_le_bytes());
    expected.extend(b"a.txt");
    expected.extend(3i32.to_le_bytes());
    for value in [-1i32, 1, 2, 0x41, -1, -1, 256, -1, -1] {
        expected.extend(value.to_le_bytes());
    }
    expected.push(0x10);

    let bytes = artifact.to_bytes().unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), artifact.size());
}

#[test]
fn test_empty_input_artifact() {
    let encoder = HuffmanEncoder::build(b"").unwrap();
    let packed = encoder.encode(b"").unwrap();
    let bytes = Artifact::new("empty", encoder.table(), &packed.os).to_bytes().unwrap();

    let mut expected = Vec::new();
    expected.extend(5i32.to_le_bytes());
    expected.extend(b"empty");
    expected.extend(1i32.to_le_bytes());
    for value in [256i32, -1, -1] {
        expected.extend(value.to_le_bytes());
    }

    assert_eq!(bytes, expected);
}

#[test]
fn test_store_replaces_atomically() {
    let path = env::temp_dir().join(format!("huf_artifact_store_{}.huf", std::process::id()));
    let path = path.to_string_lossy().into_owned();

    let encoder = HuffmanEncoder::build(b"abc").unwrap();
    let packed = encoder.encode(b"abc").unwrap();
    let artifact = Artifact::new("abc.txt", encoder.table(), &packed.os);

    fs::write(&path, b"stale").unwrap();
    let written = artifact.store(&path).unwrap();

    assert_eq!(written, artifact.size());
    assert_eq!(fs::read(&path).unwrap(), artifact.to_bytes().unwrap());
    assert!(!Path::new(&format!("{path}.tmp")).exists());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_store_into_missing_directory_fails_cleanly() {
    let dir = env::temp_dir().join(format!("huf_missing_dir_{}", std::process::id()));
    let path = dir.join("out.huf").to_string_lossy().into_owned();

    let encoder = HuffmanEncoder::build(b"abc").unwrap();
    let packed = encoder.encode(b"abc").unwrap();
    let result = Artifact::new("abc.txt", encoder.table(), &packed.os).store(&path);

    assert!(matches!(result, Err(HufError::Io(_))));
    assert!(!Path::new(&path).exists());
}
