use thiserror::Error;

use crate::Symbol;

#[derive(Error, Debug)]
pub enum HufError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("no code was generated for symbol {0}")]
    MissingCode(Symbol),
    #[error("the tree is {0} levels deep, codes are limited to 64 bits")]
    CodeTooLong(usize),
    #[error("the file name is {0} bytes long and does not fit the artifact header")]
    NameTooLong(usize),
    /// Unreachable: 257 symbols give at most 513 entries. Guards the int32
    /// entry count of the artifact header.
    #[error("a table of {0} entries does not fit the artifact header")]
    TableTooLarge(usize),
    #[error("serialization failure: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("malformed properties: {0}")]
    Properties(String),
}

pub type Result<T> = std::result::Result<T, HufError>;
