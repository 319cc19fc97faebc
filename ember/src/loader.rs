// Copyright (C) 2025 Ethan Uppal. All rights reserved.

use std::{fs, io, path::Path};

use thiserror::Error;
use tracing::debug;

use crate::arch::Word;

/// Problems reading or parsing a program source file. These are input
/// errors, not machine faults; the machine never sees a program that failed
/// to load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: invalid instruction byte {text:?}")]
    BadByte { line: usize, text: String },
}

/// Parses program source text: one base-2 instruction byte per line. A `#`
/// starts a comment running to the end of the line; blank and comment-only
/// lines are skipped.
pub fn parse_source(source: &str) -> Result<Vec<Word>, LoadError> {
    let mut image = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let byte = Word::from_str_radix(text, 2).map_err(|_| {
            LoadError::BadByte {
                line: index + 1,
                text: text.to_string(),
            }
        })?;
        image.push(byte);
    }
    Ok(image)
}

/// Reads and parses the program source at `path`.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Word>, LoadError> {
    let source = fs::read_to_string(path.as_ref())?;
    let image = parse_source(&source)?;
    debug!(
        bytes = image.len(),
        path = %path.as_ref().display(),
        "program source parsed"
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bytes_one_per_line() {
        let image = parse_source("10000010\n00000000\n00001000\n")
            .expect("source is well-formed");
        assert_eq!(vec![0b1000_0010, 0, 0b1000], image);
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let source = "\
# print8
10000010 # LDI r0, 8
00000000

00001000
   # indented comment only
00000001 # HLT
";
        let image = parse_source(source).expect("source is well-formed");
        assert_eq!(vec![0b1000_0010, 0, 0b1000, 0b1], image);
    }

    #[test]
    fn reports_the_offending_line() {
        let source = "10000010\n\nnot a byte\n";
        match parse_source(source) {
            Err(LoadError::BadByte { line, text }) => {
                assert_eq!(3, line);
                assert_eq!("not a byte", text);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bytes_wider_than_a_word() {
        assert!(matches!(
            parse_source("111111111\n"),
            Err(LoadError::BadByte { line: 1, .. })
        ));
    }

    #[test]
    fn missing_files_surface_as_io_errors() {
        assert!(matches!(
            load_file("does-not-exist.ember"),
            Err(LoadError::Io(_))
        ));
    }
}
