// Text input: files (plain text or PDF) and stdin
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{NlpError, NlpResult};

pub fn read_file(path: &Path) -> NlpResult<String> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "txt" | "md" | "csv" | "json" => {
            let io_err = |source| NlpError::Io {
                path: path.to_path_buf(),
                source,
            };
            let mut file = File::open(path).map_err(io_err)?;
            let mut content = String::new();
            file.read_to_string(&mut content).map_err(io_err)?;
            Ok(content)
        }
        "pdf" => pdf_extract::extract_text(path).map_err(|e| NlpError::Pdf(e.to_string())),
        _ => Err(NlpError::UnsupportedFormat(ext)),
    }
}

pub fn read_stdin() -> NlpResult<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| NlpError::Io {
            path: "<stdin>".into(),
            source,
        })?;
    Ok(content)
}
