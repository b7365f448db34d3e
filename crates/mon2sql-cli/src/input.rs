use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input {source_name} is larger than the {limit} byte limit")]
    TooLarge { source_name: String, limit: u64 },

    #[error("Failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        source: io::Error,
    },
}

/// Where the dump comes from. A missing path or `-` means stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => InputSource::Stdin,
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_path_buf()),
        }
    }

    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Reads the whole input, refusing anything over `limit` bytes.
    pub fn read_capped(&self, limit: u64) -> Result<Vec<u8>, InputError> {
        match self {
            InputSource::Stdin => read_capped(io::stdin().lock(), limit, self.name()),
            InputSource::File(path) => {
                let read_error = |source| InputError::Read {
                    source_name: self.name(),
                    source,
                };
                let file = File::open(path).map_err(read_error)?;
                let size = file.metadata().map_err(read_error)?.len();
                if size > limit {
                    return Err(InputError::TooLarge {
                        source_name: self.name(),
                        limit,
                    });
                }
                read_capped(file, limit, self.name())
            }
        }
    }
}

/// Reads at most one byte past `limit` so oversized streams are caught
/// without buffering them whole.
pub fn read_capped<R: Read>(
    reader: R,
    limit: u64,
    source_name: String,
) -> Result<Vec<u8>, InputError> {
    let mut buffer = Vec::new();
    if let Err(source) = reader.take(limit.saturating_add(1)).read_to_end(&mut buffer) {
        return Err(InputError::Read {
            source_name,
            source,
        });
    }
    if buffer.len() as u64 > limit {
        return Err(InputError::TooLarge { source_name, limit });
    }
    log::debug!("Read {} bytes from {source_name}", buffer.len());
    Ok(buffer)
}
