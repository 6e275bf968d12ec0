use std::path::PathBuf;

use pedit_core::EditError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No known output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Coarse failure category, the vocabulary a front end reports in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyImage,
    Decode,
    Encode,
    OutOfBounds,
    InvalidArgument,
}

impl ImageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::Decode { .. } => ErrorKind::Decode,
            ImageError::Encode { .. } | ImageError::UnsupportedFormat(_) => ErrorKind::Encode,
            ImageError::Edit(EditError::EmptyImage) => ErrorKind::EmptyImage,
            ImageError::Edit(EditError::OutOfBounds(_)) => ErrorKind::OutOfBounds,
            ImageError::Edit(EditError::InvalidArgument(_)) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
