//! Image loading.
//!
//! [`load_images`] decodes every path on its own scoped thread and keeps
//! each result next to the index of the path it came from, so a failed
//! file never shifts the images after it.

use std::path::{Path, PathBuf};
use std::thread;

use image::{ImageError, ImageReader, RgbaImage};
use log::{debug, trace};
use thiserror::Error;

/// An image that could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    /// The decoding thread panicked.
    #[error("loader for {} panicked", path.display())]
    Panicked { path: PathBuf },
}

impl LoadError {
    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } | Self::Panicked { path } => path,
        }
    }
}

/// Decode one image file into RGBA8, guessing the format from its contents.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage, LoadError> {
    let path = path.as_ref();
    let io = |source: std::io::Error| LoadError::Io {
        path: path.to_owned(),
        source,
    };
    let image = ImageReader::open(path)
        .map_err(io)?
        .with_guessed_format()
        .map_err(io)?
        .decode()
        .map_err(|source| LoadError::Decode {
            path: path.to_owned(),
            source,
        })?;
    trace!(width = image.width(), height = image.height(); "Loaded {}", path.display());
    Ok(image.to_rgba8())
}

/// Load every path concurrently.
///
/// The result has one entry per input path, in input order, each tagged
/// with its index.
pub fn load_images<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<(usize, Result<RgbaImage, LoadError>)> {
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || load_image(path)))
            .collect();
        handles
            .into_iter()
            .zip(paths)
            .enumerate()
            .map(|(index, (handle, path))| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(LoadError::Panicked {
                        path: path.as_ref().to_owned(),
                    })
                });
                (index, result)
            })
            .collect()
    });

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    debug!(requested = paths.len(), failed = failed; "Loaded images");
    for (index, result) in &results {
        if let Err(e) = result {
            debug!(index = *index; "Image failed to load: {e}");
        }
    }
    results
}

/// Split loader output into the decoded images (in input order) and the
/// failures, each still tagged with its input index.
pub fn successful(
    results: Vec<(usize, Result<RgbaImage, LoadError>)>,
) -> (Vec<(usize, RgbaImage)>, Vec<(usize, LoadError)>) {
    let mut images = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (index, result) in results {
        match result {
            Ok(image) => images.push((index, image)),
            Err(e) => failures.push((index, e)),
        }
    }
    (images, failures)
}
