//! File-to-file compression helpers.
//!
//! Both helpers stream through buffered handles and never hold a whole file
//! in memory. The destination is only created once the source is known to be
//! usable, and it is removed again if encoding or decoding fails halfway.

use crate::config::CodecConfig;
use crate::decoder::HuffDecoder;
use crate::encoder::{CompressionStats, HuffEncoder};
use crate::header::Header;
use oxihuff_core::{HuffError, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Compress `src` into `dst`.
///
/// # Errors
///
/// - [`HuffError::FileNotFound`] if `src` does not exist
/// - [`HuffError::EmptyInput`] if `src` is empty; `dst` is not created
pub fn compress_file<P, Q>(src: P, dst: Q, config: &CodecConfig) -> Result<CompressionStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let src = src.as_ref();
    let dst = dst.as_ref();

    let mut reader = BufReader::with_capacity(config.buffer_size.max(1), open_source(src)?);
    if reader.fill_buf()?.is_empty() {
        return Err(HuffError::EmptyInput);
    }

    log::debug!("compressing {} -> {}", src.display(), dst.display());
    let encoder = HuffEncoder::new(*config);
    write_output(dst, config, |writer| encoder.encode_stream(&mut reader, writer))
}

/// Decompress `src` into `dst`, returning the number of bytes written.
///
/// The header is validated before `dst` is created, so a file with a corrupt
/// header leaves no output behind.
pub fn decompress_file<P, Q>(src: P, dst: Q, config: &CodecConfig) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let src = src.as_ref();
    let dst = dst.as_ref();

    let mut reader = BufReader::with_capacity(config.buffer_size.max(1), open_source(src)?);
    let header = Header::read_from(&mut reader)?;

    log::debug!("decompressing {} -> {}", src.display(), dst.display());
    let decoder = HuffDecoder::new(*config);
    write_output(dst, config, |writer| {
        decoder.decode_body(&header, &mut reader, writer)
    })
}

/// Open a source file, reporting a missing file as [`HuffError::FileNotFound`].
pub fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => HuffError::file_not_found(path),
        _ => HuffError::Io(e),
    })
}

/// Create `dst`, run `body` against it and flush, removing `dst` on failure.
fn write_output<T, F>(dst: &Path, config: &CodecConfig, body: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let mut writer = BufWriter::with_capacity(config.buffer_size.max(1), File::create(dst)?);

    let result = body(&mut writer).and_then(|value| {
        writer.flush()?;
        Ok(value)
    });

    if result.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(dst) {
            log::warn!("could not remove {}: {}", dst.display(), e);
        }
    }
    result
}
