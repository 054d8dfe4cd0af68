//! `file://` sources: a plain local copy into the temp file.

use std::fs::File;
use std::io::Read;
use url::Url;

use super::error::FetchError;
use crate::storage::PartFile;

const BUF_SIZE: usize = 64 * 1024;

pub fn copy_file_url(url: &Url, part: &mut PartFile) -> Result<u64, FetchError> {
    let path = url.to_file_path().map_err(|()| {
        FetchError::Storage(anyhow::anyhow!("not a local file URL: {url}"))
    })?;
    let local_error = |source: std::io::Error| FetchError::Local {
        path: path.clone(),
        source,
    };

    let mut src = File::open(&path).map_err(local_error)?;
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = src.read(&mut buf).map_err(local_error)?;
        if n == 0 {
            break;
        }
        part.write_all(&buf[..n]).map_err(FetchError::Storage)?;
    }
    Ok(part.written())
}
