//! Single-stream HTTP GET via libcurl, plus a HEAD probe for existence checks.

use std::time::Duration;

use super::error::FetchError;
use crate::storage::PartFile;

/// Curl knobs shared by GET and HEAD.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Abort when slower than `low_speed_limit` bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Upper bound for one whole transfer.
    pub timeout: Duration,
    pub max_redirections: u32,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            timeout: Duration::from_secs(3600),
            max_redirections: 10,
        }
    }
}

fn configure(easy: &mut curl::easy::Easy, url: &str, opts: &CurlOptions) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    easy.timeout(opts.timeout)?;
    Ok(())
}

fn check_status(easy: &mut curl::easy::Easy) -> Result<(), FetchError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(())
}

/// Downloads `url` with a single GET, appending the body to `part`.
/// Returns the number of bytes written.
pub fn download_single(url: &str, part: &mut PartFile, opts: &CurlOptions) -> Result<u64, FetchError> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts)?;

    let mut write_error: Option<anyhow::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match part.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(FetchError::Storage(e));
    }
    performed?;
    check_status(&mut easy)?;
    Ok(part.written())
}

/// HEAD request; true when the server answers 2xx (after redirects).
pub fn probe_exists(url: &str, opts: &CurlOptions) -> Result<bool, FetchError> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts)?;
    easy.nobody(true)?;
    easy.perform()?;
    match check_status(&mut easy) {
        Ok(()) => Ok(true),
        Err(FetchError::Http(code)) => {
            tracing::debug!(url, code, "HEAD returned non-success status");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
