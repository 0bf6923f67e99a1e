//! Single-stream HTTP GET over libcurl.
//!
//! Used both for the share-link API call (small JSON body kept in memory) and
//! for the archive itself (streamed to a file).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::FetchConfig;

const MAX_REDIRECTIONS: u32 = 10;

fn easy_for(url: &str, opts: &FetchConfig) -> Result<curl::easy::Easy> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTIONS)?;
    easy.connect_timeout(Duration::from_secs(opts.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(opts.timeout_secs))?;
    easy.useragent(concat!("gridtiff/", env!("CARGO_PKG_VERSION")))?;
    Ok(easy)
}

fn check_status(easy: &mut curl::easy::Easy, url: &str) -> Result<()> {
    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(())
}

/// GETs `url` and returns the whole response body.
pub fn get_bytes(url: &str, opts: &FetchConfig) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut easy = easy_for(url, opts)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }
    check_status(&mut easy, url)?;
    Ok(body)
}

/// Downloads `url` into `dest` (created or truncated). Returns the number of bytes written.
pub fn download_to_path(url: &str, dest: &Path, opts: &FetchConfig) -> Result<u64> {
    let file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    let mut out = BufWriter::new(file);
    let mut written = 0u64;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = easy_for(url, opts)?;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match out.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("archive write failed: {}", e);
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Some(e) = write_error {
        return Err(e).with_context(|| format!("write {}", dest.display()));
    }
    performed.context("GET request failed")?;
    check_status(&mut easy, url)?;

    out.flush().with_context(|| format!("flush {}", dest.display()))?;
    tracing::debug!(url, bytes = written, dest = %dest.display(), "download finished");
    Ok(written)
}
