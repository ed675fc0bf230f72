use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Fetch a remote `search-index.js`, going through the local cache unless
/// `use_cache` is false.
pub fn fetch_index(url: &str, use_cache: bool) -> Result<String> {
    if !use_cache {
        return into_text(download_index(url)?);
    }

    let compressed_data = match load_from_cache(url) {
        Ok(data) => {
            debug!(url, "cache hit");
            data
        }
        Err(_) => download_and_cache(url)?,
    };

    let decompressed_data =
        zstd::decode_all(&compressed_data[..]).context("Failed to decompress zstd data")?;

    into_text(decompressed_data)
}

fn into_text(data: Vec<u8>) -> Result<String> {
    String::from_utf8(data).context("Search index is not valid UTF-8")
}

/// Get the cache directory path for downloaded indexes
fn get_cache_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("", "", "sidx").context("Failed to determine cache directory")?;
    Ok(proj_dirs.cache_dir().to_path_buf())
}

/// Cache file name for a URL. Bytes outside `[A-Za-z0-9.-]` (including `_`
/// itself) become `_xx` in hex, so distinct URLs never share a file.
fn cache_key(url: &str) -> String {
    let mut key = String::with_capacity(url.len() + 4);
    for byte in url.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
            key.push(byte as char);
        } else {
            key.push_str(&format!("_{:02x}", byte));
        }
    }
    key.push_str(".zst");
    key
}

fn get_cache_path(url: &str) -> Result<PathBuf> {
    Ok(get_cache_dir()?.join(cache_key(url)))
}

fn load_from_cache(url: &str) -> Result<Vec<u8>> {
    let cache_path = get_cache_path(url)?;
    fs::read(&cache_path).context("Cache miss")
}

fn save_to_cache(url: &str, data: &[u8]) -> Result<()> {
    let cache_path = get_cache_path(url)?;

    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&cache_path, data).context("Failed to save to cache")?;
    info!(path = %cache_path.display(), "saved to cache");
    Ok(())
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    zstd::encode_all(data, 0).context("Failed to compress search index")
}

fn download_index(url: &str) -> Result<Vec<u8>> {
    info!(url, "fetching search index");

    let mut response = ureq::get(url).call()?;
    let status = response.status();
    debug!(%status, "response");

    if status != 200 {
        anyhow::bail!("Failed to fetch search index (status: {})", status);
    }

    let mut data = Vec::new();
    response.body_mut().as_reader().read_to_end(&mut data)?;
    info!(bytes = data.len(), "downloaded");

    Ok(data)
}

fn download_and_cache(url: &str) -> Result<Vec<u8>> {
    let compressed_data = compress(&download_index(url)?)?;

    if let Err(e) = save_to_cache(url, &compressed_data) {
        warn!("Failed to cache data: {}", e);
    }

    Ok(compressed_data)
}

/// Clear the entire cache directory. Returns a status line for the user.
pub fn clear_cache() -> Result<String> {
    let cache_dir = get_cache_dir()?;

    if cache_dir.exists() {
        fs::remove_dir_all(&cache_dir).context("Failed to clear cache")?;
        Ok(format!("Cache cleared: {}", cache_dir.display()))
    } else {
        Ok("Cache directory does not exist".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_a_flat_file_name() {
        assert_eq!(
            cache_key("https://example.org/doc/search-index.js"),
            "https_3a_2f_2fexample.org_2fdoc_2fsearch-index.js.zst"
        );
    }

    #[test]
    fn cache_keys_do_not_collide() {
        let urls = [
            "http://h/a",
            "https://h/a",
            "https://h/a_b/c",
            "https://h/a/b_c",
            "https://h/a_2fb",
            "https://h/a/b",
        ];
        let keys: std::collections::HashSet<String> = urls.iter().map(|u| cache_key(u)).collect();
        assert_eq!(keys.len(), urls.len());
        assert!(keys.iter().all(|k| !k.contains('/')));
    }

    #[test]
    fn compression_round_trip() {
        let text = "var searchIndex = {};\ninitSearch(searchIndex);\n";
        let compressed = compress(text.as_bytes()).unwrap();
        let restored = zstd::decode_all(&compressed[..]).unwrap();
        assert_eq!(restored, text.as_bytes());
    }
}
