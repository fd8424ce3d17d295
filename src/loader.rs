//! Suffix list retrieval.
//!
//! Keeps a local copy of the public suffix list fresh and builds
//! [`SuffixList`]s from it. Only the public build API is used here.

use std::fs;
#[cfg(feature = "download")]
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
#[cfg(feature = "download")]
use tracing::info;
use tracing::{debug, warn};

use crate::error::{LoadErrorKind, Result, TldError};
use crate::list::{SharedSuffixList, SuffixList, SuffixListOptions};
use crate::parser::parse_rules_from_file;

/// Upstream location of the public suffix list
pub const DEFAULT_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// File name used inside a data directory
pub const DEFAULT_LIST_FILENAME: &str = "public_suffix_list.dat";

/// Default update interval: 7 days
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Loads the suffix list from disk, downloading it when missing or stale.
pub struct ListLoader {
    /// Explicit list file
    pub path: Option<PathBuf>,
    /// Directory holding [`DEFAULT_LIST_FILENAME`] when no path is set
    pub data_dir: Option<PathBuf>,
    /// Download URL, `None` disables downloading
    pub url: Option<String>,
    /// Age after which the local file is refreshed
    pub update_interval: Duration,
    /// Options for the built lists
    pub options: SuffixListOptions,
    download_lock: Mutex<()>,
}

impl Default for ListLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ListLoader {
    /// Create a loader for `./public_suffix_list.dat` that downloads from
    /// [`DEFAULT_LIST_URL`].
    pub fn new() -> Self {
        Self {
            path: None,
            data_dir: None,
            url: Some(DEFAULT_LIST_URL.to_string()),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            options: SuffixListOptions::default(),
            download_lock: Mutex::new(()),
        }
    }

    /// Set list file path
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set data directory
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set custom download URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Never download, only read the local file
    pub fn without_download(mut self) -> Self {
        self.url = None;
        self
    }

    /// Set update interval for checking file freshness.
    /// Default is 7 days (DEFAULT_UPDATE_INTERVAL)
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Set options for the built lists
    pub fn with_options(mut self, options: SuffixListOptions) -> Self {
        self.options = options;
        self
    }

    /// Local list file path
    pub fn list_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }

        match self.data_dir {
            Some(ref dir) => dir.join(DEFAULT_LIST_FILENAME),
            None => PathBuf::from(DEFAULT_LIST_FILENAME),
        }
    }

    /// Check if file needs download
    fn should_download(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => {
                if meta.len() == 0 {
                    return true;
                }
                match meta.modified() {
                    Ok(mtime) => SystemTime::now()
                        .duration_since(mtime)
                        .map(|d| d > self.update_interval)
                        .unwrap_or(true),
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }

    /// Download file from URL
    #[cfg(feature = "download")]
    fn download(&self, path: &Path, url: &str) -> Result<()> {
        let _lock = self.download_lock.lock();

        // Double-check after acquiring lock
        if !self.should_download(path) {
            return Ok(());
        }

        info!(path = %path.display(), url, "downloading suffix list");

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("tmp");

        let response = ureq::get(url).call().map_err(|e| {
            TldError::load(LoadErrorKind::DownloadFailed, format!("Download failed: {}", e))
        })?;

        let (_, body) = response.into_parts();
        write_tmp(&mut body.into_reader(), &tmp_path)?;

        if let Err(e) = verify_list_file(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(TldError::load(
                LoadErrorKind::DownloadFailed,
                format!("Verification failed: {}", e),
            ));
        }

        fs::rename(&tmp_path, path)?;

        info!(path = %path.display(), "downloaded suffix list");
        Ok(())
    }

    #[cfg(not(feature = "download"))]
    fn download(&self, _path: &Path, _url: &str) -> Result<()> {
        let _lock = self.download_lock.lock();
        Err(TldError::load(
            LoadErrorKind::NotConfigured,
            "built without the `download` feature",
        ))
    }

    /// Ensure the list file is present, downloading it if needed
    fn ensure_downloaded(&self) -> Result<PathBuf> {
        let path = self.list_path();
        debug!(path = %path.display(), "checking suffix list file");

        if !self.should_download(&path) {
            return Ok(path);
        }

        match self.url {
            Some(ref url) => {
                if let Err(e) = self.download(&path, url) {
                    if !path.exists() {
                        return Err(e);
                    }
                    warn!(error = %e, "download failed, using existing suffix list");
                }
            }
            None if !path.exists() => {
                return Err(TldError::load(
                    LoadErrorKind::FileError,
                    format!("suffix list '{}' not found", path.display()),
                ));
            }
            None => {}
        }

        Ok(path)
    }

    /// Load the list, refreshing the local file first if it is missing or stale
    pub fn load(&self) -> Result<SuffixList> {
        let path = self.ensure_downloaded()?;
        verify_list_file(&path)?;
        SuffixList::from_file(&path, self.options.clone())
    }

    /// Load the list and publish it into `shared`, returning the list it replaced
    pub fn refresh(&self, shared: &SharedSuffixList) -> Result<Arc<SuffixList>> {
        let list = self.load()?;
        Ok(shared.replace(list))
    }
}

/// Write `reader` to `tmp_path`, removing the partial file on failure
#[cfg(feature = "download")]
fn write_tmp(reader: &mut impl Read, tmp_path: &Path) -> Result<()> {
    let result = fs::File::create(tmp_path).and_then(|mut file| {
        std::io::copy(reader, &mut file)?;
        file.flush()
    });
    if let Err(e) = result {
        let _ = fs::remove_file(tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Check that a list file holds at least one usable rule
pub fn verify_list_file(path: &Path) -> Result<usize> {
    let rules = parse_rules_from_file(path)
        .map_err(|e| TldError::load(LoadErrorKind::FileError, e.to_string()))?;
    if rules.is_empty() {
        return Err(TldError::load(
            LoadErrorKind::InvalidData,
            format!("no rules in suffix list '{}'", path.display()),
        ));
    }
    Ok(rules.len())
}
