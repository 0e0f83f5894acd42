//! Retrieval of the API description.
//!
//! Network retrieval is the only point where a run can wait on the outside
//! world, so it runs on a helper thread and the caller waits on the result,
//! a cancellation signal and a deadline, whichever comes first.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::error::{Error, Result};

/// Default retrieval deadline.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the API description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// HTTP(S) URL
    Url(String),
    /// Local file
    File(PathBuf),
    /// In-memory document
    Bytes(Vec<u8>),
}

impl SpecSource {
    /// Interpret a command-line style location: `http://` and `https://`
    /// prefixes are URLs, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let lower = location.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SpecSource::Url(location.trim().to_string())
        } else {
            SpecSource::File(PathBuf::from(location))
        }
    }

    /// Human-readable location for messages.
    pub fn location(&self) -> String {
        match self {
            SpecSource::Url(url) => url.clone(),
            SpecSource::File(path) => path.display().to_string(),
            SpecSource::Bytes(data) => format!("<{} bytes>", data.len()),
        }
    }

    /// Load the raw document, honouring `timeout` and `cancel` for URLs.
    pub fn load(&self, timeout: Duration, cancel: &CancelToken) -> Result<Vec<u8>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match self {
            SpecSource::Url(url) => {
                let target = url.clone();
                with_deadline(url, timeout, cancel, move || fetch_url(&target, timeout))
            }
            SpecSource::File(path) => std::fs::read(path).map_err(|e| Error::Fetch {
                location: path.display().to_string(),
                message: e.to_string(),
            }),
            SpecSource::Bytes(data) => Ok(data.clone()),
        }
    }
}

/// Run `task` on a helper thread and wait for it, a cancellation or the deadline.
///
/// On timeout or cancellation the helper is detached; its result is discarded.
pub fn with_deadline<T, F>(
    location: &str,
    timeout: Duration,
    cancel: &CancelToken,
    task: F,
) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::Builder::new()
        .name("specdoc-fetch".to_string())
        .spawn(move || {
            let _ = tx.send(task());
        })?;

    let deadline = crossbeam_channel::after(timeout);
    crossbeam_channel::select! {
        recv(rx) -> msg => msg.unwrap_or_else(|_| Err(Error::Fetch {
            location: location.to_string(),
            message: "fetch worker exited without a result".to_string(),
        })),
        recv(cancel.signal) -> _ => Err(Error::Cancelled),
        recv(deadline) -> _ => Err(Error::FetchTimeout {
            location: location.to_string(),
            timeout,
        }),
    }
}

#[cfg(feature = "fetch")]
fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    log::info!("Fetching API description from {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

#[cfg(not(feature = "fetch"))]
fn fetch_url(url: &str, _timeout: Duration) -> Result<Vec<u8>> {
    Err(Error::Fetch {
        location: url.to_string(),
        message: "built without the `fetch` feature".to_string(),
    })
}

/// Create a linked cancellation handle and token.
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let flag = Arc::new(AtomicBool::new(false));
    let (tx, rx) = crossbeam_channel::bounded(1);
    let handle = CancelHandle {
        flag: flag.clone(),
        signal: tx.clone(),
    };
    let token = CancelToken {
        flag,
        signal: rx,
        _keepalive: tx,
    };
    (handle, token)
}

/// Requests cancellation of a pending run.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
    signal: Sender<()>,
}

impl CancelHandle {
    /// Cancel the run. Has no effect once rendering has started.
    pub fn cancel(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            let _ = self.signal.try_send(());
        }
    }
}

/// Observes cancellation requests.
#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    signal: Receiver<()>,
    // Keeps the channel connected after every handle is dropped.
    _keepalive: Sender<()>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn none() -> Self {
        cancellation().1
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            SpecSource::parse("https://petstore.swagger.io/v2/swagger.json"),
            SpecSource::Url("https://petstore.swagger.io/v2/swagger.json".to_string())
        );
        assert_eq!(
            SpecSource::parse("api/swagger.json"),
            SpecSource::File(PathBuf::from("api/swagger.json"))
        );
    }

    #[test]
    fn test_deadline_elapses() {
        let start = Instant::now();
        let result: Result<()> = with_deadline(
            "slow",
            Duration::from_millis(50),
            &CancelToken::none(),
            || {
                thread::sleep(Duration::from_secs(2));
                Ok(())
            },
        );
        assert!(matches!(result, Err(Error::FetchTimeout { .. })));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_task_result_is_returned() {
        let result = with_deadline("fast", Duration::from_secs(5), &CancelToken::none(), || {
            Ok(vec![1u8, 2, 3])
        });
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_interrupts_wait() {
        let (handle, token) = cancellation();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.cancel();
        });
        let result: Result<()> = with_deadline("slow", Duration::from_secs(10), &token, || {
            thread::sleep(Duration::from_secs(2));
            Ok(())
        });
        canceller.join().unwrap();
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_before_load() {
        let (handle, token) = cancellation();
        handle.cancel();
        let source = SpecSource::Bytes(b"{}".to_vec());
        assert!(matches!(
            source.load(DEFAULT_FETCH_TIMEOUT, &token),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_dropped_handle_does_not_cancel() {
        let (handle, token) = cancellation();
        drop(handle);
        let result = with_deadline("fast", Duration::from_secs(5), &token, || {
            thread::sleep(Duration::from_millis(10));
            Ok(7)
        });
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_missing_file_is_fetch_error() {
        let source = SpecSource::File(PathBuf::from("/definitely/not/here.json"));
        let err = source
            .load(DEFAULT_FETCH_TIMEOUT, &CancelToken::none())
            .unwrap_err();
        assert!(err.is_fetch_error());
    }
}
