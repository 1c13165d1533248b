#![allow(dead_code)]

//! Scripted driver and prompt for exercising workflows without a browser.

use async_trait::async_trait;
use sipd_bot::prompt::OperatorPrompt;
use sipd_browser::{DownloadedFile, Error, PortalDriver, Result, Target};
use sipd_core::session::CookieRecord;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// One recorded driver call, coarse enough to assert a workflow's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Goto(String),
    Reload,
    BringToFront,
    WaitVisible(String),
    IsAttached(String),
    Click(String),
    TypeText(String, String),
    ClearInput(String),
    PressKey(String, String),
    Count(String),
    Scroll(String),
    WaitForUrl(String),
    Download(String),
    Cookies,
    SetCookies(usize),
}

/// In-memory driver the tests script ahead of time.
///
/// Defaults are a healthy page: element interactions succeed, nothing is
/// attached, counts are zero. Tests mark targets absent (interactions time
/// out), attached (probes return true), queue one-shot errors, or queue
/// count values; everything is keyed by the target's display form.
pub struct FakeDriver {
    calls: Mutex<Vec<Call>>,
    attached: Mutex<HashSet<String>>,
    absent: Mutex<HashSet<String>>,
    fail_queue: Mutex<HashMap<String, VecDeque<Error>>>,
    counts: Mutex<HashMap<String, VecDeque<usize>>>,
    url: Mutex<String>,
    url_waits: Mutex<VecDeque<bool>>,
    cookie_jar: Mutex<Vec<CookieRecord>>,
    injected: Mutex<Vec<Vec<CookieRecord>>>,
    staging: TempDir,
    download_seq: AtomicUsize,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            attached: Mutex::new(HashSet::new()),
            absent: Mutex::new(HashSet::new()),
            fail_queue: Mutex::new(HashMap::new()),
            counts: Mutex::new(HashMap::new()),
            url: Mutex::new(String::new()),
            url_waits: Mutex::new(VecDeque::new()),
            cookie_jar: Mutex::new(Vec::new()),
            injected: Mutex::new(Vec::new()),
            staging: TempDir::new().expect("staging dir"),
            download_seq: AtomicUsize::new(0),
        }
    }

    /// Interactions with `target` time out from now on.
    pub fn mark_absent(&self, target: &Target) {
        self.absent.lock().unwrap().insert(target.to_string());
    }

    /// Attachment probes for `target` report true from now on.
    pub fn mark_attached(&self, target: &Target) {
        self.attached.lock().unwrap().insert(target.to_string());
    }

    /// The next interaction with `target` fails with `err`.
    pub fn fail_once(&self, target: &Target, err: Error) {
        self.fail_queue
            .lock()
            .unwrap()
            .entry(target.to_string())
            .or_default()
            .push_back(err);
    }

    /// Queue the value the next `count` of `target` reports.
    pub fn push_count(&self, target: &Target, n: usize) {
        self.counts
            .lock()
            .unwrap()
            .entry(target.to_string())
            .or_default()
            .push_back(n);
    }

    /// Queue the outcome of the next URL wait. With the queue empty, the
    /// wait falls back to substring-matching the last `goto` URL.
    pub fn push_url_wait(&self, ok: bool) {
        self.url_waits.lock().unwrap().push_back(ok);
    }

    pub fn set_cookie_jar(&self, cookies: Vec<CookieRecord>) {
        *self.cookie_jar.lock().unwrap() = cookies;
    }

    /// Cookie batches passed to `set_cookies`, oldest first.
    pub fn injected(&self) -> Vec<Vec<CookieRecord>> {
        self.injected.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_of(&self, matcher: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matcher(c)).count()
    }

    pub fn clicks_on(&self, target: &Target) -> usize {
        let key = target.to_string();
        self.count_of(|c| matches!(c, Call::Click(t) if *t == key))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(&self, key: &str) -> Option<Error> {
        self.fail_queue.lock().unwrap().get_mut(key)?.pop_front()
    }

    /// Scripted failure, else timeout when marked absent, else success.
    fn interact(&self, key: &str, timeout: Duration) -> Result<()> {
        if let Some(err) = self.take_failure(key) {
            return Err(err);
        }
        if self.absent.lock().unwrap().contains(key) {
            return Err(Error::Timeout(format!(
                "after {}s waiting for {}",
                timeout.as_secs(),
                key
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PortalDriver for FakeDriver {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<()> {
        self.record(Call::Goto(url.to_string()));
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.url.lock().unwrap().clone())
    }

    async fn reload(&self) -> Result<()> {
        self.record(Call::Reload);
        Ok(())
    }

    async fn bring_to_front(&self) -> Result<()> {
        self.record(Call::BringToFront);
        Ok(())
    }

    async fn wait_visible(&self, target: &Target, timeout: Duration) -> Result<()> {
        let key = target.to_string();
        self.record(Call::WaitVisible(key.clone()));
        self.interact(&key, timeout)
    }

    async fn is_attached(&self, target: &Target, _timeout: Duration) -> bool {
        let key = target.to_string();
        self.record(Call::IsAttached(key.clone()));
        self.attached.lock().unwrap().contains(&key)
    }

    async fn click(&self, target: &Target, timeout: Duration) -> Result<()> {
        let key = target.to_string();
        self.record(Call::Click(key.clone()));
        self.interact(&key, timeout)
    }

    async fn type_text(&self, target: &Target, text: &str, timeout: Duration) -> Result<()> {
        let key = target.to_string();
        self.record(Call::TypeText(key.clone(), text.to_string()));
        self.interact(&key, timeout)
    }

    async fn clear_input(&self, target: &Target, timeout: Duration) -> Result<()> {
        let key = target.to_string();
        self.record(Call::ClearInput(key.clone()));
        self.interact(&key, timeout)
    }

    async fn press_key(&self, target: &Target, key_name: &str, timeout: Duration) -> Result<()> {
        let key = target.to_string();
        self.record(Call::PressKey(key.clone(), key_name.to_string()));
        self.interact(&key, timeout)
    }

    async fn count(&self, target: &Target) -> Result<usize> {
        let key = target.to_string();
        self.record(Call::Count(key.clone()));
        let popped = self.counts.lock().unwrap().get_mut(&key).and_then(|q| q.pop_front());
        Ok(popped.unwrap_or(0))
    }

    async fn scroll_into_view(&self, target: &Target, timeout: Duration) -> Result<()> {
        let key = target.to_string();
        self.record(Call::Scroll(key.clone()));
        self.interact(&key, timeout)
    }

    async fn wait_for_url_contains(&self, fragment: &str, _timeout: Duration) -> Result<()> {
        self.record(Call::WaitForUrl(fragment.to_string()));
        if let Some(ok) = self.url_waits.lock().unwrap().pop_front() {
            return if ok {
                Ok(())
            } else {
                Err(Error::Timeout(format!("waiting for URL {}", fragment)))
            };
        }
        if self.url.lock().unwrap().contains(fragment) {
            Ok(())
        } else {
            Err(Error::Timeout(format!("waiting for URL {}", fragment)))
        }
    }

    async fn download_via(&self, target: &Target, timeout: Duration) -> Result<DownloadedFile> {
        let key = target.to_string();
        self.record(Call::Download(key.clone()));
        self.interact(&key, timeout)?;

        let n = self.download_seq.fetch_add(1, Ordering::SeqCst);
        let path = self.staging.path().join(format!("dl-{}", n));
        std::fs::write(&path, b"portal bytes")?;
        Ok(DownloadedFile {
            path,
            suggested_name: format!("portal-{}.bin", n),
        })
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>> {
        self.record(Call::Cookies);
        Ok(self.cookie_jar.lock().unwrap().clone())
    }

    async fn set_cookies(&self, cookies: &[CookieRecord]) -> Result<()> {
        self.record(Call::SetCookies(cookies.len()));
        self.injected.lock().unwrap().push(cookies.to_vec());
        Ok(())
    }
}

/// Prompt that answers immediately and counts how often it was shown.
pub struct CountingPrompt {
    pauses: AtomicUsize,
}

impl CountingPrompt {
    pub fn new() -> Self {
        Self {
            pauses: AtomicUsize::new(0),
        }
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OperatorPrompt for CountingPrompt {
    async fn pause(&self, _message: &str) -> sipd_bot::Result<()> {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A plausible session cookie for auth tests.
pub fn sample_cookie(name: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: "abc123".to_string(),
        domain: "sipd.kemendagri.go.id".to_string(),
        path: "/".to_string(),
        expires: 4102444800.0,
        http_only: true,
        secure: true,
        same_site: Some("Lax".to_string()),
    }
}
