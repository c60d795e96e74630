//! Scrape pipeline.
//!
//! Owns the working item list for a run and processes it strictly one item
//! at a time: fetch artwork with bounded retry, write it to disk, count
//! skips and write failures, report progress, and reset to idle when the
//! list is exhausted. Exactly one image fetch is ever in flight; the next
//! fetch starts only after the previous item's outcome is settled.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::bridge::{BrowseService, ImageOpts, ImageService, StatusSink};
use crate::models::{BrowseOpts, Item, ScrapeReport, ScrapeSettings};
use crate::services::walker::{CatalogWalker, WalkPage};
use crate::storage::ArtStore;
use crate::{Error, Result};

/// Total attempts per image: one initial fetch plus three retries.
pub const MAX_FETCH_ATTEMPTS: u32 = 4;

/// Backoff before retry `n` (1-based) is `n` times this.
const RETRY_BACKOFF_STEP: Duration = Duration::from_secs(1);

/// Buffered pages between the walker task and the pipeline.
const PAGE_CHANNEL_CAPACITY: usize = 8;

/// Working state of the active run. Reset to empty exactly when a run
/// completes or a new scrape is requested; nothing survives a reset.
#[derive(Debug, Default)]
struct PipelineState {
    items: Vec<Item>,
    /// Index of the next item to process. Invariant: `cursor <= items.len()`.
    cursor: usize,
    skip_count: usize,
    write_failures: usize,
    /// Set for the whole duration of a run, including enumeration, where
    /// `cursor == items.len()` alone cannot tell "idle" from "still empty".
    running: bool,
}

impl PipelineState {
    fn is_idle(&self) -> bool {
        !self.running && self.cursor == self.items.len()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sequential single-flight download pipeline over the service seams.
pub struct ScrapePipeline {
    browse: Arc<dyn BrowseService>,
    images: Arc<dyn ImageService>,
    status: Arc<dyn StatusSink>,
    store: ArtStore,
    state: Mutex<PipelineState>,
}

impl ScrapePipeline {
    pub fn new(
        browse: Arc<dyn BrowseService>,
        images: Arc<dyn ImageService>,
        status: Arc<dyn StatusSink>,
        store: ArtStore,
    ) -> Self {
        Self {
            browse,
            images,
            status,
            store,
            state: Mutex::new(PipelineState::default()),
        }
    }

    /// Whether the pipeline is between runs. Settings changes are only
    /// accepted while idle.
    pub fn is_idle(&self) -> bool {
        self.state_guard().is_idle()
    }

    fn state_guard(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().expect("pipeline state poisoned")
    }

    /// Run one scrape to completion.
    ///
    /// Returns [`Error::Busy`] when a run is already active. Every item
    /// outcome (saved, missing image key, exhausted retries, failed write)
    /// advances the cursor, so the run always terminates and the state
    /// always returns to idle.
    pub async fn run(&self, settings: &ScrapeSettings) -> Result<ScrapeReport> {
        settings.validate()?;

        {
            let mut state = self.state_guard();
            if !state.is_idle() {
                return Err(Error::Busy);
            }
            state.reset();
            state.running = true;
        }

        let result = self.run_inner(settings).await;

        // Terminal/reset transition, also on the error paths.
        self.state_guard().reset();

        result
    }

    async fn run_inner(&self, settings: &ScrapeSettings) -> Result<ScrapeReport> {
        let category = settings.category;
        self.store.ensure_category_dir(category)?;

        self.enumerate(settings).await;

        let total = self.state_guard().items.len();
        if total == 0 {
            tracing::info!(%category, "nothing to scrape");
            self.status.set_status("Scraping done!", false);
            return Ok(ScrapeReport::default());
        }

        tracing::info!(%category, total, "starting downloads");
        let image_opts = ImageOpts::fill_jpeg(settings.image_size);
        let mut saved = 0;

        loop {
            // Pop the next unprocessed item; the pre-increment cursor drives
            // the reported fraction, so the first item reports 0%.
            let next = {
                let mut state = self.state_guard();
                if state.cursor >= state.items.len() {
                    None
                } else {
                    let entry = state.items[state.cursor].clone();
                    let percent =
                        (state.cursor as f64 / state.items.len() as f64 * 100.0).round() as u32;
                    state.cursor += 1;
                    Some((entry, percent))
                }
            };
            let Some((entry, percent)) = next else {
                break;
            };

            self.status.set_status(
                &format!("Scraping library for {}... [{percent}%]", category.dir_name()),
                false,
            );

            let Some(image_key) = entry.image_key.as_deref() else {
                // An item without an image is unphotographed, not failed.
                tracing::info!(title = %entry.title, "no image key, skipping");
                self.state_guard().skip_count += 1;
                continue;
            };

            match self.fetch_with_retry(image_key, &image_opts).await {
                Ok(image) => match self.store.write_art(category, &entry.title, &image.bytes) {
                    Ok(path) => {
                        tracing::debug!(title = %entry.title, path = %path.display(), "saved");
                        saved += 1;
                    }
                    Err(e) => {
                        tracing::warn!(title = %entry.title, error = %e, "failed to write art");
                        self.state_guard().write_failures += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!(title = %entry.title, error = %e, "giving up on image");
                    self.state_guard().skip_count += 1;
                }
            }
        }

        let (skipped, write_failures) = {
            let state = self.state_guard();
            (state.skip_count, state.write_failures)
        };

        let mut message = "Scraping done!".to_string();
        if skipped > 0 {
            message.push_str(&format!(" ({skipped} skipped)"));
        }
        if write_failures > 0 {
            message.push_str(&format!(" ({write_failures} write failures)"));
        }
        self.status.set_status(&message, write_failures > 0);

        Ok(ScrapeReport {
            total,
            saved,
            skipped,
            write_failures,
        })
    }

    /// Fill the working list from a walker traversal, capped at
    /// `max_images`. Once the cap is reached further page items are dropped
    /// and the walker is cut off by closing the channel.
    async fn enumerate(&self, settings: &ScrapeSettings) {
        let (tx, mut rx) = mpsc::channel::<WalkPage>(PAGE_CHANNEL_CAPACITY);

        let browse = self.browse.clone();
        let path = settings.category.browse_path();
        let walker_task = tokio::spawn(async move {
            let walker = CatalogWalker::new(browse.as_ref());
            if let Err(e) = walker.walk(BrowseOpts::root(), &path, tx).await {
                // A failed traversal yields a shorter (or empty) list, not a
                // failed run.
                tracing::warn!(error = %e, "catalog walk aborted");
            }
        });

        let cap = settings.max_images;
        while let Some(page) = rx.recv().await {
            let full = {
                let mut state = self.state_guard();
                let room = cap.saturating_sub(state.items.len());
                state.items.extend(page.items.into_iter().take(room));
                state.items.len() >= cap
            };
            if page.is_final || full {
                break;
            }
        }

        drop(rx);
        let _ = walker_task.await;
    }

    /// Fetch one image, retrying with linearly increasing backoff. Returns
    /// the last error once the attempt budget is spent.
    async fn fetch_with_retry(
        &self,
        image_key: &str,
        opts: &ImageOpts,
    ) -> Result<crate::bridge::ImageData> {
        let mut retries = 0;
        loop {
            match self.images.get_image(image_key, opts).await {
                Ok(image) => return Ok(image),
                Err(e) => {
                    retries += 1;
                    if retries >= MAX_FETCH_ATTEMPTS {
                        return Err(e);
                    }
                    let delay = RETRY_BACKOFF_STEP * retries;
                    tracing::debug!(
                        image_key,
                        retry = retries,
                        delay_ms = delay.as_millis() as u64,
                        "image fetch failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
