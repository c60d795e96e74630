//! In-memory fakes for the bridge service seams.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use artscraper::bridge::{
    BrowseService, ImageData, ImageOpts, ImageService, StatusSink,
};
use artscraper::models::{
    BrowseAction, BrowseList, BrowseOpts, BrowseResponse, Item, LoadOpts, LoadResponse,
};
use artscraper::{Error, Result};

/// One list node in the fake hierarchy.
#[derive(Debug, Clone)]
pub struct ListSpec {
    pub level: usize,
    pub title: String,
    pub items: Vec<Item>,
    pub display_offset: i64,
}

/// In-memory browse tree. `browse` moves a cursor between lists by item
/// key, `load` pages through the current list.
pub struct FakeCatalog {
    lists: HashMap<String, ListSpec>,
    position: Mutex<String>,
    page_size: usize,
    load_offsets: Mutex<Vec<usize>>,
}

pub const ROOT_KEY: &str = "";

impl FakeCatalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            lists: HashMap::new(),
            position: Mutex::new(ROOT_KEY.to_string()),
            page_size,
            load_offsets: Mutex::new(Vec::new()),
        }
    }

    /// Register the list reached by navigating into `key`.
    pub fn with_list(mut self, key: &str, spec: ListSpec) -> Self {
        self.lists.insert(key.to_string(), spec);
        self
    }

    /// A standard two-level library with an Albums leaf list.
    pub fn library_with_albums(albums: Vec<Item>, page_size: usize) -> Self {
        Self::new(page_size)
            .with_list(
                ROOT_KEY,
                ListSpec {
                    level: 0,
                    title: "Explore".to_string(),
                    items: vec![Item::with_keys("Library", Some("lib".to_string()), None)],
                    display_offset: 0,
                },
            )
            .with_list(
                "lib",
                ListSpec {
                    level: 1,
                    title: "Library".to_string(),
                    items: vec![
                        Item::with_keys("Artists", Some("artists".to_string()), None),
                        Item::with_keys("Albums", Some("albums".to_string()), None),
                    ],
                    display_offset: 0,
                },
            )
            .with_list(
                "albums",
                ListSpec {
                    level: 2,
                    title: "Albums".to_string(),
                    items: albums,
                    display_offset: 0,
                },
            )
    }

    /// Offsets every load request asked for, in order.
    pub fn load_offsets(&self) -> Vec<usize> {
        self.load_offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowseService for FakeCatalog {
    async fn browse(&self, opts: &BrowseOpts) -> Result<BrowseResponse> {
        let key = match &opts.item_key {
            Some(key) => key.clone(),
            None => ROOT_KEY.to_string(),
        };
        let Some(spec) = self.lists.get(&key) else {
            return Ok(BrowseResponse {
                action: BrowseAction::Other,
                list: None,
            });
        };
        *self.position.lock().unwrap() = key;
        Ok(BrowseResponse {
            action: BrowseAction::List,
            list: Some(BrowseList {
                level: spec.level,
                title: spec.title.clone(),
                count: spec.items.len(),
                display_offset: spec.display_offset,
            }),
        })
    }

    async fn load(&self, opts: &LoadOpts) -> Result<LoadResponse> {
        self.load_offsets.lock().unwrap().push(opts.offset);
        let position = self.position.lock().unwrap().clone();
        let spec = self
            .lists
            .get(&position)
            .ok_or_else(|| Error::service("load", "no list at cursor"))?;

        let start = opts.offset.min(spec.items.len());
        let end = (start + self.page_size).min(spec.items.len());
        Ok(LoadResponse {
            offset: opts.offset,
            list: BrowseList {
                level: spec.level,
                title: spec.title.clone(),
                count: spec.items.len(),
                display_offset: opts.set_display_offset as i64,
            },
            items: spec.items[start..end].to_vec(),
        })
    }
}

/// Image service over a fixed key/bytes map with scriptable failures and
/// in-flight accounting.
pub struct FakeImages {
    images: HashMap<String, Vec<u8>>,
    /// Failures served before success for a key; `usize::MAX` fails forever.
    failures: HashMap<String, usize>,
    latency: Duration,
    attempts: Mutex<HashMap<String, Vec<Duration>>>,
    start: tokio::time::Instant,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeImages {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            failures: HashMap::new(),
            latency: Duration::ZERO,
            attempts: Mutex::new(HashMap::new()),
            start: tokio::time::Instant::now(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_image(mut self, key: &str, bytes: &[u8]) -> Self {
        self.images.insert(key.to_string(), bytes.to_vec());
        self
    }

    /// Fail the first `count` fetches for `key`.
    pub fn failing(mut self, key: &str, count: usize) -> Self {
        self.failures.insert(key.to_string(), count);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Timestamps (relative to construction) of every attempt for `key`.
    pub fn attempt_times(&self, key: &str) -> Vec<Duration> {
        self.attempts
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn attempt_count(&self, key: &str) -> usize {
        self.attempt_times(key).len()
    }

    /// Highest number of fetches ever observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageService for FakeImages {
    async fn get_image(&self, image_key: &str, _opts: &ImageOpts) -> Result<ImageData> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let elapsed = self.start.elapsed();
        let attempt_no = {
            let mut attempts = self.attempts.lock().unwrap();
            let times = attempts.entry(image_key.to_string()).or_default();
            times.push(elapsed);
            times.len()
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let budget = self.failures.get(image_key).copied().unwrap_or(0);
        if attempt_no <= budget {
            return Err(Error::service("api/image", "simulated failure"));
        }

        match self.images.get(image_key) {
            Some(bytes) => Ok(ImageData {
                content_type: "image/jpeg".to_string(),
                bytes: bytes.clone(),
            }),
            None => Err(Error::service("api/image", "unknown image key")),
        }
    }
}

/// Status sink that records every message.
#[derive(Default)]
pub struct RecordingStatus {
    messages: Mutex<Vec<(String, bool)>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, bool)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages().last().map(|(m, _)| m.clone())
    }

    /// Percentages parsed out of progress messages, in order.
    pub fn percentages(&self) -> Vec<u32> {
        self.messages()
            .iter()
            .filter_map(|(m, _)| {
                let start = m.find('[')? + 1;
                let end = m.find("%]")?;
                m[start..end].parse().ok()
            })
            .collect()
    }
}

impl StatusSink for RecordingStatus {
    fn set_status(&self, message: &str, is_error: bool) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), is_error));
    }
}

/// `count` album items titled `Album 000`.. with image keys `img-000`...
pub fn albums_with_images(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::with_keys(
                format!("Album {i:03}"),
                Some(format!("key-{i:03}")),
                Some(format!("img-{i:03}")),
            )
        })
        .collect()
}

/// Image bytes for every key produced by [`albums_with_images`].
pub fn images_for(count: usize) -> FakeImages {
    let mut images = FakeImages::new();
    for i in 0..count {
        images = images.with_image(&format!("img-{i:03}"), b"jpeg-bytes");
    }
    images
}
