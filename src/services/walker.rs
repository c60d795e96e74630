//! Catalog walker.
//!
//! Follows a named path down the remote browse hierarchy and streams every
//! page of the leaf list over a channel, resuming pagination offsets and
//! flagging list completion. The walker keeps no state of its own; one call
//! to [`CatalogWalker::walk`] is one complete traversal.

use tokio::sync::mpsc;

use crate::bridge::BrowseService;
use crate::models::{BrowseAction, BrowseOpts, BrowsePath, Item, LoadOpts};
use crate::Result;

/// One page of leaf items delivered during a walk.
#[derive(Debug, Clone)]
pub struct WalkPage {
    pub items: Vec<Item>,
    /// True exactly once, on the page that completes the list.
    pub is_final: bool,
}

/// Path-following traversal over a [`BrowseService`].
pub struct CatalogWalker<'a, B: BrowseService + ?Sized> {
    service: &'a B,
}

impl<'a, B: BrowseService + ?Sized> CatalogWalker<'a, B> {
    pub fn new(service: &'a B) -> Self {
        Self { service }
    }

    /// Walk `path` starting from `root` and send every leaf page to `tx` in
    /// ascending offset order.
    ///
    /// Traversal dead-ends are silent: a non-list browse action, a stale or
    /// mismatched list title, or a navigation segment with no matching item
    /// all end the walk with zero further pages and `Ok(())`. Transport
    /// errors from the service propagate as `Err`. A closed receiver ends
    /// the walk early (the consumer has all the items it wants).
    pub async fn walk(
        &self,
        root: BrowseOpts,
        path: &BrowsePath,
        tx: mpsc::Sender<WalkPage>,
    ) -> Result<()> {
        let mut opts = root;

        // One iteration per hierarchy level entered.
        'descend: loop {
            let response = self.service.browse(&opts).await?;
            if response.action != BrowseAction::List {
                return Ok(());
            }
            let Some(list) = response.list else {
                return Ok(());
            };

            let mut offset = list.display_offset.max(0) as usize;

            loop {
                let page = self.service.load(&LoadOpts::at_offset(offset)).await?;
                let level = page.list.level;

                // A response for a different navigation position than the one
                // we asked for abandons the branch, not the process.
                if !path.matches_level(level, &page.list.title) {
                    tracing::debug!(
                        level,
                        title = %page.list.title,
                        "list title does not match path, abandoning branch"
                    );
                    return Ok(());
                }

                match path.segment(level) {
                    Some(segment) => {
                        // Navigation level: exact title, first match wins.
                        let matched = page
                            .items
                            .iter()
                            .find(|item| item.title == segment)
                            .and_then(|item| item.item_key.clone());
                        match matched {
                            Some(key) => {
                                opts = BrowseOpts::descend(key);
                                continue 'descend;
                            }
                            None => {
                                tracing::debug!(segment, "no matching item, ending walk");
                                return Ok(());
                            }
                        }
                    }
                    None => {
                        // Leaf-list level: this is a data page.
                        let end = page.offset + page.items.len();
                        let is_final = end >= page.list.count;

                        // An empty non-final page would never advance the
                        // offset; bail rather than re-fetch forever.
                        if page.items.is_empty() && !is_final {
                            tracing::warn!(offset, "empty page before end of list, ending walk");
                            return Ok(());
                        }

                        if tx
                            .send(WalkPage {
                                items: page.items,
                                is_final,
                            })
                            .await
                            .is_err()
                        {
                            return Ok(());
                        }
                        if is_final {
                            return Ok(());
                        }
                        offset = end;
                    }
                }
            }
        }
    }
}
