//! Document assembly
//!
//! This module drives the generation process:
//! 1. Validate the grid geometry once
//! 2. Split items into page groups
//! 3. Render every occupied slot of a page
//! 4. Hand the finished page to the sink and drop it

use crate::layout::GridGeometry;
use crate::options::SheetConfig;
use crate::paginate::{PageGroup, paginate};
use crate::render::{AssetResolver, Document, Page, PageSink, render_slot};
use crate::stats::calculate_statistics;
use crate::types::*;
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that stops an assembly run before its next page
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Renders print items into pages using one validated geometry.
pub struct Assembler<'r, R: ?Sized> {
    geometry: GridGeometry,
    resolver: &'r R,
    cancel: Option<CancelToken>,
}

impl<'r, R: AssetResolver + ?Sized> Assembler<'r, R> {
    /// Validate `config` and build an assembler. Fails before any item is
    /// looked at when the layout does not fit the page.
    pub fn new(config: &SheetConfig, resolver: &'r R) -> Result<Self> {
        Ok(Self::with_geometry(config.geometry()?, resolver))
    }

    /// Reuse an already validated geometry
    pub fn with_geometry(geometry: GridGeometry, resolver: &'r R) -> Self {
        Self {
            geometry,
            resolver,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn statistics(&self, item_count: usize) -> SheetStatistics {
        calculate_statistics(item_count, self.geometry.rows, self.geometry.cols)
    }

    /// Render the occupied slots of one page group
    pub fn render_page(&self, group: PageGroup<'_>) -> Result<Page> {
        let mut commands = Vec::new();
        for (slot, item) in group.slots(self.geometry.rows, self.geometry.cols) {
            commands.extend(render_slot(item, slot, &self.geometry, self.resolver)?);
        }

        Ok(Page {
            index: group.page_index,
            width: self.geometry.page_width,
            height: self.geometry.page_height,
            slots: group.len(),
            commands,
        })
    }

    /// Render pages one at a time and write each to `sink`.
    ///
    /// Returns the number of pages written.
    pub fn stream<S: PageSink + ?Sized>(
        &self,
        items: &[PrintItem],
        sink: &mut S,
    ) -> Result<usize> {
        let mut written = 0;
        for group in paginate(items, self.geometry.per_page()) {
            self.check_cancelled(written)?;
            let page = self.render_page(group)?;
            log::debug!(
                "Rendered page {} ({} slots, {} commands)",
                page.index,
                page.slots,
                page.commands.len()
            );
            sink.write_page(page)?;
            written += 1;
        }
        Ok(written)
    }

    /// Like [`Assembler::stream`], but renders a window of pages at a time on
    /// the rayon pool. Pages still reach the sink in page order.
    pub fn stream_parallel<S: PageSink + ?Sized>(
        &self,
        items: &[PrintItem],
        sink: &mut S,
    ) -> Result<usize> {
        let window = rayon::current_num_threads().max(1);
        let groups: Vec<PageGroup<'_>> = paginate(items, self.geometry.per_page()).collect();

        let mut written = 0;
        for chunk in groups.chunks(window) {
            self.check_cancelled(written)?;
            let pages: Vec<Result<Page>> = chunk
                .par_iter()
                .map(|group| self.render_page(*group))
                .collect();
            for page in pages {
                sink.write_page(page?)?;
                written += 1;
            }
            log::debug!("Wrote pages up to {}", written);
        }
        Ok(written)
    }

    /// Render all pages into an in-memory document
    pub fn assemble(&self, items: &[PrintItem]) -> Result<Document> {
        let mut document = Document::default();
        self.stream(items, &mut document)?;
        log::info!(
            "Assembled {} item(s) into {} page(s)",
            items.len(),
            document.page_count()
        );
        Ok(document)
    }

    fn check_cancelled(&self, pages_written: usize) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => {
                log::warn!("Generation cancelled after {} page(s)", pages_written);
                Err(SheetError::Cancelled { pages_written })
            }
            _ => Ok(()),
        }
    }
}

/// Assemble `items` into a document.
///
/// All or nothing: on any error no document is returned.
pub fn assemble<R: AssetResolver + ?Sized>(
    items: &[PrintItem],
    config: &SheetConfig,
    resolver: &R,
) -> Result<Document> {
    Assembler::new(config, resolver)?.assemble(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TemplateRef;

    struct AllowAll;

    impl AssetResolver for AllowAll {
        fn is_resolvable(&self, _image: &ImageRef) -> bool {
            true
        }
    }

    /// Sink that cancels the run after a number of pages
    struct CancelAfter {
        token: CancelToken,
        after: usize,
        pages: Vec<usize>,
    }

    impl PageSink for CancelAfter {
        fn write_page(&mut self, page: Page) -> Result<()> {
            self.pages.push(page.index);
            if self.pages.len() == self.after {
                self.token.cancel();
            }
            Ok(())
        }
    }

    fn items(n: usize) -> Vec<PrintItem> {
        let template = TemplateRef::new("tpl");
        (0..n)
            .map(|i| {
                PrintItem::new(
                    format!("{i}"),
                    format!("C{i}"),
                    format!("P{i}"),
                    template.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_zero_items_zero_pages() {
        let doc = assemble(&[], &SheetConfig::default(), &AllowAll).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_invalid_layout_fails_before_rendering() {
        let mut config = SheetConfig::default();
        config.grid.cols = 4;
        let err = assemble(&items(3), &config, &AllowAll).unwrap_err();
        assert!(matches!(err, SheetError::InvalidLayout { .. }));
    }

    #[test]
    fn test_cancel_stops_before_next_page() {
        let items = items(45);
        let token = CancelToken::new();
        let assembler = Assembler::new(&SheetConfig::default(), &AllowAll)
            .unwrap()
            .with_cancel(token.clone());
        let mut sink = CancelAfter {
            token,
            after: 2,
            pages: Vec::new(),
        };

        let err = assembler.stream(&items, &mut sink).unwrap_err();
        assert_eq!(err, SheetError::Cancelled { pages_written: 2 });
        assert_eq!(sink.pages, vec![0, 1]);
    }

    #[test]
    fn test_cancelled_token_writes_nothing() {
        let token = CancelToken::new();
        token.cancel();
        let assembler = Assembler::new(&SheetConfig::default(), &AllowAll)
            .unwrap()
            .with_cancel(token);
        let mut doc = Document::default();

        let err = assembler.stream_parallel(&items(5), &mut doc).unwrap_err();
        assert_eq!(err, SheetError::Cancelled { pages_written: 0 });
        assert!(doc.is_empty());
    }
}
