//! A user's registration table.
//!
//! [`RegistrationTable`] owns the current [`RegistrationTableView`], the
//! highlighted [`NewItem`] and the single pending task that clears it. All
//! mutations go through `&mut self`, so one session is one writer.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tracing::debug;

use crate::{
    DeleteTarget, DraftRecord, EngineError, NewItem, RegistrationNumber, RegistrationRecord,
    RegistrationTableView, ResultEngine,
    timer::{Timer, TimerHandle, TokioTimer},
};

/// How long a newly added item stays highlighted.
pub const NEW_ITEM_HIGHLIGHT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Default)]
struct Highlight {
    item: Option<NewItem>,
    /// Generation token used to invalidate stale expiry tasks.
    generation: u64,
}

pub struct RegistrationTable {
    view: RegistrationTableView,
    previous: Option<RegistrationTableView>,
    highlight: Arc<Mutex<Highlight>>,
    pending: Option<TimerHandle>,
    timer: Arc<dyn Timer>,
    highlight_for: Duration,
}

impl RegistrationTable {
    /// Return a builder for `RegistrationTable`. Help to build the struct.
    pub fn builder() -> RegistrationTableBuilder {
        RegistrationTableBuilder::default()
    }

    #[must_use]
    pub fn view(&self) -> &RegistrationTableView {
        &self.view
    }

    /// The highlighted item, until it expires.
    #[must_use]
    pub fn new_item(&self) -> Option<NewItem> {
        self.lock_highlight().item.clone()
    }

    /// Replaces the table content with freshly fetched drafts and history.
    pub fn load(&mut self, drafts: Vec<DraftRecord>, registrations: Vec<RegistrationRecord>) {
        self.clear_new_item();
        self.previous = None;
        self.view = RegistrationTableView::build(drafts, registrations);
        debug!(rows = self.view.registration_count(), "loaded registration table");
    }

    /// Adds an item on top of the table and highlights it.
    ///
    /// A previously highlighted item is replaced immediately and its expiry
    /// is cancelled.
    pub fn apply_new_item(&mut self, item: NewItem) {
        self.cancel_pending();
        self.previous = None;
        self.view = self.view.apply_new_item(&item);

        let generation = {
            let mut highlight = self.lock_highlight();
            highlight.generation += 1;
            highlight.item = Some(item);
            highlight.generation
        };

        let highlight = Arc::clone(&self.highlight);
        self.pending = Some(self.timer.schedule(
            self.highlight_for,
            Box::new(move || {
                let mut highlight = highlight.lock().unwrap_or_else(PoisonError::into_inner);
                if highlight.generation == generation {
                    highlight.item = None;
                    debug!("new table item highlight expired");
                }
            }),
        ));
    }

    /// Clears the highlighted item and cancels its pending expiry.
    pub fn clear_new_item(&mut self) {
        self.cancel_pending();
        let mut highlight = self.lock_highlight();
        highlight.generation += 1;
        highlight.item = None;
    }

    /// Deletes a draft. See [`RegistrationTableView::delete`].
    pub fn delete(&mut self, target: &DeleteTarget) -> ResultEngine<()> {
        let view = self.view.delete(target)?;
        self.replace(view);
        Ok(())
    }

    /// Removes a registration. See [`RegistrationTableView::remove`].
    pub fn remove(&mut self, number: &RegistrationNumber) -> ResultEngine<()> {
        let view = self.view.remove(number)?;
        self.replace(view);
        Ok(())
    }

    /// Reverts the last delete or remove.
    pub fn restore(&mut self) -> ResultEngine<()> {
        let previous = self.previous.take().ok_or(EngineError::NothingToRestore)?;
        self.clear_new_item();
        self.view = previous;
        debug!("restored registration table");
        Ok(())
    }

    pub fn toggle_expand(&mut self, number: &RegistrationNumber) -> ResultEngine<()> {
        self.view = self.view.toggle_expand(number)?;
        Ok(())
    }

    fn replace(&mut self, view: RegistrationTableView) {
        self.clear_new_item();
        self.previous = Some(std::mem::replace(&mut self.view, view));
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    fn lock_highlight(&self) -> std::sync::MutexGuard<'_, Highlight> {
        self.highlight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RegistrationTable {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// The builder for `RegistrationTable`
#[derive(Default)]
pub struct RegistrationTableBuilder {
    timer: Option<Arc<dyn Timer>>,
    highlight_for: Option<Duration>,
    view: RegistrationTableView,
}

impl RegistrationTableBuilder {
    /// Pass the timer used for the highlight expiry. Defaults to the current
    /// tokio runtime.
    pub fn timer(mut self, timer: Arc<dyn Timer>) -> RegistrationTableBuilder {
        self.timer = Some(timer);
        self
    }

    /// Override how long a new item stays highlighted.
    pub fn highlight_for(mut self, duration: Duration) -> RegistrationTableBuilder {
        self.highlight_for = Some(duration);
        self
    }

    /// Start from an existing view.
    pub fn view(mut self, view: RegistrationTableView) -> RegistrationTableBuilder {
        self.view = view;
        self
    }

    /// Construct `RegistrationTable`
    pub fn build(self) -> ResultEngine<RegistrationTable> {
        let timer: Arc<dyn Timer> = match self.timer {
            Some(timer) => timer,
            None => Arc::new(TokioTimer::current()?),
        };
        Ok(RegistrationTable {
            view: self.view,
            previous: None,
            highlight: Arc::new(Mutex::new(Highlight::default())),
            pending: None,
            timer,
            highlight_for: self.highlight_for.unwrap_or(NEW_ITEM_HIGHLIGHT),
        })
    }
}
