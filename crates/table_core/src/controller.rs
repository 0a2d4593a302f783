//! View-state controller: owns the full set, the view parameters, the
//! edit buffer, and the view derived from them.

use shared::{
    domain::{Comment, CommentId, EditField},
    error::FetchFailure,
    view::{DerivedView, PageSize, SortDirection, SortKey, SortSpec, ViewParams},
};
use tracing::debug;

use crate::{pipeline::derive_view, source::FetchOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(FetchFailure),
}

#[derive(Debug, Clone)]
pub struct TableController {
    comments: Vec<Comment>,
    params: ViewParams,
    view: DerivedView,
    edit_buffer: Option<Comment>,
    load_state: LoadState,
}

impl Default for TableController {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl TableController {
    pub fn new(page_size: PageSize) -> Self {
        let params = ViewParams::default().with_page_size(page_size);
        let view = derive_view(&[], &params);
        Self {
            comments: Vec::new(),
            params,
            view,
            edit_buffer: None,
            load_state: LoadState::Loading,
        }
    }

    /// A controller that starts out already loaded with `comments`.
    pub fn with_comments(comments: Vec<Comment>, page_size: PageSize) -> Self {
        let mut controller = Self::new(page_size);
        controller.apply_fetch(FetchOutcome::Loaded(comments));
        controller
    }

    /// Installs the result of the initial fetch. A failure leaves the full
    /// set untouched and is kept as the load state.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(comments) => {
                self.comments = comments;
                self.load_state = LoadState::Loaded;
            }
            FetchOutcome::Failed(failure) => {
                self.load_state = LoadState::Failed(failure);
            }
        }
        self.recompute();
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn visible(&self) -> &[Comment] {
        &self.view.rows
    }

    /// Filtered, pre-page row count.
    pub fn total_items(&self) -> usize {
        self.view.total_items
    }

    pub fn page_count(&self) -> usize {
        self.view.page_count
    }

    pub fn current_page(&self) -> usize {
        self.params.page
    }

    pub fn sum_of_visible_ids(&self) -> i128 {
        self.view.sum_of_visible_ids
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.params.sort
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.params.search_term = term.into();
        self.recompute();
    }

    /// Same column flips direction; a new column starts ascending.
    pub fn set_sort(&mut self, key: SortKey) {
        let direction = match self.params.sort {
            Some(current) if current.key == key => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.params.sort = Some(SortSpec { key, direction });
        self.recompute();
    }

    pub fn clear_sort(&mut self) {
        self.params.sort = None;
        self.recompute();
    }

    /// Moves to `page`, clamped into `1..=page_count`.
    pub fn set_page(&mut self, page: usize) {
        self.params.page = page.clamp(1, self.view.page_count);
        self.recompute();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.params.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.params.page.saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.params.page_size = page_size;
        self.recompute();
    }

    /// Applies a raw selector value (`-1` for all). Returns `false` and
    /// leaves the state alone for values that are not a page size.
    pub fn set_page_size_selector(&mut self, value: i64) -> bool {
        match PageSize::from_selector(value) {
            Some(page_size) => {
                self.set_page_size(page_size);
                true
            }
            None => false,
        }
    }

    /// Rebuilds the view from the full set. A page left beyond the end by
    /// a shrinking filter or a delete is pulled back to the last page.
    pub fn recompute(&mut self) {
        let mut view = derive_view(&self.comments, &self.params);
        if self.params.page > view.page_count || self.params.page == 0 {
            self.params.page = self.params.page.clamp(1, view.page_count);
            view = derive_view(&self.comments, &self.params);
        }
        debug!(
            total = self.comments.len(),
            filtered = view.total_items,
            visible = view.rows.len(),
            page = self.params.page,
            page_count = view.page_count,
            "table view recomputed"
        );
        self.view = view;
    }

    pub fn start_edit(&mut self, record: &Comment) {
        self.edit_buffer = Some(record.clone());
    }

    pub fn start_edit_by_id(&mut self, id: CommentId) -> bool {
        match self.comments.iter().find(|comment| comment.id == id) {
            Some(record) => {
                self.edit_buffer = Some(record.clone());
                true
            }
            None => false,
        }
    }

    pub fn edit_buffer(&self) -> Option<&Comment> {
        self.edit_buffer.as_ref()
    }

    pub fn is_editing(&self, id: CommentId) -> bool {
        self.edit_buffer
            .as_ref()
            .is_some_and(|draft| draft.id == id)
    }

    /// Changes one column of the draft; the full set is untouched.
    pub fn update_edit(&mut self, field: EditField, value: impl Into<String>) -> bool {
        match self.edit_buffer.as_mut() {
            Some(draft) => {
                draft.set_field(field, value);
                true
            }
            None => false,
        }
    }

    /// Writes the draft back over the record with the same id. Without a
    /// draft, or when that id is gone, nothing changes.
    pub fn commit_edit(&mut self) -> bool {
        let Some(draft) = self.edit_buffer.as_ref() else {
            return false;
        };
        let Some(slot) = self.comments.iter_mut().find(|c| c.id == draft.id) else {
            debug!(id = draft.id.0, "edit commit ignored, record no longer present");
            return false;
        };
        *slot = draft.clone();
        self.edit_buffer = None;
        self.recompute();
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }

    /// Removes the first record with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: CommentId) -> bool {
        let Some(index) = self.comments.iter().position(|c| c.id == id) else {
            return false;
        };
        self.comments.remove(index);
        self.recompute();
        true
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
