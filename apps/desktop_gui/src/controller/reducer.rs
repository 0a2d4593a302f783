//! Table actions raised by widgets, applied to the controller after the frame
//! has finished borrowing it.

use shared::{
    domain::{CommentId, EditField},
    view::{PageSize, SortKey},
};
use table_core::TableController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    Search(String),
    Sort(SortKey),
    Page(usize),
    NextPage,
    PreviousPage,
    PageSize(PageSize),
    StartEdit(CommentId),
    EditField(EditField, String),
    SaveEdit,
    CancelEdit,
    Delete(CommentId),
}

/// Applies `action`; returns a status line when the action deserves one.
pub fn reduce(table: &mut TableController, action: TableAction) -> Option<String> {
    match action {
        TableAction::Search(term) => {
            table.set_search_term(term);
            None
        }
        TableAction::Sort(key) => {
            table.set_sort(key);
            None
        }
        TableAction::Page(page) => {
            table.set_page(page);
            None
        }
        TableAction::NextPage => {
            table.next_page();
            None
        }
        TableAction::PreviousPage => {
            table.previous_page();
            None
        }
        TableAction::PageSize(page_size) => {
            table.set_page_size(page_size);
            None
        }
        TableAction::StartEdit(id) => {
            if table.start_edit_by_id(id) {
                Some(format!("Editing comment {id}"))
            } else {
                Some(format!("Comment {id} is no longer available"))
            }
        }
        TableAction::EditField(field, value) => {
            table.update_edit(field, value);
            None
        }
        TableAction::SaveEdit => {
            let id = table.edit_buffer().map(|draft| draft.id);
            match (id, table.commit_edit()) {
                (Some(id), true) => Some(format!("Saved comment {id}")),
                _ => Some("Nothing to save".to_string()),
            }
        }
        TableAction::CancelEdit => {
            table.cancel_edit();
            Some("Edit cancelled".to_string())
        }
        TableAction::Delete(id) => {
            if table.delete(id) {
                Some(format!("Deleted comment {id}"))
            } else {
                Some(format!("Comment {id} was already removed"))
            }
        }
    }
}
