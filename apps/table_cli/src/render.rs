//! Plain-text rendering of the current page.

use std::fmt::Write as _;

use shared::{
    domain::{Comment, EditField},
    view::SortKey,
};
use table_core::TableController;

const ID_WIDTH: usize = 5;
const NAME_WIDTH: usize = 28;
const EMAIL_WIDTH: usize = 28;
const BODY_WIDTH: usize = 44;

fn truncate(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    let mut out: String = flat.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn header_label(table: &TableController, key: SortKey) -> String {
    match table.sort() {
        Some(sort) if sort.key == key => format!("{} {}", key.label(), sort.direction.arrow()),
        _ => key.label().to_string(),
    }
}

fn row_line(marker: char, comment: &Comment) -> String {
    format!(
        "{marker} {} {} {} {}",
        pad(&comment.id.to_string(), ID_WIDTH),
        pad(&truncate(&comment.name, NAME_WIDTH), NAME_WIDTH),
        pad(&truncate(&comment.email, EMAIL_WIDTH), EMAIL_WIDTH),
        truncate(&comment.body, BODY_WIDTH),
    )
}

pub fn render_table(table: &TableController) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} {} {} {}",
        pad(&header_label(table, SortKey::Id), ID_WIDTH),
        pad(&header_label(table, SortKey::Name), NAME_WIDTH),
        pad(&header_label(table, SortKey::Email), EMAIL_WIDTH),
        header_label(table, SortKey::Body),
    );
    let _ = writeln!(
        out,
        "  {}",
        "-".repeat(ID_WIDTH + NAME_WIDTH + EMAIL_WIDTH + BODY_WIDTH + 3)
    );

    if table.visible().is_empty() {
        let _ = writeln!(out, "  (no matching comments)");
    }
    for comment in table.visible() {
        let marker = if table.is_editing(comment.id) { '*' } else { ' ' };
        let _ = writeln!(out, "{}", row_line(marker, comment));
    }

    if let Some(draft) = table.edit_buffer() {
        let _ = writeln!(out, "\nEditing comment {}:", draft.id);
        for field in EditField::ALL {
            let _ = writeln!(out, "  {:<6} {}", field.label(), draft.field(field));
        }
    }

    let _ = writeln!(out, "\n{}", render_footer(table));
    out
}

pub fn render_footer(table: &TableController) -> String {
    let params = table.params();
    let mut footer = format!(
        "Page {} of {} | {} matching of {} loaded | {} per page | sum of visible IDs: {}",
        table.current_page(),
        table.page_count(),
        table.total_items(),
        table.comments().len(),
        params.page_size,
        table.sum_of_visible_ids(),
    );
    if !params.search_term.is_empty() {
        let _ = write!(footer, " | search: \"{}\"", params.search_term);
    }
    footer
}

/// The derived view as pretty JSON, for `--json`.
pub fn render_json(table: &TableController) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        domain::{CommentId, PostId},
        view::PageSize,
    };

    fn table() -> TableController {
        TableController::with_comments(
            vec![
                Comment {
                    post_id: PostId(1),
                    id: CommentId(1),
                    name: "Ann".to_string(),
                    email: "ann@example.test".to_string(),
                    body: "line one\nline two".to_string(),
                },
                Comment {
                    post_id: PostId(1),
                    id: CommentId(2),
                    name: "Bob".to_string(),
                    email: "bob@example.test".to_string(),
                    body: "x".repeat(80),
                },
            ],
            PageSize::Fixed(10),
        )
    }

    #[test]
    fn truncates_long_cells_with_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(truncate("a\nb", 4), "a b");
    }

    #[test]
    fn header_marks_active_sort_column() {
        let mut table = table();
        table.set_sort(SortKey::Name);
        table.set_sort(SortKey::Name);
        let rendered = render_table(&table);
        assert!(rendered.lines().next().expect("header").contains("Name ▼"));
    }

    #[test]
    fn footer_reports_totals_and_sum() {
        let rendered = render_table(&table());
        assert!(rendered.contains(
            "Page 1 of 1 | 2 matching of 2 loaded | 10 per page | sum of visible IDs: 3"
        ));
    }

    #[test]
    fn marks_the_row_under_edit_and_shows_the_draft() {
        let mut table = table();
        table.start_edit_by_id(CommentId(2));
        table.update_edit(EditField::Name, "Robert");
        let rendered = render_table(&table);
        assert!(rendered.lines().any(|l| l.starts_with("* 2")));
        assert!(rendered.contains("Editing comment 2:"));
        assert!(rendered.contains("name   Robert"));
    }

    #[test]
    fn empty_page_says_so() {
        let mut table = table();
        table.set_search_term("nobody");
        assert!(render_table(&table).contains("(no matching comments)"));
    }

    #[test]
    fn json_output_carries_rows_and_aggregates() {
        let mut table = table();
        table.set_search_term("bob");
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&table).expect("encode")).expect("valid json");

        assert_eq!(json["total_items"], 1);
        assert_eq!(json["page_count"], 1);
        assert_eq!(json["sum_of_visible_ids"], 2);
        let rows = json["rows"].as_array().expect("rows array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Bob");
        assert_eq!(rows[0]["postId"], 1);
    }
}
