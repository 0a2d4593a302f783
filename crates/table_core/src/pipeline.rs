//! Filter, sort and page: the pure function from (full set, params) to a view.

use shared::{
    domain::Comment,
    view::{DerivedView, SortDirection, SortSpec, ViewParams},
};

/// Rows whose name, email or body contain `term`, ignoring case.
/// An empty term keeps every row.
pub fn filter_comments<'a>(comments: &'a [Comment], term: &str) -> Vec<&'a Comment> {
    if term.is_empty() {
        return comments.iter().collect();
    }
    let needle = term.to_lowercase();
    comments
        .iter()
        .filter(|comment| comment.matches_lowercase(&needle))
        .collect()
}

/// Stable sort; equal keys keep their full-set order in both directions.
pub fn sort_comments(rows: &mut [&Comment], sort: SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = sort.key.compare(a, b);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

pub fn derive_view(comments: &[Comment], params: &ViewParams) -> DerivedView {
    let mut filtered = filter_comments(comments, &params.search_term);
    if let Some(sort) = params.sort {
        sort_comments(&mut filtered, sort);
    }

    let total_items = filtered.len();
    let effective_page_size = params.page_size.resolve(total_items);
    let page = params.page.max(1);
    let start = (page - 1).saturating_mul(effective_page_size);

    let rows: Vec<Comment> = filtered
        .into_iter()
        .skip(start)
        .take(effective_page_size)
        .cloned()
        .collect();
    let sum_of_visible_ids = rows.iter().map(|row| i128::from(row.id.0)).sum();

    DerivedView {
        rows,
        total_items,
        page_count: page_count(total_items, effective_page_size),
        effective_page_size,
        sum_of_visible_ids,
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
