use std::ops::RangeInclusive;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Comment, EditField},
    view::{PageSize, SortKey, PAGE_SIZE_CHOICES},
};
use table_core::{FetchOutcome, LoadState, TableController};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, TableAction};

/// Numbered page buttons shown at once.
const PAGE_BUTTONS: usize = 7;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub endpoint_url: String,
    pub page_size: PageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
    guidance: &'static str,
}

pub struct CommentTableApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoint_url: String,
    table: TableController,
    search_input: String,
    status: String,
    status_banner: Option<StatusBanner>,
    pending_actions: Vec<TableAction>,
}

impl CommentTableApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            endpoint_url: startup.endpoint_url,
            table: TableController::new(startup.page_size),
            search_input: String::new(),
            status: "Starting".to_string(),
            status_banner: None,
            pending_actions: Vec::new(),
        };
        if !dispatch_backend_command(&app.cmd_tx, BackendCommand::FetchComments, &mut app.status)
        {
            let err = UiError::backend_startup(app.status.clone());
            app.fail_startup(err);
        }
        app
    }

    /// The fetch will never arrive; leave the loading state so the
    /// spinner and repaint loop stop.
    fn fail_startup(&mut self, err: UiError) {
        self.table
            .apply_fetch(FetchOutcome::Failed(err.to_fetch_failure()));
        self.status = err.message().to_string();
        self.show_error(err);
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(category = ?err.category(), context = ?err.context(), "{}", err.message());
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: err.message().to_string(),
            guidance: err.guidance(),
        });
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::CommentsFetched(outcome) => {
                    self.table.apply_fetch(outcome);
                    let failure = match self.table.load_state() {
                        LoadState::Failed(failure) => Some(UiError::from_failure(failure)),
                        _ => None,
                    };
                    match failure {
                        Some(err) => {
                            self.status = "Could not load comments".to_string();
                            self.show_error(err);
                        }
                        None => {
                            self.status =
                                format!("Loaded {} comments", self.table.comments().len());
                            self.status_banner = None;
                        }
                    }
                }
                UiEvent::Error(err) if err.context() == UiErrorContext::BackendStartup => {
                    self.fail_startup(err);
                }
                UiEvent::Error(err) => {
                    self.status = err.message().to_string();
                    self.show_error(err);
                }
            }
        }
    }

    fn apply_pending_actions(&mut self) {
        for action in std::mem::take(&mut self.pending_actions) {
            tracing::debug!(?action, "table action");
            if let Some(status) = reduce(&mut self.table, action) {
                self.status = status;
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new(&banner.message).color(egui::Color32::WHITE),
                            );
                            ui.label(
                                egui::RichText::new(banner.guidance)
                                    .small()
                                    .color(egui::Color32::from_gray(220)),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("table_toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Comments");
                ui.add_space(16.0);

                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.search_input)
                        .id_salt("search_input")
                        .hint_text("Search name, email or body")
                        .desired_width(320.0),
                );
                if search.changed() {
                    self.pending_actions
                        .push(TableAction::Search(self.search_input.clone()));
                }
                if ui
                    .add_enabled(!self.search_input.is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    self.search_input.clear();
                    self.pending_actions.push(TableAction::Search(String::new()));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let current = self.table.params().page_size;
                    let mut selected = current;
                    egui::ComboBox::from_id_salt("page_size_combo")
                        .selected_text(selected.to_string())
                        .show_ui(ui, |ui| {
                            for choice in PAGE_SIZE_CHOICES {
                                ui.selectable_value(&mut selected, choice, choice.to_string());
                            }
                        });
                    ui.label("Rows per page");
                    if selected != current {
                        self.pending_actions.push(TableAction::PageSize(selected));
                    }
                });
            });
            ui.add_space(4.0);
            self.show_status_banner(ui);
            ui.add_space(4.0);
        });
    }

    fn show_bottom_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("table_pagination").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let page = self.table.current_page();
                let page_count = self.table.page_count();

                if ui
                    .add_enabled(page > 1, egui::Button::new("‹ Prev"))
                    .clicked()
                {
                    self.pending_actions.push(TableAction::PreviousPage);
                }
                for number in page_window(page, page_count, PAGE_BUTTONS) {
                    if ui
                        .selectable_label(number == page, number.to_string())
                        .clicked()
                        && number != page
                    {
                        self.pending_actions.push(TableAction::Page(number));
                    }
                }
                if ui
                    .add_enabled(page < page_count, egui::Button::new("Next ›"))
                    .clicked()
                {
                    self.pending_actions.push(TableAction::NextPage);
                }

                ui.separator();
                ui.label(format!(
                    "{} matching of {} | Sum of visible IDs: {}",
                    self.table.total_items(),
                    self.table.comments().len(),
                    self.table.sum_of_visible_ids()
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.status).weak());
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_table(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.table.load_state() {
                LoadState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Loading comments from {}", self.endpoint_url));
                    });
                    return;
                }
                LoadState::Failed(_) if self.table.comments().is_empty() => {
                    ui.label("No comments loaded.");
                    return;
                }
                _ => {}
            }

            let table = &self.table;
            let actions = &mut self.pending_actions;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("comments_grid")
                        .num_columns(5)
                        .striped(true)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            for key in SortKey::ALL {
                                if ui
                                    .selectable_label(
                                        table.sort().is_some_and(|s| s.key == key),
                                        header_text(table, key),
                                    )
                                    .clicked()
                                {
                                    actions.push(TableAction::Sort(key));
                                }
                            }
                            ui.label(egui::RichText::new("Actions").strong());
                            ui.end_row();

                            for comment in table.visible() {
                                match table.edit_buffer() {
                                    Some(draft) if draft.id == comment.id => {
                                        render_edit_row(ui, draft, actions)
                                    }
                                    _ => render_row(ui, comment, actions),
                                }
                                ui.end_row();
                            }
                        });

                    if table.visible().is_empty() {
                        ui.add_space(12.0);
                        ui.label("No comments match the current search.");
                    }
                });
        });
    }
}

fn header_text(table: &TableController, key: SortKey) -> egui::RichText {
    let text = match table.sort() {
        Some(sort) if sort.key == key => format!("{} {}", key.label(), sort.direction.arrow()),
        _ => key.label().to_string(),
    };
    egui::RichText::new(text).strong()
}

fn render_row(ui: &mut egui::Ui, comment: &Comment, actions: &mut Vec<TableAction>) {
    ui.label(comment.id.to_string());
    ui.label(&comment.name);
    ui.label(&comment.email);
    ui.add(egui::Label::new(&comment.body).wrap());
    ui.horizontal(|ui| {
        if ui.button("Edit").clicked() {
            actions.push(TableAction::StartEdit(comment.id));
        }
        if ui.button("Delete").clicked() {
            actions.push(TableAction::Delete(comment.id));
        }
    });
}

fn render_edit_row(ui: &mut egui::Ui, draft: &Comment, actions: &mut Vec<TableAction>) {
    ui.label(draft.id.to_string());
    for field in EditField::ALL {
        let mut value = draft.field(field).to_string();
        let editor = match field {
            EditField::Body => egui::TextEdit::multiline(&mut value).desired_rows(3),
            EditField::Name | EditField::Email => egui::TextEdit::singleline(&mut value),
        };
        let response = ui.add(editor.id_salt(("edit", draft.id.0, field.label())));
        if response.changed() {
            actions.push(TableAction::EditField(field, value));
        }
    }
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            actions.push(TableAction::SaveEdit);
        }
        if ui.button("Cancel").clicked() {
            actions.push(TableAction::CancelEdit);
        }
    });
}

/// Up to `width` page numbers centred on `current`, within `1..=page_count`.
fn page_window(current: usize, page_count: usize, width: usize) -> RangeInclusive<usize> {
    let page_count = page_count.max(1);
    let width = width.clamp(1, page_count);
    let half = width / 2;
    let start = current
        .saturating_sub(half)
        .clamp(1, page_count + 1 - width);
    start..=start + width - 1
}

impl eframe::App for CommentTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_bottom_bar(ctx);
        self.show_table(ctx);

        self.apply_pending_actions();

        if matches!(self.table.load_state(), LoadState::Loading) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::{
        domain::{CommentId, PostId},
        error::{FetchFailure, FetchFailureKind},
    };

    use super::*;

    fn app() -> (CommentTableApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = CommentTableApp::bootstrap(
            cmd_tx,
            ui_rx,
            StartupConfig {
                endpoint_url: "http://127.0.0.1:1/comments".to_string(),
                page_size: PageSize::Fixed(5),
            },
        );
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn bootstrap_queues_the_single_fetch() {
        let (_app, cmd_rx, _ui_tx) = app();
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::FetchComments)));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn fetched_comments_populate_the_table() {
        let (mut app, _cmd_rx, ui_tx) = app();
        let comments = (1..=7)
            .map(|id| Comment {
                post_id: PostId(1),
                id: CommentId(id),
                name: format!("name {id}"),
                email: format!("{id}@example.test"),
                body: String::new(),
            })
            .collect();
        ui_tx
            .send(UiEvent::CommentsFetched(FetchOutcome::Loaded(comments)))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.status, "Loaded 7 comments");
        assert_eq!(app.table.visible().len(), 5);
        assert_eq!(app.table.sum_of_visible_ids(), 15);
        assert!(app.status_banner.is_none());
    }

    #[test]
    fn failed_fetch_raises_the_error_banner() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::CommentsFetched(FetchOutcome::Failed(
                FetchFailure::new(FetchFailureKind::Transport, "connection refused"),
            )))
            .expect("send");
        app.process_ui_events();

        let banner = app.status_banner.expect("banner");
        assert!(banner.message.contains("connection refused"));
        assert_eq!(app.status, "Could not load comments");
    }

    #[test]
    fn pending_actions_are_applied_once() {
        let (mut app, _cmd_rx, ui_tx) = app();
        let comments = (1..=3)
            .map(|id| Comment {
                post_id: PostId(1),
                id: CommentId(id),
                name: format!("name {id}"),
                email: String::new(),
                body: String::new(),
            })
            .collect();
        ui_tx
            .send(UiEvent::CommentsFetched(FetchOutcome::Loaded(comments)))
            .expect("send");
        app.process_ui_events();

        app.pending_actions.push(TableAction::Sort(SortKey::Id));
        app.pending_actions.push(TableAction::Sort(SortKey::Id));
        app.pending_actions.push(TableAction::Delete(CommentId(2)));
        app.apply_pending_actions();

        assert!(app.pending_actions.is_empty());
        let ids: Vec<i64> = app.table.visible().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(app.status, "Deleted comment 2");
    }

    #[test]
    fn backend_startup_error_ends_loading() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Error(UiError::backend_startup(
                "backend worker startup failure: failed to build runtime",
            )))
            .expect("send");
        app.process_ui_events();

        assert!(matches!(app.table.load_state(), LoadState::Failed(_)));
        assert!(app.status_banner.is_some());
    }

    #[test]
    fn disconnected_backend_at_bootstrap_ends_loading() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(8);
        drop(cmd_rx);
        let app = CommentTableApp::bootstrap(
            cmd_tx,
            ui_rx,
            StartupConfig {
                endpoint_url: "http://127.0.0.1:1/comments".to_string(),
                page_size: PageSize::default(),
            },
        );

        match app.table.load_state() {
            LoadState::Failed(failure) => assert!(failure.message.contains("disconnected")),
            other => panic!("expected failed load, got {other:?}"),
        }
        assert!(app.status_banner.is_some());
    }

    #[test]
    fn page_window_stays_inside_range() {
        assert_eq!(page_window(1, 1, 7), 1..=1);
        assert_eq!(page_window(1, 50, 7), 1..=7);
        assert_eq!(page_window(25, 50, 7), 22..=28);
        assert_eq!(page_window(50, 50, 7), 44..=50);
        assert_eq!(page_window(3, 4, 7), 1..=4);
    }
}
