//! Main application state and egui integration.
//!
//! UI events are collected into a [`Command`] during rendering and handled
//! in one place after the frame is laid out, so every state change flows
//! through a single dispatch point.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

use liftlog::export::csv::{export_csv_to_file, generate_csv_filename};
use liftlog::metrics::summary::{summarize, TrainingSummary};
use liftlog::storage::config::{load_config_or_default, AppConfig};
use liftlog::storage::store::{decode_records, encode_records, FileStore, RecordStore};
use liftlog::training::log::{seed_records, TrainingLog};
use liftlog::training::types::RecordDraft;

/// User-triggered actions, dispatched from the UI to one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Validate the form and append a record
    Submit,
    /// Export the log as CSV via a save dialog
    ExportCsv,
    /// Open the clear-all confirmation dialog
    RequestClearAll,
    /// Wipe the log and the store
    ConfirmClearAll,
    /// Close the confirmation dialog without clearing
    CancelClearAll,
}

/// Feedback line rendered under the form.
struct StatusLine {
    text: String,
    is_error: bool,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Main application state.
pub struct LiftLogApp {
    /// Persisted record store
    store: Box<dyn RecordStore>,
    /// In-memory training log, mirrored to the store on every change
    log: TrainingLog,
    /// Aggregated view of the log, recomputed when the log changes
    summary: TrainingSummary,
    /// Application configuration
    config: AppConfig,
    /// Current form input
    draft: RecordDraft,
    /// Validation or status message for the form region
    status: Option<StatusLine>,
    /// Whether the clear-all confirmation dialog is open
    confirm_clear: bool,
}

impl LiftLogApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_config_or_default();

        cc.egui_ctx.set_visuals(config.ui.theme.visuals());
        if (config.ui.zoom_factor - 1.0).abs() > f32::EPSILON {
            cc.egui_ctx.set_zoom_factor(config.ui.zoom_factor);
        }

        let store = Box::new(FileStore::default_location());
        Self::with_store(store, config)
    }

    /// Build the app over an arbitrary store.
    pub fn with_store(store: Box<dyn RecordStore>, config: AppConfig) -> Self {
        let log = match store.get() {
            Some(blob) => TrainingLog::from_records(decode_records(&blob)),
            None if config.seed_demo_data => {
                tracing::info!("No saved records found, seeding example data");
                TrainingLog::from_records(seed_records(Local::now().date_naive()))
            }
            None => TrainingLog::new(),
        };
        let summary = summarize(log.records());

        let draft = RecordDraft {
            date: Local::now().date_naive().to_string(),
            ..RecordDraft::default()
        };

        Self {
            store,
            log,
            summary,
            config,
            draft,
            status: None,
            confirm_clear: false,
        }
    }

    /// Handle a dispatched command.
    fn handle(&mut self, command: Command) {
        match command {
            Command::Submit => self.submit(),
            Command::ExportCsv => self.export(),
            Command::RequestClearAll => self.confirm_clear = true,
            Command::CancelClearAll => self.confirm_clear = false,
            Command::ConfirmClearAll => self.clear_all(),
        }
    }

    fn submit(&mut self) {
        match self.draft.build() {
            Ok(record) => {
                tracing::debug!(exercise = %record.exercise, "Adding record");
                self.log.insert(record);
                self.persist();
                self.summary = summarize(self.log.records());
                // Keep the date for the next entry, blank the rest
                self.draft = RecordDraft {
                    date: self.draft.date.clone(),
                    ..RecordDraft::default()
                };
                self.status = Some(StatusLine::info("Record saved"));
            }
            Err(e) => {
                self.status = Some(StatusLine::error(e.to_string()));
            }
        }
    }

    fn persist(&mut self) {
        let result = encode_records(self.log.records()).and_then(|blob| self.store.set(&blob));
        if let Err(e) = result {
            tracing::error!("Failed to persist records: {}", e);
            self.status = Some(StatusLine::error(format!("Failed to save: {e}")));
        }
    }

    fn export(&mut self) {
        match self.write_export() {
            Ok(Some(path)) => {
                tracing::info!("Exported {} records to {}", self.log.len(), path.display());
                self.status = Some(StatusLine::info(format!("Exported to {}", path.display())));
            }
            Ok(None) => {} // dialog dismissed
            Err(e) => {
                tracing::error!("CSV export failed: {:#}", e);
                self.status = Some(StatusLine::error(format!("Export failed: {e}")));
            }
        }
    }

    fn write_export(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(generate_csv_filename(Local::now().date_naive()))
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return Ok(None);
        };

        export_csv_to_file(self.log.records(), &path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(Some(path))
    }

    fn clear_all(&mut self) {
        self.confirm_clear = false;
        self.log.clear();
        self.summary = summarize(self.log.records());

        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear store: {}", e);
            self.status = Some(StatusLine::error(format!("Failed to clear: {e}")));
            return;
        }
        // Write the now-empty log so the next launch starts empty instead
        // of re-seeding example data.
        self.persist();
        self.status = Some(StatusLine::info("All records removed"));
    }

    fn render_form(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;

        ui.add_space(4.0);
        ui.heading("New record");
        ui.add_space(4.0);

        egui::Grid::new("record_fields")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Date");
                ui.text_edit_singleline(&mut self.draft.date)
                    .on_hover_text("YYYY-MM-DD");
                ui.end_row();

                ui.label("Start");
                ui.text_edit_singleline(&mut self.draft.start)
                    .on_hover_text("HH:MM");
                ui.end_row();

                ui.label("End");
                ui.text_edit_singleline(&mut self.draft.end)
                    .on_hover_text("HH:MM");
                ui.end_row();

                ui.label("Exercise");
                ui.text_edit_singleline(&mut self.draft.exercise);
                ui.end_row();

                ui.label("Sets");
                ui.text_edit_singleline(&mut self.draft.sets);
                ui.end_row();

                ui.label("Reps");
                ui.text_edit_singleline(&mut self.draft.reps);
                ui.end_row();

                ui.label("Weight (kg)");
                ui.text_edit_singleline(&mut self.draft.weight);
                ui.end_row();

                ui.label("Rest (s)");
                ui.text_edit_singleline(&mut self.draft.rest)
                    .on_hover_text("Optional");
                ui.end_row();

                ui.label("RPE");
                ui.text_edit_singleline(&mut self.draft.rpe)
                    .on_hover_text("Optional, 1-10");
                ui.end_row();
            });

        ui.label("Notes");
        ui.text_edit_multiline(&mut self.draft.notes);
        ui.add_space(6.0);

        if ui.button("Add record").clicked() {
            command = Some(Command::Submit);
        }

        if let Some(status) = &self.status {
            let color = if status.is_error {
                self.config.ui.theme.error_color()
            } else {
                self.config.ui.theme.success_color()
            };
            ui.add_space(4.0);
            ui.colored_label(color, status.text.as_str());
        }

        command
    }

    fn render_summary(&self, ui: &mut egui::Ui) {
        ui.heading("Summary");

        if self.log.is_empty() {
            ui.label("No records yet.");
            return;
        }

        ui.label(format!(
            "{} records, {:.1} kg total volume",
            self.log.len(),
            self.summary.total_volume_kg
        ));
        ui.add_space(4.0);

        ui.columns(2, |columns| {
            columns[0].strong("Volume per day");
            for day in self.summary.daily.iter().take(7) {
                columns[0].label(format!(
                    "{}  {:.1} kg ({} entries)",
                    day.date, day.volume_kg, day.entries
                ));
            }

            columns[1].strong("Progression");
            for progress in &self.summary.progression {
                columns[1].label(format!(
                    "{}: max {} kg, last {} kg ({})",
                    progress.exercise,
                    progress.max_weight_kg,
                    progress.last_weight_kg,
                    progress.last_date
                ));
            }
        });
    }

    fn render_table(&self, ui: &mut egui::Ui) {
        ui.heading("History");

        if self.log.is_empty() {
            ui.label("Nothing logged.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(52.0), 11)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in [
                    "Date", "Start", "End", "Exercise", "Sets", "Reps", "Weight (kg)", "Volume",
                    "Rest (s)", "Duration", "RPE", "Notes",
                ] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for record in self.log.records() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(record.date.to_string());
                        });
                        row.col(|ui| {
                            ui.label(record.start.format("%H:%M").to_string());
                        });
                        row.col(|ui| {
                            ui.label(record.end.format("%H:%M").to_string());
                        });
                        row.col(|ui| {
                            ui.label(&record.exercise);
                        });
                        row.col(|ui| {
                            ui.label(record.sets.to_string());
                        });
                        row.col(|ui| {
                            ui.label(record.reps.to_string());
                        });
                        row.col(|ui| {
                            ui.label(record.weight_kg.to_string());
                        });
                        row.col(|ui| {
                            ui.label(record.volume_kg.to_string());
                        });
                        row.col(|ui| {
                            ui.label(
                                record
                                    .rest_secs
                                    .map_or(String::new(), |v| v.to_string()),
                            );
                        });
                        row.col(|ui| {
                            ui.label(record.duration_hhmm());
                        });
                        row.col(|ui| {
                            ui.label(record.rpe.map_or(String::new(), |v| v.to_string()));
                        });
                        row.col(|ui| {
                            ui.label(&record.notes);
                        });
                    });
                }
            });
    }

    fn render_confirm_dialog(&self, ctx: &egui::Context) -> Option<Command> {
        let mut command = None;

        egui::Window::new("Remove all records?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("This deletes every saved record. There is no undo.");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete everything").clicked() {
                        command = Some(Command::ConfirmClearAll);
                    }
                    if ui.button("Keep my data").clicked() {
                        command = Some(Command::CancelClearAll);
                    }
                });
            });

        command
    }
}


impl eframe::App for LiftLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut command = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("LiftLog");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear all").clicked() {
                        command = Some(Command::RequestClearAll);
                    }
                    if ui.button("Export CSV").clicked() {
                        command = Some(Command::ExportCsv);
                    }
                });
            });
        });

        egui::SidePanel::left("record_form")
            .min_width(260.0)
            .show(ctx, |ui| {
                if let Some(cmd) = self.render_form(ui) {
                    command = Some(cmd);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_summary(ui);
            ui.separator();
            self.render_table(ui);
        });

        if self.confirm_clear {
            if let Some(cmd) = self.render_confirm_dialog(ctx) {
                command = Some(cmd);
            }
        }

        if let Some(cmd) = command {
            self.handle(cmd);
        }
    }
}
