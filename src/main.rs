use std::collections::HashMap;
use std::io::ErrorKind;

use eframe::{egui, App, CreationContext, Frame};
use egui::{FontFamily, FontId, RichText, ScrollArea, TextEdit, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod error;
mod models;
mod store;

use error::StoreError;
use models::Workout;
use store::{ExerciseFields, PlanStore, EXPORT_FILE_NAME};

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280 as f32, 900 as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "Workout Plan Editor",
        options,
        Box::new(|cc| Ok(Box::new(PlanEditorApp::new(cc)))),
    )
}

/// A store mutation requested by one of the add buttons. Recorded while the
/// tree is drawn and applied once the store is no longer borrowed.
enum PendingAdd {
    Plan,
    Week(usize),
    Workout(usize, usize),
    Exercise(usize, usize, usize),
}

struct PlanEditorApp {
    store: PlanStore,
    plan_name_input: String,
    week_name_inputs: HashMap<usize, String>,
    workout_name_inputs: HashMap<(usize, usize), String>,
    exercise_inputs: HashMap<(usize, usize, usize), ExerciseFields>,
    source_literal: Option<String>,
    status_line: Option<String>,
}

impl PlanEditorApp {
    fn new(_cc: &CreationContext) -> Self {
        let store = match PlanStore::load_from_file(EXPORT_FILE_NAME) {
            Ok(store) => {
                tracing::info!(
                    plans = store.plans().len(),
                    "preloaded snapshot from {EXPORT_FILE_NAME}"
                );
                store
            }
            Err(StoreError::Io(err)) if err.kind() == ErrorKind::NotFound => PlanStore::new(),
            Err(err) => {
                tracing::warn!("could not preload {EXPORT_FILE_NAME}: {err}");
                PlanStore::new()
            }
        };

        PlanEditorApp {
            store,
            plan_name_input: String::new(),
            week_name_inputs: HashMap::new(),
            workout_name_inputs: HashMap::new(),
            exercise_inputs: HashMap::new(),
            source_literal: None,
            status_line: None,
        }
    }

    fn show_toolbar(&mut self, ui: &mut Ui, pending: &mut Option<PendingAdd>) {
        ui.horizontal(|ui| {
            ui.add(
                TextEdit::singleline(&mut self.plan_name_input)
                    .hint_text("Plan Name")
                    .desired_width(220.0),
            );
            if ui.button("Add Plan").clicked() {
                *pending = Some(PendingAdd::Plan);
            }

            ui.separator();

            if ui.button("Export JSON").clicked() {
                match self.store.export_to_file(".") {
                    Ok(path) => {
                        tracing::info!("exported plans to {}", path.display());
                        self.status_line = Some(format!("Saved {}", path.display()));
                    }
                    Err(err) => {
                        tracing::error!("export failed: {err}");
                        self.status_line = Some(format!("Export failed: {err}"));
                    }
                }
            }
            if ui.button("Export as source").clicked() {
                match self.store.to_source_literal() {
                    Ok(source) => self.source_literal = Some(source),
                    Err(err) => {
                        tracing::error!("source export failed: {err}");
                        self.status_line = Some(format!("Export failed: {err}"));
                    }
                }
            }
        });

        if let Some(status) = &self.status_line {
            ui.label(RichText::new(status).italics());
        }
    }

    fn show_plans(&mut self, ui: &mut Ui, pending: &mut Option<PendingAdd>) {
        if self.store.plans().is_empty() {
            ui.label("No plans yet. Add one above to get started.");
            return;
        }

        for (pi, plan) in self.store.plans().iter().enumerate() {
            ui.group(|ui| {
                ui.label(RichText::new(&plan.name).size(26.0).strong());
                ui.horizontal(|ui| {
                    let week_name = self.week_name_inputs.entry(pi).or_default();
                    ui.add(
                        TextEdit::singleline(week_name)
                            .hint_text("Week Name")
                            .desired_width(180.0),
                    );
                    if ui.button("Add Week").clicked() {
                        *pending = Some(PendingAdd::Week(pi));
                    }
                });

                for (wi, week) in plan.weeks.iter().enumerate() {
                    ui.indent((pi, wi, "week"), |ui| {
                        ui.label(RichText::new(&week.name).size(21.0).strong());
                        ui.horizontal(|ui| {
                            let workout_name =
                                self.workout_name_inputs.entry((pi, wi)).or_default();
                            ui.add(
                                TextEdit::singleline(workout_name)
                                    .hint_text("Workout Name")
                                    .desired_width(180.0),
                            );
                            if ui.button("Add Workout").clicked() {
                                *pending = Some(PendingAdd::Workout(pi, wi));
                            }
                        });

                        for (oi, workout) in week.workouts.iter().enumerate() {
                            ui.indent((pi, wi, oi, "workout"), |ui| {
                                ui.label(RichText::new(&workout.name).size(17.0).strong());
                                let fields =
                                    self.exercise_inputs.entry((pi, wi, oi)).or_default();
                                show_exercise_inputs(ui, fields, (pi, wi, oi), pending);
                                if !workout.exercises.is_empty() {
                                    ui.push_id((pi, wi, oi, "exercises"), |ui| {
                                        show_exercise_table(ui, workout);
                                    });
                                }
                            });
                        }
                    });
                }
            });
            ui.add_space(8.0);
        }
    }

    fn show_source_literal(&mut self, ui: &mut Ui) {
        if let Some(source) = &self.source_literal {
            ui.separator();
            ui.label(RichText::new("Paste this into the preload step of the next session:").strong());
            let mut text = source.as_str();
            ui.add(
                TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_rows(12)
                    .desired_width(f32::INFINITY),
            );
        }
    }

    fn apply_add(&mut self, action: PendingAdd) {
        let result = match action {
            PendingAdd::Plan => {
                if self.store.add_plan(&self.plan_name_input) {
                    self.plan_name_input.clear();
                }
                Ok(())
            }
            PendingAdd::Week(pi) => {
                let name = self.week_name_inputs.get(&pi).cloned().unwrap_or_default();
                match self.store.add_week(pi, &name) {
                    Ok(added) => {
                        if added {
                            self.week_name_inputs.remove(&pi);
                        }
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
            PendingAdd::Workout(pi, wi) => {
                let name = self
                    .workout_name_inputs
                    .get(&(pi, wi))
                    .cloned()
                    .unwrap_or_default();
                match self.store.add_workout(pi, wi, &name) {
                    Ok(added) => {
                        if added {
                            self.workout_name_inputs.remove(&(pi, wi));
                        }
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
            PendingAdd::Exercise(pi, wi, oi) => {
                let fields = self
                    .exercise_inputs
                    .get(&(pi, wi, oi))
                    .cloned()
                    .unwrap_or_default();
                match self.store.add_exercise(pi, wi, oi, fields) {
                    Ok(added) => {
                        if added {
                            self.exercise_inputs.remove(&(pi, wi, oi));
                        }
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
        };

        // Indices always come from the tree drawn this frame, so a store
        // rejection here means a bug rather than bad user input.
        if let Err(err) = result {
            tracing::error!("store rejected the addition: {err}");
            self.status_line = Some(format!("Could not add: {err}"));
        }
    }
}

impl App for PlanEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            TextStyle::Body,
            FontId::new(16.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Button,
            FontId::new(16.0, FontFamily::Proportional),
        );
        ctx.set_style(style);

        let mut pending: Option<PendingAdd> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(RichText::new("Workout Plans").heading().size(32.0).strong());
            ui.add_space(10.0);

            self.show_toolbar(ui, &mut pending);
            ui.add_space(10.0);

            ScrollArea::vertical().show(ui, |ui| {
                ui.set_width(ui.available_width());
                self.show_plans(ui, &mut pending);
                self.show_source_literal(ui);
            });
        });

        if let Some(action) = pending {
            self.apply_add(action);
        }
    }
}

fn show_exercise_inputs(
    ui: &mut Ui,
    fields: &mut ExerciseFields,
    key: (usize, usize, usize),
    pending: &mut Option<PendingAdd>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.add(
            TextEdit::singleline(&mut fields.name)
                .hint_text("Exercise Name")
                .desired_width(160.0),
        );
        ui.add(
            TextEdit::singleline(&mut fields.sets)
                .hint_text("Sets")
                .desired_width(50.0),
        );
        ui.add(
            TextEdit::singleline(&mut fields.reps)
                .hint_text("Reps")
                .desired_width(50.0),
        );
        ui.add(
            TextEdit::singleline(&mut fields.distance)
                .hint_text("Distance")
                .desired_width(80.0),
        );
        ui.add(
            TextEdit::singleline(&mut fields.time)
                .hint_text("Time")
                .desired_width(70.0),
        );
        ui.add(
            TextEdit::singleline(&mut fields.rest_time)
                .hint_text("Rest Time")
                .desired_width(80.0),
        );
        ui.add(
            TextEdit::singleline(&mut fields.youtube_link)
                .hint_text("YouTube Link")
                .desired_width(160.0),
        );
        if ui.button("Add Exercise").clicked() {
            *pending = Some(PendingAdd::Exercise(key.0, key.1, key.2));
        }
    });
}

fn show_exercise_table(ui: &mut Ui, workout: &Workout) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Exercise");
            });
            header.col(|ui| {
                ui.strong("Sets");
            });
            header.col(|ui| {
                ui.strong("Reps");
            });
            header.col(|ui| {
                ui.strong("Distance");
            });
            header.col(|ui| {
                ui.strong("Time");
            });
            header.col(|ui| {
                ui.strong("Rest Time");
            });
            header.col(|ui| {
                ui.strong("Video");
            });
        })
        .body(|mut body| {
            for exercise in &workout.exercises {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&exercise.name);
                    });
                    row.col(|ui| {
                        ui.label(&exercise.sets);
                    });
                    row.col(|ui| {
                        ui.label(&exercise.reps);
                    });
                    row.col(|ui| {
                        ui.label(&exercise.distance);
                    });
                    row.col(|ui| {
                        ui.label(&exercise.time);
                    });
                    row.col(|ui| {
                        ui.label(&exercise.rest_time);
                    });
                    row.col(|ui| {
                        if exercise.youtube_link == "#" {
                            ui.label("-");
                        } else {
                            ui.hyperlink_to("Watch Exercise", &exercise.youtube_link);
                        }
                    });
                });
            }
        });
}
