mod app;
mod commonvals;
mod config;
mod error;
mod job;
mod label;
mod printer;
mod store;
mod util;

use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use eframe::{egui, epaint::Vec2};
use tinyfiledialogs::{message_box_ok, message_box_yes_no, MessageBoxIcon, YesNo};

use app::form::LabelForm;
use app::materials::{editing_rows, EditingMaterial};
use app::size::SizeEditor;
use commonvals::SizeChoice;
use config::AppConfig;
use label::fields::{DATE_FORMAT, TIME_FORMAT};
use label::LabelSize;
use printer::SystemPrinter;
use store::materials::DEFAULT_MATERIALS;
use store::{LabelSizeStore, MaterialStore};

const APP_TITLE: &str = "Label Printer";
const ERR_DIALOG_TITLE: &str = "Label Printer Error";
const CLOCK_REFRESH: Duration = Duration::from_millis(100);

fn main() {
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            message_box_ok(ERR_DIALOG_TITLE, &format!("Invalid configuration: {error}"), MessageBoxIcon::Error);
            return;
        }
    };
    log::info!("using data directory {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        initial_window_size: Some(Vec2::new(800.0, 500.0)),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Box::new(LabelApp::new(config))),
    );
}

enum MaterialAction {
    Add,
    Update(usize),
    Delete(usize),
}

struct LabelApp {
    // Collaborators
    size_store: LabelSizeStore,
    material_store: MaterialStore,
    printer: SystemPrinter,
    timezone: Tz,

    // Main form
    materials: Vec<String>,
    form: LabelForm,
    last_stream: Option<String>,

    // Label size window
    show_size_config: bool,
    current_size: LabelSize,
    size_editor: SizeEditor,

    // Materials window
    show_materials: bool,
    material_rows: Vec<EditingMaterial>,
    new_material: String,
}

impl LabelApp {
    fn new(config: AppConfig) -> Self {
        let mut app = Self {
            size_store: LabelSizeStore::in_dir(&config.data_dir),
            material_store: MaterialStore::in_dir(&config.data_dir),
            printer: SystemPrinter::new(config.printer),
            timezone: config.timezone,
            materials: Default::default(),
            form: Default::default(),
            last_stream: Default::default(),
            show_size_config: Default::default(),
            current_size: Default::default(),
            size_editor: SizeEditor::for_size(LabelSize::default()),
            show_materials: Default::default(),
            material_rows: Default::default(),
            new_material: Default::default(),
        };

        log::info!("label size file: {}", app.size_store.path().display());
        log::info!("material list file: {}", app.material_store.path().display());

        app.reload_materials();
        app.current_size = app.load_label_size();
        app
    }

    fn reload_materials(&mut self) {
        let previous = self.form.selected(&self.materials).map(str::to_owned);

        self.materials = match self.material_store.list() {
            Ok(materials) => materials,
            Err(error) => {
                log::warn!("falling back to built-in materials: {error}");
                message_box_ok(ERR_DIALOG_TITLE, &format!("Could not read the material list: {error}"), MessageBoxIcon::Warning);
                DEFAULT_MATERIALS.iter().map(|m| (*m).to_owned()).collect()
            },
        };

        self.form.reselect(previous.as_deref(), &self.materials);
        self.material_rows = editing_rows(&self.materials);
    }

    fn load_label_size(&self) -> LabelSize {
        match self.size_store.get() {
            Ok(size) => size,
            Err(error) => {
                log::warn!("falling back to default label size: {error}");
                message_box_ok(ERR_DIALOG_TITLE, &format!("Could not read the label size, using {}: {error}", LabelSize::default()), MessageBoxIcon::Warning);
                LabelSize::default()
            },
        }
    }

    fn print(&mut self) {
        let request = self.form.request(&self.materials);
        let size = self.load_label_size();
        self.current_size = size;

        match job::print_label(&request, size, &self.printer, self.timezone, &mut rand::rng()) {
            Ok(stream) => self.last_stream = Some(stream.as_str().to_owned()),
            Err(error) => {
                log::error!("print failed: {error}");
                message_box_ok(ERR_DIALOG_TITLE, &format!("Could not print the label: {error}"), MessageBoxIcon::Error);
            },
        }
    }

    fn open_size_config(&mut self) {
        self.current_size = self.load_label_size();
        self.size_editor = SizeEditor::for_size(self.current_size);
        self.show_size_config = true;
    }

    fn save_label_size(&mut self) {
        let result = self.size_editor.selected_size()
            .and_then(|size| self.size_store.set(size).map(|()| size));

        match result {
            Ok(size) => {
                self.current_size = size;
                message_box_ok(APP_TITLE, &format!("New label size: {size}"), MessageBoxIcon::Info);
            },
            Err(error) => message_box_ok(ERR_DIALOG_TITLE, &format!("Could not save the label size: {error}"), MessageBoxIcon::Error),
        }
    }

    fn open_materials(&mut self) {
        self.reload_materials();
        self.new_material.clear();
        self.show_materials = true;
    }

    fn apply_material_action(&mut self, action: MaterialAction) {
        let result = match action {
            MaterialAction::Add => {
                let result = self.material_store.add(&self.new_material);
                if result.is_ok() {
                    self.new_material.clear();
                }
                result
            },
            MaterialAction::Update(i) => {
                let Some(row) = self.material_rows.get_mut(i) else { return };
                if !row.has_changes() {
                    row.reset_editor_value();
                    return;
                }

                let new_name = match row.new_name() {
                    Ok(name) => name,
                    Err(error) => {
                        message_box_ok(ERR_DIALOG_TITLE, &format!("Could not rename the material: {error}"), MessageBoxIcon::Error);
                        return;
                    },
                };

                let question = format!("Rename material '{}' to '{new_name}'?", row.original());
                if let YesNo::No = message_box_yes_no("Confirm update", &question, MessageBoxIcon::Question, YesNo::No) {
                    row.reset_editor_value();
                    return;
                }
                self.material_store.rename(row.original(), &new_name)
            },
            MaterialAction::Delete(i) => {
                let Some(row) = self.material_rows.get(i) else { return };

                let question = format!("Delete material '{}'?", row.original());
                if let YesNo::No = message_box_yes_no("Confirm deletion", &question, MessageBoxIcon::Question, YesNo::No) {
                    return;
                }
                self.material_store.remove(row.original())
            },
        };

        if let Err(error) = result {
            message_box_ok(ERR_DIALOG_TITLE, &format!("Could not update the material list: {error}"), MessageBoxIcon::Error);
        }
        self.reload_materials();
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        let now = Utc::now().with_timezone(&self.timezone);
        ui.horizontal(|ui| {
            ui.heading(format!("Date: {}", now.format(DATE_FORMAT)));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.heading(format!("Time: {}", now.format(TIME_FORMAT)));
            });
        });

        ui.separator();

        egui::Grid::new("label_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
            ui.label("Material description:");
            ui.add_enabled_ui(!self.materials.is_empty(), |ui| {
                egui::ComboBox::from_id_source("material_combo")
                    .width(300.0)
                    .show_index(ui, &mut self.form.selected_material, self.materials.len(),
                        |i| self.materials.get(i).cloned().unwrap_or_else(|| String::from("(None)")))
                    .on_disabled_hover_text("No materials available. Add one under Settings");
            });
            ui.end_row();

            ui.label("Operator:");
            ui.add(egui::TextEdit::singleline(&mut self.form.operator).desired_width(300.0));
            ui.end_row();

            ui.label("Origin:");
            ui.add(egui::TextEdit::singleline(&mut self.form.origin).desired_width(300.0));
            ui.end_row();

            ui.label("Destination:");
            ui.add(egui::TextEdit::singleline(&mut self.form.destination).desired_width(300.0));
            ui.end_row();
        });

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui.button("Print label").on_hover_text("Ctrl+P").clicked() {
                self.print();
            }

            if ui.button("Clear fields").clicked() {
                self.form.clear();
            }

            ui.label(format!("Label: {}", self.current_size));
        });

        if let Some(stream) = &self.last_stream {
            ui.add_space(12.0);
            egui::CollapsingHeader::new("Last label sent").show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    ui.monospace(stream);
                });
            });
        }
    }

    fn size_config_ui(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Current size: {}", self.current_size));
        ui.add_space(8.0);

        egui::ComboBox::from_label("Label size")
            .selected_text(self.size_editor.choice.as_string())
            .show_ui(ui, |ui| {
                for choice in SizeChoice::all() {
                    ui.selectable_value(&mut self.size_editor.choice, choice, choice.as_string());
                }
            });

        if let SizeChoice::Custom = self.size_editor.choice {
            egui::Grid::new("custom_size").num_columns(2).show(ui, |ui| {
                ui.label("Width (mm):");
                ui.add(egui::TextEdit::singleline(&mut self.size_editor.custom_width).desired_width(80.0));
                ui.end_row();

                ui.label("Height (mm):");
                ui.add(egui::TextEdit::singleline(&mut self.size_editor.custom_height).desired_width(80.0));
                ui.end_row();
            });
        }

        ui.add_space(8.0);
        if ui.button("Save").clicked() {
            self.save_label_size();
        }
    }

    fn materials_ui(&mut self, ui: &mut egui::Ui) -> Option<MaterialAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("New material:");
            let field = ui.add(egui::TextEdit::singleline(&mut self.new_material).desired_width(220.0));
            let submitted = field.lost_focus() && ui.input().key_pressed(egui::Key::Enter);
            if ui.button("Save").clicked() || submitted {
                action = Some(MaterialAction::Add);
            }
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("material_rows").striped(true).num_columns(3).show(ui, |ui| {
                for (i, row) in self.material_rows.iter_mut().enumerate() {
                    ui.add_enabled(row.is_edited, egui::TextEdit::singleline(&mut row.editing_value).desired_width(260.0));

                    ui.horizontal(|ui| {
                        if row.is_edited {
                            if ui.button("Update").clicked() {
                                action = Some(MaterialAction::Update(i));
                            }
                            if ui.button("Cancel").clicked() {
                                row.reset_editor_value();
                            }
                        } else if ui.button("Edit").clicked() {
                            row.is_edited = true;
                        }
                    });

                    if ui.button("Delete").clicked() {
                        action = Some(MaterialAction::Delete(i));
                    }
                    ui.end_row();
                }
            });
        });

        action
    }
}

impl eframe::App for LabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let print_shortcut = {
            let input = ctx.input();
            input.modifiers.command && input.key_pressed(egui::Key::P)
        };
        if print_shortcut {
            self.print();
        }

        egui::TopBottomPanel::top("MainUI-TopPanel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Settings", |ui| {
                    if ui.button("Label size...").clicked() {
                        self.open_size_config();
                        ui.close_menu();
                    }
                    if ui.button("Materials...").clicked() {
                        self.open_materials();
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.form_ui(ui);
        });

        if self.show_size_config {
            let mut open = true;
            egui::Window::new("Label Size").open(&mut open).default_size([400.0, 300.0]).show(ctx, |ui| {
                self.size_config_ui(ui);
            });
            self.show_size_config = open;
        }

        if self.show_materials {
            let mut open = true;
            let mut action = None;
            egui::Window::new("Materials").open(&mut open).default_size([500.0, 600.0]).show(ctx, |ui| {
                action = self.materials_ui(ui);
            });
            self.show_materials = open;

            if let Some(action) = action {
                self.apply_material_action(action);
            }
        }

        // keeps the clock ticking
        ctx.request_repaint_after(CLOCK_REFRESH);
    }
}
