//! Egui backend implementation for the FormBackend trait.

use allfields::{
    Choice, Country, Field, FieldKind, FieldUpdate, FileRef, Form, FormBackend, FormError, Gender,
    PHONE_MAX_LEN, RATING_MAX, Role, SLIDER_MAX, SLIDER_STEP,
};
use eframe::egui;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Error type for the Egui backend.
#[derive(Debug, Error)]
pub enum EguiFormError {
    /// User cancelled the form (closed the window or pressed Cancel).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An error occurred in the egui/eframe backend.
    #[error("Egui error: {0}")]
    Eframe(String),

    /// The UI thread panicked while holding the form state.
    #[error("Form state lock was poisoned")]
    StatePoisoned,
}

impl From<EguiFormError> for FormError {
    fn from(err: EguiFormError) -> Self {
        match err {
            EguiFormError::Cancelled => FormError::Cancelled,
            other => FormError::backend(other),
        }
    }
}

/// Builder/configuration for the Egui backend.
#[derive(Debug, Clone)]
pub struct EguiFormBackend {
    /// Window title.
    title: String,
    /// Window size [width, height].
    window_size: [f32; 2],
}

impl Default for EguiFormBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiFormBackend {
    /// Create a new Egui backend with default settings.
    pub fn new() -> Self {
        Self {
            title: "All Fields Form".to_string(),
            window_size: [520.0, 820.0],
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size.
    pub fn with_window_size(mut self, size: [f32; 2]) -> Self {
        self.window_size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Editing,
    Submitted,
    Cancelled,
}

/// Everything the window edits, shared with the caller of `run_native`.
#[derive(Debug)]
struct EditorState {
    form: Form,
    show_password: bool,
    country_query: String,
    file_input: String,
    file_error: Option<String>,
    outcome: Outcome,
}

impl EditorState {
    fn new(form: Form) -> Self {
        Self {
            form,
            show_password: false,
            country_query: String::new(),
            file_input: String::new(),
            file_error: None,
            outcome: Outcome::Editing,
        }
    }

    fn submit(&mut self) {
        if self.form.validate() {
            self.outcome = Outcome::Submitted;
        } else {
            tracing::debug!(errors = self.form.errors().len(), "form rejected");
        }
    }

    fn clear(&mut self) {
        self.form.clear();
        self.country_query.clear();
        self.file_input.clear();
        self.file_error = None;
    }

    fn set_text(&mut self, field: Field, value: String) {
        if let Some(update) = FieldUpdate::text(field, value) {
            self.form.update(update);
        }
    }

    /// Clicking the star that is already the rating resets it to zero.
    fn click_star(&mut self, star: u8) {
        let rating = if self.form.state().rating == star {
            0
        } else {
            star
        };
        self.form.update(FieldUpdate::Rating(rating));
    }

    fn pick_country(&mut self, country: Country) {
        self.form.update(FieldUpdate::Country(Some(country)));
        self.country_query.clear();
    }

    fn attach_file(&mut self) {
        match FileRef::open(self.file_input.trim()) {
            Ok(file) => {
                self.form.update(FieldUpdate::Files(vec![file]));
                self.file_input.clear();
                self.file_error = None;
            }
            Err(err) => self.file_error = Some(err.to_string()),
        }
    }

    fn remove_file(&mut self) {
        self.form.update(FieldUpdate::Files(Vec::new()));
        self.file_error = None;
    }

    fn error(&self, field: Field) -> Option<&str> {
        if field == Field::File
            && let Some(err) = &self.file_error
        {
            return Some(err.as_str());
        }
        self.form.error(field)
    }
}

/// The egui application that renders the form.
struct FormApp {
    state: Arc<Mutex<EditorState>>,
}

impl FormApp {
    fn format_label(field: Field) -> String {
        if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        }
    }

    fn render_field(ui: &mut egui::Ui, field: Field, state: &mut EditorState) {
        match field.kind() {
            FieldKind::Checkbox => {}
            _ => {
                ui.label(Self::format_label(field));
            }
        }

        match field.kind() {
            kind if kind.is_text() => Self::render_text_field(ui, field, state),
            FieldKind::Autocomplete => Self::render_country(ui, state),
            FieldKind::Select => Self::render_role(ui, state),
            FieldKind::Radio => Self::render_gender(ui, state),
            FieldKind::File => Self::render_file(ui, state),
            FieldKind::Slider => {
                let mut value = state.form.state().slider;
                let slider = egui::Slider::new(&mut value, 0..=SLIDER_MAX)
                    .step_by(f64::from(SLIDER_STEP));
                if ui.add(slider).changed() {
                    state.form.update(FieldUpdate::Slider(value));
                }
            }
            FieldKind::Rating => Self::render_rating(ui, state),
            FieldKind::Checkbox => {
                let mut checked = state.form.state().agree;
                if ui.checkbox(&mut checked, Self::format_label(field)).changed() {
                    state.form.update(FieldUpdate::Agree(checked));
                }
            }
            FieldKind::Switch => {
                let mut on = state.form.state().notifications;
                let text = if on { "On" } else { "Off" };
                if ui.toggle_value(&mut on, text).changed() {
                    state.form.update(FieldUpdate::Notifications(on));
                }
            }
            _ => {}
        }

        if let Some(error) = state.error(field) {
            ui.colored_label(egui::Color32::RED, format!("⚠ {error}"));
        }

        ui.add_space(8.0);
    }

    fn render_text_field(ui: &mut egui::Ui, field: Field, state: &mut EditorState) {
        let mut value = state.form.state().text(field).unwrap_or_default().to_string();

        let changed = match field.kind() {
            FieldKind::Multiline => ui
                .add(
                    egui::TextEdit::multiline(&mut value)
                        .desired_width(f32::INFINITY)
                        .desired_rows(4),
                )
                .changed(),
            FieldKind::Password => {
                let mut show = state.show_password;
                let changed = ui
                    .horizontal(|ui| {
                        let response =
                            ui.add(egui::TextEdit::singleline(&mut value).password(!show));
                        ui.checkbox(&mut show, "Show");
                        response.changed()
                    })
                    .inner;
                state.show_password = show;
                changed
            }
            kind => {
                let mut edit = egui::TextEdit::singleline(&mut value).desired_width(f32::INFINITY);
                edit = match kind {
                    FieldKind::Date => edit.hint_text("YYYY-MM-DD"),
                    FieldKind::Time => edit.hint_text("HH:MM"),
                    FieldKind::Phone => edit.hint_text("Digits only").char_limit(PHONE_MAX_LEN),
                    _ => edit,
                };
                ui.add(edit).changed()
            }
        };

        if changed {
            state.set_text(field, value);
        }
    }

    fn render_country(ui: &mut egui::Ui, state: &mut EditorState) {
        ui.horizontal(|ui| {
            let selected = state.form.state().country;
            ui.label(selected.map(|c| c.label()).unwrap_or("No country selected"));
            if selected.is_some() && ui.small_button("✕").clicked() {
                state.form.update(FieldUpdate::Country(None));
            }
        });
        ui.add(
            egui::TextEdit::singleline(&mut state.country_query)
                .hint_text("Type to filter countries")
                .desired_width(f32::INFINITY),
        );

        let current = state.form.state().country;
        let mut picked = None;
        for country in Country::matching(&state.country_query) {
            if ui
                .selectable_label(current == Some(country), country.label())
                .clicked()
            {
                picked = Some(country);
            }
        }
        if let Some(country) = picked {
            state.pick_country(country);
        }
    }

    fn render_role(ui: &mut egui::Ui, state: &mut EditorState) {
        let mut role = state.form.state().role;
        egui::ComboBox::from_id_salt("role")
            .selected_text(role.map(|r| r.label()).unwrap_or("Select Role"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut role, None, "Select Role");
                for option in Role::OPTIONS {
                    ui.selectable_value(&mut role, Some(*option), option.label());
                }
            });
        if role != state.form.state().role {
            state.form.update(FieldUpdate::Role(role));
        }
    }

    fn render_gender(ui: &mut egui::Ui, state: &mut EditorState) {
        let mut gender = state.form.state().gender;
        ui.horizontal(|ui| {
            for option in Gender::OPTIONS {
                ui.radio_value(&mut gender, Some(*option), option.label());
            }
        });
        if gender != state.form.state().gender {
            state.form.update(FieldUpdate::Gender(gender));
        }
    }

    fn render_file(ui: &mut egui::Ui, state: &mut EditorState) {
        let attached = state.form.state().file.as_ref().map(|f| match f.size() {
            Some(size) => format!("{} ({size} bytes)", f.name()),
            None => f.name().to_string(),
        });
        if let Some(name) = attached {
            ui.horizontal(|ui| {
                ui.label(name);
                if ui.small_button("Remove").clicked() {
                    state.remove_file();
                }
            });
        }

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.file_input).hint_text(".png, .jpg or .pdf"),
            );
            if response.changed() {
                state.file_error = None;
            }
            let ready = !state.file_input.trim().is_empty();
            if ui.add_enabled(ready, egui::Button::new("Attach")).clicked() {
                state.attach_file();
            }
        });
    }

    fn render_rating(ui: &mut egui::Ui, state: &mut EditorState) {
        let rating = state.form.state().rating;
        let mut clicked = None;
        ui.horizontal(|ui| {
            for star in 1..=RATING_MAX {
                let symbol = if star <= rating { "★" } else { "☆" };
                let button = egui::Button::new(egui::RichText::new(symbol).size(20.0)).frame(false);
                if ui.add(button).clicked() {
                    clicked = Some(star);
                }
            }
            ui.label(format!("{rating}/{RATING_MAX}"));
        });
        if let Some(star) = clicked {
            state.click_star(star);
        }
    }

    /// Draw one frame. Returns `true` once the window should close.
    fn show(&mut self, ctx: &egui::Context) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return true;
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            state.outcome = Outcome::Cancelled;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for field in Field::ALL {
                    Self::render_field(ui, field, &mut state);
                }

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Submit").clicked() {
                        state.submit();
                    }
                    if ui.button("Clear").clicked() {
                        state.clear();
                    }
                    if ui.button("Cancel").clicked() {
                        state.outcome = Outcome::Cancelled;
                    }

                    let errors = state.form.errors().len();
                    if errors > 0 {
                        ui.colored_label(
                            egui::Color32::RED,
                            format!("{errors} validation error(s)"),
                        );
                    }
                });
            });
        });

        state.outcome != Outcome::Editing
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.show(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl FormBackend for EguiFormBackend {
    type Error = EguiFormError;

    fn edit(&self, form: Form) -> Result<Form, Self::Error> {
        let state = Arc::new(Mutex::new(EditorState::new(form)));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size(self.window_size),
            ..Default::default()
        };

        // eframe::run_native blocks until the window is closed
        let app_state = Arc::clone(&state);
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |_cc| Ok(Box::new(FormApp { state: app_state }) as Box<dyn eframe::App>)),
        )
        .map_err(|e| EguiFormError::Eframe(e.to_string()))?;

        let mut state = state.lock().map_err(|_| EguiFormError::StatePoisoned)?;
        match state.outcome {
            Outcome::Submitted => Ok(std::mem::take(&mut state.form)),
            // Closing the window counts as cancelling
            Outcome::Editing | Outcome::Cancelled => Err(EguiFormError::Cancelled),
        }
    }
}
