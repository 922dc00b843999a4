//! Keyboard-driven editing state for the terminal form.
//!
//! Everything here is independent of the terminal so it can be driven by
//! synthetic key events.

use std::collections::HashMap;

use allfields::{
    Choice, Country, Field, FieldKind, FieldUpdate, FileRef, Form, Gender, PHONE_MAX_LEN,
    RATING_MAX, Role, SLIDER_MAX, SLIDER_STEP,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    /// The form validated on a submit request.
    Submitted,
    Cancelled,
}

/// The focusable elements, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Field(Field),
    Submit,
    Clear,
}

impl Focus {
    const ORDER_LEN: usize = Field::ALL.len() + 2;

    fn index(self) -> usize {
        match self {
            Focus::Field(field) => Field::ALL
                .iter()
                .position(|f| *f == field)
                .unwrap_or_default(),
            Focus::Submit => Field::ALL.len(),
            Focus::Clear => Field::ALL.len() + 1,
        }
    }

    fn from_index(idx: usize) -> Self {
        match Field::ALL.get(idx) {
            Some(field) => Focus::Field(*field),
            None if idx == Field::ALL.len() => Focus::Submit,
            None => Focus::Clear,
        }
    }

    pub(crate) fn field(self) -> Option<Field> {
        match self {
            Focus::Field(field) => Some(field),
            _ => None,
        }
    }
}

/// Number of entries in the role list, including the "Select Role" placeholder.
pub(crate) const ROLE_ENTRIES: usize = Role::OPTIONS.len() + 1;

/// Editing state for the whole form.
pub(crate) struct FormView {
    form: Form,
    focus: Focus,
    /// Cursor position in characters, per text field.
    cursors: HashMap<Field, usize>,
    show_password: bool,
    country_query: String,
    country_highlight: usize,
    /// 0 is the placeholder entry, `n` is `Role::OPTIONS[n - 1]`.
    role_highlight: usize,
    gender_highlight: usize,
    file_input: String,
    file_error: Option<String>,
    /// Scroll offset in rows (vertical)
    pub(crate) scroll_offset: u16,
}

impl FormView {
    pub(crate) fn new(form: Form) -> Self {
        let cursors = Field::ALL
            .into_iter()
            .filter_map(|field| {
                form.state()
                    .text(field)
                    .map(|text| (field, text.chars().count()))
            })
            .collect();
        let role_highlight = form.state().role.map(|r| r.index() + 1).unwrap_or(0);
        let gender_highlight = form.state().gender.map(Choice::index).unwrap_or(0);

        Self {
            form,
            focus: Focus::Field(Field::ALL[0]),
            cursors,
            show_password: false,
            country_query: String::new(),
            country_highlight: 0,
            role_highlight,
            gender_highlight,
            file_input: String::new(),
            file_error: None,
            scroll_offset: 0,
        }
    }

    pub(crate) fn form(&self) -> &Form {
        &self.form
    }

    pub(crate) fn into_form(self) -> Form {
        self.form
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn cursor(&self, field: Field) -> usize {
        self.cursors.get(&field).copied().unwrap_or_default()
    }

    pub(crate) fn show_password(&self) -> bool {
        self.show_password
    }

    pub(crate) fn country_query(&self) -> &str {
        &self.country_query
    }

    pub(crate) fn country_matches(&self) -> Vec<Country> {
        Country::matching(&self.country_query)
    }

    pub(crate) fn country_highlight(&self) -> usize {
        self.country_highlight
    }

    pub(crate) fn role_highlight(&self) -> usize {
        self.role_highlight
    }

    pub(crate) fn gender_highlight(&self) -> usize {
        self.gender_highlight
    }

    pub(crate) fn file_input(&self) -> &str {
        &self.file_input
    }

    /// Message shown under a field: a pending file error wins over the
    /// validation message.
    pub(crate) fn error(&self, field: Field) -> Option<&str> {
        if field == Field::File
            && let Some(err) = &self.file_error
        {
            return Some(err.as_str());
        }
        self.form.error(field)
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let focused_kind = self.focus.field().map(Field::kind);

        match key.code {
            KeyCode::Esc => return Control::Cancelled,
            KeyCode::F(10) => return self.submit(),
            KeyCode::Enter if ctrl => return self.submit(),
            KeyCode::F(2) => self.show_password = !self.show_password,
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::Enter => match self.focus {
                Focus::Submit => return self.submit(),
                Focus::Clear => self.clear(),
                Focus::Field(field) => match field.kind() {
                    FieldKind::Multiline => self.insert_char('\n'),
                    FieldKind::Select | FieldKind::Radio | FieldKind::Autocomplete => {
                        self.select_highlighted()
                    }
                    FieldKind::Checkbox | FieldKind::Switch => self.toggle(),
                    FieldKind::File => self.attach_file(),
                    _ => self.next_focus(),
                },
            },
            KeyCode::BackTab => self.prev_focus(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev_focus(),
            KeyCode::Tab => self.next_focus(),
            KeyCode::Up => match focused_kind {
                Some(FieldKind::Select | FieldKind::Radio | FieldKind::Autocomplete) => {
                    self.move_highlight(-1)
                }
                _ => self.prev_focus(),
            },
            KeyCode::Down => match focused_kind {
                Some(FieldKind::Select | FieldKind::Radio | FieldKind::Autocomplete) => {
                    self.move_highlight(1)
                }
                _ => self.next_focus(),
            },
            KeyCode::Left if ctrl => self.prev_focus(),
            KeyCode::Right if ctrl => self.next_focus(),
            KeyCode::Left => match focused_kind {
                Some(FieldKind::Slider | FieldKind::Rating) => self.step(-1),
                Some(FieldKind::Radio) => self.move_highlight(-1),
                _ => self.cursor_left(),
            },
            KeyCode::Right => match focused_kind {
                Some(FieldKind::Slider | FieldKind::Rating) => self.step(1),
                Some(FieldKind::Radio) => self.move_highlight(1),
                _ => self.cursor_right(),
            },
            KeyCode::Char(' ') => match focused_kind {
                Some(FieldKind::Checkbox | FieldKind::Switch) => self.toggle(),
                Some(FieldKind::Select | FieldKind::Radio) => self.select_highlighted(),
                _ => self.insert_char(' '),
            },
            KeyCode::Char(c) if focused_kind == Some(FieldKind::Rating) => {
                if let Some(n) = c.to_digit(10)
                    && n <= u32::from(RATING_MAX)
                {
                    self.form.update(FieldUpdate::Rating(n as u8));
                }
            }
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Home => self.set_cursor(0),
            KeyCode::End => self.set_cursor(usize::MAX),
            KeyCode::PageDown => {
                for _ in 0..5 {
                    self.next_focus();
                }
            }
            KeyCode::PageUp => {
                for _ in 0..5 {
                    self.prev_focus();
                }
            }
            _ => {}
        }
        Control::Continue
    }

    fn submit(&mut self) -> Control {
        if self.form.validate() {
            tracing::debug!("terminal form validated, closing");
            return Control::Submitted;
        }
        if let Some(first) = self.form.errors().first() {
            self.focus = Focus::Field(first);
        }
        Control::Continue
    }

    fn clear(&mut self) {
        self.form.clear();
        self.cursors.values_mut().for_each(|c| *c = 0);
        self.country_query.clear();
        self.country_highlight = 0;
        self.role_highlight = 0;
        self.gender_highlight = 0;
        self.file_input.clear();
        self.file_error = None;
    }

    fn next_focus(&mut self) {
        let idx = self.focus.index();
        if idx + 1 < Focus::ORDER_LEN {
            self.focus = Focus::from_index(idx + 1);
        }
    }

    fn prev_focus(&mut self) {
        let idx = self.focus.index();
        if idx > 0 {
            self.focus = Focus::from_index(idx - 1);
        }
    }

    /// Text currently edited by the focused field, with the field it belongs to.
    fn edited_text(&self) -> Option<(Field, &str)> {
        let field = self.focus.field()?;
        match field.kind() {
            FieldKind::Autocomplete => Some((field, &self.country_query)),
            FieldKind::File => Some((field, &self.file_input)),
            _ => self.form.state().text(field).map(|text| (field, text)),
        }
    }

    /// Replace the edited text of `field` and move its cursor.
    fn store_text(&mut self, field: Field, text: String, cursor: usize) {
        match field.kind() {
            FieldKind::Autocomplete => {
                self.country_query = text;
                self.country_highlight = 0;
            }
            FieldKind::File => {
                self.file_input = text;
                self.file_error = None;
            }
            _ => {
                if let Some(update) = FieldUpdate::text(field, text) {
                    self.form.update(update);
                }
            }
        }
        let len = self.edited_text().map(|(_, t)| t.chars().count()).unwrap_or(0);
        self.cursors.insert(field, cursor.min(len));
    }

    fn insert_char(&mut self, c: char) {
        let Some((field, text)) = self.edited_text() else {
            return;
        };
        let len = text.chars().count();
        if field == Field::Phone && len >= PHONE_MAX_LEN {
            return;
        }
        let cursor = self.cursor(field).min(len);
        let mut chars: Vec<char> = text.chars().collect();
        chars.insert(cursor, c);

        let text: String = chars.into_iter().collect();
        self.store_text(field, text, cursor);
        // Input rejected by the field (e.g. a letter in the phone number)
        // leaves the length, and thus the cursor, unchanged.
        let new_len = self.edited_text().map(|(_, t)| t.chars().count()).unwrap_or(0);
        if new_len > len {
            self.cursors.insert(field, cursor + 1);
        }
    }

    fn backspace(&mut self) {
        let Some((field, text)) = self.edited_text() else {
            return;
        };
        let cursor = self.cursor(field).min(text.chars().count());
        if cursor == 0 {
            return;
        }
        let mut chars: Vec<char> = text.chars().collect();
        chars.remove(cursor - 1);
        self.store_text(field, chars.into_iter().collect(), cursor - 1);
    }

    fn delete(&mut self) {
        if self.focus == Focus::Field(Field::Country) && self.country_query.is_empty() {
            self.form.update(FieldUpdate::Country(None));
            return;
        }
        let Some((field, text)) = self.edited_text() else {
            return;
        };
        let cursor = self.cursor(field);
        let mut chars: Vec<char> = text.chars().collect();
        if cursor < chars.len() {
            chars.remove(cursor);
            self.store_text(field, chars.into_iter().collect(), cursor);
        }
    }

    fn cursor_left(&mut self) {
        if let Some((field, _)) = self.edited_text() {
            let cursor = self.cursor(field);
            self.cursors.insert(field, cursor.saturating_sub(1));
        }
    }

    fn cursor_right(&mut self) {
        if let Some((field, text)) = self.edited_text() {
            let len = text.chars().count();
            let cursor = self.cursor(field);
            self.cursors.insert(field, (cursor + 1).min(len));
        }
    }

    fn set_cursor(&mut self, pos: usize) {
        if let Some((field, text)) = self.edited_text() {
            let len = text.chars().count();
            self.cursors.insert(field, pos.min(len));
        }
    }

    fn toggle(&mut self) {
        let Some(field) = self.focus.field() else {
            return;
        };
        let checked = match field {
            Field::Agree => !self.form.state().agree,
            Field::Notifications => !self.form.state().notifications,
            _ => return,
        };
        if let Some(update) = FieldUpdate::toggle(field, checked) {
            self.form.update(update);
        }
    }

    fn move_highlight(&mut self, delta: isize) {
        let (highlight, len) = match self.focus {
            Focus::Field(Field::Role) => (&mut self.role_highlight, ROLE_ENTRIES),
            Focus::Field(Field::Gender) => (&mut self.gender_highlight, Gender::OPTIONS.len()),
            Focus::Field(Field::Country) => {
                let len = Country::matching(&self.country_query).len();
                (&mut self.country_highlight, len)
            }
            _ => return,
        };
        if len == 0 {
            return;
        }
        *highlight = (*highlight as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn select_highlighted(&mut self) {
        let update = match self.focus {
            Focus::Field(Field::Role) => FieldUpdate::Role(
                self.role_highlight
                    .checked_sub(1)
                    .and_then(|idx| Role::OPTIONS.get(idx).copied()),
            ),
            Focus::Field(Field::Gender) => {
                FieldUpdate::Gender(Gender::OPTIONS.get(self.gender_highlight).copied())
            }
            Focus::Field(Field::Country) => {
                let Some(country) = self.country_matches().get(self.country_highlight).copied()
                else {
                    return;
                };
                self.country_query.clear();
                self.country_highlight = 0;
                self.cursors.insert(Field::Country, 0);
                FieldUpdate::Country(Some(country))
            }
            _ => return,
        };
        self.form.update(update);
    }

    fn step(&mut self, direction: i16) {
        let state = self.form.state();
        let update = match self.focus {
            Focus::Field(Field::Slider) => {
                let value = i16::from(state.slider) + direction * i16::from(SLIDER_STEP);
                FieldUpdate::Slider(value.clamp(0, i16::from(SLIDER_MAX)) as u8)
            }
            Focus::Field(Field::Rating) => {
                let value = i16::from(state.rating) + direction;
                FieldUpdate::Rating(value.clamp(0, i16::from(RATING_MAX)) as u8)
            }
            _ => return,
        };
        self.form.update(update);
    }

    fn attach_file(&mut self) {
        let path = self.file_input.trim();
        if path.is_empty() {
            self.form.update(FieldUpdate::Files(Vec::new()));
            self.file_error = None;
            return;
        }
        match FileRef::open(path) {
            Ok(file) => {
                self.form.update(FieldUpdate::Files(vec![file]));
                self.file_input.clear();
                self.cursors.insert(Field::File, 0);
                self.file_error = None;
            }
            Err(err) => self.file_error = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allfields::FormState;
    use rstest::rstest;

    fn press(view: &mut FormView, code: KeyCode) -> Control {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(view: &mut FormView, text: &str) {
        for c in text.chars() {
            press(view, KeyCode::Char(c));
        }
    }

    fn focus_on(view: &mut FormView, field: Field) {
        view.focus = Focus::Field(field);
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut view = FormView::new(Form::new());
        type_text(&mut view, "Ada");
        press(&mut view, KeyCode::Left);
        press(&mut view, KeyCode::Backspace);
        assert_eq!(view.form().state().name, "Aa");
        assert_eq!(view.cursor(Field::Name), 1);
    }

    #[test]
    fn non_ascii_text() {
        let mut view = FormView::new(Form::new());
        type_text(&mut view, "Zoë");
        press(&mut view, KeyCode::Home);
        press(&mut view, KeyCode::Delete);
        assert_eq!(view.form().state().name, "oë");
    }

    #[test]
    fn phone_accepts_digits_only() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Phone);
        type_text(&mut view, "12a3-45");
        assert_eq!(view.form().state().phone, "12345");
        assert_eq!(view.cursor(Field::Phone), 5);

        type_text(&mut view, "678901234");
        assert_eq!(view.form().state().phone, "1234567890");
    }

    #[test]
    fn tab_order() {
        let mut view = FormView::new(Form::new());
        for field in Field::ALL {
            assert_eq!(view.focus(), Focus::Field(field));
            press(&mut view, KeyCode::Tab);
        }
        assert_eq!(view.focus(), Focus::Submit);
        press(&mut view, KeyCode::Tab);
        assert_eq!(view.focus(), Focus::Clear);
        press(&mut view, KeyCode::Tab);
        assert_eq!(view.focus(), Focus::Clear);
        press(&mut view, KeyCode::BackTab);
        assert_eq!(view.focus(), Focus::Submit);
    }

    #[test]
    fn failed_submit_focuses_first_error() {
        let mut view = FormView::new(Form::new());
        type_text(&mut view, "Ada");
        view.focus = Focus::Submit;

        assert_eq!(press(&mut view, KeyCode::Enter), Control::Continue);
        assert_eq!(view.focus(), Focus::Field(Field::Email));
        assert_eq!(view.error(Field::Email), Some("This field is required"));
        assert_eq!(view.error(Field::Name), None);
    }

    #[test]
    fn valid_form_submits() {
        let state = FormState {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "x".to_string(),
            date: "2000-01-01".to_string(),
            phone: "5551234567".to_string(),
            time: "09:00".to_string(),
            description: "test".to_string(),
            role: Some(Role::Admin),
            gender: Some(Gender::Male),
            country: Some(Country::Usa),
            file: Some(FileRef::new("a.pdf").unwrap()),
            agree: true,
            ..FormState::default()
        };
        let mut view = FormView::new(Form::with_state(state.clone()));
        assert_eq!(press(&mut view, KeyCode::F(10)), Control::Submitted);
        assert_eq!(view.into_form().state(), &state);
    }

    #[test]
    fn escape_cancels() {
        let mut view = FormView::new(Form::new());
        assert_eq!(press(&mut view, KeyCode::Esc), Control::Cancelled);
    }

    #[test]
    fn clear_button_resets() {
        let mut view = FormView::new(Form::new());
        type_text(&mut view, "Ada");
        press(&mut view, KeyCode::F(10));
        view.focus = Focus::Clear;
        press(&mut view, KeyCode::Enter);

        assert_eq!(view.form().state(), &FormState::default());
        assert!(view.form().errors().is_empty());
        assert_eq!(view.cursor(Field::Name), 0);
    }

    #[test]
    fn country_autocomplete() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Country);
        type_text(&mut view, "an");
        assert_eq!(view.country_matches(), vec![Country::Canada, Country::Germany]);

        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.form().state().country, Some(Country::Germany));
        assert_eq!(view.country_query(), "");

        press(&mut view, KeyCode::Delete);
        assert_eq!(view.form().state().country, None);
    }

    #[test]
    fn country_without_matches() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Country);
        type_text(&mut view, "zz");
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.form().state().country, None);
    }

    #[test]
    fn role_select_with_placeholder() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Role);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Char(' '));
        assert_eq!(view.form().state().role, Some(Role::User));

        press(&mut view, KeyCode::Up);
        press(&mut view, KeyCode::Up);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.form().state().role, None);
    }

    #[test]
    fn gender_radio_wraps() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Gender);
        press(&mut view, KeyCode::Left);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.form().state().gender, Some(Gender::Other));
    }

    #[rstest]
    #[case(KeyCode::Right, 60)]
    #[case(KeyCode::Left, 40)]
    fn slider_steps(#[case] key: KeyCode, #[case] expected: u8) {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Slider);
        press(&mut view, key);
        assert_eq!(view.form().state().slider, expected);
    }

    #[test]
    fn slider_stays_in_range() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Slider);
        for _ in 0..20 {
            press(&mut view, KeyCode::Right);
        }
        assert_eq!(view.form().state().slider, 100);
    }

    #[test]
    fn rating_keys() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Rating);
        assert_eq!(view.form().state().rating, 3);
        press(&mut view, KeyCode::Right);
        assert_eq!(view.form().state().rating, 4);
        press(&mut view, KeyCode::Char('1'));
        assert_eq!(view.form().state().rating, 1);
        press(&mut view, KeyCode::Char('9'));
        assert_eq!(view.form().state().rating, 1);
        press(&mut view, KeyCode::Left);
        press(&mut view, KeyCode::Left);
        assert_eq!(view.form().state().rating, 0);
    }

    #[test]
    fn toggles() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Agree);
        press(&mut view, KeyCode::Char(' '));
        focus_on(&mut view, Field::Notifications);
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Enter);
        assert!(view.form().state().agree);
        assert!(!view.form().state().notifications);
    }

    #[test]
    fn password_visibility() {
        let mut view = FormView::new(Form::new());
        assert!(!view.show_password());
        press(&mut view, KeyCode::F(2));
        assert!(view.show_password());
    }

    #[test]
    fn multiline_enter_inserts_newline() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::Description);
        type_text(&mut view, "a");
        press(&mut view, KeyCode::Enter);
        type_text(&mut view, "b");
        assert_eq!(view.form().state().description, "a\nb");
        assert_eq!(view.focus(), Focus::Field(Field::Description));
    }

    #[test]
    fn file_with_wrong_extension() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::File);
        type_text(&mut view, "notes.txt");
        press(&mut view, KeyCode::Enter);
        assert!(view.form().state().file.is_none());
        assert!(view.error(Field::File).unwrap().starts_with("Unsupported file type"));

        press(&mut view, KeyCode::Backspace);
        assert_eq!(view.error(Field::File), None);
        assert_eq!(view.file_input(), "notes.tx");
    }

    #[test]
    fn missing_file() {
        let mut view = FormView::new(Form::new());
        focus_on(&mut view, Field::File);
        type_text(&mut view, "/no/such/dir/scan.pdf");
        press(&mut view, KeyCode::Enter);
        assert!(view.form().state().file.is_none());
        assert!(view.error(Field::File).unwrap().starts_with("Cannot read"));
    }

    #[test]
    fn ctrl_l_clears() {
        let mut view = FormView::new(Form::new());
        type_text(&mut view, "Ada");
        view.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(view.form().state().name, "");
    }
}
