use crate::{Choice, Country, Field, FileRef, Gender, Role};

/// Maximum number of digits kept in the phone field.
pub const PHONE_MAX_LEN: usize = 10;

/// Highest rating value.
pub const RATING_MAX: u8 = 5;

/// Rating shown when the form is first loaded.
pub const RATING_INITIAL: u8 = 3;

/// Highest slider value.
pub const SLIDER_MAX: u8 = 100;

/// Slider values are multiples of this step.
pub const SLIDER_STEP: u8 = 10;

/// Slider value after load and after clearing.
pub const SLIDER_DEFAULT: u8 = 50;

/// All current field values of the form.
///
/// `Default` yields the cleared state. Use [`FormState::initial`] for the
/// state a freshly loaded form starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub date: String,
    pub gender: Option<Gender>,
    pub agree: bool,
    pub notifications: bool,
    pub description: String,
    pub file: Option<FileRef>,
    pub role: Option<Role>,
    /// Digits only, at most [`PHONE_MAX_LEN`] of them.
    pub phone: String,
    pub time: String,
    pub rating: u8,
    pub slider: u8,
    pub country: Option<Country>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            date: String::new(),
            gender: None,
            agree: false,
            notifications: false,
            description: String::new(),
            file: None,
            role: None,
            phone: String::new(),
            time: String::new(),
            rating: 0,
            slider: SLIDER_DEFAULT,
            country: None,
        }
    }
}

/// Borrowed view of a single field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
    Number(u8),
    Choice(Option<&'static str>),
    File(Option<&'a FileRef>),
}

impl FieldValue<'_> {
    /// Presence check used by validation.
    ///
    /// Empty strings, unset choices, missing files, zero and `false` are absent.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(b) => *b,
            FieldValue::Number(n) => *n != 0,
            FieldValue::Choice(c) => c.is_some(),
            FieldValue::File(f) => f.is_some(),
        }
    }
}

impl FormState {
    /// State of a freshly loaded form: the defaults with the rating preset.
    pub fn initial() -> Self {
        Self {
            rating: RATING_INITIAL,
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Email => FieldValue::Text(&self.email),
            Field::Password => FieldValue::Text(&self.password),
            Field::Date => FieldValue::Text(&self.date),
            Field::Phone => FieldValue::Text(&self.phone),
            Field::Time => FieldValue::Text(&self.time),
            Field::Description => FieldValue::Text(&self.description),
            Field::Country => FieldValue::Choice(self.country.map(Choice::value)),
            Field::Role => FieldValue::Choice(self.role.map(Choice::value)),
            Field::Gender => FieldValue::Choice(self.gender.map(Choice::value)),
            Field::File => FieldValue::File(self.file.as_ref()),
            Field::Slider => FieldValue::Number(self.slider),
            Field::Rating => FieldValue::Number(self.rating),
            Field::Agree => FieldValue::Flag(self.agree),
            Field::Notifications => FieldValue::Flag(self.notifications),
        }
    }

    /// Text of a text-like field, `None` for every other field.
    pub fn text(&self, field: Field) -> Option<&str> {
        match self.value(field) {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}
