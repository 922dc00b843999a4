use crate::{
    Country, Field, FileError, FileRef, FormState, Gender, PHONE_MAX_LEN, ParseOptionError,
    RATING_MAX, Role, SLIDER_MAX, SLIDER_STEP,
};

/// Error type for building a [`FieldUpdate`] from raw input.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    UnknownOption(#[from] ParseOptionError),

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: Field, value: String },

    #[error("Invalid flag for {field}: '{value}' (expected true or false)")]
    InvalidFlag { field: Field, value: String },

    #[error(transparent)]
    File(#[from] FileError),
}

/// A single user interaction with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Email(String),
    Password(String),
    Date(String),
    /// Raw phone input; non-digits are stripped when applied.
    Phone(String),
    Time(String),
    Description(String),
    Country(Option<Country>),
    Role(Option<Role>),
    Gender(Option<Gender>),
    /// Files picked in the file dialog; only the first one is kept.
    Files(Vec<FileRef>),
    Slider(u8),
    Rating(u8),
    Agree(bool),
    Notifications(bool),
}

impl FieldUpdate {
    /// The field this update targets.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Name(_) => Field::Name,
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Password(_) => Field::Password,
            FieldUpdate::Date(_) => Field::Date,
            FieldUpdate::Phone(_) => Field::Phone,
            FieldUpdate::Time(_) => Field::Time,
            FieldUpdate::Description(_) => Field::Description,
            FieldUpdate::Country(_) => Field::Country,
            FieldUpdate::Role(_) => Field::Role,
            FieldUpdate::Gender(_) => Field::Gender,
            FieldUpdate::Files(_) => Field::File,
            FieldUpdate::Slider(_) => Field::Slider,
            FieldUpdate::Rating(_) => Field::Rating,
            FieldUpdate::Agree(_) => Field::Agree,
            FieldUpdate::Notifications(_) => Field::Notifications,
        }
    }

    /// Build an update for a text-like field. Returns `None` for other fields.
    pub fn text(field: Field, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Some(match field {
            Field::Name => FieldUpdate::Name(value),
            Field::Email => FieldUpdate::Email(value),
            Field::Password => FieldUpdate::Password(value),
            Field::Date => FieldUpdate::Date(value),
            Field::Phone => FieldUpdate::Phone(value),
            Field::Time => FieldUpdate::Time(value),
            Field::Description => FieldUpdate::Description(value),
            _ => return None,
        })
    }

    /// Build an update for a toggle field. Returns `None` for other fields.
    pub fn toggle(field: Field, checked: bool) -> Option<Self> {
        match field {
            Field::Agree => Some(FieldUpdate::Agree(checked)),
            Field::Notifications => Some(FieldUpdate::Notifications(checked)),
            _ => None,
        }
    }

    /// Build an update for any field from its raw string form.
    ///
    /// Choice fields take the option's value (an empty string clears the
    /// selection), toggles take `true`/`false`, the file field takes a path
    /// (an empty string removes the file).
    pub fn parse(field: Field, raw: &str) -> Result<Self, UpdateError> {
        let update = match field {
            Field::Name => FieldUpdate::Name(raw.to_string()),
            Field::Email => FieldUpdate::Email(raw.to_string()),
            Field::Password => FieldUpdate::Password(raw.to_string()),
            Field::Date => FieldUpdate::Date(raw.to_string()),
            Field::Phone => FieldUpdate::Phone(raw.to_string()),
            Field::Time => FieldUpdate::Time(raw.to_string()),
            Field::Description => FieldUpdate::Description(raw.to_string()),
            Field::Country => FieldUpdate::Country(parse_optional(raw)?),
            Field::Role => FieldUpdate::Role(parse_optional(raw)?),
            Field::Gender => FieldUpdate::Gender(parse_optional(raw)?),
            Field::File if raw.is_empty() => FieldUpdate::Files(Vec::new()),
            Field::File => FieldUpdate::Files(vec![FileRef::new(raw)?]),
            Field::Slider => FieldUpdate::Slider(parse_number(field, raw)?),
            Field::Rating => FieldUpdate::Rating(parse_number(field, raw)?),
            Field::Agree => FieldUpdate::Agree(parse_flag(field, raw)?),
            Field::Notifications => FieldUpdate::Notifications(parse_flag(field, raw)?),
        };
        Ok(update)
    }

    /// Store this update in `state`.
    ///
    /// Phone input is reduced to digits, files keep only the first entry,
    /// slider and rating are brought into range. Everything else is stored
    /// verbatim.
    pub fn apply(self, state: &mut FormState) {
        match self {
            FieldUpdate::Name(v) => state.name = v,
            FieldUpdate::Email(v) => state.email = v,
            FieldUpdate::Password(v) => state.password = v,
            FieldUpdate::Date(v) => state.date = v,
            FieldUpdate::Phone(v) => state.phone = sanitize_phone(&v),
            FieldUpdate::Time(v) => state.time = v,
            FieldUpdate::Description(v) => state.description = v,
            FieldUpdate::Country(v) => state.country = v,
            FieldUpdate::Role(v) => state.role = v,
            FieldUpdate::Gender(v) => state.gender = v,
            FieldUpdate::Files(files) => state.file = files.into_iter().next(),
            FieldUpdate::Slider(v) => state.slider = snap_slider(v),
            FieldUpdate::Rating(v) => state.rating = v.min(RATING_MAX),
            FieldUpdate::Agree(v) => state.agree = v,
            FieldUpdate::Notifications(v) => state.notifications = v,
        }
    }
}

fn parse_number(field: Field, raw: &str) -> Result<u8, UpdateError> {
    raw.trim()
        .parse()
        .map_err(|_| UpdateError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_flag(field: Field, raw: &str) -> Result<bool, UpdateError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(UpdateError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_optional<T>(raw: &str) -> Result<Option<T>, ParseOptionError>
where
    T: std::str::FromStr<Err = ParseOptionError>,
{
    if raw.is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

/// Strip everything but ASCII digits and cap the result at [`PHONE_MAX_LEN`].
///
/// Applying it twice gives the same result as applying it once.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_LEN)
        .collect()
}

/// Clamp to the slider range and round to the nearest step.
pub fn snap_slider(value: u8) -> u8 {
    let clamped = value.min(SLIDER_MAX);
    let lower = clamped - clamped % SLIDER_STEP;
    if clamped - lower >= SLIDER_STEP / 2 {
        (lower + SLIDER_STEP).min(SLIDER_MAX)
    } else {
        lower
    }
}
