use std::fmt;
use std::str::FromStr;

/// The control a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single line text entry.
    Text,
    /// Masked text entry with a visibility toggle.
    Password,
    /// Date entry (any string the picker supplies).
    Date,
    /// Numeric-only entry capped at [`PHONE_MAX_LEN`](crate::PHONE_MAX_LEN) digits.
    Phone,
    /// Time entry (any string the picker supplies).
    Time,
    /// Single-select with type-to-filter.
    Autocomplete,
    /// Single-select list.
    Select,
    /// Exclusive choice shown side by side.
    Radio,
    /// Multi-line text entry.
    Multiline,
    /// Single file picker.
    File,
    /// Discrete slider.
    Slider,
    /// Star rating.
    Rating,
    /// Checkbox.
    Checkbox,
    /// On/off switch.
    Switch,
}

impl FieldKind {
    /// Whether the control edits a free-form string.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::Date | Self::Phone | Self::Time | Self::Multiline
        )
    }

    /// Whether the control stores a boolean.
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::Checkbox | Self::Switch)
    }
}

/// Every field of the form, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Date,
    Phone,
    Time,
    Country,
    Role,
    Gender,
    Description,
    File,
    Slider,
    Rating,
    Agree,
    Notifications,
}

/// Fields that must hold a non-empty value for a submission to succeed.
///
/// `File` and `Agree` are checked separately with their own messages.
pub const REQUIRED_FIELDS: [Field; 10] = [
    Field::Name,
    Field::Email,
    Field::Password,
    Field::Date,
    Field::Phone,
    Field::Time,
    Field::Description,
    Field::Role,
    Field::Gender,
    Field::Country,
];

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 15] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::Date,
        Field::Phone,
        Field::Time,
        Field::Country,
        Field::Role,
        Field::Gender,
        Field::Description,
        Field::File,
        Field::Slider,
        Field::Rating,
        Field::Agree,
        Field::Notifications,
    ];

    /// Stable key used in error maps, logs and scripted input.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::Date => "date",
            Field::Phone => "phone",
            Field::Time => "time",
            Field::Country => "country",
            Field::Role => "role",
            Field::Gender => "gender",
            Field::Description => "description",
            Field::File => "file",
            Field::Slider => "slider",
            Field::Rating => "rating",
            Field::Agree => "agree",
            Field::Notifications => "notifications",
        }
    }

    /// Human readable label shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Date => "Date of Birth",
            Field::Phone => "Phone Number",
            Field::Time => "Preferred Time",
            Field::Country => "Country",
            Field::Role => "Role",
            Field::Gender => "Gender",
            Field::Description => "Description",
            Field::File => "Upload File",
            Field::Slider => "Experience",
            Field::Rating => "Rating",
            Field::Agree => "I agree to terms",
            Field::Notifications => "Enable Notifications",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Name | Field::Email => FieldKind::Text,
            Field::Password => FieldKind::Password,
            Field::Date => FieldKind::Date,
            Field::Phone => FieldKind::Phone,
            Field::Time => FieldKind::Time,
            Field::Country => FieldKind::Autocomplete,
            Field::Role => FieldKind::Select,
            Field::Gender => FieldKind::Radio,
            Field::Description => FieldKind::Multiline,
            Field::File => FieldKind::File,
            Field::Slider => FieldKind::Slider,
            Field::Rating => FieldKind::Rating,
            Field::Agree => FieldKind::Checkbox,
            Field::Notifications => FieldKind::Switch,
        }
    }

    /// Whether this field is part of the presence check on submit.
    pub fn is_required(self) -> bool {
        REQUIRED_FIELDS.contains(&self) || matches!(self, Field::File | Field::Agree)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string does not name a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct ParseFieldError(pub String);

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}
