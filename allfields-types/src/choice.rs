use std::fmt;
use std::str::FromStr;

/// Error returned when a value is not one of a choice field's options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {field} option")]
pub struct ParseOptionError {
    pub field: &'static str,
    pub value: String,
}

/// A fixed option list backing a select, radio or autocomplete field.
pub trait Choice: Copy + Eq + fmt::Debug + 'static {
    /// All options in display order.
    const OPTIONS: &'static [Self];

    /// Value stored and logged for this option.
    fn value(self) -> &'static str;

    /// Text shown for this option.
    fn label(self) -> &'static str;

    /// Index of this option within [`Choice::OPTIONS`].
    fn index(self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|option| *option == self)
            .unwrap_or_default()
    }
}

fn parse_choice<C: Choice>(field: &'static str, s: &str) -> Result<C, ParseOptionError> {
    C::OPTIONS
        .iter()
        .copied()
        .find(|option| option.value() == s)
        .ok_or_else(|| ParseOptionError {
            field,
            value: s.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Choice for Gender {
    const OPTIONS: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn value(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("gender", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl Choice for Role {
    const OPTIONS: &'static [Self] = &[Role::Admin, Role::User, Role::Guest];

    fn value(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Guest => "Guest",
        }
    }
}

impl FromStr for Role {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("role", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    India,
    Usa,
    Canada,
    Australia,
    Germany,
}

impl Choice for Country {
    const OPTIONS: &'static [Self] = &[
        Country::India,
        Country::Usa,
        Country::Canada,
        Country::Australia,
        Country::Germany,
    ];

    fn value(self) -> &'static str {
        self.label()
    }

    fn label(self) -> &'static str {
        match self {
            Country::India => "India",
            Country::Usa => "USA",
            Country::Canada => "Canada",
            Country::Australia => "Australia",
            Country::Germany => "Germany",
        }
    }
}

impl Country {
    /// Options whose label contains `query`, ignoring case.
    ///
    /// An empty query matches every option.
    pub fn matching(query: &str) -> Vec<Country> {
        let query = query.trim().to_lowercase();
        Self::OPTIONS
            .iter()
            .copied()
            .filter(|country| country.label().to_lowercase().contains(&query))
            .collect()
    }
}

impl FromStr for Country {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("country", s)
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_as_label!(Gender, Role, Country);
