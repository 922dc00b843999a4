use std::collections::BTreeMap;

use crate::{Field, FormState, REQUIRED_FIELDS};

/// Why a field failed validation.
///
/// There is a single kind of failure: a required value is missing. The
/// message depends on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", required_message(*field))]
    MissingRequiredField { field: Field },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingRequiredField { field } => *field,
        }
    }

    pub fn message(&self) -> &'static str {
        required_message(self.field())
    }
}

fn required_message(field: Field) -> &'static str {
    match field {
        Field::File => "File is required",
        Field::Agree => "You must agree to continue",
        _ => "This field is required",
    }
}

/// Validation messages keyed by field, present only for failing fields.
///
/// Iteration follows display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    errors: BTreeMap<Field, ValidationError>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.field(), error);
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Message for `field`, if it is failing.
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(ValidationError::message)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Failing fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// `(field, message)` pairs in display order.
    pub fn messages(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.message()))
    }

    /// The first failing field in display order.
    pub fn first(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl FromIterator<ValidationError> for ErrorState {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = ErrorState::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

/// Check every required field for presence.
///
/// The required text and choice fields must be non-empty, a file must be
/// attached and the agreement must be given. `notifications`, `rating` and
/// `slider` are never checked.
pub fn validate(state: &FormState) -> ErrorState {
    let mut errors: ErrorState = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !state.value(*field).is_present())
        .map(|field| ValidationError::MissingRequiredField { field })
        .collect();

    if state.file.is_none() {
        errors.insert(ValidationError::MissingRequiredField { field: Field::File });
    }
    if !state.agree {
        errors.insert(ValidationError::MissingRequiredField {
            field: Field::Agree,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Country, FileRef, Gender, Role};
    use proptest::prelude::*;
    use rstest::rstest;

    fn complete() -> FormState {
        FormState {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "x".to_string(),
            date: "2000-01-01".to_string(),
            gender: Some(Gender::Male),
            agree: true,
            notifications: false,
            description: "test".to_string(),
            file: Some(FileRef::new("resume.pdf").unwrap()),
            role: Some(Role::Admin),
            phone: "5551234567".to_string(),
            time: "09:00".to_string(),
            rating: 0,
            slider: 0,
            country: Some(Country::Usa),
        }
    }

    fn without(field: Field) -> FormState {
        let mut state = complete();
        match field {
            Field::Name => state.name.clear(),
            Field::Email => state.email.clear(),
            Field::Password => state.password.clear(),
            Field::Date => state.date.clear(),
            Field::Phone => state.phone.clear(),
            Field::Time => state.time.clear(),
            Field::Description => state.description.clear(),
            Field::Role => state.role = None,
            Field::Gender => state.gender = None,
            Field::Country => state.country = None,
            Field::File => state.file = None,
            Field::Agree => state.agree = false,
            Field::Slider | Field::Rating | Field::Notifications => {}
        }
        state
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(validate(&complete()).is_empty());
    }

    #[test]
    fn empty_form_fails_everything_required() {
        let errors = validate(&FormState::default());
        assert_eq!(errors.len(), 12);
        assert!(!errors.contains(Field::Notifications));
        assert!(!errors.contains(Field::Rating));
        assert!(!errors.contains(Field::Slider));
        assert_eq!(errors.first(), Some(Field::Name));
    }

    #[rstest]
    #[case(Field::Name)]
    #[case(Field::Email)]
    #[case(Field::Password)]
    #[case(Field::Date)]
    #[case(Field::Phone)]
    #[case(Field::Time)]
    #[case(Field::Description)]
    #[case(Field::Role)]
    #[case(Field::Gender)]
    #[case(Field::Country)]
    fn missing_required_field(#[case] field: Field) {
        let errors = validate(&without(field));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
        assert_eq!(errors.message(field), Some("This field is required"));
    }

    #[test]
    fn missing_file() {
        let errors = validate(&without(Field::File));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(Field::File), Some("File is required"));
    }

    #[test]
    fn missing_agreement() {
        let errors = validate(&without(Field::Agree));
        assert_eq!(
            errors.messages().collect::<Vec<_>>(),
            vec![(Field::Agree, "You must agree to continue")]
        );
    }

    #[test]
    fn error_display() {
        let err = ValidationError::MissingRequiredField { field: Field::Time };
        assert_eq!(err.to_string(), "This field is required");
        let err = ValidationError::MissingRequiredField {
            field: Field::Agree,
        };
        assert_eq!(err.to_string(), "You must agree to continue");
    }

    #[test]
    fn repeated_validation_is_stable() {
        let state = without(Field::Email);
        assert_eq!(validate(&state), validate(&state));
    }

    proptest! {
        #[test]
        fn unvalidated_fields_never_fail(
            rating in 0u8..=5,
            slider in 0u8..=100,
            notifications in any::<bool>(),
        ) {
            let state = FormState { rating, slider, notifications, ..complete() };
            prop_assert!(validate(&state).is_empty());
        }

        #[test]
        fn any_non_empty_values_pass(
            name in ".+",
            email in ".+",
            password in ".+",
            date in ".+",
            phone in "[0-9]{1,10}",
            time in ".+",
            description in ".+",
        ) {
            let state = FormState {
                name, email, password, date, phone, time, description,
                ..complete()
            };
            prop_assert!(validate(&state).is_empty());
        }

        #[test]
        fn errors_are_exactly_the_missing_fields(mask in prop::collection::vec(any::<bool>(), 12)) {
            let checked: Vec<Field> = REQUIRED_FIELDS
                .into_iter()
                .chain([Field::File, Field::Agree])
                .collect();
            let mut state = complete();
            let mut expected = Vec::new();
            for (field, drop) in checked.iter().zip(&mask) {
                if *drop {
                    let emptied = without(*field);
                    match field {
                        Field::Name => state.name = emptied.name,
                        Field::Email => state.email = emptied.email,
                        Field::Password => state.password = emptied.password,
                        Field::Date => state.date = emptied.date,
                        Field::Phone => state.phone = emptied.phone,
                        Field::Time => state.time = emptied.time,
                        Field::Description => state.description = emptied.description,
                        Field::Role => state.role = emptied.role,
                        Field::Gender => state.gender = emptied.gender,
                        Field::Country => state.country = emptied.country,
                        Field::File => state.file = emptied.file,
                        Field::Agree => state.agree = emptied.agree,
                        _ => {}
                    }
                    expected.push(*field);
                }
            }
            expected.sort();
            let errors = validate(&state);
            prop_assert_eq!(errors.fields().collect::<Vec<_>>(), expected);
        }
    }
}
