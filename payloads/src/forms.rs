//! Declarative form definitions and validation.
//!
//! A form is a list of [`FieldSpec`]s plus a [`FormModel`] type that turns
//! the raw string values typed by the user into a typed request. Required
//! fields are checked from the specs; everything else (formats, enumerations,
//! date ordering) is checked while parsing. A form that fails validation
//! never produces a payload, so it can never reach a mutation.

use std::collections::BTreeMap;
use std::str::FromStr;

use jiff::civil::{Date, Time};
use rust_decimal::Decimal;

use crate::{Choice, Image};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    /// Several days, held as a comma separated list.
    Dates,
    Time,
    /// Fixed options known at compile time.
    Select(Vec<SelectOption>),
    /// Options supplied by the page from fetched data, keyed by field name.
    Lookup,
    /// Like `Lookup`, but several values may be picked.
    MultiLookup,
    TextArea,
    Markdown,
    Checkbox,
    /// An image picked by the user; uploaded before the form is submitted.
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub fn optional(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// Raw form state: field name to the string the input currently holds.
///
/// Multi-value fields hold a comma separated list, checkboxes hold
/// `"true"`/`"false"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn set_opt(&mut self, name: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.set(name, value.to_string());
        }
    }

    pub fn set_list<T: ToString>(&mut self, name: &str, values: &[T]) {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.set(name, joined);
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-field error messages, rendered inline under each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, name: &str, message: impl Into<String>) {
        // keep the first error for a field
        self.0
            .entry(name.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A typed request built from a declarative form.
pub trait FormModel: Sized {
    fn fields() -> Vec<FieldSpec>;

    fn from_values(values: &FormValues) -> Result<Self, FieldErrors>;

    /// Values used to reset the form, blank by default.
    fn initial_values() -> FormValues {
        FormValues::new()
    }
}

/// Check every required field in `specs` has a value.
pub fn validate_required(specs: &[FieldSpec], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for spec in specs.iter().filter(|s| s.required) {
        let missing = match spec.kind {
            // an unticked checkbox is still an answer
            FieldKind::Checkbox => false,
            _ => values.is_blank(spec.name),
        };
        if missing {
            errors.insert(spec.name, format!("{} is required", spec.label));
        }
    }
    errors
}

/// Validate `values` and hand the payload to `trigger`.
///
/// `trigger` runs exactly once when validation passes and not at all when
/// it fails.
pub fn submit_form<F: FormModel>(
    values: &FormValues,
    trigger: impl FnOnce(F),
) -> Result<(), FieldErrors> {
    let payload = F::from_values(values)?;
    trigger(payload);
    Ok(())
}

/// Reads typed values out of [`FormValues`], collecting errors as it goes.
pub struct FieldReader<'a> {
    values: &'a FormValues,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    /// Start reading, with the required-field checks already applied.
    pub fn new(values: &'a FormValues, specs: &[FieldSpec]) -> Self {
        Self {
            values,
            errors: validate_required(specs, values),
        }
    }

    pub fn error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.insert(name, message);
    }

    pub fn text(&mut self, name: &str) -> String {
        self.values.get(name).trim().to_string()
    }

    pub fn opt_text(&mut self, name: &str) -> Option<String> {
        let value = self.values.get(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn email(&mut self, name: &str) -> String {
        let value = self.text(name);
        if !value.is_empty() && !is_valid_email(&value) {
            self.error(name, "Please enter a valid email address");
        }
        value
    }

    pub fn flag(&mut self, name: &str) -> bool {
        matches!(self.values.get(name).trim(), "true" | "on" | "1")
    }

    /// Parse an optional value; blank is `None`, garbage is an error.
    pub fn opt_parse<T: FromStr>(
        &mut self,
        name: &str,
        message: &str,
    ) -> Option<T> {
        let raw = self.values.get(name).trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.error(name, message);
                None
            }
        }
    }

    /// Parse a value that must be present. A blank value yields `None`
    /// without a new error since the required check already reported it.
    pub fn parse<T: FromStr>(&mut self, name: &str, message: &str) -> Option<T> {
        self.opt_parse(name, message)
    }

    pub fn date(&mut self, name: &str) -> Option<Date> {
        self.parse(name, "Please enter a valid date")
    }

    pub fn opt_date(&mut self, name: &str) -> Option<Date> {
        self.opt_parse(name, "Please enter a valid date")
    }

    pub fn time(&mut self, name: &str) -> Option<Time> {
        self.parse(name, "Please enter a valid time")
    }

    pub fn decimal(&mut self, name: &str) -> Option<Decimal> {
        let value: Option<Decimal> = self.parse(name, "Please enter a number");
        match value {
            Some(v) if v.is_sign_negative() => {
                self.error(name, "Must not be negative");
                None
            }
            other => other,
        }
    }

    pub fn choice<C: Choice>(&mut self, name: &str) -> Option<C> {
        let raw = self.values.get(name).trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = C::parse_choice(raw);
        if parsed.is_none() {
            self.error(name, "Please select a valid option");
        }
        parsed
    }

    /// A comma separated list of ids.
    pub fn list<T: FromStr>(&mut self, name: &str) -> Vec<T> {
        let mut out = Vec::new();
        for part in self.values.get(name).split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.parse() {
                Ok(v) => out.push(v),
                Err(_) => self.error(name, "Please select valid options"),
            }
        }
        out
    }

    /// An uploaded image. The upload step stores the host's answer as json.
    pub fn image(&mut self, name: &str) -> Option<Image> {
        let raw = self.values.get(name).trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(raw) {
            Ok(image) => Some(image),
            Err(_) => {
                self.error(name, "Please upload the file again");
                None
            }
        }
    }

    /// A comma separated list of free text entries.
    pub fn tags(&mut self, name: &str) -> Vec<String> {
        self.values
            .get(name)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Record an error on `later` if it comes before `earlier`.
    pub fn ordered<T: PartialOrd>(
        &mut self,
        earlier: Option<&T>,
        later: Option<&T>,
        later_name: &str,
        message: &str,
    ) {
        if let (Some(a), Some(b)) = (earlier, later)
            && b < a
        {
            self.error(later_name, message);
        }
    }

    /// Finish reading. Returns the collected errors if there are any,
    /// otherwise the value produced by `build`.
    pub fn finish<T>(
        self,
        build: impl FnOnce() -> Option<T>,
    ) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        title: String,
        due: Option<Date>,
    }

    impl FormModel for Note {
        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::required("title", "Title", FieldKind::Text),
                FieldSpec::optional("due", "Due", FieldKind::Date),
            ]
        }

        fn from_values(values: &FormValues) -> Result<Self, FieldErrors> {
            let mut r = FieldReader::new(values, &Self::fields());
            let title = r.text("title");
            let due = r.opt_date("due");
            r.finish(|| Some(Note { title, due }))
        }
    }

    #[test]
    fn blank_required_field_blocks_submit() {
        let mut calls = 0;
        let result = submit_form::<Note>(&FormValues::new(), |_| calls += 1);
        let errors = result.unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(calls, 0);
    }

    #[test]
    fn valid_form_triggers_once_with_payload() {
        let values = FormValues::new()
            .with("title", "  Quarterly review ")
            .with("due", "2024-03-01");
        let mut seen = Vec::new();
        submit_form::<Note>(&values, |note| seen.push(note)).unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title, "Quarterly review");
        assert_eq!(seen[0].due, Some(jiff::civil::date(2024, 3, 1)));
    }

    #[test]
    fn malformed_optional_date_is_an_error() {
        let values = FormValues::new()
            .with("title", "x")
            .with("due", "next tuesday");
        let errors = Note::from_values(&values).err().unwrap();
        assert_eq!(errors.get("due"), Some("Please enter a valid date"));
    }

    #[test]
    fn email_check() {
        assert!(is_valid_email("jane@acme.io"));
        assert!(!is_valid_email("jane.acme.io"));
        assert!(!is_valid_email("@acme.io"));
        assert!(!is_valid_email("jane@acme"));
        assert!(!is_valid_email("ja ne@acme.io"));
    }

    #[test]
    fn unticked_required_checkbox_is_not_missing() {
        let specs = [FieldSpec::required("ok", "Ok", FieldKind::Checkbox)];
        assert!(validate_required(&specs, &FormValues::new()).is_empty());
    }
}
