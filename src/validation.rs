use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Field-level validation failures collected across a whole submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip)]
    subject: &'static str,
    pub fields: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new(subject: &'static str) -> Self {
        Self {
            subject,
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}", self.subject)?;
        for (index, (field, message)) in self.fields.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{field} {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
