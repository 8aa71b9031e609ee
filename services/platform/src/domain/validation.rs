use std::collections::BTreeMap;

use crate::error::PlatformError;

/// Collects field → message pairs and turns them into [`PlatformError::Validation`].
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.to_owned());
    }

    pub fn require_non_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be blank");
        }
    }

    pub fn require_email(&mut self, field: &str, value: &str) {
        let valid = value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            self.add(field, "must be a valid email address");
        }
    }

    pub fn into_result(self) -> Result<(), PlatformError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(PlatformError::Validation(self.0))
        }
    }
}
