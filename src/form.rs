//! Form fields and the validation gate in front of the provider call.

use std::fmt;

use crate::error::FormError;
use crate::params::{format_options, AspectClass, ImageSize};

/// The form as the user has filled it in so far.
#[derive(Clone, PartialEq, Eq)]
pub struct FormInput {
    /// API key as typed. `Debug` output shows it masked.
    pub api_key: String,
    /// Free-text image description.
    pub prompt: String,
    aspect: AspectClass,
    size: ImageSize,
}

/// A form that passed the gate and may be sent to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    /// Non-empty API key.
    pub api_key: String,
    /// Non-empty prompt.
    pub prompt: String,
    /// Size belonging to the selected aspect class.
    pub size: ImageSize,
}

impl fmt::Debug for FormInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormInput")
            .field("api_key", &self.masked_key())
            .field("prompt", &self.prompt)
            .field("aspect", &self.aspect)
            .field("size", &self.size)
            .finish()
    }
}

impl Default for FormInput {
    fn default() -> Self {
        Self::new(AspectClass::default())
    }
}

impl FormInput {
    /// Empty form with `aspect` selected and its default size.
    #[must_use]
    pub fn new(aspect: AspectClass) -> Self {
        Self {
            api_key: String::new(),
            prompt: String::new(),
            aspect,
            size: aspect.default_size(),
        }
    }

    /// Selected aspect class.
    #[must_use]
    pub fn aspect(&self) -> AspectClass {
        self.aspect
    }

    /// Selected size.
    #[must_use]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Sizes currently offered by the size selector.
    #[must_use]
    pub fn size_options(&self) -> &'static [ImageSize] {
        self.aspect.size_options()
    }

    /// Switch aspect class. The size selector falls back to the class default
    /// unless the current size is still on offer.
    pub fn set_aspect(&mut self, aspect: AspectClass) {
        self.aspect = aspect;
        if !aspect.offers(self.size) {
            self.size = aspect.default_size();
        }
    }

    /// Pick a size from the current options.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SizeMismatch`] if the size belongs to another class.
    pub fn set_size(&mut self, size: ImageSize) -> Result<(), FormError> {
        if !self.aspect.offers(size) {
            return Err(self.mismatch(size));
        }
        self.size = size;
        Ok(())
    }

    /// API key with everything but the last four characters hidden. Keys of
    /// four characters or fewer are hidden entirely.
    #[must_use]
    pub fn masked_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count == 0 {
            return String::new();
        }
        if count <= 4 {
            return "****".to_string();
        }
        let visible: String = self.api_key.chars().skip(count.saturating_sub(4)).collect();
        format!("{}{visible}", "*".repeat(count.saturating_sub(4).min(12)))
    }

    /// Run the gate. The API key is checked before the prompt.
    ///
    /// # Errors
    ///
    /// Returns the first problem found; nothing has been sent anywhere.
    pub fn validate(&self) -> Result<ValidatedForm, FormError> {
        if self.api_key.trim().is_empty() {
            return Err(FormError::MissingApiKey);
        }
        if self.prompt.trim().is_empty() {
            return Err(FormError::MissingPrompt);
        }
        if !self.aspect.offers(self.size) {
            return Err(self.mismatch(self.size));
        }
        Ok(ValidatedForm {
            api_key: self.api_key.trim().to_string(),
            prompt: self.prompt.clone(),
            size: self.size,
        })
    }

    fn mismatch(&self, size: ImageSize) -> FormError {
        FormError::SizeMismatch {
            size: size.to_string(),
            aspect: self.aspect.to_string(),
            options: format_options(self.aspect),
        }
    }
}
