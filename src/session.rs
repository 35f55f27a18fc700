//! Per-session state: the current image and the one-shot notices.

use image::DynamicImage;

/// The image held by the session together with the prompt that produced it.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Decoded pixels.
    pub image: DynamicImage,
    /// Prompt submitted for this image.
    pub prompt: String,
}

/// State of one user session.
///
/// Image and prompt live in one `Option`, so one is never present without
/// the other. Each mutating operation clears the opposite notice, which keeps
/// the two notices mutually exclusive.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<StoredImage>,
    pending_delete_notice: bool,
    pending_generate_notice: bool,
}

impl SessionState {
    /// Fresh session: no image, no notices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly generated image and raise the generate notice.
    pub fn on_generate_success(&mut self, image: DynamicImage, prompt: impl Into<String>) {
        let prompt = prompt.into();
        tracing::debug!(width = image.width(), height = image.height(), "storing generated image");
        self.current = Some(StoredImage { image, prompt });
        self.pending_delete_notice = false;
        self.pending_generate_notice = true;
    }

    /// A failed generation leaves the session untouched; the message is shown
    /// immediately rather than stored.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn on_generate_failure(&self, message: String) -> String {
        message
    }

    /// Drop the current image and raise the delete notice.
    pub fn on_delete(&mut self) {
        tracing::debug!(had_image = self.current.is_some(), "deleting image");
        self.current = None;
        self.pending_delete_notice = true;
        self.pending_generate_notice = false;
    }

    /// Read and clear the delete notice.
    pub fn consume_delete_notice(&mut self) -> bool {
        std::mem::take(&mut self.pending_delete_notice)
    }

    /// Read and clear the generate notice.
    pub fn consume_generate_notice(&mut self) -> bool {
        std::mem::take(&mut self.pending_generate_notice)
    }

    /// The stored image and prompt, if any.
    #[must_use]
    pub fn current(&self) -> Option<&StoredImage> {
        self.current.as_ref()
    }

    /// The stored image, if any.
    #[must_use]
    pub fn current_image(&self) -> Option<&DynamicImage> {
        self.current.as_ref().map(|s| &s.image)
    }

    /// The prompt of the stored image, if any.
    #[must_use]
    pub fn current_prompt(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.prompt.as_str())
    }

    /// Whether an image is held.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the delete notice is pending.
    #[must_use]
    pub fn delete_notice_pending(&self) -> bool {
        self.pending_delete_notice
    }

    /// Whether the generate notice is pending.
    #[must_use]
    pub fn generate_notice_pending(&self) -> bool {
        self.pending_generate_notice
    }
}
