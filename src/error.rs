//! Error types for the form gate and the generation pipeline.

use thiserror::Error;

/// Errors raised by the generation pipeline (provider call, fetch, decode).
#[derive(Debug, Error)]
pub enum ImageError {
    /// The provider returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// The provider answered successfully but listed no image location.
    #[error("No image URL in response")]
    NoImageUrl,

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The image URL could not be retrieved.
    #[error("Image fetch failed ({status}) for {url}")]
    ImageFetch {
        /// HTTP status code returned by the image host.
        status: u16,
        /// The URL that was fetched.
        url: String,
    },

    /// The fetched bytes could not be decoded or re-encoded.
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An error recorded in a cassette, replayed with its original text.
    #[error("{0}")]
    Recorded(String),

    /// A cassette could not serve the requested interaction.
    #[error("Replay error: {0}")]
    Replay(String),
}

/// Problems with the form input, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The API key field is empty.
    #[error("Please enter your API key.")]
    MissingApiKey,

    /// The prompt field is empty.
    #[error("Please enter an image description.")]
    MissingPrompt,

    /// The selected size is not offered for the selected aspect class.
    #[error("Size {size} is not available for the {aspect} aspect. Choose one of: {options}")]
    SizeMismatch {
        /// The requested size.
        size: String,
        /// The selected aspect class.
        aspect: String,
        /// Sizes offered for the aspect class.
        options: String,
    },

    /// The aspect label is not recognized.
    #[error("Unknown aspect '{0}'. Valid: square, wide, tall")]
    UnknownAspect(String),

    /// The size string is not one of the permitted sizes.
    #[error("Unknown size '{0}'")]
    UnknownSize(String),
}

/// A line of interactive input that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word is not a known command.
    #[error("Unknown command '{0}'. Type 'help'.")]
    Unknown(String),

    /// The argument was rejected by the form rules.
    #[error(transparent)]
    Form(#[from] FormError),
}
