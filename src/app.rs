//! The form session: action handlers, the render step, and the command loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::coordinator::{GenerationResult, RequestCoordinator};
use crate::error::{CommandError, ImageError};
use crate::form::FormInput;
use crate::labels::Locale;
use crate::output::{download_filename, save_download, PNG_MIME};
use crate::params::{AspectClass, ImageSize};
use crate::secret::{SecretReader, TerminalSecretReader};
use crate::session::SessionState;

/// What a generate action ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// An image is now stored in the session.
    Generated,
    /// The form gate stopped the action before any network call.
    Rejected,
    /// The coordinator reported a failure.
    Failed,
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the API key. `None` reads it from the terminal without echo.
    Key(Option<String>),
    /// Set the prompt.
    Prompt(String),
    /// Select an aspect class.
    Aspect(AspectClass),
    /// Select a size.
    Size(ImageSize),
    /// Run the generate action.
    Generate,
    /// Run the delete action.
    Delete,
    /// Write the download file for the current image.
    Download,
    /// Print the form fields.
    Show,
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

const HELP: &str = "\
Commands:
  key                  enter the OpenAI API key (hidden)
  key <api key>        set the key from piped input
  prompt <text>        set the image description
  aspect <class>       square | wide | tall
  size <WxH>           pick a size offered for the aspect
  generate             generate an image
  delete               delete the current image
  download             save the current image as PNG
  show                 show the form
  help                 show this help
  quit                 leave";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word.to_lowercase().as_str() {
            "key" if rest.is_empty() => Self::Key(None),
            "key" => Self::Key(Some(rest.to_string())),
            "prompt" => Self::Prompt(rest.to_string()),
            "aspect" => Self::Aspect(rest.parse()?),
            "size" => Self::Size(rest.parse()?),
            "generate" | "gen" => Self::Generate,
            "delete" | "del" => Self::Delete,
            "download" | "save" => Self::Download,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// One user session over an output stream.
pub struct App<W: Write> {
    form: FormInput,
    session: SessionState,
    coordinator: RequestCoordinator,
    locale: Locale,
    output_dir: PathBuf,
    secrets: Box<dyn SecretReader>,
    out: W,
}

impl<W: Write> App<W> {
    /// Start a session with a pre-filled form.
    pub fn new(
        form: FormInput,
        coordinator: RequestCoordinator,
        locale: Locale,
        output_dir: impl Into<PathBuf>,
        out: W,
    ) -> Self {
        Self {
            form,
            session: SessionState::new(),
            coordinator,
            locale,
            output_dir: output_dir.into(),
            secrets: Box::new(TerminalSecretReader),
            out,
        }
    }

    /// Replace the no-echo key reader.
    #[cfg(test)]
    #[must_use]
    pub fn with_secret_reader(mut self, secrets: Box<dyn SecretReader>) -> Self {
        self.secrets = secrets;
        self
    }

    /// The form as currently filled in.
    #[cfg(test)]
    pub fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    /// Session state, for inspection.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Consume the app and return the output stream.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Generate action: gate, coordinator, state update.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the output fails.
    pub async fn generate(&mut self) -> Result<GenerateOutcome, ImageError> {
        let validated = match self.form.validate() {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(reason = %e, "generate rejected by form gate");
                writeln!(self.out, "Warning: {}", self.locale.form_warning(&e))?;
                return Ok(GenerateOutcome::Rejected);
            }
        };

        writeln!(self.out, "{}", self.locale.generating())?;
        self.out.flush()?;

        let result =
            self.coordinator.generate(&validated.api_key, &validated.prompt, validated.size).await;
        match result {
            GenerationResult::Success { image, prompt } => {
                self.session.on_generate_success(image, prompt);
                Ok(GenerateOutcome::Generated)
            }
            GenerationResult::Failure { message } => {
                let message = self.session.on_generate_failure(message);
                writeln!(self.out, "Error: {message}")?;
                Ok(GenerateOutcome::Failed)
            }
        }
    }

    /// Delete action.
    pub fn delete(&mut self) {
        self.session.on_delete();
    }

    /// Write the current image as PNG into the output directory.
    ///
    /// Returns `None` when the session holds no image.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn download(&mut self) -> Result<Option<PathBuf>, ImageError> {
        let Some(stored) = self.session.current() else {
            writeln!(self.out, "{}", self.locale.no_image())?;
            return Ok(None);
        };
        let path = save_download(&stored.image, &stored.prompt, &self.output_dir)?;
        writeln!(self.out, "{}: {} ({PNG_MIME})", self.locale.download(), path.display())?;
        Ok(Some(path))
    }

    /// Post-render hook: show the stored image, then consume each notice once.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn render(&mut self) -> Result<(), ImageError> {
        tracing::trace!(
            delete_notice = self.session.delete_notice_pending(),
            generate_notice = self.session.generate_notice_pending(),
            "render"
        );
        if let (Some(image), Some(prompt)) =
            (self.session.current_image(), self.session.current_prompt())
        {
            writeln!(self.out, "{}", self.locale.caption(prompt))?;
            writeln!(self.out, "  [{}x{} image]", image.width(), image.height())?;
            writeln!(self.out, "  {} -> {}", self.locale.download(), download_filename(prompt))?;
        }
        if self.session.consume_delete_notice() {
            writeln!(self.out, "{}", self.locale.deleted_notice())?;
        }
        if self.session.consume_generate_notice() {
            writeln!(self.out, "{}", self.locale.generated_notice())?;
        }
        Ok(())
    }

    /// Print the form fields and the sizes on offer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn show_form(&mut self) -> Result<(), ImageError> {
        let locale = self.locale;
        writeln!(self.out, "{}: {}", locale.api_key_field(), self.form.masked_key())?;
        writeln!(self.out, "{}: {}", locale.prompt_field(), self.form.prompt)?;
        writeln!(self.out, "{}: {}", locale.aspect_field(), locale.aspect(self.form.aspect()))?;
        let options: Vec<&str> = self.form.size_options().iter().map(|s| s.as_str()).collect();
        writeln!(self.out, "{}: {} [{}]", locale.size_field(), self.form.size(), options.join(", "))?;
        Ok(())
    }

    /// Apply one command. Returns `false` when the session should end.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output or the download file fails.
    pub async fn apply(&mut self, command: Command) -> Result<bool, ImageError> {
        match command {
            Command::Key(Some(key)) => self.form.api_key = key,
            Command::Key(None) => self.read_key()?,
            Command::Prompt(prompt) => self.form.prompt = prompt,
            Command::Aspect(aspect) => {
                self.form.set_aspect(aspect);
                self.show_form()?;
            }
            Command::Size(size) => {
                if let Err(e) = self.form.set_size(size) {
                    writeln!(self.out, "Warning: {}", self.locale.form_warning(&e))?;
                }
            }
            Command::Generate => {
                self.generate().await?;
                self.render()?;
            }
            Command::Delete => {
                self.delete();
                self.render()?;
            }
            Command::Download => {
                self.download()?;
            }
            Command::Show => self.show_form()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Prompt for the API key with terminal echo turned off.
    fn read_key(&mut self) -> Result<(), ImageError> {
        self.out.flush()?;
        let prompt = format!("{}: ", self.locale.api_key_field());
        match self.secrets.read_secret(&prompt) {
            Ok(key) => self.form.api_key = key.trim().to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "no-echo key entry failed");
                writeln!(self.out, "Warning: {}", self.locale.key_entry_failed())?;
            }
        }
        Ok(())
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run_interactive<R: BufRead>(&mut self, input: R) -> Result<(), ImageError> {
        writeln!(self.out, "{}", self.locale.title())?;
        writeln!(self.out, "Type 'help' for commands.")?;
        self.out.flush()?;

        for line in input.lines() {
            match Command::parse(&line?) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if !self.apply(command).await? {
                        break;
                    }
                }
                Err(CommandError::Form(e)) => {
                    writeln!(self.out, "Warning: {}", self.locale.form_warning(&e))?;
                }
                Err(e) => writeln!(self.out, "{e}")?,
            }
            self.out.flush()?;
        }
        Ok(())
    }
}
