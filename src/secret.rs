//! No-echo terminal input for the API key.

use std::io;

/// Source of secret input such as the API key.
pub trait SecretReader {
    /// Show `prompt` and read one line with echo turned off.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no terminal or reading fails.
    fn read_secret(&self, prompt: &str) -> io::Result<String>;
}

/// Reads from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSecretReader;

impl SecretReader for TerminalSecretReader {
    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}
