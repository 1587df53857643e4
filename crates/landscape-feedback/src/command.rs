//! Backend that runs an external text-generation command.
//!
//! The prompt is written to the command's stdin and its stdout is taken as
//! the generated text. The requested length and the model directory are
//! passed through the environment.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::backend::{BackendError, BackendSlot, TextBackend};

/// Environment variable carrying the maximum output length in characters.
pub const MAX_LENGTH_ENV: &str = "LANDSCAPE_MAX_LENGTH";

/// Environment variable carrying the model directory, when one is configured.
pub const MODEL_DIR_ENV: &str = "LANDSCAPE_MODEL_DIR";

#[derive(Debug, Clone)]
pub struct CommandBackendConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub model_dir: Option<PathBuf>,
}

impl CommandBackendConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            model_dir: None,
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(model_dir.into());
        self
    }

    /// A slot that loads this backend on first use.
    pub fn into_slot(self) -> BackendSlot {
        BackendSlot::new(move || {
            CommandBackend::load(self.clone()).map(|backend| Arc::new(backend) as Arc<dyn TextBackend>)
        })
    }
}

#[derive(Debug)]
pub struct CommandBackend {
    config: CommandBackendConfig,
    name: String,
}

impl CommandBackend {
    /// Checks that the program can be found and the model directory exists.
    pub fn load(config: CommandBackendConfig) -> Result<Self, BackendError> {
        if !program_exists(&config.program) {
            return Err(BackendError::Unavailable(format!(
                "program not found: {}",
                config.program.display()
            )));
        }
        if let Some(dir) = &config.model_dir
            && !dir.is_dir()
        {
            return Err(BackendError::Unavailable(format!(
                "model directory not found: {}",
                dir.display()
            )));
        }
        let name = config
            .program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.program.display().to_string());
        Ok(Self { config, name })
    }
}

impl TextBackend for CommandBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, prompt: &str, max_length: usize) -> Result<Option<String>, BackendError> {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .env(MAX_LENGTH_ENV, max_length.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.model_dir {
            command.env(MODEL_DIR_ENV, dir);
        }

        let mut child = command.spawn().map_err(|source| BackendError::Spawn {
            program: self.name.clone(),
            source,
        })?;

        // The child may fill stdout before it has read all of stdin.
        let stdin = child.stdin.take();
        let input = prompt.as_bytes().to_vec();
        let writer = thread::spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(&input),
            None => Ok(()),
        });

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Err(error)) if error.kind() != ErrorKind::BrokenPipe => return Err(error.into()),
            Ok(_) => {}
            Err(_) => {
                return Err(BackendError::Unavailable(
                    "prompt writer thread panicked".to_string(),
                ));
            }
        }

        if !output.status.success() {
            return Err(BackendError::Failed {
                program: self.name.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|_| BackendError::InvalidOutput)?;
        let text = text.trim();
        debug!(backend = %self.name, chars = text.chars().count(), "backend output received");
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(text.chars().take(max_length).collect()))
    }
}

fn program_exists(program: &Path) -> bool {
    if program.components().count() > 1 {
        return program.is_file();
    }
    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
    })
}
