use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use thiserror::Error;
use tracing::debug;

use crate::store::CheckpointStore;

/// Progress figures shown by the resume prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeProgress {
    /// Items processed so far.
    pub scraped: u64,
    /// Total items, when the job knows it up front.
    pub total: Option<u64>,
}

/// Decides whether a job should resume from its checkpoint.
///
/// The interactive implementation blocks on operator input; headless
/// contexts inject [`AlwaysResume`] or [`NeverResume`] instead.
pub trait ResumePolicy {
    fn confirm(&mut self, progress: Option<&ResumeProgress>) -> io::Result<bool>;
}

/// Non-interactive policy that always resumes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysResume;

impl ResumePolicy for AlwaysResume {
    fn confirm(&mut self, _progress: Option<&ResumeProgress>) -> io::Result<bool> {
        Ok(true)
    }
}

/// Non-interactive policy that always starts over.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverResume;

impl ResumePolicy for NeverResume {
    fn confirm(&mut self, _progress: Option<&ResumeProgress>) -> io::Result<bool> {
        Ok(false)
    }
}

/// Line-based yes/no prompt over an arbitrary reader/writer pair.
///
/// Accepts `y`/`yes`/`n`/`no`, case-insensitive, surrounding whitespace
/// ignored. Re-prompts forever on anything else; there is no timeout and
/// no default answer. End of input is an error, never a silent default.
pub struct InteractivePrompt<R, W> {
    input: R,
    output: W,
}

impl InteractivePrompt<BufReader<Stdin>, Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self {
            input: BufReader::new(io::stdin()),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ResumePolicy for InteractivePrompt<R, W> {
    fn confirm(&mut self, progress: Option<&ResumeProgress>) -> io::Result<bool> {
        loop {
            match progress {
                Some(p) => {
                    let total = p
                        .total
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    write!(
                        self.output,
                        "You have scraped {} of {} so far. Resume (y) or start from beginning (n)? ",
                        p.scraped, total
                    )?;
                }
                None => {
                    write!(self.output, "Resume (y) or start from beginning (n)? ")?;
                }
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed while waiting for a yes/no answer",
                ));
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => {
                    writeln!(self.output, "Resuming from last checkpoint.")?;
                    return Ok(true);
                }
                "n" | "no" => {
                    writeln!(self.output, "Starting from beginning.")?;
                    return Ok(false);
                }
                other => {
                    debug!(answer = other, "unrecognized resume answer");
                    writeln!(self.output, "Please enter 'y' or 'n'.")?;
                }
            }
        }
    }
}

/// Errors from [`confirm_resume`].
#[derive(Debug, Error)]
pub enum ResumeError<E: std::error::Error + 'static> {
    #[error("checkpoint store error: {0}")]
    Store(#[source] E),

    #[error("resume prompt error: {0}")]
    Prompt(#[from] io::Error),
}

/// Ask `policy` whether to resume, reporting the store's progress figures.
///
/// Works against any backend. A store error while reading progress
/// propagates; an absent snapshot simply means no figures are shown.
pub fn confirm_resume<S, P>(store: &S, policy: &mut P) -> Result<bool, ResumeError<S::Error>>
where
    S: CheckpointStore,
    P: ResumePolicy,
{
    let progress = store.progress().map_err(ResumeError::Store)?;
    Ok(policy.confirm(progress.as_ref())?)
}
