//! Converter trait and the concrete EMF/WMF adapters
//!
//! Each adapter wraps one external command-line utility. Invocation is
//! blocking, one image at a time, with a wall-clock timeout so a hung
//! converter cannot hang the whole pipeline. The exit status and the
//! existence of the destination file are both checked; a silent converter
//! failure surfaces as a [`ConvertError`] instead of a package with a
//! dangling reference.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{ConvertError, Result};
use crate::format::VectorFormat;

/// Default wall-clock limit for one converter invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for external vector image converters
///
/// Implementors turn one source file into one destination file via an
/// opaque external program. The registry routes each legacy format to
/// exactly one converter.
///
/// # Thread Safety
///
/// Converters must be `Send + Sync`; separate pipeline invocations may run
/// on separate threads.
pub trait VectorConverter: Send + Sync {
    /// Name of the external binary this adapter invokes
    fn name(&self) -> &'static str;

    /// The legacy format this converter accepts
    fn source_format(&self) -> VectorFormat;

    /// Check whether the converter binary can be found on PATH
    fn is_available(&self) -> bool {
        which::which(self.name()).is_ok()
    }

    /// Convert `source` into an SVG at `dest`, blocking until done
    ///
    /// Must fail if the external program exits nonzero, times out, or
    /// exits zero without producing `dest`.
    fn convert(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Adapter for `emf2svg-conv`
///
/// Argument shape: `emf2svg-conv -i <source> -o <dest>`.
#[derive(Debug, Clone)]
pub struct Emf2Svg {
    timeout: Duration,
}

impl Emf2Svg {
    /// Create an adapter with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create an adapter with an explicit timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for Emf2Svg {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorConverter for Emf2Svg {
    fn name(&self) -> &'static str {
        "emf2svg-conv"
    }

    fn source_format(&self) -> VectorFormat {
        VectorFormat::Emf
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let mut cmd = Command::new(self.name());
        cmd.arg("-i").arg(source).arg("-o").arg(dest);
        run_checked(self.name(), cmd, dest, self.timeout)
    }
}

/// Adapter for `wmf2svg`
///
/// Argument shape: `wmf2svg <source> -o <dest>` (the source is positional).
#[derive(Debug, Clone)]
pub struct Wmf2Svg {
    timeout: Duration,
}

impl Wmf2Svg {
    /// Create an adapter with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create an adapter with an explicit timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for Wmf2Svg {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorConverter for Wmf2Svg {
    fn name(&self) -> &'static str {
        "wmf2svg"
    }

    fn source_format(&self) -> VectorFormat {
        VectorFormat::Wmf
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let mut cmd = Command::new(self.name());
        cmd.arg(source).arg("-o").arg(dest);
        run_checked(self.name(), cmd, dest, self.timeout)
    }
}

/// Run a converter command, enforcing timeout, exit status, and output
fn run_checked(tool: &str, mut cmd: Command, dest: &Path, timeout: Duration) -> Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConvertError::Unavailable {
                tool: tool.to_string(),
            });
        }
        Err(e) => return Err(ConvertError::Io(e)),
    };

    let status = wait_with_timeout(tool, child, timeout)?;

    if !status.success() {
        let status = match status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        return Err(ConvertError::Failed {
            tool: tool.to_string(),
            status,
        });
    }
    // A converter can exit zero and still write nothing; treat that as
    // failure rather than shipping a package with a missing asset.
    if !dest.exists() {
        return Err(ConvertError::MissingOutput {
            path: dest.to_path_buf(),
        });
    }

    Ok(())
}

/// Poll the child until it exits, killing it once the deadline passes
fn wait_with_timeout(tool: &str, mut child: Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            log::warn!("{} exceeded {}s timeout, killing", tool, timeout.as_secs());
            // Kill can race with a normal exit; either way reap the child.
            let _ = child.kill();
            let _ = child.wait();
            return Err(ConvertError::TimedOut {
                tool: tool.to_string(),
                secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(Duration::from_millis(25));
    }
}
