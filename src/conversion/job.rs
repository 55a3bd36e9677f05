//! # Conversion Job
//!
//! Runs one `waifu2x-converter-cpp` process and relays its console output.
//!
//! ```text
//!   Idle ──start()──► Running ──exit + pipes closed──► Finished(Success | Failure)
//!                        │
//!                      drop ──► SIGTERM ──grace──► kill ──timeout──► give up
//! ```
//!
//! Two reader threads drain stdout and stderr into one channel so chunks
//! keep their arrival order. Only the owner of the job (the GUI thread)
//! touches the console log and the state; it calls [`ConversionJob::poll`]
//! once per frame.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use wait_timeout::ChildExt;

use crate::constants::{KILL_WAIT_TIMEOUT, OUTPUT_CHUNK_SIZE, TERMINATE_GRACE_PERIOD};
use crate::error::ConverterError;
use crate::logger::log;
use crate::notifier::{Notification, Notifier};

/// After the converter exits, how long to keep waiting for its pipes to close.
/// A grandchild that inherited the pipes can otherwise hold the job open forever.
const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub const STATUS_SUCCESS: &str = "Success!";
pub const STATUS_FAILURE: &str = "An error occurred while converting image.";

/// How a finished job ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Normal termination with exit code 0
    Success,
    /// Normal termination with a nonzero code
    ExitCode(i32),
    /// Terminated by a signal or otherwise without an exit code
    Abnormal,
    /// The executable could not be started
    LaunchFailed,
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Success)
    }

    pub fn status_message(&self) -> &'static str {
        if self.is_success() {
            STATUS_SUCCESS
        } else {
            STATUS_FAILURE
        }
    }
}

/// Map an exit code (`None` for abnormal termination) to an outcome
pub fn classify_exit(code: Option<i32>) -> ExitOutcome {
    match code {
        Some(0) => ExitOutcome::Success,
        Some(code) => ExitOutcome::ExitCode(code),
        None => ExitOutcome::Abnormal,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
    Finished(ExitOutcome),
}

/// Incremental UTF-8 decoding of pipe chunks
///
/// An incomplete multi-byte sequence at the end of a chunk is held back and
/// prefixed to the next one. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    pending: Vec<u8>,
}

impl ChunkDecoder {
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let keep_from = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => self.pending.len(),
        };
        let tail = self.pending.split_off(keep_from);
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending = tail;
        text
    }

    /// Whatever is still held back, decoded lossily
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            let text = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            Some(text)
        }
    }
}

/// Strip a single trailing line break from a console chunk
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

fn spawn_reader<R>(mut source: R, sender: Sender<String>, stream: &'static str)
where
    R: Read + Send + 'static,
{
    let spawned = thread::Builder::new()
        .name(format!("converter-{}", stream))
        .spawn(move || {
            let mut decoder = ChunkDecoder::default();
            let mut buffer = [0u8; OUTPUT_CHUNK_SIZE];
            loop {
                match source.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => {
                        let text = decoder.decode(&buffer[..n]);
                        if !text.is_empty() && sender.send(text).is_err() {
                            return;
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::debug!("Converter {} closed: {}", stream, e);
                        break;
                    }
                }
            }
            if let Some(rest) = decoder.finish() {
                let _ = sender.send(rest);
            }
        });
    if let Err(e) = spawned {
        log::error!("Failed to start {} reader thread: {}", stream, e);
    }
}

/// Directory the converter is started in: the one containing the executable,
/// when the command is a path to an existing directory entry
pub fn working_directory_for(command: &str) -> Option<PathBuf> {
    let parent = Path::new(command).parent()?;
    if parent.as_os_str().is_empty() || !parent.is_dir() {
        return None;
    }
    Some(std::fs::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf()))
}

#[cfg(unix)]
fn request_termination(child: &Child) -> bool {
    // SAFETY: kill(2) has no memory-safety preconditions; the pid belongs to a
    // child we have not reaped yet, so it cannot have been reused.
    unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGTERM) == 0 }
}

#[cfg(not(unix))]
fn request_termination(_child: &Child) -> bool {
    false
}

/// One run of the external converter
pub struct ConversionJob {
    command: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    state: JobState,
    console: Vec<String>,
    child: Option<Child>,
    output: Option<Receiver<String>>,
    exit_status: Option<ExitStatus>,
    exited_at: Option<Instant>,
    notifier: Arc<dyn Notifier>,
    started_at: Option<DateTime<Local>>,
    finished_at: Option<DateTime<Local>>,
}

impl ConversionJob {
    pub fn new(command: impl Into<String>, args: Vec<String>, notifier: Arc<dyn Notifier>) -> Self {
        let command = command.into();
        let working_dir = working_directory_for(&command);
        Self {
            command,
            args,
            working_dir,
            state: JobState::Idle,
            console: Vec::new(),
            child: None,
            output: None,
            exit_status: None,
            exited_at: None,
            notifier,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, JobState::Finished(_))
    }

    pub fn outcome(&self) -> Option<&ExitOutcome> {
        match &self.state {
            JobState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Console entries in arrival order
    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn console_text(&self) -> String {
        self.console.join("\n")
    }

    /// Status line shown above the console; `None` while still working
    pub fn status_message(&self) -> Option<&'static str> {
        self.outcome().map(ExitOutcome::status_message)
    }

    /// 0.0 until the job finishes, then 1.0
    pub fn progress(&self) -> f32 {
        if self.is_finished() { 1.0 } else { 0.0 }
    }

    /// Process id of the running converter
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Local>> {
        self.finished_at
    }

    pub fn append_console(&mut self, text: &str) {
        self.console.push(strip_trailing_newline(text).to_string());
    }

    /// Spawn the converter. Only has an effect in the `Idle` state.
    pub fn start(&mut self) {
        if self.state != JobState::Idle {
            return;
        }

        self.append_console("Starting conversion with the following arguments:\n");
        self.append_console(&self.args.join(" "));
        self.append_console("Processing...");
        self.started_at = Some(Local::now());

        let mut program = PathBuf::from(&self.command);
        let mut command = Command::new(&self.command);
        if let Some(dir) = &self.working_dir {
            // the program path must survive the change of directory
            if let Ok(absolute) = std::fs::canonicalize(&program) {
                program = absolute;
                command = Command::new(&program);
            }
            command.current_dir(dir);
        }
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::info!("Launching {} {}", program.display(), self.args.join(" "));

        match command.spawn() {
            Ok(mut child) => {
                let (sender, receiver) = unbounded();
                if let Some(stdout) = child.stdout.take() {
                    spawn_reader(stdout, sender.clone(), "stdout");
                }
                if let Some(stderr) = child.stderr.take() {
                    spawn_reader(stderr, sender.clone(), "stderr");
                }
                drop(sender);

                log::debug!("Converter started with PID {}", child.id());
                self.child = Some(child);
                self.output = Some(receiver);
                self.state = JobState::Running;
            }
            Err(source) => {
                let err = ConverterError::Launch {
                    command: self.command.clone(),
                    source,
                };
                log::error!("{}", err);
                self.append_console(&err.to_string());
                self.finish(ExitOutcome::LaunchFailed);
            }
        }
    }

    /// Drain pending output and check for exit. Returns true when the console
    /// or the state changed.
    pub fn poll(&mut self) -> bool {
        if self.state != JobState::Running {
            return false;
        }

        let mut changed = false;
        let mut streams_closed = self.output.is_none();
        let mut chunks = Vec::new();
        if let Some(output) = &self.output {
            loop {
                match output.try_recv() {
                    Ok(text) => chunks.push(text),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        streams_closed = true;
                        break;
                    }
                }
            }
        }
        for text in chunks {
            self.append_console(&text);
            changed = true;
        }

        if self.exit_status.is_none() {
            if let Some(child) = self.child.as_mut() {
                match child.try_wait() {
                    Ok(Some(status)) => {
                        log::info!("Converter exited: {}", status);
                        self.exit_status = Some(status);
                        self.exited_at = Some(Instant::now());
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("Failed to query converter status: {}", e);
                        self.finish(ExitOutcome::Abnormal);
                        return true;
                    }
                }
            }
        }

        if let Some(status) = self.exit_status {
            let drain_expired = self
                .exited_at
                .map(|t| t.elapsed() >= OUTPUT_DRAIN_TIMEOUT)
                .unwrap_or(false);
            if streams_closed || drain_expired {
                if !streams_closed {
                    log::warn!("Converter output still open after exit, closing job");
                }
                self.output = None;
                self.finish(classify_exit(status.code()));
                changed = true;
            }
        }

        changed
    }

    fn finish(&mut self, outcome: ExitOutcome) {
        let success = outcome.is_success();
        log::info!("Conversion finished: {:?}", outcome);
        self.state = JobState::Finished(outcome);
        self.finished_at = Some(Local::now());
        self.notifier.notify(&Notification::conversion_result(success));
    }

    /// Stop a running converter without hanging
    ///
    /// Sends SIGTERM (Unix), waits a grace period, then kills and waits for a
    /// bounded time. Returns true when the process is known to be gone.
    pub fn terminate(&mut self) -> bool {
        let Some(mut child) = self.child.take() else {
            return true;
        };
        self.output = None;

        if self.exit_status.is_some() {
            return true;
        }
        if let Ok(Some(_)) = child.try_wait() {
            return true;
        }

        let pid = child.id();
        if request_termination(&child) {
            match child.wait_timeout(TERMINATE_GRACE_PERIOD) {
                Ok(Some(_)) => {
                    log::info!("Converter {} terminated", pid);
                    return true;
                }
                Ok(None) => log::warn!("Converter {} ignored SIGTERM, killing", pid),
                Err(e) => log::warn!("Failed to wait for converter {}: {}", pid, e),
            }
        }

        if let Err(e) = child.kill() {
            log::warn!("Failed to kill converter {}: {}", pid, e);
        }
        match child.wait_timeout(KILL_WAIT_TIMEOUT) {
            Ok(Some(_)) => {
                log::info!("Converter {} killed", pid);
                true
            }
            Ok(None) => {
                log::error!("Converter {} did not exit after kill, giving up", pid);
                false
            }
            Err(e) => {
                log::error!("Failed to wait for killed converter {}: {}", pid, e);
                false
            }
        }
    }
}

impl Drop for ConversionJob {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.terminate();
        }
    }
}
