/// Bounded collection of child process output
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use std::io::{BufReader, Read};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Output limits configuration
#[derive(Debug, Clone)]
pub struct OutputLimits {
    /// Per-stream limit (bytes)
    pub stream_limit: usize,
    /// How long to wait for the collectors after the child has exited
    pub drain_timeout: Duration,
}

impl Default for OutputLimits {
    fn default() -> Self {
        OutputLimits {
            stream_limit: 4 * 1024 * 1024, // 4 MB per stream
            drain_timeout: Duration::from_secs(5),
        }
    }
}

/// Collected bytes of one stream
#[derive(Debug, Clone, Default)]
pub struct StreamCapture {
    pub data: Vec<u8>,
    pub truncated: bool,
}

/// Merged output of both streams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedOutput {
    /// stdout followed by stderr, as far as it was read
    pub output: String,
    /// false when a stream was still open at the end of the drain timeout
    pub complete: bool,
}

/// One collector thread: bytes land in `buffer` as they are read, `done`
/// fires once the stream hits EOF.
struct StreamCollector {
    buffer: Arc<Mutex<StreamCapture>>,
    done: Receiver<()>,
}

/// Collectors for stdout and stderr, started right after spawn so a chatty
/// compiler cannot block on a full pipe while the parent waits on it.
pub struct OutputCollector {
    limits: OutputLimits,
    stdout: Option<StreamCollector>,
    stderr: Option<StreamCollector>,
}

impl OutputCollector {
    pub fn start<O, E>(limits: OutputLimits, stdout: Option<O>, stderr: Option<E>) -> Self
    where
        O: Read + Send + 'static,
        E: Read + Send + 'static,
    {
        let stream_limit = limits.stream_limit;
        OutputCollector {
            stdout: stdout.map(|s| spawn_collector(s, stream_limit)),
            stderr: stderr.map(|s| spawn_collector(s, stream_limit)),
            limits,
        }
    }

    /// Wait for both collectors and merge them, stdout first.
    ///
    /// Whatever was read before the drain timeout is kept.
    pub fn finish(self) -> CollectedOutput {
        let deadline = Instant::now() + self.limits.drain_timeout;
        let (stdout, stdout_done) = receive(self.stdout, deadline);
        let (stderr, stderr_done) = receive(self.stderr, deadline);

        if stdout.truncated || stderr.truncated {
            log::warn!(
                "Process output truncated at {} bytes per stream",
                self.limits.stream_limit
            );
        }

        let mut output = String::from_utf8_lossy(&stdout.data).into_owned();
        output.push_str(&String::from_utf8_lossy(&stderr.data));
        CollectedOutput {
            output,
            complete: stdout_done && stderr_done,
        }
    }
}

fn receive(collector: Option<StreamCollector>, deadline: Instant) -> (StreamCapture, bool) {
    let Some(collector) = collector else {
        return (StreamCapture::default(), true);
    };

    let wait = deadline.saturating_duration_since(Instant::now());
    let done = match collector.done.recv_timeout(wait) {
        Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        Err(RecvTimeoutError::Timeout) => {
            // A descendant still holds the pipe open
            log::warn!("Output collector did not finish within drain timeout");
            false
        }
    };

    let mut buffer = collector
        .buffer
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (std::mem::take(&mut *buffer), done)
}

fn spawn_collector<R: Read + Send + 'static>(stream: R, limit: usize) -> StreamCollector {
    let buffer = Arc::new(Mutex::new(StreamCapture::default()));
    let (tx, rx) = bounded(1);
    let sink = Arc::clone(&buffer);
    thread::spawn(move || {
        collect_stream(stream, limit, &sink);
        let _ = tx.send(());
    });
    StreamCollector { buffer, done: rx }
}

/// Read a single stream into `sink` up to `limit` bytes, then keep draining
/// without storing
fn collect_stream<R: Read>(stream: R, limit: usize, sink: &Mutex<StreamCapture>) {
    let mut reader = BufReader::new(stream);
    let mut chunk = [0u8; 4096];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let mut capture = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                let remaining = limit.saturating_sub(capture.data.len());
                if n > remaining {
                    capture.data.extend_from_slice(&chunk[..remaining]);
                    capture.truncated = true;
                } else {
                    capture.data.extend_from_slice(&chunk[..n]);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}
