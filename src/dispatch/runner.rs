//! Bounded, output-discarding subprocess execution

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Whether a tool process could be started at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The process started; how it ended is irrelevant
    Started,

    /// The process could not be spawned
    Unavailable,
}

/// Run `program` with all stdio detached, killing it after `timeout`.
///
/// Exit status, timeouts and wait errors all collapse into
/// [`Launch::Started`]; only a failed spawn is reported.
pub fn run_discarding(program: &Path, args: &[String], timeout: Duration) -> Launch {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match child {
        Ok(child) => {
            wait_bounded(child, timeout);
            Launch::Started
        }
        Err(_) => Launch::Unavailable,
    }
}

fn wait_bounded(mut child: Child, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return,
            Ok(None) if Instant::now() < deadline => thread::sleep(POLL_INTERVAL),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return;
            }
        }
    }
}
