//! Upload the built site with rsync.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;

use regex::Regex;

use crate::config::{DeploySettings, PLACEHOLDER_DESTINATION};
use crate::error::{Error, Result};

static XFER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:xfer|xfr)#(\d+),\s*(?:to-check|to-chk|ir-chk)=(\d+)/(\d+)\)")
        .expect("transfer progress pattern is valid")
});

const SSH_COMMAND: &str = "ssh -o StrictHostKeyChecking=accept-new -o BatchMode=yes";

/// One completed transfer as reported by `rsync --progress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub files_done: u64,
    pub remaining: u64,
    pub total: u64,
    /// Last file name rsync printed before this transfer line.
    pub file: Option<String>,
}

impl Progress {
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let checked = self.total.saturating_sub(self.remaining);
        (checked * 100 + self.total / 2) / self.total
    }
}

/// Turns rsync's stdout into progress events.
#[derive(Debug, Default)]
pub struct ProgressParser {
    current_file: Option<String>,
    files_done: u64,
}

impl ProgressParser {
    pub fn feed(&mut self, line: &str) -> Option<Progress> {
        let line = line.trim_end();
        if let Some(caps) = XFER_RE.captures(line) {
            let num = |i: usize| -> u64 {
                caps.get(i)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0)
            };
            self.files_done = num(1);
            return Some(Progress {
                files_done: self.files_done,
                remaining: num(2),
                total: num(3),
                file: self.current_file.clone(),
            });
        }
        // Indented lines are partial progress counters.
        if !line.is_empty() && !line.starts_with(char::is_whitespace) {
            self.current_file = Some(line.to_string());
        }
        None
    }

    pub fn files_done(&self) -> u64 {
        self.files_done
    }
}

#[derive(Debug)]
pub struct DeploySummary {
    pub files: u64,
}

/// The configured destination, rejecting blanks and the sample value.
pub fn check_destination(settings: &DeploySettings) -> Result<&str> {
    let destination = settings.destination.trim();
    if destination.is_empty() || destination == PLACEHOLDER_DESTINATION {
        return Err(Error::Deploy(
            "destination not configured; set [deploy] destination = \"user@host:/path/to/site/\" \
             or MANTIS__DEPLOY__DESTINATION"
                .to_string(),
        ));
    }
    Ok(destination)
}

/// Arguments after `rsync`. Include entries missing from the project
/// directory are left out.
pub fn rsync_args(project_dir: &Path, settings: &DeploySettings) -> Result<Vec<String>> {
    let destination = check_destination(settings)?;
    let mut args: Vec<String> = ["-avz", "--delete", "--progress", "-e", SSH_COMMAND]
        .into_iter()
        .map(String::from)
        .collect();

    let exclude = project_dir.join(&settings.exclude_file);
    if exclude.is_file() {
        args.push("--exclude-from".to_string());
        args.push(exclude.to_string_lossy().into_owned());
    }

    let sources: Vec<PathBuf> = settings
        .include
        .iter()
        .map(|entry| project_dir.join(entry))
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                tracing::warn!("not deploying missing {}", path.display());
            }
            exists
        })
        .collect();
    if sources.is_empty() {
        return Err(Error::Deploy("nothing to upload".to_string()));
    }
    args.extend(sources.iter().map(|p| p.to_string_lossy().into_owned()));
    args.push(destination.to_string());
    Ok(args)
}

/// Run rsync and log every transfer as it completes.
pub fn run_rsync(project_dir: &Path, args: &[String]) -> Result<DeploySummary> {
    tracing::info!("deploying via rsync");
    tracing::debug!("rsync {}", args.join(" "));

    let mut child = Command::new("rsync")
        .args(args)
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Deploy(format!("could not start rsync: {e}")))?;

    // stderr is collected on its own thread while stdout streams.
    let stderr = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    let mut parser = ProgressParser::default();
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line.map_err(|e| Error::Deploy(format!("reading rsync output: {e}")))?;
            match parser.feed(&line) {
                Some(progress) => tracing::info!(
                    files = progress.files_done,
                    total = progress.total,
                    "{:>3}% {}",
                    progress.percent(),
                    progress.file.as_deref().unwrap_or("")
                ),
                None => tracing::debug!("{line}"),
            }
        }
    }

    let status = child
        .wait()
        .map_err(|e| Error::Deploy(format!("waiting for rsync: {e}")))?;
    let stderr = stderr
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if !status.success() {
        let detail = stderr.trim();
        return Err(Error::Deploy(if detail.is_empty() {
            format!("rsync exited with {status}")
        } else {
            format!("rsync exited with {status}: {detail}")
        }));
    }
    if !stderr.trim().is_empty() {
        tracing::warn!("rsync: {}", stderr.trim());
    }

    Ok(DeploySummary {
        files: parser.files_done(),
    })
}

pub fn deploy(project_dir: &Path, settings: &DeploySettings) -> Result<DeploySummary> {
    let args = rsync_args(project_dir, settings)?;
    let summary = run_rsync(project_dir, &args)?;
    tracing::info!(files = summary.files, "deploy complete");
    Ok(summary)
}
