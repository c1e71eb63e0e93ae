use crate::error::{ChangerError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

/// rclone exit codes that mean the probed path is simply not there.
const EXIT_DIR_NOT_FOUND: i32 = 3;
const EXIT_FILE_NOT_FOUND: i32 = 4;

/// Invocation settings for the external transfer tool.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub binary: PathBuf,
    pub config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub extra_args: Vec<String>,
}

/// Outcome of probing a remote path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Present,
    Absent,
    /// The tool failed for a reason other than "not found"; carries the exit
    /// code when the process exited normally.
    Failed(Option<i32>),
}

/// Remote copy and existence checks as the changer core consumes them.
/// Calls block until the tool exits; there is no retry and no timeout.
#[async_trait]
pub trait Transfer {
    async fn copy(&self, source: &str, destination: &str) -> Result<()>;

    /// Coarse probe: a tool failure is reported as "not present".
    async fn exists(&self, path: &str) -> Result<bool>;
}

/// Drives the transfer tool (rclone by default) as a subprocess. The tool's
/// output is discarded; its exit code is the only signal.
pub struct TransferClient {
    options: TransferOptions,
}

impl TransferClient {
    pub fn new(options: TransferOptions) -> Self {
        Self { options }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.options.binary);
        if let Some(config) = &self.options.config {
            cmd.arg("--config").arg(config);
        }
        if let Some(log_file) = &self.options.log_file {
            cmd.arg("--log-file").arg(log_file);
        }
        cmd.arg("--quiet").arg("--checksum");
        cmd.args(&self.options.extra_args);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    async fn run(&self, verb: &str, paths: &[&str]) -> Result<ExitStatus> {
        let mut cmd = self.command();
        cmd.arg(verb).args(paths);

        debug!(
            "Running transfer tool: {} {} {}",
            self.options.binary.display(),
            verb,
            paths.join(" ")
        );

        cmd.status().await.map_err(|e| {
            ChangerError::config(format!(
                "could not run transfer tool {}: {}",
                self.options.binary.display(),
                e
            ))
        })
    }

    /// Probes a remote path, keeping "not found" distinct from tool failure
    /// as far as the tool's exit codes allow.
    pub async fn probe(&self, path: &str) -> Result<Probe> {
        let status = self.run("ls", &[path]).await?;
        if status.success() {
            return Ok(Probe::Present);
        }
        Ok(match status.code() {
            Some(EXIT_DIR_NOT_FOUND) | Some(EXIT_FILE_NOT_FOUND) => Probe::Absent,
            code => Probe::Failed(code),
        })
    }
}

#[async_trait]
impl Transfer for TransferClient {
    async fn copy(&self, source: &str, destination: &str) -> Result<()> {
        let status = self.run("copy", &[source, destination]).await?;
        if status.success() {
            debug!("Copied {} -> {}", source, destination);
            Ok(())
        } else {
            Err(ChangerError::transfer(format!(
                "copy {} -> {} failed with {}",
                source,
                destination,
                describe_exit(&status)
            )))
        }
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        match self.probe(path).await? {
            Probe::Present => Ok(true),
            Probe::Absent => Ok(false),
            Probe::Failed(code) => {
                warn!(
                    "Existence probe for {} failed ({}), treating the volume as absent",
                    path,
                    code.map(|c| format!("exit code {}", c))
                        .unwrap_or_else(|| "killed by signal".to_string())
                );
                Ok(false)
            }
        }
    }
}

fn describe_exit(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Shell stand-in for the transfer tool: `copy` and `ls` against the
    /// local filesystem, with the same exit-code contract as rclone.
    #[cfg(unix)]
    fn fake_tool(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-transfer-tool");
        std::fs::write(
            &path,
            "#!/bin/sh\n\
             while [ $# -gt 0 ]; do\n\
               case \"$1\" in\n\
                 --quiet|--checksum) shift ;;\n\
                 --config|--log-file) shift 2 ;;\n\
                 *) break ;;\n\
               esac\n\
             done\n\
             verb=\"$1\"; shift\n\
             case \"$verb\" in\n\
               copy) exec cp \"$1\" \"$2\" ;;\n\
               ls)\n\
                 case \"$1\" in *fail-probe*) exit 5 ;; esac\n\
                 [ -e \"$1\" ] || exit 3\n\
                 ;;\n\
               *) exit 1 ;;\n\
             esac\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn client_for(dir: &Path) -> TransferClient {
        TransferClient::new(TransferOptions {
            binary: fake_tool(dir),
            config: None,
            log_file: None,
            extra_args: Vec::new(),
        })
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_runs_the_tool_and_moves_data() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("volume");
        std::fs::write(&source, b"tape data").unwrap();
        let dest_dir = dir.path().join("slot");
        std::fs::create_dir(&dest_dir).unwrap();

        let client = client_for(dir.path());
        client
            .copy(
                source.to_str().unwrap(),
                dest_dir.join("volume").to_str().unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(std::fs::read(dest_dir.join("volume")).unwrap(), b"tape data");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exists_maps_exit_codes_to_presence() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        std::fs::write(&present, b"x").unwrap();

        let client = client_for(dir.path());
        assert!(client.exists(present.to_str().unwrap()).await.unwrap());
        assert!(!client
            .exists(dir.path().join("missing").to_str().unwrap())
            .await
            .unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn probe_distinguishes_tool_failure_from_absence() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_for(dir.path());

        let missing = dir.path().join("missing");
        assert_eq!(client.probe(missing.to_str().unwrap()).await.unwrap(), Probe::Absent);

        let outcome = client.probe("fail-probe").await.unwrap();
        assert_eq!(outcome, Probe::Failed(Some(5)));

        // The coarse contract still reports a failed probe as absent.
        assert!(!client.exists("fail-probe").await.unwrap());
    }

    #[tokio::test]
    async fn missing_binary_is_a_configuration_error() {
        let client = TransferClient::new(TransferOptions {
            binary: PathBuf::from("/nonexistent/transfer-tool"),
            config: None,
            log_file: None,
            extra_args: Vec::new(),
        });

        let err = client.copy("a", "b").await.unwrap_err();
        assert!(matches!(err, ChangerError::Config(_)));
    }
}
