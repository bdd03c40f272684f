use crate::error::{CcbarError, Result};
use crate::types::{BlockUsage, BlocksResponse};
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Hard cap on one ccusage invocation; a hung npm must not stall the loop.
pub const EXEC_TIMEOUT: Duration = Duration::from_secs(8);

const CCUSAGE_ARGS: &[&str] = &["ccusage@latest", "blocks", "--active", "--json", "--offline"];

/// One usage snapshot per cycle. The driver is generic over this seam so its
/// tests can substitute a canned source for the real subprocess.
pub trait UsageSource {
    fn fetch(&self) -> impl Future<Output = Result<BlockUsage>> + Send;
}

/// Shells out to `npx ccusage@latest blocks --active --json --offline` and
/// maps the first (active) block of the response.
#[derive(Debug, Clone)]
pub struct CcusageCli {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CcusageCli {
    pub fn new(timeout: Duration) -> Self {
        CcusageCli {
            program: "npx".to_string(),
            args: CCUSAGE_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout,
        }
    }

    #[cfg(test)]
    fn with_command(program: impl Into<String>, timeout: Duration) -> Self {
        CcusageCli {
            program: program.into(),
            args: Vec::new(),
            timeout,
        }
    }

    async fn run(&self) -> Result<Vec<u8>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Reap the child if the timeout (or a shutdown race) drops us
            .kill_on_drop(true);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| CcbarError::Timeout(self.timeout))?
            .map_err(|source| CcbarError::Spawn { source })?;

        if !output.status.success() {
            return Err(CcbarError::CommandFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl UsageSource for CcusageCli {
    async fn fetch(&self) -> Result<BlockUsage> {
        let stdout = self.run().await?;
        parse_active_block(&stdout)
    }
}

/// Extract the active block from a `ccusage blocks --json` response. With
/// `--active` the first reported block is the active one; an empty list is a
/// fetch error, not zero-valued success.
pub fn parse_active_block(raw: &[u8]) -> Result<BlockUsage> {
    let response: BlocksResponse = serde_json::from_slice(raw)?;
    let block = response.blocks.first().ok_or(CcbarError::NoActiveBlock)?;
    Ok(BlockUsage::from(block))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"blocks":[{"entries":42,"totalTokens":120000,"tokenCounts":{"inputTokens":100000,"outputTokens":20000},"costUSD":3.45,"burnRate":{"costPerHour":1.2},"projection":{"remainingMinutes":125}}]}"#;

    #[test]
    fn test_parse_active_block() {
        let usage = parse_active_block(SAMPLE.as_bytes()).unwrap();

        assert_eq!(usage.entries, 42);
        assert_eq!(usage.total_tokens, 120_000);
        assert_eq!(usage.input_tokens, 100_000);
        assert_eq!(usage.output_tokens, 20_000);
        assert_eq!(usage.cost_usd, 3.45);
        assert_eq!(usage.cost_per_hour, 1.2);
        assert_eq!(usage.remaining_minutes, 125);
    }

    #[test]
    fn test_parse_picks_first_block() {
        let json = r#"{"blocks":[{"entries":1},{"entries":2}]}"#;
        let usage = parse_active_block(json.as_bytes()).unwrap();
        assert_eq!(usage.entries, 1);
    }

    #[test]
    fn test_empty_blocks_is_an_error() {
        let err = parse_active_block(br#"{"blocks":[]}"#).unwrap_err();
        assert!(matches!(err, CcbarError::NoActiveBlock));

        let err = parse_active_block(b"{}").unwrap_err();
        assert!(matches!(err, CcbarError::NoActiveBlock));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = parse_active_block(b"npm WARN deprecated").unwrap_err();
        assert!(matches!(err, CcbarError::JsonParse(_)));
    }

    #[cfg(unix)]
    mod subprocess {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;
        use tempfile::TempDir;

        fn fake_ccusage(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("ccusage.sh");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_fetch_from_real_subprocess() {
            let dir = TempDir::new().unwrap();
            let script = fake_ccusage(&dir, &format!("echo '{SAMPLE}'"));

            let cli = CcusageCli::with_command(script.display().to_string(), EXEC_TIMEOUT);
            let usage = cli.fetch().await.unwrap();

            assert_eq!(usage.entries, 42);
            assert_eq!(usage.cost_usd, 3.45);
        }

        #[tokio::test]
        async fn test_nonzero_exit_reports_stderr() {
            let dir = TempDir::new().unwrap();
            let script = fake_ccusage(&dir, "echo 'no claude data' >&2; exit 3");

            let cli = CcusageCli::with_command(script.display().to_string(), EXEC_TIMEOUT);
            let err = cli.fetch().await.unwrap_err();

            match err {
                CcbarError::CommandFailed { status, stderr } => {
                    assert_eq!(status.code(), Some(3));
                    assert_eq!(stderr, "no claude data");
                }
                other => panic!("expected CommandFailed, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_hung_command_times_out() {
            let dir = TempDir::new().unwrap();
            let script = fake_ccusage(&dir, "sleep 5");

            let cli =
                CcusageCli::with_command(script.display().to_string(), Duration::from_millis(100));
            let err = cli.fetch().await.unwrap_err();

            assert!(matches!(err, CcbarError::Timeout(_)));
        }

        #[tokio::test]
        async fn test_missing_program_fails_to_spawn() {
            let cli = CcusageCli::with_command("/nonexistent/ccusage", EXEC_TIMEOUT);
            let err = cli.fetch().await.unwrap_err();

            assert!(matches!(err, CcbarError::Spawn { .. }));
        }
    }
}
