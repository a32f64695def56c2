use super::{stdin_write_result, AsyncProcessRunner, Invocation, RawOutput, SystemRunner};
use crate::error::ExifToolError;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[async_trait::async_trait]
impl AsyncProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<RawOutput, ExifToolError> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ExifToolError::ExifToolNotFound)?;

        let stdin = child.stdin.take();
        let input = invocation.stdin.clone();
        let feed = async move {
            match (stdin, input) {
                (Some(mut stdin), Some(input)) => {
                    log::debug!("Piping {} bytes to exiftool", input.len());
                    let written = match stdin.write_all(&input).await {
                        Ok(()) => stdin.shutdown().await,
                        Err(e) => Err(e),
                    };
                    (written, input.len())
                }
                _ => (Ok(()), 0),
            }
        };

        // Output is collected while stdin is still being written.
        let ((written, len), output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        stdin_write_result(written, len)?;

        Ok(RawOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
