use super::{stdin_write_result, Invocation, ProcessRunner, RawOutput, SystemRunner};
use crate::error::ExifToolError;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput, ExifToolError> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(ExifToolError::ExifToolNotFound)?;

        // Feed stdin from another thread so a chatty exiftool can't fill stdout
        // while we are still writing. The pipe closes when the thread drops it.
        let writer = match (child.stdin.take(), invocation.stdin.clone()) {
            (Some(mut stdin), Some(input)) => {
                log::debug!("Piping {} bytes to exiftool", input.len());
                let len = input.len();
                Some((len, thread::spawn(move || stdin.write_all(&input))))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;

        if let Some((len, handle)) = writer {
            let written = handle
                .join()
                .map_err(|_| io::Error::other("stdin writer thread panicked"))?;
            stdin_write_result(written, len)?;
        }

        Ok(RawOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
