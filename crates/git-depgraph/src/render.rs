use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Errors from invoking the external renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot write temporary graph source: {0}")]
    Source(#[source] std::io::Error),

    #[error("failed to run renderer {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer {} exited with {status}: {stderr}", program.display())]
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

/// An external executable that turns a Mermaid file into an image.
///
/// Invoked as `<program> -i <input.mmd> -o <output>`, the mermaid-cli
/// calling convention. Arguments are passed directly, never through a shell.
#[derive(Debug, Clone)]
pub struct Renderer {
    program: PathBuf,
}

impl Renderer {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    /// Argument vector for rendering `input` into `output`.
    pub fn args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-i".into(),
            input.as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
        ]
    }

    /// Render Mermaid `source` into the image at `output`.
    ///
    /// The source goes to a temporary `.mmd` file that is removed once the
    /// renderer exits, whether or not it succeeded.
    pub fn render(&self, source: &str, output: &Path) -> Result<(), RenderError> {
        let mut input = tempfile::Builder::new()
            .prefix("depgraph-")
            .suffix(".mmd")
            .tempfile()
            .map_err(RenderError::Source)?;
        input
            .write_all(source.as_bytes())
            .and_then(|()| input.flush())
            .map_err(RenderError::Source)?;

        let args = Self::args(input.path(), output);
        tracing::debug!(program = %self.program.display(), ?args, "running renderer");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| RenderError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_follow_mermaid_cli_convention() {
        let args = Renderer::args(Path::new("/tmp/in.mmd"), Path::new("/out/graph.png"));
        assert_eq!(args, ["-i", "/tmp/in.mmd", "-o", "/out/graph.png"]);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Renderer::new(dir.path().join("no-such-mmdc"));
        let err = renderer
            .render("graph TD", &dir.path().join("out.png"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fail.sh");
        std::fs::write(&script, "#!/bin/sh\necho 'parse error' >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = Renderer::new(&script)
            .render("graph TD", &dir.path().join("out.png"))
            .unwrap_err();
        match err {
            RenderError::Failed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "parse error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
