//! PDF conversion backends.
//!
//! Conversion shells out to locally installed tools, HTML on stdin. Backends
//! run in preference order and the first success wins; exhausting the chain
//! is not an error, the contract just keeps its HTML artifact only.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use contract_core_api::domain::render::PdfBackend;
use contract_core_api::error::{CoreError, CoreResult};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// `wkhtmltopdf --quiet - <output>`
pub struct WkhtmltopdfBackend;

#[async_trait]
impl PdfBackend for WkhtmltopdfBackend {
    fn name(&self) -> &str {
        "wkhtmltopdf"
    }

    async fn render_pdf(&self, html: &str, output: &Path) -> CoreResult<()> {
        convert_via_stdin("wkhtmltopdf", &["--quiet", "-"], html, output).await
    }
}

/// `weasyprint - <output>`
pub struct WeasyprintBackend;

#[async_trait]
impl PdfBackend for WeasyprintBackend {
    fn name(&self) -> &str {
        "weasyprint"
    }

    async fn render_pdf(&self, html: &str, output: &Path) -> CoreResult<()> {
        convert_via_stdin("weasyprint", &["-"], html, output).await
    }
}

/// The default conversion chain, in preference order.
pub fn default_backends() -> Vec<Arc<dyn PdfBackend>> {
    vec![Arc::new(WkhtmltopdfBackend), Arc::new(WeasyprintBackend)]
}

/// Run the chain. Returns the winning backend's name, or `None` when every
/// backend failed.
pub async fn convert_with_fallback(
    backends: &[Arc<dyn PdfBackend>],
    html: &str,
    output: &Path,
) -> Option<String> {
    for backend in backends {
        match backend.render_pdf(html, output).await {
            Ok(()) => return Some(backend.name().to_string()),
            Err(e) => {
                tracing::warn!(backend = backend.name(), "pdf conversion failed: {e}");
            }
        }
    }
    None
}

/// Pipe HTML to a converter pointed at a staging file, and move the result
/// into place only on success, so a failed run leaves nothing at `output`.
async fn convert_via_stdin(
    program: &str,
    args: &[&str],
    html: &str,
    output: &Path,
) -> CoreResult<()> {
    let staging = staging_path(output);

    let mut child = Command::new(program)
        .args(args)
        .arg(&staging)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CoreError::Render(format!("{program} did not start: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(html.as_bytes())
            .await
            .map_err(|e| CoreError::Render(format!("{program} rejected its input: {e}")))?;
    }

    let finished = child
        .wait_with_output()
        .await
        .map_err(|e| CoreError::Render(format!("{program} did not finish: {e}")))?;

    if !finished.status.success() {
        let _ = std::fs::remove_file(&staging);
        let stderr = String::from_utf8_lossy(&finished.stderr);
        return Err(CoreError::Render(format!(
            "{program} exited with {}: {}",
            finished.status,
            stderr.trim()
        )));
    }

    std::fs::rename(&staging, output).map_err(|e| {
        CoreError::Render(format!("could not move {program} output into place: {e}"))
    })?;
    Ok(())
}

fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    output.with_file_name(format!("{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend {
        label: &'static str,
        succeed: bool,
    }

    #[async_trait]
    impl PdfBackend for FixedBackend {
        fn name(&self) -> &str {
            self.label
        }

        async fn render_pdf(&self, _html: &str, output: &Path) -> CoreResult<()> {
            if self.succeed {
                std::fs::write(output, b"%PDF-1.4")
                    .map_err(|e| CoreError::Render(e.to_string()))?;
                Ok(())
            } else {
                Err(CoreError::Render(format!("{} is unavailable", self.label)))
            }
        }
    }

    fn backend(label: &'static str, succeed: bool) -> Arc<dyn PdfBackend> {
        Arc::new(FixedBackend { label, succeed })
    }

    #[tokio::test]
    async fn fallback_skips_failures_and_reports_the_winner() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("contract.pdf");
        let backends = vec![backend("first", false), backend("second", true)];

        let winner = convert_with_fallback(&backends, "<html></html>", &output).await;

        assert_eq!(winner.as_deref(), Some("second"));
        assert!(output.exists());
    }

    #[tokio::test]
    async fn exhausted_chain_returns_none_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("contract.pdf");
        let backends = vec![backend("first", false), backend("second", false)];

        let winner = convert_with_fallback(&backends, "<html></html>", &output).await;

        assert_eq!(winner, None);
        assert!(!output.exists());
    }

    #[test]
    fn staging_sits_next_to_the_output() {
        let staged = staging_path(Path::new("/tmp/x/contract.pdf"));
        assert_eq!(staged, Path::new("/tmp/x/contract.pdf.partial"));
    }

    #[tokio::test]
    async fn missing_converter_binary_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("contract.pdf");
        let err = convert_via_stdin("definitely-not-installed-anywhere", &["-"], "<html></html>", &output)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Render(_)));
        assert!(!output.exists());
    }
}
