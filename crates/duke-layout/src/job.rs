//! File-to-file conversion jobs

use std::fs;
use std::path::Path;

use crate::convert::Converter;
use crate::error::{Error, Result};
use crate::load::load_worksheet;
use crate::options::ConvertOptions;
use crate::status::{truncate_message, JobStatus, MAX_STATUS_MESSAGE_LEN};

/// Convert `input` and write the result to `output`
///
/// Returns the converted text. Nothing is written when any step fails.
pub fn convert_file<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<String>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let converter = Converter::new(options.clone())?;
    let sheet = load_worksheet(input, options)?;
    let content = converter.convert(&sheet)?;
    write_output(output, &content)?;
    tracing::info!(
        "Wrote {} output for {} to {} ({} bytes)",
        options.format,
        input.display(),
        output.display(),
        content.len()
    );
    Ok(content)
}

/// Run a conversion job and report its outcome to `status`
///
/// The outcome is reported exactly once. A failing status sink is logged and
/// does not change the result of the job.
pub fn run_job<P, Q>(
    input: P,
    output: Q,
    options: &ConvertOptions,
    status: &mut dyn JobStatus,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output = output.as_ref();
    let job_id = options.job_id;
    tracing::info!("Job {}: converting {}", job_id, input.as_ref().display());

    match convert_file(input, output, options) {
        Ok(_) => {
            if let Err(e) = status.completed(job_id, output) {
                tracing::warn!("Job {}: failed to report completion: {}", job_id, e);
            }
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            let message = truncate_message(&message, MAX_STATUS_MESSAGE_LEN);
            if let Err(e) = status.failed(job_id, err.kind(), message) {
                tracing::warn!("Job {}: failed to report failure: {}", job_id, e);
            }
            Err(err)
        }
    }
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::output(path, e))?;
        }
    }
    fs::write(path, content).map_err(|e| Error::output(path, e))
}
