//! `qsynth rabi|decay|bell`: generate one dataset and write it out.

use qsynth_core::{ExperimentParameters, ExperimentResult, fingerprint, generate};

use super::{CommandError, OutputOptions, emit, exit_on_error};

/// Generate and write a dataset, returning it for callers that inspect it.
pub fn generate_to(
    params: &ExperimentParameters,
    opts: &OutputOptions<'_>,
) -> Result<ExperimentResult, CommandError> {
    let result = generate(params)?;
    emit(&result, opts)?;
    Ok(result)
}

/// Run the generate command.
pub fn run(params: ExperimentParameters, opts: &OutputOptions<'_>) {
    let result = exit_on_error(generate_to(&params, opts));
    if let Some(path) = opts.path {
        eprintln!(
            "{} dataset ({} measurements) written to {path}",
            result.kind(),
            result.metadata.total_measurements
        );
    }
    if opts.fingerprint {
        eprintln!("sha256: {}", fingerprint(&result));
    }
}
