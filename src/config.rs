use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "clinical-extract";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Input document looked up in the working directory when no override is set.
pub const DEFAULT_INPUT_FILENAME: &str = "Input Data for assignment.pdf";

/// Results file written to the working directory when no override is set.
pub const DEFAULT_OUTPUT_FILENAME: &str = "clinical_extraction_results.json";

pub const INPUT_ENV: &str = "CLINICAL_EXTRACT_INPUT";
pub const OUTPUT_ENV: &str = "CLINICAL_EXTRACT_OUTPUT";
pub const DUMP_DIR_ENV: &str = "CLINICAL_EXTRACT_DUMP_DIR";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "clinical_extract_lib=debug,info"
    } else {
        "clinical_extract_lib=info,warn"
    }
}

/// Path of the document to process.
pub fn input_path() -> PathBuf {
    path_from_env(INPUT_ENV, DEFAULT_INPUT_FILENAME)
}

/// Path of the JSON results file.
pub fn output_path() -> PathBuf {
    path_from_env(OUTPUT_ENV, DEFAULT_OUTPUT_FILENAME)
}

/// Diagnostic dump directory, only when explicitly requested.
pub fn dump_dir() -> Option<PathBuf> {
    std::env::var_os(DUMP_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn path_from_env(var: &str, default: &str) -> PathBuf {
    resolve_path(std::env::var_os(var).map(PathBuf::from), default)
}

fn resolve_path(value: Option<PathBuf>, default: &str) -> PathBuf {
    match value {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => PathBuf::from(default),
    }
}
