use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;

use amzn_gen::{Artifact, GenError, Generator, Parameters};
use amzn_schema::File;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protoc-gen-amzn")]
#[command(about = "Render amzn Go handlers from JSON-encoded protobuf schema trees", long_about = None)]
struct Cli {
    /// JSON files holding one schema file object or an array of them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Generator parameters, `key=value,key2=value2` (repeatable)
    #[arg(short, long = "param")]
    params: Vec<String>,

    /// Directory to write generated files into (prints to stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable debug logging (also enabled by a non-empty `DEBUG_PGV`)
    #[arg(long, env = "AMZN_GEN_DEBUG")]
    debug: bool,
}

/// Environment switch protoc-gen-star plugins use for debug output.
const PGS_DEBUG_ENV: &str = "DEBUG_PGV";

fn debug_enabled(flag: bool, pgs_debug: Option<OsString>) -> bool {
    flag || pgs_debug.is_some_and(|v| !v.is_empty())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_files(path: &Path) -> Result<Vec<File>, GenError> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    // Accept a single file object or a list of them
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

/// Joins an artifact path onto the output directory, refusing paths that
/// would land outside it.
fn artifact_destination(dir: &Path, artifact_path: &str) -> Result<PathBuf, GenError> {
    let relative = Path::new(artifact_path);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        return Err(GenError::Configuration(format!(
            "Artifact path {} escapes the output directory",
            artifact_path
        )));
    }
    Ok(dir.join(relative))
}

fn write_artifacts(artifacts: &[Artifact], out_dir: Option<&Path>) -> Result<(), GenError> {
    for artifact in artifacts {
        match out_dir {
            Some(dir) => {
                let path = artifact_destination(dir, artifact.path())?;
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, artifact.content())?;
                info!(path = %path.display(), "wrote artifact");
            }
            None => {
                println!("// ==> {}", artifact.path());
                print!("{}", artifact.content());
            }
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), GenError> {
    let params = Parameters::parse(&cli.params.join(","))?;

    let mut files = Vec::new();
    for input in &cli.inputs {
        files.extend(read_files(input)?);
    }

    let mut generator = Generator::new(params);
    let outcome = generator.execute(&files);

    // Artifacts of files finished before a failure are still written
    write_artifacts(generator.registry().all(), cli.out_dir.as_deref())?;
    outcome
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(debug_enabled(cli.debug, std::env::var_os(PGS_DEBUG_ENV)));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "generation failed");
            eprintln!("protoc-gen-amzn: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_stays_inside_out_dir() {
        let dir = Path::new("gen");
        assert_eq!(
            artifact_destination(dir, "foo/greet.amzn.go").unwrap(),
            Path::new("gen/foo/greet.amzn.go")
        );
        assert_eq!(
            artifact_destination(dir, "./greet.amzn.go").unwrap(),
            Path::new("gen/greet.amzn.go")
        );
    }

    #[test]
    fn destination_rejects_escaping_paths() {
        let dir = Path::new("gen");
        for path in ["/etc/greet.amzn.go", "../greet.amzn.go", "foo/../../greet.amzn.go"] {
            assert!(
                matches!(artifact_destination(dir, path), Err(GenError::Configuration(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn pgs_debug_env_enables_debug() {
        assert!(debug_enabled(true, None));
        assert!(debug_enabled(false, Some(OsString::from("1"))));
        assert!(!debug_enabled(false, Some(OsString::new())));
        assert!(!debug_enabled(false, None));
    }
}
