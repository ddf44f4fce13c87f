use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use lambda_contract::InvocationContext;
use lambda_functions::handlers::FunctionName;
use serde_json::Value;
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the deploy-lambdas workspace",
    long_about = "Builds, packages and locally invokes the Lambda functions\n\
                  defined in crates/lambda_functions, and runs CI checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every function binary and package it as a Lambda zip
    LambdaPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifacts
        #[arg(long, default_value = "dist")]
        dist_dir: PathBuf,
    },
    /// Invoke a function handler locally with an empty context
    Invoke {
        /// Function to invoke (my_lambda or my_second_lambda)
        function: FunctionName,
        /// JSON file holding the event; defaults to an empty mapping
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run check, then package every function
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── packaging ──────────────────────────────────────────────────────

fn package_lambdas(target: &str, profile: BuildProfile, dist_dir: &Path) {
    ensure_rust_target_installed(target);
    ensure_c_linker_available(target);

    step("Build lambda function binaries");

    let mut cargo_args = vec!["build", "-p", "lambda_functions", "--target", target];
    for function in FunctionName::ALL {
        cargo_args.push("--bin");
        cargo_args.push(function.binary_name());
    }
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package lambda zip artifacts");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    let mut packaged = Vec::with_capacity(FunctionName::ALL.len());
    for function in FunctionName::ALL {
        let zip_path = dist_dir.join(format!("{}.zip", function.binary_name()));
        package_lambda_zip(
            &target_dir.join(binary_name(function.binary_name(), target)),
            &zip_path,
        );
        packaged.push(zip_path);
    }

    eprintln!("\nPackaged artifacts:");
    for path in packaged {
        eprintln!("- {}", path.display());
    }
}

fn ensure_rust_target_installed(target: &str) {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output();

    let output = match output {
        Ok(value) => value,
        Err(error) => {
            eprintln!(
                "warning: failed to run `rustup target list --installed` ({error}); continuing without target preflight"
            );
            return;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "failed to list installed rust targets; run `rustup target list --installed` manually. details: {}",
            stderr.trim()
        );
    }

    let installed = String::from_utf8_lossy(&output.stdout);
    if !installed.lines().any(|line| line.trim() == target) {
        panic!(
            "required rust target `{target}` is not installed. install it with `rustup target add {target}` and re-run `cargo run -p xtask -- lambda-package`"
        );
    }
}

fn ensure_c_linker_available(target: &str) {
    if !cfg!(windows) || !target.ends_with("unknown-linux-gnu") {
        return;
    }

    let env_override_keys = [
        format!("CC_{}", target.replace('-', "_")),
        format!("CC_{target}"),
        "TARGET_CC".to_string(),
        "CC".to_string(),
    ];

    let configured = env_override_keys
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .any(|value| !value.trim().is_empty() && tool_works(value.trim()));
    if configured {
        return;
    }

    let canonical = "x86_64-linux-gnu-gcc";
    if tool_works(canonical) {
        return;
    }

    panic!(
        "missing C cross-linker for target `{target}`. install `{canonical}` (or set CC_x86_64_unknown_linux_gnu) before running `cargo run -p xtask -- lambda-package`."
    );
}

fn tool_works(program: &str) -> bool {
    let mut parts = program.split_whitespace();
    let Some(bin) = parts.next() else {
        return false;
    };
    let args: Vec<&str> = parts.collect();

    Command::new(bin)
        .args(&args)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn binary_name(bin_name: &str, target: &str) -> String {
    if target.contains("windows") {
        format!("{bin_name}.exe")
    } else {
        bin_name.to_string()
    }
}

/// Writes `binary_path` into a zip as the `bootstrap` executable expected by
/// the `provided` Lambda runtimes.
fn package_lambda_zip(binary_path: &Path, zip_path: &Path) {
    if !binary_path.exists() {
        panic!("expected lambda binary at '{}'", binary_path.display());
    }

    let binary = fs::read(binary_path).expect("failed to read lambda binary");
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    write_bootstrap_zip(file, &binary).expect("failed to write lambda zip");
}

fn write_bootstrap_zip<W: Write + Seek>(writer: W, binary: &[u8]) -> ZipResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(binary)?;
    zip.finish()
}

// ── local invocation ───────────────────────────────────────────────

fn read_event(path: Option<&Path>) -> Value {
    let Some(path) = path else {
        return Value::Object(Default::default());
    };
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|error| panic!("failed to read event file '{}': {error}", path.display()));
    serde_json::from_str(&raw).unwrap_or_else(|error| {
        panic!(
            "event file '{}' is not valid JSON: {error}",
            path.display()
        )
    })
}

fn invoke_locally(function: FunctionName, event: Value) -> Value {
    let context = InvocationContext::default().with_function_name(function.binary_name());
    let response = function.invoke(event, &context);
    serde_json::to_value(&response).expect("response should serialize")
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test lambda_contract");
    run_cargo(&["test", "-p", "lambda_contract"]);

    step("Test lambda_functions");
    run_cargo(&["test", "-p", "lambda_functions"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::LambdaPackage {
            target,
            profile,
            dist_dir,
        } => {
            package_lambdas(&target, profile, &dist_dir);
        }
        Commands::Invoke { function, event } => {
            let response = invoke_locally(function, read_event(event.as_deref()));
            println!(
                "{}",
                serde_json::to_string_pretty(&response).expect("response should serialize")
            );
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::All => {
                    ci_check();
                    package_lambdas(
                        "x86_64-unknown-linux-gnu",
                        BuildProfile::Release,
                        Path::new("dist"),
                    );
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use serde_json::json;

    use super::*;

    #[test]
    fn bootstrap_zip_contains_single_executable_entry() {
        let cursor = write_bootstrap_zip(Cursor::new(Vec::new()), b"\x7fELF-binary")
            .expect("zip should be written");

        let mut archive =
            zip::ZipArchive::new(Cursor::new(cursor.into_inner())).expect("zip should open");
        assert_eq!(archive.len(), 1);

        let mut entry = archive.by_name("bootstrap").expect("bootstrap entry");
        assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o755));
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).expect("entry should read");
        assert_eq!(contents, b"\x7fELF-binary");
    }

    #[test]
    fn windows_targets_use_exe_suffix() {
        assert_eq!(
            binary_name("my_lambda", "x86_64-pc-windows-msvc"),
            "my_lambda.exe"
        );
        assert_eq!(binary_name("my_lambda", "aarch64-unknown-linux-gnu"), "my_lambda");
    }

    #[test]
    fn local_invocation_defaults_to_empty_event() {
        let response = invoke_locally(FunctionName::MySecondLambda, read_event(None));

        assert_eq!(response["statusCode"], json!(200));
        assert_eq!(response["body"], json!("Hello from 2nd Lambda!"));
    }
}
