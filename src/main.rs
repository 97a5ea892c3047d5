use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use postref::config::Config;
use postref::error::Error;
use postref::types::{ObjectType, Reference, ReferenceKind};
use postref::{decode_identifier, extract_references};

/// Maximum input size accepted per file (4 MiB). The extraction core
/// assumes its caller bounds input length; this binary is that caller.
const MAX_INPUT_SIZE: u64 = 4 * 1024 * 1024;

/// File extensions considered by `postref scan`.
const SCAN_EXTENSIONS: [&str; 3] = ["markdown", "md", "txt"];

#[derive(Parser)]
#[command(name = "postref", about = "Cross-reference extraction for Q&A content")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single identifier and print its canonical form
    Decode {
        /// Candidate identifier, long or short form
        id: String,
    },
    /// Extract references from one file, or stdin when no file is given
    Extract {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
        /// Emit the references as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Scan a directory tree of text files and report every reference
    Scan {
        /// Root directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { id } => cmd_decode(&id),
        Commands::Extract { file, json } => exit_code(cmd_extract(file.as_deref(), json)),
        Commands::Scan { root, json } => exit_code(cmd_scan(&root, json)),
    }
}

/// Map a command result to an exit code, reporting failures on stderr.
fn exit_code(result: Result<(), Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Classify one identifier. The exit code distinguishes invalid ids so
/// the command composes in shell scripts.
fn cmd_decode(id: &str) -> ExitCode {
    match decode_identifier(id) {
        Some(identifier) => {
            let kind = match identifier.object_type {
                ObjectType::Answer => "answer",
                ObjectType::Question => "question",
            };
            println!("{kind} {}", identifier.canonical_form);
            ExitCode::SUCCESS
        },
        None => {
            println!("invalid");
            ExitCode::FAILURE
        },
    }
}

/// Extract references from a single input and print them.
///
/// # Errors
///
/// Returns errors from reading the input or serializing JSON output.
fn cmd_extract(file: Option<&Path>, json: bool) -> Result<(), Error> {
    let text = match file {
        Some(path) => read_bounded(path)?,
        None => read_stdin_bounded()?,
    };
    let references = extract_references(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&references)?);
        return Ok(());
    }
    for reference in &references {
        println!("{}", render_reference(reference));
    }
    Ok(())
}

/// References found in one scanned file.
#[derive(serde::Serialize)]
struct FileReport {
    /// Path relative to the scan root.
    file: PathBuf,
    /// Every reference in the file, in document order.
    references: Vec<Reference>,
}

/// Walk a directory tree, extract references from every scannable file,
/// and print a report.
///
/// # Errors
///
/// Returns errors from config loading, file reading, the input size
/// bound, or JSON serialization.
fn cmd_scan(root: &Path, json: bool) -> Result<(), Error> {
    let config = Config::load(root)?;
    let mut reports: Vec<FileReport> = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| has_scan_extension(e.path()))
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        if !config.should_scan(&relative.to_string_lossy()) {
            continue;
        }

        let text = read_bounded(path)?;
        let references = extract_references(&text);
        if references.is_empty() {
            continue;
        }
        reports.push(FileReport { file: relative, references });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let mut total = 0_usize;
    for report in &reports {
        for reference in &report.references {
            println!("{}  {}", report.file.display(), render_reference(reference));
            total = total.saturating_add(1);
        }
    }
    println!("{total} references in {} files", reports.len());
    Ok(())
}

/// Whether a path has one of the scanned extensions.
fn has_scan_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext))
}

/// One aligned line per reference: kind, then both id positions.
fn render_reference(reference: &Reference) -> String {
    let kind = match reference.kind {
        ReferenceKind::Hash => "hash",
        ReferenceKind::Path => "path",
    };
    let question = reference.question_id.as_deref().unwrap_or("-");
    let answer = reference.answer_id.as_deref().unwrap_or("-");
    return format!("{kind}  question={question} answer={answer}");
}

/// Read a file, refusing anything over `MAX_INPUT_SIZE`.
///
/// # Errors
///
/// Returns `Error::InputTooLarge` or `Error::Io`.
fn read_bounded(path: &Path) -> Result<String, Error> {
    let size_bytes = std::fs::metadata(path)?.len();
    if size_bytes > MAX_INPUT_SIZE {
        return Err(Error::InputTooLarge {
            file: path.to_path_buf(),
            max_bytes: MAX_INPUT_SIZE,
            size_bytes,
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Read stdin up to the size bound.
///
/// # Errors
///
/// Returns `Error::InputTooLarge` or `Error::Io`.
fn read_stdin_bounded() -> Result<String, Error> {
    let mut text = String::new();
    std::io::stdin()
        .take(MAX_INPUT_SIZE.saturating_add(1))
        .read_to_string(&mut text)?;

    let size_bytes = u64::try_from(text.len()).unwrap_or(u64::MAX);
    if size_bytes > MAX_INPUT_SIZE {
        return Err(Error::InputTooLarge {
            file: PathBuf::from("<stdin>"),
            max_bytes: MAX_INPUT_SIZE,
            size_bytes,
        });
    }
    Ok(text)
}
