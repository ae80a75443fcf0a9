use clap::error::ErrorKind;
use clap::Parser;
use platform_audit::adapters::outbound::console::StderrProgressReporter;
use platform_audit::adapters::outbound::filesystem::FileSystemReader;
use platform_audit::adapters::outbound::network::PackagistAdvisoryClient;
use platform_audit::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use platform_audit::application::use_cases::AuditDependenciesUseCase;
use platform_audit::cli::Args;
use platform_audit::config::{self, ConfigFile};
use platform_audit::shared::error::{AuditError, ExitCode};
use platform_audit::shared::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::InvalidArguments,
            };
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    // Validate project directory
    let project_path = args.project_path();
    validate_project_path(&project_path)?;

    // Config file: explicit path, else auto-discovery in the project directory
    let config_file = load_config(&args, &project_path)?;
    let merged = config::merge_config(&args, config_file)?;

    // Create adapters (Dependency Injection)
    let lockfile_reader = FileSystemReader::new();
    let manifest_reader = FileSystemReader::new();
    let advisory_repository = PackagistAdvisoryClient::new()?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = AuditDependenciesUseCase::new(
        lockfile_reader,
        manifest_reader,
        advisory_repository,
        progress_reporter,
    );

    let response = use_case.execute(merged.request).await?;

    eprintln!("{}", FormatterFactory::progress_message(merged.format));

    let output_path = args.output_path();
    let color = output_path.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(merged.format, color);
    let formatted_output = formatter.format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::from(output_path));
    presenter.present(&formatted_output)?;

    match response.blocking_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn load_config(args: &Args, project_path: &Path) -> Result<Option<ConfigFile>> {
    if let Some(ref config_path) = args.config {
        let path = PathBuf::from(config_path);
        let config = config::load_config_from_path(&path)?;
        eprintln!("📋 Loaded config from: {}", path.display());
        return Ok(Some(config));
    }

    let discovered = config::discover_config(project_path)?;
    if discovered.is_some() {
        eprintln!(
            "📋 Auto-discovered config file: {}",
            project_path.join(config::CONFIG_FILENAME).display()
        );
    }
    Ok(discovered)
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| AuditError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    let canonical_path = path
        .canonicalize()
        .map_err(|e| AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;

    if !canonical_path.is_dir() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Resolved path is not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
