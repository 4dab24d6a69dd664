//! Application orchestrator.
//! Merges settings, initializes logging, dispatches the subcommand and logs
//! typed failures with their code and kind.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};

use fsguard::fs_ops::{self, SaveOptions};
use fsguard::output as out;
use fsguard::{FsError, Settings};

use crate::cli::{Args, Command, exclusion_filter};
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    let mut settings = Settings::from_env();
    args.apply_overrides(&mut settings);

    // Held until return so the file appender flushes.
    let _guard = init_tracing(&settings).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;
    debug!(?args, ?settings, "starting fsguard");

    let result = dispatch(&args.command);
    if let Err(e) = &result {
        match e.downcast_ref::<FsError>() {
            Some(fe) => error!(
                code = fe.code(),
                kind = %fe.kind(),
                path = %fe.path().display(),
                "{}",
                fe
            ),
            None => error!(error = ?e, "Operation failed"),
        }
    }
    result
}

fn dispatch(command: &Command) -> Result<ExitCode> {
    match command {
        Command::Save {
            target,
            text,
            from,
            no_sync,
        } => {
            let options = SaveOptions {
                sync: !no_sync,
                ..SaveOptions::default()
            };
            if *no_sync {
                out::print_info("fsync disabled: the save stays atomic but may not survive power loss");
            }
            save(target, text.as_deref(), from.as_deref(), options)?;
            info!(path = %target.display(), "Saved");
            out::print_success(&format!("saved {}", target.display()));
        }
        Command::Copy { src, dest, exclude } => {
            fs_ops::copy_directory_filtered(src, dest, exclusion_filter(exclude))?;
            info!(src = %src.display(), dest = %dest.display(), excluded = exclude.len(), "Copied directory");
            out::print_success(&format!("copied {} -> {}", src.display(), dest.display()));
        }
        Command::Delete { dirs } => {
            fs_ops::delete_directories(dirs)?;
            info!(count = dirs.len(), "Deleted directories");
            out::print_success(&format!("deleted {} director{}", dirs.len(), if dirs.len() == 1 { "y" } else { "ies" }));
        }
        Command::Clean { dir } => {
            fs_ops::clean_directory(dir)?;
            info!(dir = %dir.display(), "Cleaned directory");
            out::print_success(&format!("cleaned {}", dir.display()));
        }
        Command::Probe { path } => {
            let yes = fs_ops::can_create(path);
            out::print_verdict(&path.display().to_string(), yes);
            return Ok(verdict_code(yes));
        }
        Command::Check { path } => {
            let yes = fs_ops::check_permission(path);
            out::print_verdict(&path.display().to_string(), yes);
            return Ok(verdict_code(yes));
        }
        Command::Name { path } => {
            out::print_user(&format!("base: {}", fs_ops::base_name(path)));
            out::print_user(&format!("stem: {}", fs_ops::name_without_extension_of(path)));
            out::print_user(&format!("extension: {}", fs_ops::extension(&path.to_string_lossy())));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn verdict_code(yes: bool) -> ExitCode {
    if yes { ExitCode::SUCCESS } else { ExitCode::from(1) }
}

/// Stream the chosen source into the producer so large inputs are not buffered.
fn save(target: &Path, text: Option<&str>, from: Option<&Path>, options: SaveOptions) -> Result<()> {
    let mut source: Box<dyn Read + '_> = match (text, from) {
        (Some(text), _) => Box::new(text.as_bytes()),
        (None, Some(path)) => {
            let file = File::open(path).with_context(|| format!("open save source '{}'", path.display()))?;
            Box::new(file)
        }
        (None, None) => Box::new(io::stdin().lock()),
    };
    fs_ops::atomic_save_with(target, options, |w| io::copy(&mut source, w).map(|_| ()))?;
    Ok(())
}
