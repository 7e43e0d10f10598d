use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::content::{self, ContentLayout, ReleaseKind};
use crate::error::{Error, Result};
use crate::health::{self, Severity};
use crate::{deploy, logging};

mod build;
mod settings;

pub use build::{BuildReport, build};

pub fn run(cli: Cli) -> ExitCode {
    logging::init(cli.verbose);
    let settings = settings::load_settings(&cli.project_dir);

    match execute(&cli.project_dir, settings, cli.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn build_and_report(project_dir: &Path, settings: &Settings) -> Result<BuildReport> {
    let report = build(project_dir, settings)?;
    report.print(&project_dir.join(&settings.paths.output));
    Ok(report)
}

fn execute(project_dir: &Path, mut settings: Settings, command: Command) -> Result<ExitCode> {
    let layout = ContentLayout::new(project_dir, &settings);

    match command {
        Command::Build { base_url, offline } => {
            if let Some(url) = base_url {
                tracing::info!("using base URL: {url}");
                settings.site.base_url = url;
            }
            if offline {
                settings.streaming.enabled = false;
            }
            let report = build_and_report(project_dir, &settings)?;
            Ok(exit_code(report.warnings.is_empty()))
        }
        Command::Health => {
            if !layout.music_dir.is_dir() {
                return Err(Error::MissingMusicDir(layout.music_dir));
            }
            let report = health::health_report(&layout)?;
            if report.is_clean() {
                println!("no issues found");
            }
            for issue in &report.issues {
                println!("{issue}");
            }
            println!(
                "{} tracks, {} collections, {} singles: {} errors, {} warnings, {} info",
                report.total_tracks,
                report.total_collections,
                report.total_singles,
                report.count(Severity::Error),
                report.count(Severity::Warning),
                report.count(Severity::Info),
            );
            Ok(exit_code(report.count(Severity::Error) == 0))
        }
        Command::NewTrack { title, slug, tags } => {
            let slug = content::create_track(&layout, &title, slug.as_deref(), &tags)?;
            println!("created track {slug}");
            Ok(ExitCode::SUCCESS)
        }
        Command::NewCollection {
            title,
            kind,
            slug,
            tags,
        } => {
            let kind = ReleaseKind::parse(&kind);
            if let ReleaseKind::Other(raw) = &kind {
                tracing::warn!("unknown collection type '{raw}', it will be listed with albums");
            }
            let slug = content::create_collection(&layout, &title, &kind, slug.as_deref(), &tags)?;
            println!("created {} {slug}", kind.as_str());
            Ok(ExitCode::SUCCESS)
        }
        Command::Reorder { slug, tracks } => {
            content::reorder_collection(&layout, &slug, &tracks)?;
            println!("reordered {slug}: {}", tracks.join(", "));
            Ok(ExitCode::SUCCESS)
        }
        Command::Lyrics { slug, file, text } => {
            let lyrics = match file {
                Some(path) => fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?,
                None => text.unwrap_or_default(),
            };
            content::save_lyrics(&layout, &slug, &lyrics)?;
            if lyrics.trim().is_empty() {
                println!("cleared lyrics for {slug}");
            } else {
                println!("saved lyrics for {slug}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Deploy { offline } => {
            deploy::check_destination(&settings.deploy)?;
            if offline {
                settings.streaming.enabled = false;
            }
            let report = build_and_report(project_dir, &settings)?;
            if !report.warnings.is_empty() {
                return Err(Error::Deploy(format!(
                    "build finished with {} warning(s); not deploying",
                    report.warnings.len()
                )));
            }
            let summary = deploy::deploy(project_dir, &settings.deploy)?;
            println!("deployed {} files", summary.files);
            Ok(ExitCode::SUCCESS)
        }
    }
}
