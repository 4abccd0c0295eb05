use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;

use colored::Colorize;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use spk_branding::{apply_branding, AssetOutcome, IconStage, PatchOutcome, StageReport};
use spk_descriptor::{default_excludes, PackConfig};

use crate::errors::CliError;
use crate::tools::{self, BuildTools};
use crate::utils;
use crate::workspace::Workspace;

/// File name of the prebuilt shell bundled next to the executable.
const SHELL_ARCHIVE: &str = "base.apk";

/// Bundled signing keystore and its passphrase.
const KEYSTORE_FILE: &str = "shellpack.keystore";
const KEYSTORE_PASSPHRASE: &str = "shellpack";

#[derive(Debug)]
pub struct PackAppArgs {
    pub source_dir: Option<String>,
    pub build_tools: Option<String>,
    pub out: String,
}

/// The packaging pipeline: decode the shell, embed the project tree, apply
/// branding, re-encode, align, and sign.
///
/// Hard-sequential; the first failing step aborts the run. The scratch
/// workspace is removed on every exit path.
pub fn pack_app(args: PackAppArgs) -> Result<()> {
    let build_tools = args.build_tools.ok_or(CliError::MissingBuildTools)?;
    let build_tools = BuildTools::new(build_tools);

    let project_dir = resolve_project_dir(args.source_dir.as_deref())?;
    let out_path = resolve_out_path(&args.out, &project_dir);
    let config = load_pack_config(&project_dir)?;
    let shell_archive = bundled_file(SHELL_ARCHIVE, |path| CliError::ShellArchiveMissing { path })?;
    let keystore = bundled_file(KEYSTORE_FILE, |path| CliError::KeystoreMissing { path })?;

    println!(
        "{} {}",
        "📦 Packing application:".bright_blue().bold(),
        project_dir.display().to_string().bright_cyan().bold()
    );

    let workspace = Workspace::create()
        .into_diagnostic()
        .wrap_err("Failed to create scratch workspace")?;

    if out_path.exists() {
        fs::remove_file(&out_path)
            .into_diagnostic()
            .wrap_err("Failed to remove stale output package")?;
    }

    println!("{}", "🔓 Decoding shell...".bright_magenta());
    tools::run(
        "apktool",
        Command::new("apktool")
            .arg("d")
            .arg(&shell_archive)
            .arg("-f")
            .arg("-o")
            .arg(workspace.base_dir())
            .current_dir(workspace.root()),
    )?;

    let embedded_root = workspace
        .clear_embedded_root()
        .into_diagnostic()
        .wrap_err("Failed to prepare the embedded runtime directory")?;

    let excludes = match &config {
        Some(config) => config.effective_excludes(),
        None => default_excludes(),
    };
    let stats = spk_branding::mirror(&project_dir, &embedded_root, &excludes)
        .map_err(CliError::from)
        .wrap_err("Failed to embed the project tree")?;
    println!(
        "{} {} {}",
        "🔄 Embedded".bright_magenta(),
        stats.copied.to_string().bright_white().bold(),
        "files".bright_magenta()
    );

    if let Some(config) = &config {
        if config.has_branding() {
            println!(
                "{}",
                "🎨 Injecting branding customizations...".bright_blue().bold()
            );
            let reports = apply_branding(config, &workspace.base_dir(), &project_dir)
                .map_err(CliError::from)?;
            print_stage_reports(config, &reports);
        }
    }

    println!("{}", "🔐 Encoding package...".bright_magenta());
    tools::run(
        "apktool",
        Command::new("apktool")
            .arg("b")
            .arg("base")
            .arg("-o")
            .arg(&out_path)
            .current_dir(workspace.root()),
    )?;

    println!("{}", "📐 Aligning package...".bright_magenta());
    let aligned_path = aligned_out_path(&out_path);
    tools::run(
        "zipalign",
        Command::new(build_tools.zipalign())
            .args(["-v", "-p", "4"])
            .arg(&out_path)
            .arg(&aligned_path)
            .current_dir(workspace.root()),
    )?;
    // The aligned copy fully supersedes the pre-alignment artifact
    fs::rename(&aligned_path, &out_path)
        .into_diagnostic()
        .wrap_err("Failed to replace the package with its aligned copy")?;

    println!("{}", "🔏 Signing package...".bright_magenta());
    tools::run(
        "apksigner",
        Command::new(build_tools.apksigner())
            .arg("sign")
            .arg("--ks-pass")
            .arg(format!("pass:{}", KEYSTORE_PASSPHRASE))
            .arg("--ks")
            .arg(&keystore)
            .arg("--out")
            .arg(&out_path)
            .arg(&out_path)
            .current_dir(workspace.root()),
    )?;

    drop(workspace);

    println!(
        "{}\n{} {}",
        "✅ Done! apk file is stored in:".bright_green().bold(),
        "📍 Path:".bright_green(),
        out_path.display().to_string().bright_white().bold()
    );

    Ok(())
}

fn print_stage_reports(config: &PackConfig, reports: &[StageReport]) {
    for report in reports {
        match report {
            StageReport::AppName(PatchOutcome::Patched) => {
                let app_name = config.app_name.as_deref().unwrap_or_default();
                println!(
                    "  {} App name: {}",
                    "✓".bright_green(),
                    app_name.bright_white().bold()
                );
            }
            StageReport::AppName(PatchOutcome::NoMatch) => {
                println!(
                    "  {} App name: no matching resource entry",
                    "-".bright_yellow()
                );
            }
            StageReport::Colors { missed: 0, .. } => {
                println!("  {} Colors updated", "✓".bright_green());
            }
            StageReport::Colors { patched, missed } => {
                println!(
                    "  {} Colors updated ({} of {} entries matched)",
                    "-".bright_yellow(),
                    patched,
                    patched + missed
                );
            }
            StageReport::AppIcon(IconStage::Derived(icon_reports)) => {
                let failed = icon_reports
                    .iter()
                    .filter(|report| report.result.is_err())
                    .count();
                if failed == 0 {
                    println!("  {} App icons generated", "✓".bright_green());
                } else {
                    println!(
                        "  {} App icons generated ({} of {} densities failed)",
                        "-".bright_yellow(),
                        failed,
                        icon_reports.len()
                    );
                }
            }
            StageReport::AppIcon(IconStage::Skipped) => {
                println!("  {} App icon not found, skipped", "-".bright_yellow());
            }
            StageReport::SplashLogo(AssetOutcome::Copied) => {
                println!("  {} Splash logo copied", "✓".bright_green());
            }
            StageReport::SplashLogo(AssetOutcome::Skipped) => {
                println!("  {} Splash logo not found, skipped", "-".bright_yellow());
            }
            StageReport::SplashInsets { missed: 0, .. } => {
                println!("  {} Splash screen layout updated", "✓".bright_green());
            }
            StageReport::SplashInsets { missed, .. } => {
                println!(
                    "  {} Splash screen layout updated ({} insets unmatched)",
                    "-".bright_yellow(),
                    missed
                );
            }
        }
    }
}

// Input resolution

fn resolve_project_dir(source_dir: Option<&str>) -> Result<PathBuf> {
    let dir = match source_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().into_diagnostic()?,
    };

    match dir.canonicalize() {
        Ok(dir) if dir.is_dir() => Ok(dir),
        _ => Err(CliError::source_dir_missing(dir).into()),
    }
}

fn resolve_out_path(out: &str, project_dir: &Path) -> PathBuf {
    let out = PathBuf::from(out);
    match out.is_absolute() {
        true => out,
        false => project_dir.join(out),
    }
}

fn aligned_out_path(out_path: &Path) -> PathBuf {
    let mut name = out_path.as_os_str().to_os_string();
    name.push(".aligned");
    PathBuf::from(name)
}

fn bundled_file(name: &str, missing: impl FnOnce(PathBuf) -> CliError) -> Result<PathBuf> {
    let install_dir = utils::install_dir()
        .ok_or_else(|| miette!("Could not determine the shellpack install directory"))?;
    let path = install_dir.join(name).into_std_path_buf();

    if !path.is_file() {
        return Err(missing(path).into());
    }

    Ok(path)
}

// Config utils

fn load_pack_config(project_dir: &Path) -> Result<Option<PackConfig>> {
    // JSON first, then TOML
    let config_extensions = ["json", "toml"];

    for ext in config_extensions {
        let config_path = project_dir.join(format!("shellpack.config.{}", ext));
        if config_path.exists() {
            return read_pack_config(&config_path).map(Some);
        }
    }

    Ok(None)
}

fn read_pack_config(config_path: &Path) -> Result<PackConfig> {
    let config_extension = config_path.extension().unwrap_or_default();

    match config_extension.to_str() {
        Some("json") => {
            let file = File::open(config_path).into_diagnostic().with_context(|| {
                format!("Failed to open config file: {}", config_path.display())
            })?;
            serde_json::from_reader(file)
                .into_diagnostic()
                .with_context(|| {
                    format!(
                        "Failed to parse JSON config file: {}",
                        config_path.display()
                    )
                })
        }
        Some("toml") => {
            let content = fs::read_to_string(config_path)
                .into_diagnostic()
                .with_context(|| {
                    format!("Failed to read config file: {}", config_path.display())
                })?;
            toml::from_str(&content).into_diagnostic().with_context(|| {
                format!(
                    "Failed to parse TOML config file: {}",
                    config_path.display()
                )
            })
        }
        _ => Err(miette!(
            "Invalid config file extension, expected shellpack.config.json or shellpack.config.toml"
        )),
    }
}
