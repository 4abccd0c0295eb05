//! Re-branding pipeline for a decoded application shell.
//!
//! This crate provides the transformations `shellpack` applies to a decoded
//! shell tree before it is repackaged:
//!
//! - **Resource patching**: targeted value substitution in `strings.xml`,
//!   `colors.xml` and `splash_screen.xml`
//! - **Icon derivation**: density-specific launcher icons from one source image
//! - **Tree mirroring**: embedding the project tree under an exclusion filter
//! - **Branding orchestration**: applying the optional customization
//!   descriptor, stage by stage
//!
//! All operations report structured outcomes instead of printing; the CLI
//! decides how to render them.
//!
//! # Example
//!
//! ```no_run
//! use spk_branding::apply_branding;
//! use spk_descriptor::PackConfig;
//! use std::path::Path;
//!
//! # fn main() -> spk_branding::Result<()> {
//! let config = PackConfig {
//!     app_name: Some("Acme Notes".to_string()),
//!     ..Default::default()
//! };
//!
//! let reports = apply_branding(&config, Path::new("/tmp/ws/base"), Path::new("."))?;
//! println!("Applied {} branding stages", reports.len());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use spk_descriptor::PackConfig;

pub mod error;
pub mod icons;
pub mod patcher;
pub mod sync;

pub use error::{Error, Result};
pub use icons::{derive_icons, IconReport, DENSITIES};
pub use patcher::{PatchOutcome, ResourceFile};
pub use sync::{mirror, SyncStats};

/// Outcome of one branding stage.
///
/// Only stages whose descriptor field was present appear in the report list;
/// a descriptor with no branding fields produces an empty list and zero
/// filesystem writes.
#[derive(Debug)]
pub enum StageReport {
    /// `strings.xml` app name substitution.
    AppName(PatchOutcome),
    /// Combined `colors.xml` cycle: splash background plus palette overrides.
    Colors { patched: usize, missed: usize },
    /// Launcher icon derivation.
    AppIcon(IconStage),
    /// Splash logo copy into the drawable directory.
    SplashLogo(AssetOutcome),
    /// `splash_screen.xml` inset attribute substitutions.
    SplashInsets { patched: usize, missed: usize },
}

/// Icon stage detail: derivation ran, or the referenced file was absent.
#[derive(Debug)]
pub enum IconStage {
    Derived(Vec<IconReport>),
    Skipped,
}

/// Outcome of an optional asset copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOutcome {
    Copied,
    Skipped,
}

/// Apply every branding stage whose descriptor field is present.
///
/// `base_dir` is the decoded shell root (containing `res/`); `project_dir`
/// anchors the descriptor's relative asset paths. Stages are independent and
/// touch disjoint files; each resource file is read and written at most once.
/// Missing optional assets and unmatched patch targets are reported, never
/// raised as errors.
pub fn apply_branding(
    config: &PackConfig,
    base_dir: &Path,
    project_dir: &Path,
) -> Result<Vec<StageReport>> {
    let res_dir = base_dir.join("res");
    let mut reports = Vec::new();

    if let Some(app_name) = &config.app_name {
        let mut strings = ResourceFile::open(res_dir.join("values").join("strings.xml"))?;
        let outcome = strings.patch_element("string", "app_name", app_name);
        strings.save()?;
        reports.push(StageReport::AppName(outcome));
    }

    if config.splash_background.is_some() || config.colors.is_some() {
        let mut colors = ResourceFile::open(res_dir.join("values").join("colors.xml"))?;
        let mut patched = 0;
        let mut missed = 0;
        {
            let mut record = |outcome: PatchOutcome| match outcome {
                PatchOutcome::Patched => patched += 1,
                PatchOutcome::NoMatch => missed += 1,
            };

            if let Some(background) = &config.splash_background {
                record(colors.patch_element("color", "splash_background", background));
            }
            if let Some(overrides) = &config.colors {
                if let Some(primary) = &overrides.primary {
                    record(colors.patch_element("color", "colorPrimary", primary));
                }
                if let Some(primary_dark) = &overrides.primary_dark {
                    record(colors.patch_element("color", "colorPrimaryDark", primary_dark));
                }
                if let Some(accent) = &overrides.accent {
                    record(colors.patch_element("color", "colorAccent", accent));
                }
            }
        }
        colors.save()?;
        reports.push(StageReport::Colors { patched, missed });
    }

    if let Some(app_icon) = &config.app_icon {
        let source = project_dir.join(app_icon);
        if source.is_file() {
            let icon_reports = derive_icons(&source, &res_dir)?;
            reports.push(StageReport::AppIcon(IconStage::Derived(icon_reports)));
        } else {
            tracing::debug!("App icon {} not found, skipping", source.display());
            reports.push(StageReport::AppIcon(IconStage::Skipped));
        }
    }

    if let Some(splash_logo) = &config.splash_logo {
        let source = project_dir.join(splash_logo);
        if source.is_file() {
            fs::copy(&source, res_dir.join("drawable").join("splash_logo.png"))?;
            reports.push(StageReport::SplashLogo(AssetOutcome::Copied));
        } else {
            tracing::debug!("Splash logo {} not found, skipping", source.display());
            reports.push(StageReport::SplashLogo(AssetOutcome::Skipped));
        }
    }

    if let Some(insets) = &config.splash_insets {
        let mut splash = ResourceFile::open(res_dir.join("drawable").join("splash_screen.xml"))?;
        let mut patched = 0;
        let mut missed = 0;
        {
            let mut record = |outcome: PatchOutcome| match outcome {
                PatchOutcome::Patched => patched += 1,
                PatchOutcome::NoMatch => missed += 1,
            };

            if let Some(top) = &insets.top {
                record(splash.patch_attribute("android:top", top));
            }
            if let Some(bottom) = &insets.bottom {
                record(splash.patch_attribute("android:bottom", bottom));
            }
            if let Some(left) = &insets.left {
                record(splash.patch_attribute("android:left", left));
            }
            if let Some(right) = &insets.right {
                record(splash.patch_attribute("android:right", right));
            }
        }
        splash.save()?;
        reports.push(StageReport::SplashInsets { patched, missed });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spk_descriptor::{ColorOverrides, SplashInsets};
    use std::path::PathBuf;

    const STRINGS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Node on Android</string>
</resources>
"#;

    const COLORS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <color name="colorPrimary">#3F51B5</color>
    <color name="colorPrimaryDark">#303F9F</color>
    <color name="colorAccent">#FF4081</color>
    <color name="splash_background">#FFFFFF</color>
</resources>
"#;

    const SPLASH_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<layer-list xmlns:android="http://schemas.android.com/apk/res/android">
    <item android:top="32dp" android:bottom="32dp" android:left="16dp" android:right="16dp">
        <bitmap android:src="@drawable/splash_logo" android:gravity="center" />
    </item>
</layer-list>
"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        base_dir: PathBuf,
        project_dir: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let base_dir = dir.path().join("base");
        let project_dir = dir.path().join("project");

        let values = base_dir.join("res").join("values");
        let drawable = base_dir.join("res").join("drawable");
        fs::create_dir_all(&values).unwrap();
        fs::create_dir_all(&drawable).unwrap();
        fs::create_dir_all(&project_dir).unwrap();

        fs::write(values.join("strings.xml"), STRINGS_XML).unwrap();
        fs::write(values.join("colors.xml"), COLORS_XML).unwrap();
        fs::write(drawable.join("splash_screen.xml"), SPLASH_XML).unwrap();

        Fixture {
            _dir: dir,
            base_dir,
            project_dir,
        }
    }

    fn read(fixture: &Fixture, relative: &str) -> String {
        fs::read_to_string(fixture.base_dir.join("res").join(relative)).unwrap()
    }

    #[test]
    fn empty_descriptor_applies_no_stages() {
        let fixture = fixture();
        let config = PackConfig::default();

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert!(reports.is_empty());
        assert_eq!(read(&fixture, "values/strings.xml"), STRINGS_XML);
        assert_eq!(read(&fixture, "values/colors.xml"), COLORS_XML);
        assert_eq!(read(&fixture, "drawable/splash_screen.xml"), SPLASH_XML);
    }

    #[test]
    fn app_name_stage_touches_only_strings_xml() {
        let fixture = fixture();
        let config = PackConfig {
            app_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert_eq!(reports.len(), 1);
        assert!(matches!(
            reports[0],
            StageReport::AppName(PatchOutcome::Patched)
        ));
        assert_eq!(
            read(&fixture, "values/strings.xml"),
            STRINGS_XML.replace(">Node on Android<", ">Acme<")
        );
        // All other resource files stay byte-identical
        assert_eq!(read(&fixture, "values/colors.xml"), COLORS_XML);
        assert_eq!(read(&fixture, "drawable/splash_screen.xml"), SPLASH_XML);
    }

    #[test]
    fn colors_stage_combines_background_and_palette() {
        let fixture = fixture();
        let config = PackConfig {
            splash_background: Some("#101010".to_string()),
            colors: Some(ColorOverrides {
                primary: Some("#202020".to_string()),
                primary_dark: None,
                accent: None,
            }),
            ..Default::default()
        };

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert_eq!(reports.len(), 1);
        assert!(matches!(
            reports[0],
            StageReport::Colors {
                patched: 2,
                missed: 0
            }
        ));

        let colors = read(&fixture, "values/colors.xml");
        assert!(colors.contains(r#"<color name="splash_background">#101010</color>"#));
        assert!(colors.contains(r#"<color name="colorPrimary">#202020</color>"#));
        // Untouched palette entries keep their original values
        assert!(colors.contains(r#"<color name="colorPrimaryDark">#303F9F</color>"#));
        assert!(colors.contains(r#"<color name="colorAccent">#FF4081</color>"#));
    }

    #[test]
    fn splash_insets_stage_patches_present_fields_only() {
        let fixture = fixture();
        let config = PackConfig {
            splash_insets: Some(SplashInsets {
                top: Some("64dp".to_string()),
                bottom: None,
                left: None,
                right: None,
            }),
            ..Default::default()
        };

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert!(matches!(
            reports[0],
            StageReport::SplashInsets {
                patched: 1,
                missed: 0
            }
        ));
        let splash = read(&fixture, "drawable/splash_screen.xml");
        assert!(splash.contains(r#"android:top="64dp""#));
        assert!(splash.contains(r#"android:bottom="32dp""#));
    }

    #[test]
    fn missing_icon_and_logo_are_skipped_silently() {
        let fixture = fixture();
        let config = PackConfig {
            app_icon: Some("missing/icon.png".to_string()),
            splash_logo: Some("missing/logo.png".to_string()),
            ..Default::default()
        };

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(matches!(reports[0], StageReport::AppIcon(IconStage::Skipped)));
        assert!(matches!(
            reports[1],
            StageReport::SplashLogo(AssetOutcome::Skipped)
        ));
    }

    #[test]
    fn icon_and_logo_stages_write_into_the_res_tree() {
        let fixture = fixture();
        let icon = image::RgbaImage::from_pixel(64, 64, image::Rgba([10, 20, 30, 255]));
        icon.save(fixture.project_dir.join("icon.png")).unwrap();
        fs::write(fixture.project_dir.join("logo.png"), b"logo bytes").unwrap();

        let config = PackConfig {
            app_icon: Some("icon.png".to_string()),
            splash_logo: Some("logo.png".to_string()),
            ..Default::default()
        };

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert_eq!(reports.len(), 2);
        match &reports[0] {
            StageReport::AppIcon(IconStage::Derived(icon_reports)) => {
                assert_eq!(icon_reports.len(), DENSITIES.len());
                assert!(icon_reports.iter().all(|report| report.result.is_ok()));
            }
            other => panic!("expected derived icon stage, got {:?}", other),
        }
        assert!(matches!(
            reports[1],
            StageReport::SplashLogo(AssetOutcome::Copied)
        ));

        for (density, _) in DENSITIES {
            assert!(fixture
                .base_dir
                .join("res")
                .join(format!("mipmap-{}", density))
                .join("ic_launcher.png")
                .is_file());
        }
        assert_eq!(
            fs::read(fixture.base_dir.join("res").join("drawable").join("splash_logo.png")).unwrap(),
            b"logo bytes"
        );
    }

    #[test]
    fn unmatched_targets_are_reported_not_raised() {
        let fixture = fixture();
        // Strip the splash_background element so one of two patches misses
        let values = fixture.base_dir.join("res").join("values");
        let colors = fs::read_to_string(values.join("colors.xml"))
            .unwrap()
            .lines()
            .filter(|line| !line.contains("splash_background"))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(values.join("colors.xml"), colors).unwrap();

        let config = PackConfig {
            splash_background: Some("#101010".to_string()),
            colors: Some(ColorOverrides {
                primary: Some("#202020".to_string()),
                primary_dark: None,
                accent: None,
            }),
            ..Default::default()
        };

        let reports = apply_branding(&config, &fixture.base_dir, &fixture.project_dir).unwrap();

        assert!(matches!(
            reports[0],
            StageReport::Colors {
                patched: 1,
                missed: 1
            }
        ));
    }
}
