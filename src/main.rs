//! Folio FX command line
//!
//! The effects themselves run in the browser (`trunk serve`); natively this
//! binary lists content and runs effects headless for inspection.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::process::ExitCode;

    use glam::Vec2;
    use thiserror::Error;

    use folio_fx::content::{self, ContentError};
    use folio_fx::platform::{RecordingSurface, run_frames};
    use folio_fx::settings::{ConfigError, Settings};
    use folio_fx::sim::{BouncingBall, GravityBoxes, PulsingCircle, Starfield};

    const USAGE: &str = "usage:
  folio-fx list <dir>               list content records as JSON
  folio-fx tags <dir>               group content slugs by tag
  folio-fx show <dir> <slug>        print one entry with its body
  folio-fx simulate <effect> <n>    run ball|boxes|pulse|stars for n frames
  folio-fx settings                 print the effective settings

Set FOLIO_FX_SETTINGS to a JSON file to override effect settings.";

    /// Headless canvas size
    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);
    const SEED: u64 = 0x5eed;

    #[derive(Debug, Error)]
    enum CliError {
        #[error("{0}")]
        Usage(String),
        #[error(transparent)]
        Content(#[from] ContentError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error("failed to read settings file {path}: {source}")]
        SettingsFile {
            path: String,
            source: std::io::Error,
        },
        #[error(transparent)]
        Json(#[from] serde_json::Error),
    }

    fn usage(msg: &str) -> CliError {
        CliError::Usage(format!("{msg}\n\n{USAGE}"))
    }

    fn load_settings() -> Result<Settings, CliError> {
        match std::env::var("FOLIO_FX_SETTINGS") {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| CliError::SettingsFile { path, source })?;
                Ok(Settings::from_json(&json)?)
            }
            Err(_) => Ok(Settings::default()),
        }
    }

    fn simulate(effect: &str, frames: u32) -> Result<String, CliError> {
        let settings = load_settings()?;
        let scale = settings.motion_scale();
        let mut surface = RecordingSurface::new(CANVAS.x, CANVAS.y);

        let json = match effect {
            "ball" => {
                let mut fx = BouncingBall::from_settings(&settings.ball, CANVAS, scale);
                run_frames(&mut fx, &mut surface, frames);
                serde_json::to_string_pretty(&fx)?
            }
            "boxes" => {
                let mut fx = GravityBoxes::with_initial_boxes(settings.boxes, CANVAS, SEED);
                run_frames(&mut fx, &mut surface, frames);
                serde_json::to_string_pretty(&fx)?
            }
            "pulse" => {
                let mut fx = PulsingCircle::new(&settings.pulse, scale);
                run_frames(&mut fx, &mut surface, frames);
                serde_json::to_string_pretty(&fx)?
            }
            "stars" => {
                let count = settings.effective_star_count();
                let mut fx = Starfield::new(&settings.starfield, count, scale, SEED);
                run_frames(&mut fx, &mut surface, frames);
                serde_json::to_string_pretty(&fx)?
            }
            other => return Err(usage(&format!("unknown effect {other:?}"))),
        };
        log::info!("Simulated {} frames of {}", frames, effect);
        Ok(json)
    }

    fn execute(args: &[String]) -> Result<String, CliError> {
        let arg = |i: usize, name: &str| {
            args.get(i)
                .map(String::as_str)
                .ok_or_else(|| usage(&format!("missing <{name}>")))
        };

        match args.first().map(String::as_str) {
            Some("list") => {
                let records = content::list_records(arg(1, "dir")?)?;
                Ok(serde_json::to_string_pretty(&records)?)
            }
            Some("tags") => {
                let records = content::list_records(arg(1, "dir")?)?;
                Ok(serde_json::to_string_pretty(&content::tag_index(&records))?)
            }
            Some("show") => {
                let entry = content::load_entry(arg(1, "dir")?, arg(2, "slug")?)?;
                Ok(serde_json::to_string_pretty(&entry)?)
            }
            Some("simulate") => {
                let effect = arg(1, "effect")?;
                let frames = arg(2, "n")?
                    .parse::<u32>()
                    .map_err(|_| usage("<n> must be a frame count"))?;
                simulate(effect, frames)
            }
            Some("settings") => Ok(load_settings()?.to_json()?),
            Some(other) => Err(usage(&format!("unknown command {other:?}"))),
            None => Err(usage("missing command")),
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args: Vec<String> = std::env::args().skip(1).collect();
        match execute(&args) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::debug!("Command failed: {:?}", e);
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_simulate_effects() {
            for effect in ["ball", "boxes", "pulse", "stars"] {
                let out = execute(&args(&["simulate", effect, "5"])).expect("simulation runs");
                assert!(out.starts_with('{'));
            }
        }

        #[test]
        fn test_settings_command_prints_defaults() {
            let out = execute(&args(&["settings"])).expect("settings print");
            let settings = Settings::from_json(&out).expect("printed settings parse back");
            assert_eq!(settings.boxes.max_boxes, Settings::default().boxes.max_boxes);
        }

        #[test]
        fn test_usage_errors() {
            assert!(matches!(execute(&[]), Err(CliError::Usage(_))));
            assert!(matches!(execute(&args(&["list"])), Err(CliError::Usage(_))));
            assert!(matches!(
                execute(&args(&["simulate", "ball", "many"])),
                Err(CliError::Usage(_))
            ));
            assert!(matches!(
                execute(&args(&["simulate", "comet", "1"])),
                Err(CliError::Usage(_))
            ));
        }

        #[test]
        fn test_missing_dir_reports_content_error() {
            assert!(matches!(
                execute(&args(&["list", "/no/such/folio/dir"])),
                Err(CliError::Content(ContentError::ReadDir { .. }))
            ));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
