//! Optional TOML settings file for display and board overrides.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const SUPPORTED_SETTINGS_VERSION: u32 = 1;

/// Values read from a settings file. Every field is optional; absent fields
/// leave the built-in defaults untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: Option<bool>,
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) water_first: Option<u32>,
    pub(crate) water_last: Option<u32>,
}

/// Reads and validates the settings file at the provided path.
pub(crate) fn load(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file at {}", path.display()))?;
    parse(&contents)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    version: u32,
    #[serde(default)]
    display: DisplaySection,
    #[serde(default)]
    board: BoardSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    vsync: Option<bool>,
    show_fps: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardSection {
    columns: Option<u32>,
    rows: Option<u32>,
    water_first: Option<u32>,
    water_last: Option<u32>,
}

fn parse(contents: &str) -> Result<Settings> {
    let file: SettingsFile =
        toml::from_str(contents).context("failed to parse settings toml contents")?;
    if file.version != SUPPORTED_SETTINGS_VERSION {
        bail!(
            "unsupported settings version {}; expected {}",
            file.version,
            SUPPORTED_SETTINGS_VERSION
        );
    }

    Ok(Settings {
        vsync: file.display.vsync,
        show_fps: file.display.show_fps,
        columns: file.board.columns,
        rows: file.board.rows,
        water_first: file.board.water_first,
        water_last: file.board.water_last,
    })
}
