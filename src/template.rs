use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::info;
use tempfile::Builder;
use thiserror::Error;
use crate::display::weekday_name;
use crate::models::DisplayFields;

pub const TEMP_F: &str = "{degF}";
pub const TEMP_C: &str = "{degC}";
pub const GLYPH: &str = "{weatherEmoji}";
pub const ELAPSED: &str = "{luxonTime}";
pub const WEEKDAY: &str = "{todayDay}";
pub const BUBBLE_WIDTH: &str = "{dayBubbleWidth}";

/// Substitutes the display fields into the template text
///
/// Only the first occurrence of each placeholder is replaced, placeholders are handled in a
/// fixed order and the rest of the text is left as is.
///
/// # Arguments
///
/// * 'template' - template text
/// * 'fields' - values to substitute
pub fn render(template: &str, fields: &DisplayFields) -> String {
    let substitutions = [
        (TEMP_F, fields.temp_f.to_string()),
        (TEMP_C, fields.temp_c.to_string()),
        (GLYPH, fields.glyph.to_string()),
        (ELAPSED, fields.elapsed.clone()),
        (WEEKDAY, weekday_name(fields.weekday).to_string()),
        (BUBBLE_WIDTH, fields.bubble_width.to_string()),
    ];

    substitutions
        .iter()
        .fold(template.to_string(), |text, (token, value)| text.replacen(*token, value, 1))
}

/// Reads the template, renders it and writes the result to the output path
///
/// The output is first written to a temporary file next to the output path and then moved in
/// place, so an existing output file is only replaced by a complete new one.
///
/// # Arguments
///
/// * 'template_path' - path to the template file
/// * 'output_path' - path of the file to create or replace
/// * 'fields' - values to substitute
pub fn render_file(template_path: &Path, output_path: &Path, fields: &DisplayFields) -> Result<(), TemplateError> {
    let template = fs::read_to_string(template_path)
        .map_err(|e| TemplateError::TemplateReadError(template_path.to_path_buf(), e))?;

    let svg = render(&template, fields);
    write_atomic(output_path, &svg)
        .map_err(|e| TemplateError::OutputWriteError(output_path.to_path_buf(), e))?;

    info!("badge written to {}", output_path.display());

    Ok(())
}

/// Writes text to a temporary file in the target directory and renames it over the target
///
/// An existing target keeps its permissions, a new one is created readable by everyone (0644
/// before umask) like a plain write would.
///
/// # Arguments
///
/// * 'path' - target path
/// * 'text' - content to write
fn write_atomic(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut file = builder.tempfile_in(dir)?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Error depicting errors that occur while rendering the badge
///
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("TemplateReadError: {0}: {1}")]
    TemplateReadError(PathBuf, #[source] std::io::Error),
    #[error("OutputWriteError: {0}: {1}")]
    OutputWriteError(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use tempfile::tempdir;
    use super::*;

    fn fields() -> DisplayFields {
        DisplayFields {
            temp_f: 89,
            temp_c: 32,
            glyph: "☁️",
            weekday: Weekday::Wed,
            elapsed: "almost 4 years".into(),
            bubble_width: 260,
        }
    }

    const TEMPLATE: &str = r#"<svg width="{dayBubbleWidth}"><text>{degF}°F / {degC}°C {weatherEmoji}</text><text>{todayDay}</text><text>{luxonTime}</text></svg>"#;

    #[test]
    fn test_render_all_placeholders() {
        let svg = render(TEMPLATE, &fields());

        assert_eq!(
            svg,
            r#"<svg width="260"><text>89°F / 32°C ☁️</text><text>Wednesday</text><text>almost 4 years</text></svg>"#
        );
        for token in [TEMP_F, TEMP_C, GLYPH, ELAPSED, WEEKDAY, BUBBLE_WIDTH] {
            assert!(!svg.contains(token), "{} left in output", token);
        }
    }

    #[test]
    fn test_render_first_occurrence_only() {
        let svg = render("{degF} {degF} {todayDay}", &fields());
        assert_eq!(svg, "89 {degF} Wednesday");
    }

    #[test]
    fn test_render_without_placeholders() {
        let text = "<svg><circle r=\"4\"/></svg>";
        assert_eq!(render(text, &fields()), text);
    }

    #[test]
    fn test_render_negative_temperatures() {
        let mut f = fields();
        f.temp_f = -40;
        f.temp_c = -40;
        assert_eq!(render("{degF}/{degC}", &f), "-40/-40");
    }

    #[test]
    fn test_render_file() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("template.svg");
        let output = dir.path().join("chat.svg");
        fs::write(&template, TEMPLATE).unwrap();
        fs::write(&output, "old badge").unwrap();

        render_file(&template, &output, &fields()).unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("89°F / 32°C ☁️"));
        assert!(svg.contains("Wednesday"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_render_file_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let template = dir.path().join("template.svg");
        let output = dir.path().join("chat.svg");
        fs::write(&template, TEMPLATE).unwrap();

        for mode in [0o644, 0o664, 0o640] {
            fs::write(&output, "old badge").unwrap();
            fs::set_permissions(&output, fs::Permissions::from_mode(mode)).unwrap();

            render_file(&template, &output, &fields()).unwrap();

            let after = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_mode_is_at_most_0644() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let template = dir.path().join("template.svg");
        let output = dir.path().join("chat.svg");
        fs::write(&template, TEMPLATE).unwrap();

        render_file(&template, &output, &fields()).unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & !0o644, 0);
    }

    #[test]
    fn test_missing_template_leaves_output_alone() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("missing.svg");
        let output = dir.path().join("chat.svg");
        fs::write(&output, "old badge").unwrap();

        let result = render_file(&template, &output, &fields());

        assert!(matches!(result, Err(TemplateError::TemplateReadError(_, _))));
        assert_eq!(fs::read_to_string(&output).unwrap(), "old badge");
    }

    #[test]
    fn test_missing_template_creates_no_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("chat.svg");

        let result = render_file(&dir.path().join("missing.svg"), &output, &fields());

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("template.svg");
        fs::write(&template, TEMPLATE).unwrap();
        let output = dir.path().join("no_such_dir").join("chat.svg");

        let result = render_file(&template, &output, &fields());

        assert!(matches!(result, Err(TemplateError::OutputWriteError(_, _))));
    }
}
