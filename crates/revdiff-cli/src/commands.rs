use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use revdiff_compare::{
    ComparisonTable, DiffSettings, EntityComparison, Layout, Revision, TableSection,
};
use revdiff_format::{unified, LineCounter};

use crate::cli::*;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Command::Text(args) => cmd_text(args)?,
        Command::Revisions(args) => cmd_revisions(args)?,
    };
    print!("{}", output.render(&cli.format)?);
    Ok(())
}

/// A finished comparison and the layout it is shown in.
pub struct Output {
    pub table: ComparisonTable,
    pub layout: Layout,
}

impl Output {
    pub fn render(&self, format: &OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => {
                let json = match self.layout {
                    Layout::Split => to_json(&self.table.sections)?,
                    Layout::Unified => to_json(&self.table.unified())?,
                };
                Ok(json + "\n")
            }
            OutputFormat::Text if self.table.is_empty() => {
                Ok(format!("{}\n", "No visible changes".dimmed()))
            }
            OutputFormat::Text => {
                let mut out = String::new();
                for section in &self.table.sections {
                    out.push_str(&format!("{}\n", section.label.bold()));
                    let lines = match self.layout {
                        Layout::Split => render::split(&section.rows),
                        Layout::Unified => render::unified(&unified(&section.rows)),
                    };
                    for line in lines {
                        out.push_str(&line);
                        out.push('\n');
                    }
                }
                Ok(out)
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize comparison")
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<DiffSettings> {
    match path {
        Some(path) => Ok(DiffSettings::load(path)?),
        None => Ok(DiffSettings::default()),
    }
}

pub fn cmd_text(args: TextArgs) -> anyhow::Result<Output> {
    let mut settings = load_settings(args.config.as_deref())?;
    if args.leading.is_some() {
        settings.general.leading_context = args.leading;
    }
    if args.trailing.is_some() {
        settings.general.trailing_context = args.trailing;
    }
    if args.word_level {
        settings.general.word_level = true;
    }
    if let Some(layout) = args.layout {
        settings.general.layout = layout.into();
    }
    if let Some(algorithm) = args.algorithm {
        settings.general.algorithm = algorithm;
    }

    let old = read_text(&args.old)?;
    let new = read_text(&args.new)?;
    let layout = settings.general.layout;
    let comparison = EntityComparison::new(settings);
    let rows = comparison.get_rows(&old, &new, args.header, &mut LineCounter::new());
    tracing::debug!(rows = rows.len(), "compared text files");

    let mut table = ComparisonTable::default();
    if !rows.is_empty() {
        table.sections.push(TableSection {
            name: "text".into(),
            label: format!("{} → {}", args.old.display(), args.new.display()),
            rows,
        });
    }
    Ok(Output { table, layout })
}

pub fn cmd_revisions(args: RevisionsArgs) -> anyhow::Result<Output> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(layout) = args.layout {
        settings.general.layout = layout.into();
    }

    let old = Revision::load(&args.old)?;
    let new = Revision::load(&args.new)?;
    let layout = settings.general.layout;
    let table = EntityComparison::new(settings).build_table(&old, &new);
    Ok(Output { table, layout })
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let text = text.replace("\r\n", "\n");
    // A single trailing newline ends the last line rather than adding an empty one.
    Ok(match text.strip_suffix('\n') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn text_args(old: PathBuf, new: PathBuf) -> TextArgs {
        TextArgs {
            old,
            new,
            config: None,
            leading: None,
            trailing: None,
            header: false,
            word_level: false,
            layout: None,
            algorithm: None,
        }
    }

    #[test]
    fn text_command_reports_changed_lines() {
        colored::control::set_override(false);
        let old = write_temp("a\nb\nc\n");
        let new = write_temp("a\nx\nc\n");

        let output = cmd_text(text_args(old.path().into(), new.path().into())).unwrap();
        assert_eq!(output.table.sections.len(), 1);
        assert_eq!(output.table.sections[0].rows.len(), 3);

        let text = output.render(&OutputFormat::Text).unwrap();
        assert!(text.contains("- b"));
        assert!(text.contains("+ x"));
    }

    #[test]
    fn identical_files_have_no_visible_changes() {
        colored::control::set_override(false);
        let old = write_temp("same\n");
        let new = write_temp("same\n");

        let output = cmd_text(text_args(old.path().into(), new.path().into())).unwrap();
        assert!(output.table.is_empty());
        assert!(output
            .render(&OutputFormat::Text)
            .unwrap()
            .contains("No visible changes"));
    }

    #[test]
    fn crlf_and_lf_files_compare_equal() {
        let old = write_temp("first\r\nsecond\r\n");
        let new = write_temp("first\nsecond\n");

        let output = cmd_text(text_args(old.path().into(), new.path().into())).unwrap();
        assert!(output.table.is_empty());
        assert_eq!(read_text(old.path()).unwrap(), "first\nsecond");
    }

    #[test]
    fn flags_override_settings_file() {
        let config = write_temp("[general]\nleading_context = 5\ntrailing_context = 5\n");
        let old = write_temp("1\n2\n3\n4\n5\n");
        let new = write_temp("1\n2\nX\n4\n5\n");

        let mut args = text_args(old.path().into(), new.path().into());
        args.config = Some(config.path().into());
        args.leading = Some(0);
        args.trailing = Some(0);
        let output = cmd_text(args).unwrap();
        assert_eq!(output.table.sections[0].rows.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = text_args("/nonexistent/old".into(), "/nonexistent/new".into());
        let err = cmd_text(args).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/old"));
    }

    #[test]
    fn revisions_command_renders_json() {
        let old = write_temp(
            r#"{"fields": {"title": {"label": "Title", "items": [{"type": "plain", "value": "Hello"}]}}}"#,
        );
        let new = write_temp(
            r#"{"fields": {"title": {"label": "Title", "items": [{"type": "plain", "value": "Goodbye"}]}}}"#,
        );

        let output = cmd_revisions(RevisionsArgs {
            old: old.path().into(),
            new: new.path().into(),
            config: None,
            layout: Some(LayoutArg::Unified),
        })
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&output.render(&OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json[0]["label"], "Title");
        assert_eq!(json[0]["rows"][0]["marker"], "deleted");
        assert_eq!(json[0]["rows"][1]["text"], "Goodbye");
    }
}
