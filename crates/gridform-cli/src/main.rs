//! gridform CLI - templates, upload checks and conversion

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridform::codec::{read_csv, write_csv};
use gridform::prelude::*;
use gridform_csv::{CsvReadOptions, CsvWriteOptions};

#[derive(Parser)]
#[command(name = "gridform")]
#[command(author, version, about = "Spreadsheet template, check and conversion tool")]
struct Cli {
    /// CSV field delimiter (default: comma)
    #[arg(short, long, global = true, default_value = ",")]
    delimiter: char,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sheets, used ranges and merges of a document
    Info {
        /// Input document (csv, json)
        input: PathBuf,
    },

    /// Write an empty upload template
    Template {
        /// Output document (csv, json)
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Check an uploaded document against a column layout
    Check {
        /// Uploaded document (csv, json)
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print accepted rows as tab separated values
        #[arg(short, long)]
        print: bool,
    },

    /// Convert between document formats
    Convert {
        /// Input document (csv, json)
        input: PathBuf,

        /// Output document (csv, json)
        output: PathBuf,

        /// Sheet written to CSV output (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Sheet name
    #[arg(short, long, default_value = "Sheet1")]
    sheet: String,

    /// Comma separated column titles; `#` stacks header rows
    #[arg(short, long, value_delimiter = ',', required = true)]
    columns: Vec<String>,

    /// Titles of columns that must not be empty
    #[arg(long, value_delimiter = ',')]
    required: Vec<String>,

    /// Titles of columns forming the duplicate-detection key
    #[arg(long, value_delimiter = ',')]
    unique: Vec<String>,
}

/// One uploaded row, a text value per column
type Row = Vec<Option<String>>;

/// CSV settings shared by every command
struct CsvSettings {
    delimiter: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let Ok(delimiter) = u8::try_from(cli.delimiter) else {
        bail!("delimiter '{}' is not a single-byte character", cli.delimiter);
    };
    let csv = CsvSettings { delimiter };

    match cli.command {
        Commands::Info { input } => show_info(&input, &csv),
        Commands::Template { output, layout } => write_template(&output, &layout, &csv),
        Commands::Check {
            input,
            layout,
            print,
        } => check_upload(&input, &layout, print, &csv),
        Commands::Convert {
            input,
            output,
            sheet,
        } => convert(&input, &output, sheet.as_deref(), &csv),
    }
}

impl LayoutArgs {
    fn descriptor(&self) -> Result<SheetDescriptor<Row>> {
        for title in self.required.iter().chain(&self.unique) {
            if !self.columns.contains(title) {
                bail!("'{title}' is not one of the listed columns");
            }
        }

        let mut sheet = SheetDescriptor::new(self.sheet.as_str())
            .column_title_style(StyleDescriptor::new().bold(true));
        for (index, title) in self.columns.iter().enumerate() {
            let column = Column::new(title.as_str())
                .getter(move |row: &Row| row.get(index).cloned().flatten())
                .setter(move |row: &mut Row, value: Option<String>| {
                    if row.len() <= index {
                        row.resize(index + 1, None);
                    }
                    row[index] = value;
                })
                .required(self.required.contains(title))
                .unique_key(self.unique.contains(title));
            sheet.push_column(column);
        }
        Ok(sheet)
    }
}

impl CsvSettings {
    fn read(&self, sheet_name: &str) -> CsvReadOptions {
        CsvReadOptions::default()
            .with_delimiter(self.delimiter)
            .with_sheet_name(sheet_name)
    }

    fn write(&self) -> CsvWriteOptions {
        CsvWriteOptions::default().with_delimiter(self.delimiter)
    }
}

/// Load a document. CSV carries no sheet name, so it takes `sheet_name`.
fn open(input: &Path, sheet_name: &str, csv: &CsvSettings) -> Result<Workbook> {
    let format = DocumentFormat::from_path(input)?;
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))?;
    let workbook = match format {
        DocumentFormat::Csv => read_csv(&bytes, &csv.read(sheet_name)),
        DocumentFormat::Json => format.decode(&bytes),
    };
    workbook.with_context(|| format!("Failed to open '{}'", input.display()))
}

fn save(workbook: &Workbook, output: &Path, sheet: Option<&str>, csv: &CsvSettings) -> Result<()> {
    let format = DocumentFormat::from_path(output)?;
    let bytes = match format {
        DocumentFormat::Csv => {
            let first = workbook.worksheet(0).map(|s| s.name());
            match sheet.or(first) {
                Some(name) => write_csv(workbook, name, &csv.write())?,
                None => Vec::new(),
            }
        }
        DocumentFormat::Json => format.encode(workbook)?,
    };
    std::fs::write(output, bytes)
        .with_context(|| format!("Failed to write '{}'", output.display()))
}

fn show_info(input: &Path, csv: &CsvSettings) -> Result<()> {
    let workbook = open(input, "Sheet1", csv)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());
    println!("Styles: {}", workbook.styles().len());

    for line in sheet_summary(&workbook) {
        println!("{line}");
    }

    Ok(())
}

/// Per-sheet lines printed by `info`
fn sheet_summary(workbook: &Workbook) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, sheet) in workbook.worksheets().enumerate() {
        lines.push(String::new());
        lines.push(format!("  Sheet {}: \"{}\"", i, sheet.name()));
        match sheet.used_range() {
            Some(range) => lines.push(format!("    Used range: {range}")),
            None => lines.push("    Used range: empty".to_string()),
        }
        let merges: Vec<String> = sheet.merged_regions().iter().map(|r| r.to_string()).collect();
        if !merges.is_empty() {
            lines.push(format!("    Merged: {}", merges.join(", ")));
        }
    }
    lines
}

fn write_template(output: &Path, layout: &LayoutArgs, csv: &CsvSettings) -> Result<()> {
    let sheet = layout.descriptor()?;
    let mut builder = WorkbookBuilder::new();
    builder
        .add_sheet(&sheet)
        .with_context(|| format!("Failed to lay out sheet '{}'", layout.sheet))?;
    save(&builder.finish(), output, Some(&layout.sheet), csv)?;
    eprintln!("Wrote template '{}' to '{}'", layout.sheet, output.display());
    Ok(())
}

fn check_upload(input: &Path, layout: &LayoutArgs, print: bool, csv: &CsvSettings) -> Result<()> {
    let workbook = open(input, &layout.sheet, csv)?;
    let sheet = layout.descriptor()?;

    let rows = match read_sheet(&workbook, &sheet) {
        Ok(rows) => rows,
        Err(Error::RowValidation(errors)) => {
            eprintln!("{errors}");
            bail!("{} rows rejected in '{}'", errors.len(), input.display());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to check '{}'", input.display())),
    };

    if print {
        let mut stdout = io::stdout().lock();
        for row in &rows {
            let line: Vec<&str> = (0..layout.columns.len())
                .map(|i| row.get(i).and_then(Option::as_deref).unwrap_or(""))
                .collect();
            writeln!(stdout, "{}", line.join("\t")).context("Failed to write to stdout")?;
        }
    }
    eprintln!("{} rows accepted", rows.len());
    Ok(())
}

fn convert(input: &Path, output: &Path, sheet: Option<&str>, csv: &CsvSettings) -> Result<()> {
    let workbook = open(input, sheet.unwrap_or("Sheet1"), csv)?;
    save(&workbook, output, sheet, csv)?;
    eprintln!("Converted '{}' to '{}'", input.display(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(columns: &[&str], required: &[&str], unique: &[&str]) -> LayoutArgs {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        LayoutArgs {
            sheet: "Upload".into(),
            columns: owned(columns),
            required: owned(required),
            unique: owned(unique),
        }
    }

    #[test]
    fn test_cli_parses_layout_flags() {
        let cli = Cli::try_parse_from([
            "gridform",
            "check",
            "in.csv",
            "--columns",
            "Name#First,Name#Last,Email",
            "--unique",
            "Email",
            "-d",
            ";",
        ])
        .unwrap();
        assert_eq!(cli.delimiter, ';');
        match cli.command {
            Commands::Check { layout, print, .. } => {
                assert_eq!(layout.columns, ["Name#First", "Name#Last", "Email"]);
                assert_eq!(layout.unique, ["Email"]);
                assert_eq!(layout.sheet, "Sheet1");
                assert!(!print);
            }
            _ => panic!("expected the check command"),
        }
    }

    #[test]
    fn test_sheet_summary_lists_every_sheet() {
        let args = layout(&["Name#First", "Name#Last", "Email"], &[], &[]);
        let mut builder = WorkbookBuilder::new();
        builder.add_sheet(&args.descriptor().unwrap()).unwrap();
        let mut workbook = builder.finish();
        workbook.add_worksheet_with_name("Notes").unwrap();

        assert_eq!(
            sheet_summary(&workbook),
            [
                "",
                "  Sheet 0: \"Upload\"",
                "    Used range: A1:C2",
                "    Merged: C1:C2, A1:B1",
                "",
                "  Sheet 1: \"Notes\"",
                "    Used range: empty",
            ]
        );
    }

    #[test]
    fn test_unknown_flag_column_is_rejected() {
        assert!(layout(&["A", "B"], &["C"], &[]).descriptor().is_err());
    }

    #[test]
    fn test_template_upload_cycle() {
        let args = layout(&["Name#First", "Name#Last", "Email"], &["Email"], &["Email"]);
        let sheet = args.descriptor().unwrap();
        assert_eq!(sheet.header_row_count(), 2);

        let mut builder = WorkbookBuilder::new();
        builder.add_sheet(&sheet).unwrap();
        let mut workbook = builder.finish();
        let ws = workbook.worksheet_by_name_mut("Upload").unwrap();
        ws.set_cell_value_at(2, 0, "Ada").unwrap();
        ws.set_cell_value_at(2, 2, "ada@example.org").unwrap();
        ws.set_cell_value_at(3, 1, "Hopper").unwrap();

        match read_sheet(&workbook, &sheet) {
            Err(Error::RowValidation(errors)) => {
                assert_eq!(errors.lines(), ["row 3: column 'Email': must not be empty; "]);
            }
            other => panic!("expected row errors, got {other:?}"),
        }

        workbook
            .worksheet_by_name_mut("Upload")
            .unwrap()
            .set_cell_value_at(3, 2, "grace@example.org")
            .unwrap();
        let rows = read_sheet(&workbook, &sheet).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Some("Ada".to_string()), None, Some("ada@example.org".to_string())],
                vec![None, Some("Hopper".to_string()), Some("grace@example.org".to_string())],
            ]
        );
    }
}
