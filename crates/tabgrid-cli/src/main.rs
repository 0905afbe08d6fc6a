//! tabgrid CLI - inspect and reshape decoded workbooks from the command line
//!
//! Input is the decoder hand-off format: `{"sheets":[{"name":"..","rows":[[..]]}]}`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabgrid::prelude::*;

#[derive(Parser)]
#[command(name = "tabgrid")]
#[command(author, version, about = "Inspect, search and reshape decoded workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sheets in a workbook
    Sheets {
        /// Input workbook (JSON)
        input: PathBuf,
    },

    /// Show the shape and column kinds of a sheet
    Info {
        /// Input workbook (JSON)
        input: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Find every cell containing a string (case-insensitive)
    Search {
        /// Input workbook (JSON)
        input: PathBuf,

        /// Text to look for
        query: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Sort the rows of a sheet by one column and print them tab-separated
    Sort {
        /// Input workbook (JSON)
        input: PathBuf,

        /// Column letter to sort by (A, B, .., AA)
        #[arg(short, long)]
        column: String,

        /// Sort descending
        #[arg(short, long)]
        descending: bool,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Print a range tab-separated, as a clipboard copy would
    Copy {
        /// Input workbook (JSON)
        input: PathBuf,

        /// Range to copy, e.g. A1:C10
        #[arg(short, long)]
        range: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Export a sheet padded to a rectangle as JSON
    Export {
        /// Input workbook (JSON)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

/// Decoder for workbooks serialized as JSON
struct JsonDecoder;

impl WorkbookDecoder for JsonDecoder {
    fn decode(&self, bytes: &[u8]) -> tabgrid::Result<RawWorkbook> {
        serde_json::from_slice(bytes).map_err(|e| Error::DecodeFailure(e.to_string()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Sheets { input } => list_sheets(&input, &mut out),
        Commands::Info { input, sheet } => show_info(&input, sheet.as_deref(), &mut out),
        Commands::Search {
            input,
            query,
            sheet,
        } => search(&input, &query, sheet.as_deref(), &mut out),
        Commands::Sort {
            input,
            column,
            descending,
            sheet,
        } => sort(&input, &column, descending, sheet.as_deref(), &mut out),
        Commands::Copy {
            input,
            range,
            sheet,
        } => copy(&input, &range, sheet.as_deref(), &mut out),
        Commands::Export {
            input,
            output,
            sheet,
        } => export(&input, output.as_deref(), sheet.as_deref(), &mut out),
    }
}

/// Load a workbook file and activate the requested sheet
fn open(input: &Path, sheet: Option<&str>) -> Result<SheetController> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))?;

    let mut grid = SheetController::new();
    grid.load_from(&JsonDecoder, &bytes)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    if let Some(name) = sheet {
        grid.switch_sheet(name)
            .with_context(|| format!("Sheet '{}' not found", name))?;
    }
    Ok(grid)
}

fn list_sheets(input: &Path, out: &mut impl Write) -> Result<()> {
    let grid = open(input, None)?;
    for (i, name) in grid.snapshot().sheet_names.iter().enumerate() {
        writeln!(out, "{}\t{}", i, name)?;
    }
    Ok(())
}

fn show_info(input: &Path, sheet: Option<&str>, out: &mut impl Write) -> Result<()> {
    let mut grid = open(input, sheet)?;
    let snap = grid.snapshot();

    writeln!(out, "File: {}", input.display())?;
    writeln!(out, "Sheet: {}", snap.active_sheet.as_deref().unwrap_or_default())?;
    writeln!(
        out,
        "Size: {} rows x {} columns",
        snap.row_count(),
        snap.max_cols()
    )?;
    writeln!(out, "Non-empty cells: {}", snap.cells.cell_count())?;

    for col in 0..snap.max_cols() {
        let kind = match grid.column_kind(col)? {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        };
        let header = snap.cell(0, col).display_text();
        writeln!(out, "  {}\t{}\t{}", tabgrid::column_name(col), kind, header)?;
    }
    Ok(())
}

fn search(input: &Path, query: &str, sheet: Option<&str>, out: &mut impl Write) -> Result<()> {
    let mut grid = open(input, sheet)?;
    let snap = grid.search(query).context("Search failed")?;

    for pos in snap.search.matches() {
        writeln!(
            out,
            "{}\t{}",
            pos,
            snap.cell(pos.row, pos.col).display_text()
        )?;
    }
    if let Some(notice) = &snap.notice {
        eprintln!("{}", notice);
    }
    Ok(())
}

fn sort(
    input: &Path,
    column: &str,
    descending: bool,
    sheet: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let col = tabgrid::column_index(column)
        .with_context(|| format!("Invalid column '{}'", column))? as i64;

    let mut grid = open(input, sheet)?;
    let mut snap = grid.sort_by_column(col).context("Sort failed")?;
    if descending {
        snap = grid.sort_by_column(col).context("Sort failed")?;
    }
    if let Some(notice) = &snap.notice {
        eprintln!("{}", notice);
    }

    let rows = snap.row_count();
    let cols = snap.cells.column_extent();
    let report = tabgrid::CopyReport::from_rect(
        &snap.cells,
        CellRect::from_corners(CellPos::new(0, 0), CellPos::new(rows - 1, cols - 1)),
    );
    writeln!(out, "{}", report.text)?;
    Ok(())
}

fn copy(input: &Path, range: &str, sheet: Option<&str>, out: &mut impl Write) -> Result<()> {
    let rect = CellRect::parse(range).with_context(|| format!("Invalid range '{}'", range))?;

    let mut grid = open(input, sheet)?;
    grid.select_begin(rect.min_row as i64, rect.min_col as i64, false)?;
    grid.select_extend(rect.max_row as i64, rect.max_col as i64)?;
    grid.select_end()?;

    let report = grid.copy_selection()?;
    writeln!(out, "{}", report.text)?;
    eprintln!("Copied {} × {} cells", report.rows, report.cols);

    if let Some(stats) = grid.selection_stats()? {
        eprintln!(
            "Sum: {}  Count: {}  Average: {}",
            stats.sum, stats.count, stats.average
        );
    }
    Ok(())
}

fn export(
    input: &Path,
    output: Option<&Path>,
    sheet: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let grid = open(input, sheet)?;
    let snap = grid.snapshot();
    let name = snap.active_sheet.clone().unwrap_or_default();
    let matrix = grid.export_matrix()?;
    let workbook = RawWorkbook::new(vec![RawSheet::new(name, matrix)]);
    let json = serde_json::to_string_pretty(&workbook).context("Failed to serialize sheet")?;

    if let Some(path) = output {
        std::fs::write(path, &json)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote {} rows to '{}'", snap.row_count(), path.display());
    } else {
        writeln!(out, "{}", json).context("Failed to write to stdout")?;
    }
    Ok(())
}
