// 💾 Workbook Sinks - where the report lands
//
// SqliteWorkbook: one file, one table per sheet plus a `sheets` index.
// CsvWorkbook: one directory, one numbered CSV per sheet.
// Both replace what a previous run wrote.

use anyhow::{bail, Context, Result};
use rusqlite::{params, params_from_iter, Connection};
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::{Report, Sheet};

pub const DEFAULT_OUTPUT: &str = "HolidayCreditSolution_Documentation.db";

const SQLITE_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];

// ============================================================================
// SINK TRAIT
// ============================================================================

pub trait WorkbookSink {
    /// Write every sheet, replacing earlier output at the same path
    fn write(&self, report: &Report) -> Result<()>;

    fn path(&self) -> &Path;

    /// Short label for logs and the final summary
    fn format_name(&self) -> &'static str;
}

/// Pick the sink from the output path's extension
pub fn sink_for(path: &Path) -> Box<dyn WorkbookSink> {
    if is_sqlite_path(path) {
        Box::new(SqliteWorkbook::new(path))
    } else {
        Box::new(CsvWorkbook::new(path))
    }
}

pub fn is_sqlite_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SQLITE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// "Holiday Credit Rules" at position 3 -> "sheet_03_holiday_credit_rules"
pub fn table_name(position: usize, title: &str) -> String {
    format!("sheet_{:02}_{}", position, slug(title))
}

fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

// ============================================================================
// SQLITE
// ============================================================================

pub struct SqliteWorkbook {
    path: PathBuf,
}

impl SqliteWorkbook {
    pub fn new(path: &Path) -> Self {
        SqliteWorkbook {
            path: path.to_path_buf(),
        }
    }

    fn create_sheet_table(conn: &Connection, table: &str, sheet: &Sheet) -> Result<()> {
        let mut columns = vec!["row_index INTEGER NOT NULL".to_string()];
        columns.extend(
            sheet
                .headers
                .iter()
                .map(|h| format!("{} TEXT NOT NULL", quote_ident(h))),
        );

        conn.execute(
            &format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", ")),
            [],
        )
        .with_context(|| format!("Failed to create table for sheet '{}'", sheet.title))?;

        let placeholders: Vec<String> = (1..=sheet.headers.len() + 1)
            .map(|i| format!("?{}", i))
            .collect();
        let mut insert = conn.prepare(&format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(table),
            placeholders.join(", ")
        ))?;

        for (idx, row) in sheet.rows.iter().enumerate() {
            let mut values: Vec<String> = Vec::with_capacity(sheet.headers.len() + 1);
            values.push(idx.to_string());
            values.extend(
                (0..sheet.headers.len()).map(|col| row.get(col).cloned().unwrap_or_default()),
            );
            insert.execute(params_from_iter(values.iter()))?;
        }

        Ok(())
    }
}

impl WorkbookSink for SqliteWorkbook {
    fn write(&self, report: &Report) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to replace existing workbook {:?}", self.path))?;
        }

        let mut conn = Connection::open(&self.path)
            .with_context(|| format!("Failed to create workbook {:?}", self.path))?;
        let tx = conn.transaction()?;

        tx.execute(
            "CREATE TABLE sheets (
                position INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                table_name TEXT NOT NULL,
                headers TEXT NOT NULL,
                row_count INTEGER NOT NULL
            )",
            [],
        )?;

        for (position, sheet) in report.sheets.iter().enumerate() {
            let table = table_name(position, &sheet.title);
            let headers = serde_json::to_string(&sheet.headers)?;

            tx.execute(
                "INSERT INTO sheets (position, title, table_name, headers, row_count)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    position as i64,
                    sheet.title,
                    table,
                    headers,
                    sheet.rows.len() as i64
                ],
            )?;

            Self::create_sheet_table(&tx, &table, sheet)?;
        }

        tx.commit().context("Failed to commit workbook")?;
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn format_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Read a SQLite workbook back into a report
pub fn read_sqlite(path: &Path) -> Result<Report> {
    if !path.is_file() {
        bail!("Workbook not found: {:?}", path);
    }

    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;

    let mut stmt = conn
        .prepare("SELECT title, table_name, headers FROM sheets ORDER BY position")
        .context("Not a documentation workbook (no sheets table)")?;
    let index: Vec<(String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<rusqlite::Result<_>>()?;

    let mut sheets = Vec::with_capacity(index.len());
    for (title, table, headers_json) in index {
        let headers: Vec<String> = serde_json::from_str(&headers_json)
            .with_context(|| format!("Invalid header list for sheet '{}'", title))?;

        let columns: Vec<String> = headers.iter().map(|h| quote_ident(h)).collect();
        let select = if columns.is_empty() {
            format!("SELECT row_index FROM {} ORDER BY row_index", quote_ident(&table))
        } else {
            format!(
                "SELECT {} FROM {} ORDER BY row_index",
                columns.join(", "),
                quote_ident(&table)
            )
        };

        let width = headers.len();
        let mut stmt = conn.prepare(&select)?;
        let rows: Vec<Vec<String>> = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, String>(i))
                    .collect::<rusqlite::Result<Vec<String>>>()
            })?
            .collect::<rusqlite::Result<_>>()?;

        sheets.push(Sheet::new(title, headers, rows));
    }

    Ok(Report { sheets })
}

// ============================================================================
// CSV
// ============================================================================

pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    pub fn new(dir: &Path) -> Self {
        CsvWorkbook {
            dir: dir.to_path_buf(),
        }
    }

    pub fn file_name(position: usize, title: &str) -> String {
        format!("{:02}_{}.csv", position, slug(title))
    }

    /// Drop CSVs from an earlier run; anything else in the directory stays
    fn clear_previous(&self) -> Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("csv") {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove old sheet {:?}", path))?;
            }
        }
        Ok(())
    }
}

impl WorkbookSink for CsvWorkbook {
    fn write(&self, report: &Report) -> Result<()> {
        if self.dir.is_file() {
            bail!("{:?} is a file; CSV output needs a directory", self.dir);
        }
        if self.dir.is_dir() {
            self.clear_previous()?;
        } else {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;
        }

        for (position, sheet) in report.sheets.iter().enumerate() {
            let path = self.dir.join(Self::file_name(position, &sheet.title));
            let mut writer = csv::Writer::from_path(&path)
                .with_context(|| format!("Failed to create {:?}", path))?;

            writer.write_record(&sheet.headers)?;
            for row in &sheet.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }

        Ok(())
    }

    fn path(&self) -> &Path {
        &self.dir
    }

    fn format_name(&self) -> &'static str {
        "csv"
    }
}
