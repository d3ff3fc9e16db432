// src/export.rs
//
// CSV/TSV in and out. Writing covers table export (copy/save); parsing
// exists for the CLI's bulk-edit files (`id,field,value` rows).

use std::io::{self, Write};
use std::mem::take;
use std::path::{Path, PathBuf};

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). std-only.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !row.is_empty() && !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Stringify a table for copy/export.
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = headers {
            let _ = write_row(&mut buf, h, sep);
        }
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// Write one export file, creating parent directories as needed. Returns
/// the path written.
pub fn write_export(
    path: &Path,
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let contents = to_export_string(headers, rows, include_headers, sep);
    std::fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_round_trip() {
        let rows = vec![row!["a", "b,c", "d\"e"], row!["1", "2", "3"]];
        let text = to_export_string(&None, &rows, false, ',');
        assert_eq!(text, "a,\"b,c\",\"d\"\"e\"\n1,2,3\n");
        assert_eq!(parse_rows(&text, ','), rows);
    }

    #[test]
    fn headers_only_when_asked() {
        let headers = Some(row!["id", "name"]);
        let rows = vec![row!["x", "Tasty Thai"]];
        assert!(to_export_string(&headers, &rows, true, '\t').starts_with("id\tname\n"));
        assert!(to_export_string(&headers, &rows, false, '\t').starts_with("x\t"));
    }

    #[test]
    fn crlf_and_blank_lines_tolerated() {
        let parsed = parse_rows("a,b\r\n\r\nc,d\r\n", ',');
        assert_eq!(parsed, vec![row!["a", "b"], row!["c", "d"]]);
    }
}
