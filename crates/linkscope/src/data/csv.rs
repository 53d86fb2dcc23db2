use anyhow::{Context, Result, bail};

/// A parsed CSV table: one header row plus data rows.
///
/// The input datasets are plain comma-separated tables. Fields may be
/// double-quoted when they contain commas; a doubled quote inside a quoted
/// field is an escaped quote. Anything fancier is rejected.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().enumerate();

        let headers = loop {
            match lines.next() {
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((no, line)) => {
                    break split_fields(line)
                        .with_context(|| format!("line {}: malformed header", no + 1))?;
                }
                None => bail!("empty file"),
            }
        };

        let mut rows = Vec::new();
        for (no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields =
                split_fields(line).with_context(|| format!("line {}: malformed row", no + 1))?;
            if fields.len() != headers.len() {
                bail!(
                    "line {}: expected {} fields, found {}",
                    no + 1,
                    headers.len(),
                    fields.len()
                );
            }
            rows.push(fields);
        }

        Ok(Self { headers, rows })
    }

    /// Index of a named column, or an error naming the missing column.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("missing column '{name}'"))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Split one CSV line into fields, honoring double-quoted fields.
fn split_fields(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        bail!("unterminated quoted field");
    }

    fields.push(field);
    Ok(fields.into_iter().map(|f| f.trim().to_string()).collect())
}
