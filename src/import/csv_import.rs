use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::io::Read;
use std::str::FromStr;

use crate::error::{LedgerError, Result};
use crate::models::TransactionType;

/// One transaction row, cast and trimmed. `line` is the 1-based line in the file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CsvRow {
    pub(crate) line: u64,
    pub(crate) title: String,
    pub(crate) value: Decimal,
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
}

#[derive(Debug, Default)]
pub(crate) struct DecodedCsv {
    pub(crate) rows: Vec<CsvRow>,
    /// Rows dropped because title, type or value was missing.
    pub(crate) skipped: usize,
}

impl DecodedCsv {
    /// Distinct non-blank category titles, in first-seen order.
    pub(crate) fn category_titles(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut titles: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.category.is_empty() && seen.insert(row.category.as_str()) {
                titles.push(row.category.clone());
            }
        }
        titles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    title: usize,
    kind: usize,
    value: usize,
    category: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| LedgerError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            title: find("title")?,
            kind: find("type")?,
            value: find("value")?,
            category: find("category")?,
        })
    }
}

pub(crate) struct CsvDecoder;

impl CsvDecoder {
    /// Read every row of a headed `title, type, value, category` CSV.
    ///
    /// Incomplete rows are counted and dropped. A row that is complete but
    /// cannot be cast fails the whole decode.
    pub(crate) fn decode<R: Read>(reader: R) -> Result<DecodedCsv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::from_headers(rdr.headers()?)?;
        let mut decoded = DecodedCsv::default();

        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(i as u64 + 2);
            match decode_row(&record, &columns, line)? {
                Some(row) => decoded.rows.push(row),
                None => decoded.skipped += 1,
            }
        }

        tracing::debug!(
            "Decoded {} rows ({} skipped)",
            decoded.rows.len(),
            decoded.skipped
        );
        Ok(decoded)
    }
}

fn decode_row(record: &StringRecord, columns: &Columns, line: u64) -> Result<Option<CsvRow>> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let title = field(columns.title);
    let kind = field(columns.kind);
    let value = field(columns.value);
    if title.is_empty() || kind.is_empty() || value.is_empty() {
        return Ok(None);
    }

    let value = parse_decimal(value).map_err(|message| LedgerError::InvalidRow { line, message })?;
    // A zero amount counts as missing.
    if value.is_zero() {
        return Ok(None);
    }
    if value.is_sign_negative() {
        return Err(LedgerError::InvalidRow {
            line,
            message: format!("value must be positive, got {value}"),
        });
    }

    let kind = TransactionType::parse(&kind.to_lowercase()).ok_or_else(|| LedgerError::InvalidRow {
        line,
        message: format!("unknown transaction type '{kind}', expected income or outcome"),
    })?;

    Ok(Some(CsvRow {
        line,
        title: title.to_string(),
        value,
        kind,
        category: field(columns.category).to_string(),
    }))
}

/// Parse an amount, tolerating a currency sign, thousands separators and
/// accounting-style parentheses.
pub(crate) fn parse_decimal(s: &str) -> std::result::Result<Decimal, String> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .map_err(|_| format!("failed to parse '{s}' as a number"))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
