//! CSV import service
//!
//! Imports transactions from CSV with a header row. Columns are located by
//! header name (`date`, `description`, `amount`, `type`, `category`) in any
//! order. Rows that fail to parse or validate are reported and skipped;
//! rows identical to an existing transaction are skipped as duplicates.

use std::collections::HashSet;
use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Category, Money, Transaction, TransactionKind};
use crate::services::transaction::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Date formats tried in order when parsing the date column
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%Y/%m/%d", "%b %d, %Y",
];

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
    /// When absent, the sign of the amount decides the type
    pub kind: Option<usize>,
    pub category: usize,
}

impl ColumnMapping {
    /// Resolve columns from a header record
    pub fn from_headers(headers: &StringRecord) -> FintrackResult<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase();
                names.iter().any(|n| h == *n)
            })
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| {
                FintrackError::Import(format!("CSV header is missing a '{}' column", names[0]))
            })
        };

        Ok(Self {
            date: require(&["date", "transaction date", "posted"])?,
            description: require(&["description", "memo", "payee", "name"])?,
            amount: require(&["amount", "value"])?,
            kind: find(&["type", "kind"]),
            category: require(&["category"])?,
        })
    }
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the file (the header is line 1)
    pub line: u64,
    pub message: String,
}

/// Outcome of an import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Transactions created (or that would be created, for a dry run)
    pub imported: Vec<Transaction>,
    pub duplicates_skipped: usize,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import transactions from CSV
    ///
    /// With `dry_run` nothing is written; the summary shows what would be
    /// imported.
    pub fn import_csv<R: Read>(&self, reader: R, dry_run: bool) -> FintrackResult<ImportSummary> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| FintrackError::Import(format!("Failed to read CSV header: {}", e)))?
            .clone();
        let mapping = ColumnMapping::from_headers(&headers)?;
        debug!(?mapping, "resolved CSV columns");

        // Only rows already stored count as duplicates; repeated rows within
        // the file are separate transactions
        let existing: HashSet<String> = self
            .storage
            .transactions
            .get_all()?
            .iter()
            .map(Transaction::import_fingerprint)
            .collect();

        let service = TransactionService::new(self.storage);
        let mut summary = ImportSummary::default();

        for (idx, result) in csv_reader.records().enumerate() {
            let fallback_line = idx as u64 + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    summary.errors.push(RowError {
                        line: fallback_line,
                        message: format!("Unreadable row: {}", e),
                    });
                    continue;
                }
            };
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line);

            let input = match parse_record(&record, &mapping) {
                Ok(input) => input,
                Err(message) => {
                    warn!(line, %message, "skipping CSV row");
                    summary.errors.push(RowError { line, message });
                    continue;
                }
            };

            let candidate = Transaction::new(
                input.date,
                input.amount,
                input.kind,
                input.category,
                input.description.trim(),
            );
            if let Err(e) = candidate.validate() {
                summary.errors.push(RowError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }

            if existing.contains(&candidate.import_fingerprint()) {
                summary.duplicates_skipped += 1;
                continue;
            }

            if dry_run {
                summary.imported.push(candidate);
            } else {
                summary.imported.push(service.create(input)?);
            }
        }

        info!(
            imported = summary.imported.len(),
            duplicates = summary.duplicates_skipped,
            errors = summary.errors.len(),
            dry_run,
            "CSV import finished"
        );
        Ok(summary)
    }
}

fn parse_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> Result<CreateTransactionInput, String> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .map(str::trim)
            .ok_or_else(|| format!("Missing {} column", name))
    };

    let date = parse_date(field(mapping.date, "date")?)?;
    let description = field(mapping.description, "description")?.to_string();

    let raw_amount = field(mapping.amount, "amount")?;
    let amount = Money::parse(raw_amount)
        .map_err(|_| format!("Could not parse amount: '{}'", raw_amount))?;

    let kind = match mapping.kind.and_then(|idx| record.get(idx)).map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<TransactionKind>()
            .map_err(|e| e.to_string())?,
        _ if amount.is_negative() => TransactionKind::Expense,
        _ => TransactionKind::Income,
    };

    let category = field(mapping.category, "category")?
        .parse::<Category>()
        .map_err(|e| e.to_string())?;

    Ok(CreateTransactionInput {
        date,
        amount: amount.abs(),
        description,
        kind,
        category,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", s))
}
