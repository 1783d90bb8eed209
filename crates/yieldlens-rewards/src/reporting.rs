// crates/yieldlens-rewards/src/reporting.rs
//
// Reporting helpers: calendar periods as timestamp ranges, and paging through
// an account's transaction history for a period.
//
// Transaction indexes return an account's history newest first, one page at
// a time, starting below a given transaction id. Paging stops at the first of:
//   - an empty page,
//   - the account's oldest transaction,
//   - a transaction older than the start of the requested range,
//   - the page limit.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use yieldlens_core::YieldError;

use crate::simulation::date_to_timestamp;
use crate::token::Tokens;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// A named reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportingPeriod {
    /// No bounds.
    All,
    /// From January 1 of the current year.
    YearToDate,
    /// The whole previous calendar year.
    LastYear,
}

impl FromStr for ReportingPeriod {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ReportingPeriod::All),
            "year-to-date" => Ok(ReportingPeriod::YearToDate),
            "last-year" => Ok(ReportingPeriod::LastYear),
            other => Err(YieldError::InvalidPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportingPeriod::All => write!(f, "all"),
            ReportingPeriod::YearToDate => write!(f, "year-to-date"),
            ReportingPeriod::LastYear => write!(f, "last-year"),
        }
    }
}

/// Timestamp bounds in nanoseconds since the epoch. `from` is inclusive,
/// `to` exclusive; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl DateRange {
    /// Whether `timestamp_nanos` falls inside the range.
    pub fn contains(&self, timestamp_nanos: u64) -> bool {
        self.from.map_or(true, |from| timestamp_nanos >= from)
            && self.to.map_or(true, |to| timestamp_nanos < to)
    }
}

fn start_of_year_nanos(year: i32) -> Result<u64, YieldError> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| YieldError::InvalidData(format!("year {} out of range", year)))?;
    Ok(date_to_timestamp(date).saturating_mul(NANOS_PER_SECOND))
}

/// Bounds of `period` relative to `now` (UTC calendar years).
pub fn date_range(period: ReportingPeriod, now: DateTime<Utc>) -> Result<DateRange, YieldError> {
    let year = now.year();
    match period {
        ReportingPeriod::All => Ok(DateRange::default()),
        ReportingPeriod::YearToDate => Ok(DateRange {
            from: Some(start_of_year_nanos(year)?),
            to: None,
        }),
        ReportingPeriod::LastYear => Ok(DateRange {
            from: Some(start_of_year_nanos(year - 1)?),
            to: Some(start_of_year_nanos(year)?),
        }),
    }
}

/// Bounds of the period named `period` relative to `now`.
///
/// # Errors
/// Returns `YieldError::InvalidPeriod` for names other than `all`,
/// `year-to-date` and `last-year`.
pub fn period_to_date_range_timestamps(
    period: &str,
    now: DateTime<Utc>,
) -> Result<DateRange, YieldError> {
    date_range(period.parse()?, now)
}

/// One transaction in an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransaction {
    pub id: u64,
    pub timestamp_nanos: u64,
    pub from: String,
    pub to: String,
    pub amount_e8s: u64,
    #[serde(default)]
    pub fee_e8s: u64,
    #[serde(default)]
    pub memo: Option<String>,
}

/// A page of history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<AccountTransaction>,
    /// Id of the account's oldest transaction, if the index knows it.
    pub oldest_tx_id: Option<u64>,
}

/// A transaction index that serves an account's history page by page.
pub trait TransactionSource {
    /// Fetch up to `max_results` transactions of `account`, newest first,
    /// with ids strictly below `start` (or the newest ones if `start` is `None`).
    fn fetch_page(
        &mut self,
        account: &str,
        start: Option<u64>,
        max_results: u64,
    ) -> Result<TransactionPage, YieldError>;
}

/// Paging limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    pub page_size: u64,
    /// Attempts per page after the first failure.
    pub max_retries: u32,
    pub max_pages: u32,
    /// Wait before the first retry of a page, doubled for each further retry.
    pub retry_backoff_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_retries: 3,
            max_pages: 1_000,
            retry_backoff_ms: 500,
        }
    }
}

impl FetchOptions {
    /// Wait before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

fn fetch_with_retry<S, F>(
    source: &mut S,
    account: &str,
    start: Option<u64>,
    options: &FetchOptions,
    sleep: &mut F,
) -> Result<TransactionPage, YieldError>
where
    S: TransactionSource + ?Sized,
    F: FnMut(Duration),
{
    let mut attempt = 0;
    loop {
        match source.fetch_page(account, start, options.page_size) {
            Ok(page) => return Ok(page),
            Err(e) if attempt < options.max_retries => {
                attempt += 1;
                let wait = options.backoff(attempt);
                tracing::warn!(
                    "Fetching transactions of {} failed (attempt {}/{}), retrying in {:?}: {}",
                    account,
                    attempt,
                    options.max_retries,
                    wait,
                    e
                );
                sleep(wait);
            }
            Err(e) => return Err(e),
        }
    }
}

/// All transactions of `account` inside `range`, newest first.
///
/// Failed pages are retried after [`FetchOptions::backoff`], blocking the
/// current thread.
///
/// # Errors
/// Returns the source's error once a page has failed `max_retries + 1` times.
pub fn fetch_all_transactions<S: TransactionSource + ?Sized>(
    source: &mut S,
    account: &str,
    range: &DateRange,
    options: &FetchOptions,
) -> Result<Vec<AccountTransaction>, YieldError> {
    fetch_all_transactions_with(source, account, range, options, std::thread::sleep)
}

/// [`fetch_all_transactions`] with the wait between retries delegated to
/// `sleep`.
pub fn fetch_all_transactions_with<S, F>(
    source: &mut S,
    account: &str,
    range: &DateRange,
    options: &FetchOptions,
    mut sleep: F,
) -> Result<Vec<AccountTransaction>, YieldError>
where
    S: TransactionSource + ?Sized,
    F: FnMut(Duration),
{
    let mut collected = Vec::new();
    let mut start = None;

    for page_number in 0..options.max_pages {
        let page = fetch_with_retry(source, account, start, options, &mut sleep)?;
        let Some(last) = page.transactions.last() else {
            break;
        };
        let last_id = last.id;
        let reached_range_start = range.from.map_or(false, |from| last.timestamp_nanos < from);
        let reached_oldest = page.oldest_tx_id == Some(last_id);

        collected.extend(
            page.transactions
                .into_iter()
                .filter(|tx| range.contains(tx.timestamp_nanos)),
        );

        if reached_range_start || reached_oldest {
            break;
        }
        if page_number + 1 == options.max_pages {
            tracing::warn!(
                "Stopped paging transactions of {} after {} pages",
                account,
                options.max_pages
            );
        }
        start = Some(last_id);
    }

    Ok(collected)
}

/// Column names of a transaction report, in CSV order.
pub const REPORT_COLUMNS: [&str; 7] = [
    "id",
    "timestamp",
    "direction",
    "counterparty",
    "amount",
    "fee",
    "memo",
];

/// Which way a transaction moved funds, seen from the reported account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => write!(f, "in"),
            Direction::Outgoing => write!(f, "out"),
        }
    }
}

/// One transaction as seen from the reported account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub id: u64,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub direction: Direction,
    pub counterparty: String,
    /// Whole tokens.
    pub amount: String,
    /// Whole tokens.
    pub fee: String,
    pub memo: String,
}

impl ReportLine {
    /// View `tx` from `account`. Self-transfers count as outgoing.
    pub fn new(tx: &AccountTransaction, account: &str) -> Self {
        let direction = if tx.from == account {
            Direction::Outgoing
        } else {
            Direction::Incoming
        };
        let counterparty = match direction {
            Direction::Outgoing => tx.to.clone(),
            Direction::Incoming => tx.from.clone(),
        };
        let secs = i64::try_from(tx.timestamp_nanos / NANOS_PER_SECOND).unwrap_or(i64::MAX);
        // Always below one second, so the cast cannot truncate.
        let subsec_nanos = (tx.timestamp_nanos % NANOS_PER_SECOND) as u32;
        let timestamp = DateTime::from_timestamp(secs, subsec_nanos)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        Self {
            id: tx.id,
            timestamp,
            direction,
            counterparty,
            amount: Tokens::from_e8s(tx.amount_e8s).to_string(),
            fee: Tokens::from_e8s(tx.fee_e8s).to_string(),
            memo: tx.memo.clone().unwrap_or_default(),
        }
    }

    /// Field values in [`REPORT_COLUMNS`] order.
    pub fn fields(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.timestamp.clone(),
            self.direction.to_string(),
            self.counterparty.clone(),
            self.amount.clone(),
            self.fee.clone(),
            self.memo.clone(),
        ]
    }
}

/// Report lines of `transactions` as seen from `account`, in input order.
pub fn report_lines(transactions: &[AccountTransaction], account: &str) -> Vec<ReportLine> {
    transactions
        .iter()
        .map(|tx| ReportLine::new(tx, account))
        .collect()
}

/// Quote a CSV field when it contains a separator, quote, or line break.
/// Embedded quotes are doubled.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render `rows` as CSV with CRLF line endings.
pub fn write_csv<R, F>(rows: R) -> String
where
    R: IntoIterator<Item = Vec<F>>,
    F: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        let line: Vec<Cow<'_, str>> = row.iter().map(|f| csv_field(f.as_ref())).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }
    out
}

/// CSV export of `transactions` as seen from `account`, header first.
pub fn transactions_to_csv(transactions: &[AccountTransaction], account: &str) -> String {
    let header: Vec<String> = REPORT_COLUMNS.iter().map(|c| c.to_string()).collect();
    let lines = report_lines(transactions, account)
        .into_iter()
        .map(|line| line.fields().to_vec());
    write_csv(std::iter::once(header).chain(lines))
}
