// crates/yieldlens-cli/src/commands/report.rs
//
// `yieldlens report`: list an account's transactions for a reporting period
// as a table, JSON, or a CSV export.
//
// The history is read from a JSON export and served page by page through the
// same paging logic a live transaction index would go through.

use std::fs;

use chrono::Utc;
use clap::Args;
use tabled::Tabled;

use yieldlens_core::YieldError;
use yieldlens_rewards::{
    fetch_all_transactions, period_to_date_range_timestamps, report_lines, transactions_to_csv,
    AccountTransaction, FetchOptions, ReportLine, TransactionPage, TransactionSource,
};

use crate::output::{format_json, format_table, OutputFormat};

/// Arguments of the report command.
#[derive(Debug, Args)]
pub struct ReportCmd {
    /// Path to a JSON array of transactions.
    #[arg(long)]
    transactions: String,
    /// Account whose transactions are reported.
    #[arg(long)]
    account: String,
    /// Period name: all, year-to-date, or last-year.
    #[arg(long, default_value = "all")]
    period: String,
}

/// Transaction history held in memory, served newest first.
pub struct InMemorySource {
    history: Vec<AccountTransaction>,
}

impl InMemorySource {
    pub fn new(mut history: Vec<AccountTransaction>) -> Self {
        history.sort_by(|a, b| b.id.cmp(&a.id));
        Self { history }
    }
}

impl TransactionSource for InMemorySource {
    fn fetch_page(
        &mut self,
        account: &str,
        start: Option<u64>,
        max_results: u64,
    ) -> Result<TransactionPage, YieldError> {
        let involved = |tx: &&AccountTransaction| tx.from == account || tx.to == account;
        let transactions = self
            .history
            .iter()
            .filter(involved)
            .filter(|tx| start.map_or(true, |s| tx.id < s))
            .take(usize::try_from(max_results).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        let oldest_tx_id = self.history.iter().filter(involved).last().map(|tx| tx.id);
        Ok(TransactionPage {
            transactions,
            oldest_tx_id,
        })
    }
}

#[derive(Tabled)]
struct TransactionRow {
    id: u64,
    timestamp: String,
    direction: String,
    counterparty: String,
    amount: String,
    fee: String,
}

impl From<ReportLine> for TransactionRow {
    fn from(line: ReportLine) -> Self {
        Self {
            id: line.id,
            timestamp: line.timestamp,
            direction: line.direction.to_string(),
            counterparty: line.counterparty,
            amount: line.amount,
            fee: line.fee,
        }
    }
}

/// Run the report command.
pub fn run(
    cmd: &ReportCmd,
    options: &FetchOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let range = period_to_date_range_timestamps(&cmd.period, Utc::now())?;
    let contents = fs::read_to_string(&cmd.transactions)?;
    let history: Vec<AccountTransaction> = serde_json::from_str(&contents)?;
    tracing::info!(
        "Loaded {} transactions from {}",
        history.len(),
        cmd.transactions
    );

    let mut source = InMemorySource::new(history);
    let transactions = fetch_all_transactions(&mut source, &cmd.account, &range, options)?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&transactions)),
        OutputFormat::Csv => print!("{}", transactions_to_csv(&transactions, &cmd.account)),
        OutputFormat::Table => {
            let rows: Vec<TransactionRow> = report_lines(&transactions, &cmd.account)
                .into_iter()
                .map(TransactionRow::from)
                .collect();
            println!("{}", format_table(&rows));
            println!("{} transactions ({})", rows.len(), cmd.period);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldlens_rewards::DateRange;

    fn tx(id: u64, from: &str, to: &str) -> AccountTransaction {
        AccountTransaction {
            id,
            timestamp_nanos: id * 1_000_000_000,
            from: from.to_string(),
            to: to.to_string(),
            amount_e8s: 150_000_000,
            fee_e8s: 10_000,
            memo: None,
        }
    }

    #[test]
    fn test_in_memory_source_filters_account() {
        let mut source = InMemorySource::new(vec![
            tx(1, "me", "x"),
            tx(2, "y", "z"),
            tx(3, "x", "me"),
            tx(4, "me", "y"),
        ]);
        let options = FetchOptions {
            page_size: 1,
            max_retries: 0,
            max_pages: 10,
            retry_backoff_ms: 0,
        };
        let range = DateRange::default();
        let txs = fetch_all_transactions(&mut source, "me", &range, &options).unwrap();
        let ids: Vec<u64> = txs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3, 1]);
    }

    #[test]
    fn test_row_direction() {
        let row = TransactionRow::from(ReportLine::new(&tx(3, "x", "me"), "me"));
        assert_eq!(row.direction, "in");
        assert_eq!(row.counterparty, "x");
        assert_eq!(row.amount, "1.5");
        assert_eq!(row.fee, "0.0001");
        assert_eq!(row.timestamp, "1970-01-01T00:00:03+00:00");
    }

    #[test]
    fn test_csv_export_of_fetched_history() {
        let mut source = InMemorySource::new(vec![tx(1, "me", "a,b"), tx(2, "c", "me")]);
        let range = DateRange::default();
        let options = FetchOptions::default();
        let txs = fetch_all_transactions(&mut source, "me", &range, &options).unwrap();
        let csv = transactions_to_csv(&txs, "me");
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "id,timestamp,direction,counterparty,amount,fee,memo");
        assert_eq!(lines[1], "2,1970-01-01T00:00:02+00:00,in,c,1.5,0.0001,");
        assert_eq!(lines[2], "1,1970-01-01T00:00:01+00:00,out,\"a,b\",1.5,0.0001,");
        assert_eq!(lines[3], "");
    }
}
