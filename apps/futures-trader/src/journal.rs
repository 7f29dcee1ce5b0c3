//! Append-only order journal.
//!
//! Every order action — submitted, failed, canceled — produces exactly one
//! timestamped line. This file is the audit trail; diagnostic logging goes
//! through `tracing` separately.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::OrderRequest;

/// One journaled order action.
#[derive(Debug, Clone)]
pub enum JournalEvent {
    /// Order accepted by the exchange.
    Submitted {
        /// The normalized request that was sent.
        request: OrderRequest,
        /// Exchange-assigned order ID.
        order_id: i64,
        /// Status reported in the acknowledgment.
        status: String,
    },
    /// Order submission failed.
    Failed {
        /// The request that was attempted.
        request: OrderRequest,
        /// Failure description.
        reason: String,
    },
    /// Order canceled.
    Canceled {
        /// Symbol of the canceled order.
        symbol: String,
        /// Exchange-assigned order ID.
        order_id: i64,
    },
    /// Cancel attempt failed.
    CancelFailed {
        /// Symbol of the order.
        symbol: String,
        /// Exchange-assigned order ID.
        order_id: i64,
        /// Failure description.
        reason: String,
    },
}

impl fmt::Display for JournalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted {
                request,
                order_id,
                status,
            } => {
                write!(
                    f,
                    "SUBMITTED {} {} {} qty={}{}{} id={order_id} status={status}",
                    request.symbol,
                    request.side,
                    request.order_type,
                    request.quantity.normalize(),
                    fmt_price(" price=", request.price),
                    fmt_price(" stop=", request.stop_price),
                )
            }
            Self::Failed { request, reason } => {
                write!(
                    f,
                    "FAILED {} {} {} qty={}{}{} reason={reason}",
                    request.symbol,
                    request.side,
                    request.order_type,
                    request.quantity.normalize(),
                    fmt_price(" price=", request.price),
                    fmt_price(" stop=", request.stop_price),
                )
            }
            Self::Canceled { symbol, order_id } => {
                write!(f, "CANCELED {symbol} id={order_id}")
            }
            Self::CancelFailed {
                symbol,
                order_id,
                reason,
            } => {
                write!(f, "CANCEL_FAILED {symbol} id={order_id} reason={reason}")
            }
        }
    }
}

fn fmt_price(label: &str, price: Option<Decimal>) -> String {
    price
        .map(|p| format!("{label}{}", p.normalize()))
        .unwrap_or_default()
}

/// Append-only journal file.
#[derive(Debug, Clone)]
pub struct OrderJournal {
    path: PathBuf,
}

impl OrderJournal {
    /// Create a journal writing to the given path. The file is created on
    /// first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The journal file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for the event.
    pub fn record(&self, event: &JournalEvent) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} {event}", Utc::now().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderSide, Symbol};
    use rust_decimal_macros::dec;

    fn journal_in(dir: &tempfile::TempDir) -> OrderJournal {
        OrderJournal::new(dir.path().join("orders.log"))
    }

    fn read_lines(journal: &OrderJournal) -> Vec<String> {
        std::fs::read_to_string(journal.path())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);
        let request = OrderRequest::market(Symbol::new("BTCUSDT"), OrderSide::Buy, dec!(0.001));

        journal
            .record(&JournalEvent::Submitted {
                request: request.clone(),
                order_id: 42,
                status: "NEW".to_string(),
            })
            .unwrap();
        journal
            .record(&JournalEvent::Failed {
                request,
                reason: "Margin is insufficient.".to_string(),
            })
            .unwrap();

        let lines = read_lines(&journal);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("SUBMITTED BTCUSDT BUY MARKET qty=0.001 id=42 status=NEW"));
        assert!(lines[1].contains("FAILED BTCUSDT BUY MARKET qty=0.001"));
        assert!(lines[1].contains("Margin is insufficient."));
    }

    #[test]
    fn limit_event_includes_price() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);
        let request = OrderRequest::limit(
            Symbol::new("ETHUSDT"),
            OrderSide::Sell,
            dec!(0.5),
            dec!(2500.10),
        );

        journal
            .record(&JournalEvent::Submitted {
                request,
                order_id: 7,
                status: "NEW".to_string(),
            })
            .unwrap();

        let lines = read_lines(&journal);
        assert!(lines[0].contains("qty=0.5 price=2500.1 id=7"));
    }

    #[test]
    fn cancel_events() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);

        journal
            .record(&JournalEvent::Canceled {
                symbol: "BTCUSDT".to_string(),
                order_id: 9,
            })
            .unwrap();
        journal
            .record(&JournalEvent::CancelFailed {
                symbol: "BTCUSDT".to_string(),
                order_id: 10,
                reason: "order not found: 10".to_string(),
            })
            .unwrap();

        let lines = read_lines(&journal);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("CANCELED BTCUSDT id=9"));
        assert!(lines[1].contains("CANCEL_FAILED BTCUSDT id=10"));
    }

    #[test]
    fn lines_start_with_rfc3339_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);
        journal
            .record(&JournalEvent::Canceled {
                symbol: "BTCUSDT".to_string(),
                order_id: 1,
            })
            .unwrap();

        let lines = read_lines(&journal);
        let stamp = lines[0].split_whitespace().next().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}
