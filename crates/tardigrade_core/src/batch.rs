//! Transaction batching and per-batch sensory features.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::WalkError;

/// Separator between member signatures in a batch signature.
pub const SIGNATURE_SEPARATOR: &str = "-";

/// Kind of on-chain activity recorded for a transaction.
///
/// Unknown kinds are kept verbatim; they count towards batch size and the
/// batch signature but contribute to neither side of the swap volume.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    /// `ACTIVITY_TOKEN_SWAP`, accumulated as sell volume
    Swap,
    /// `ACTIVITY_AGG_TOKEN_SWAP`, accumulated as buy volume
    AggSwap,
    Other(String),
}

impl ActivityType {
    pub const SWAP: &'static str = "ACTIVITY_TOKEN_SWAP";
    pub const AGG_SWAP: &'static str = "ACTIVITY_AGG_TOKEN_SWAP";

    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Swap => Self::SWAP,
            ActivityType::AggSwap => Self::AGG_SWAP,
            ActivityType::Other(s) => s,
        }
    }
}

impl From<String> for ActivityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::SWAP => ActivityType::Swap,
            Self::AGG_SWAP => ActivityType::AggSwap,
            _ => ActivityType::Other(s),
        }
    }
}

impl From<ActivityType> for String {
    fn from(kind: ActivityType) -> Self {
        match kind {
            ActivityType::Other(s) => s,
            known => String::from(known.as_str()),
        }
    }
}

/// One transaction as read from the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub signature: String,
    pub from: String,
    pub to: String,
    /// Decimal amount as a string
    pub amount: String,
    pub slot: u64,
    /// Unix seconds; absent for records the indexer could not date
    #[serde(rename = "blockTime", default)]
    pub block_time: Option<i64>,
    pub activity_type: ActivityType,
}

impl TransactionRecord {
    /// Numeric amount; anything unparseable counts as zero.
    pub fn amount_value(&self) -> f64 {
        parse_amount(&self.amount)
    }
}

/// Parse an amount with JavaScript numeric-string rules, falling back to zero.
///
/// Accepted forms after trimming whitespace (including U+FEFF):
/// - empty text, which is zero
/// - signed decimal literals with optional fraction and exponent
/// - `Infinity` with an optional sign (exact spelling)
/// - unsigned `0x`, `0o` and `0b` integer literals
///
/// Anything else (`inf`, `nan`, `1_000`, `-0x10`, ...) is zero, as is negative zero.
pub fn parse_amount(amount: &str) -> f64 {
    let trimmed = amount.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    match parse_numeric_literal(trimmed) {
        Some(v) if !v.is_nan() && v != 0.0 => v,
        _ => 0.0,
    }
}

fn is_js_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn parse_numeric_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix_integer(&s[2..], radix);
        }
    }

    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if unsigned == "Infinity" {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // str::parse also takes "inf" and "nan" spellings
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Unsigned integer in a power-of-two radix, rounded once to the nearest f64.
fn parse_radix_integer(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut exact: Option<u128> = Some(0);
    let mut approx = 0.0f64;
    for c in digits.chars() {
        let digit = c.to_digit(radix)?;
        exact = exact
            .and_then(|v| v.checked_mul(radix as u128))
            .and_then(|v| v.checked_add(digit as u128));
        approx = approx * radix as f64 + digit as f64;
    }
    Some(match exact {
        Some(v) => v as f64,
        None => approx,
    })
}

/// Normalized network inputs for one batch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensoryVector {
    /// Share of volume from aggregated swaps
    pub buy: f64,
    /// Share of volume from direct swaps
    pub sell: f64,
    /// Batch length over batch capacity
    pub fill: f64,
}

impl SensoryVector {
    pub fn to_array(&self) -> [f64; 3] {
        [self.buy, self.sell, self.fill]
    }
}

/// A contiguous, order-preserving slice of the transaction log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransactionBatch<'a> {
    records: &'a [TransactionRecord],
    capacity: usize,
}

impl<'a> TransactionBatch<'a> {
    pub fn new(records: &'a [TransactionRecord], capacity: usize) -> Self {
        Self { records, capacity }
    }

    pub fn records(&self) -> &'a [TransactionRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Member signatures in batch order.
    pub fn signatures(&self) -> Vec<String> {
        self.records.iter().map(|tx| tx.signature.clone()).collect()
    }

    /// Member signatures joined with `-`; the only entropy behind the motor layer.
    pub fn signature(&self) -> String {
        self.signatures().join(SIGNATURE_SEPARATOR)
    }

    /// `(buy, sell)` volume, summed in batch order.
    pub fn volumes(&self) -> (f64, f64) {
        self.records
            .iter()
            .fold((0.0, 0.0), |(buy, sell), tx| match tx.activity_type {
                ActivityType::AggSwap => (buy + tx.amount_value(), sell),
                ActivityType::Swap => (buy, sell + tx.amount_value()),
                ActivityType::Other(_) => (buy, sell),
            })
    }

    pub fn features(&self) -> SensoryVector {
        let (buy, sell) = self.volumes();
        let total = buy + sell;
        let total = if total == 0.0 || total.is_nan() {
            1.0
        } else {
            total
        };

        SensoryVector {
            buy: buy / total,
            sell: sell / total,
            fill: self.records.len() as f64 / self.capacity as f64,
        }
    }

    /// Block time of the last member, in milliseconds.
    ///
    /// This is the last record in iteration order, not the maximum; the log is
    /// sorted ascending so the two coincide. A missing block time counts as 0.
    pub fn timestamp(&self) -> i64 {
        self.records
            .last()
            .map(|tx| tx.block_time.unwrap_or(0).saturating_mul(1000))
            .unwrap_or(0)
    }
}

/// Split `transactions` into contiguous batches of at most `size` records.
///
/// The last batch keeps the remainder; an empty log yields no batches.
pub fn batch(
    transactions: &[TransactionRecord],
    size: usize,
) -> Result<Vec<TransactionBatch<'_>>, WalkError> {
    if size == 0 {
        return Err(WalkError::InvalidBatchSize);
    }
    Ok(transactions
        .chunks(size)
        .map(|records| TransactionBatch::new(records, size))
        .collect())
}
