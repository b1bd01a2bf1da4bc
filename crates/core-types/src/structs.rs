use crate::enums::OptionType;
use crate::vector::PnlVector;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference data for a single tradable instrument.
///
/// In this system the instruments are foreign-exchange options, so the
/// descriptive fields carry the currency pair and the option terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument_code: String,
    pub description: String,
    pub currency_pair: String,
    pub option_type: OptionType,
    pub strike: Decimal,
    pub maturity: NaiveDate,
}

/// Analytics produced by the pricing engines for one instrument.
///
/// The `pnl_vector` is the instrument's simulated daily profit-and-loss
/// history (272 days in the base dataset, 150 in the short-volatility one).
/// Vectors are the raw input to every VaR figure; they are never aggregated
/// here, only carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAnalytics {
    pub instrument_code: String,
    /// Profit and loss of the previous trading day.
    pub pnl: Decimal,
    pub pnl_vector: PnlVector,
}

/// A holding of one instrument inside one book.
///
/// The composite key is (`instrument_code`, `book_id`); many positions may
/// reference the same instrument across different books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub instrument_code: String,
    pub book_id: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
}

/// One row of the trading-desk table: the placement of a book inside the
/// four-level organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskAssignment {
    pub book_id: String,
    pub business_unit: String,
    pub sub_business_unit: String,
    pub trading_desk: String,
    pub book: String,
}

impl DeskAssignment {
    /// The hierarchy labels for this book, top-down, in roll-up order.
    pub fn path_segments(&self) -> [&str; 4] {
        [
            &self.business_unit,
            &self.sub_business_unit,
            &self.trading_desk,
            &self.book,
        ]
    }
}
