use core_types::InstrumentAnalytics;
use std::collections::HashMap;

/// A named binding of instrument codes to pricing analytics.
///
/// Sources are the data axis of the scenario grid: the base 272-day history
/// and any alternative pricing-model output (e.g. a 150-day short-volatility
/// run) are each one `AnalyticsSource`. They live outside the
/// `PortfolioModel` so swapping sources never touches positions or joins.
#[derive(Debug, Clone)]
pub struct AnalyticsSource {
    name: String,
    rows: HashMap<String, InstrumentAnalytics>,
}

impl AnalyticsSource {
    pub fn new(name: impl Into<String>, rows: Vec<InstrumentAnalytics>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| (row.instrument_code.clone(), row))
            .collect();
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, instrument_code: &str) -> Option<&InstrumentAnalytics> {
        self.rows.get(instrument_code)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
