use crate::error::{BrokenReferences, ModelError};
use crate::hierarchy::{DeskTree, NodePath};
use crate::source::AnalyticsSource;
use core_types::{CoreError, DeskAssignment, Instrument, PnlVector, Position};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// The joined data model: positions ⋈ instruments and positions ⋈ trading
/// desks, with the hierarchy materialized as a tree.
///
/// Analytics deliberately stay outside the model (see [`AnalyticsSource`]):
/// the joins and quantities are computed once and shared by every
/// pricing-model scenario.
#[derive(Debug, Clone)]
pub struct PortfolioModel {
    instruments: HashMap<String, Instrument>,
    positions: Vec<Position>,
    positions_by_book: HashMap<String, Vec<usize>>,
    tree: DeskTree,
}

impl PortfolioModel {
    /// Joins the three stores and validates referential integrity.
    ///
    /// Every orphaned foreign key across the whole positions table is
    /// collected into one `BrokenReferences` error; a single bad row never
    /// hides the others, and bad rows are never silently dropped.
    pub fn build(
        instruments: Vec<Instrument>,
        positions: Vec<Position>,
        desks: Vec<DeskAssignment>,
    ) -> Result<Self, ModelError> {
        let instruments: HashMap<String, Instrument> = instruments
            .into_iter()
            .map(|i| (i.instrument_code.clone(), i))
            .collect();
        let known_books: HashSet<&str> = desks.iter().map(|d| d.book_id.as_str()).collect();

        let mut broken = BrokenReferences::default();
        for position in &positions {
            if !instruments.contains_key(&position.instrument_code) {
                broken
                    .unknown_instruments
                    .push((position.instrument_code.clone(), position.book_id.clone()));
            }
            if !known_books.contains(position.book_id.as_str()) {
                broken
                    .unknown_books
                    .push((position.instrument_code.clone(), position.book_id.clone()));
            }
        }
        if !broken.is_empty() {
            return Err(ModelError::BrokenReferences(broken));
        }

        let tree = DeskTree::build(&desks)?;

        let mut positions_by_book: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, position) in positions.iter().enumerate() {
            positions_by_book
                .entry(position.book_id.clone())
                .or_default()
                .push(index);
        }

        tracing::info!(
            instruments = instruments.len(),
            positions = positions.len(),
            books = positions_by_book.len(),
            "portfolio model built"
        );

        Ok(Self {
            instruments,
            positions,
            positions_by_book,
            tree,
        })
    }

    pub fn tree(&self) -> &DeskTree {
        &self.tree
    }

    pub fn instrument(&self, code: &str) -> Option<&Instrument> {
        self.instruments.get(code)
    }

    /// All positions that roll up into the given hierarchy node.
    pub fn positions_under(&self, path: &NodePath) -> Result<Vec<&Position>, ModelError> {
        let book_ids = self
            .tree
            .book_ids_under(path)
            .ok_or_else(|| ModelError::UnknownNode { path: path.clone() })?;
        let mut positions = Vec::new();
        for book_id in book_ids {
            if let Some(indices) = self.positions_by_book.get(book_id) {
                positions.extend(indices.iter().map(|&i| &self.positions[i]));
            }
        }
        Ok(positions)
    }

    /// Total quantity held under the node.
    pub fn quantity(&self, path: &NodePath) -> Result<Decimal, ModelError> {
        Ok(self
            .positions_under(path)?
            .iter()
            .map(|p| p.quantity)
            .sum())
    }

    /// Previous-day PnL of the node: Σ quantity × instrument pnl scalar.
    pub fn previous_day_pnl(
        &self,
        path: &NodePath,
        source: &AnalyticsSource,
    ) -> Result<Decimal, ModelError> {
        let mut total = Decimal::ZERO;
        for position in self.positions_under(path)? {
            let analytics = source.get(&position.instrument_code).ok_or_else(|| {
                ModelError::MissingAnalytics {
                    source_name: source.name().to_string(),
                    missing: vec![position.instrument_code.clone()],
                }
            })?;
            total += position.quantity * analytics.pnl;
        }
        Ok(total)
    }

    /// The node's position vector: the element-wise sum, over every position
    /// under the node, of quantity × the instrument's PnL vector.
    ///
    /// Fails explicitly when the node is unknown, when no positions roll up
    /// into it, when the source lacks an instrument, or when vector lengths
    /// disagree. There is no sentinel value for "undefined".
    pub fn position_vector(
        &self,
        path: &NodePath,
        source: &AnalyticsSource,
    ) -> Result<PnlVector, ModelError> {
        let positions = self.positions_under(path)?;
        if positions.is_empty() {
            return Err(ModelError::EmptyNode { path: path.clone() });
        }

        let mut accumulated = PnlVector::default();
        for position in positions {
            let analytics = source.get(&position.instrument_code).ok_or_else(|| {
                ModelError::MissingAnalytics {
                    source_name: source.name().to_string(),
                    missing: vec![position.instrument_code.clone()],
                }
            })?;
            if analytics.pnl_vector.is_empty() {
                return Err(CoreError::EmptyVector.into());
            }
            accumulated.add_assign(&analytics.pnl_vector.scale(position.quantity))?;
        }
        Ok(accumulated)
    }

    /// Verifies that a source covers every instrument the positions reference,
    /// reporting the complete list of gaps.
    pub fn check_source(&self, source: &AnalyticsSource) -> Result<(), ModelError> {
        let mut missing: Vec<String> = self
            .positions
            .iter()
            .filter(|p| source.get(&p.instrument_code).is_none())
            .map(|p| p.instrument_code.clone())
            .collect();
        missing.sort();
        missing.dedup();
        if !missing.is_empty() {
            return Err(ModelError::MissingAnalytics {
                source_name: source.name().to_string(),
                missing,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{InstrumentAnalytics, OptionType};
    use rust_decimal_macros::dec;

    fn instrument(code: &str) -> Instrument {
        Instrument {
            instrument_code: code.to_string(),
            description: format!("{code} EURUSD option"),
            currency_pair: "EURUSD".to_string(),
            option_type: OptionType::Call,
            strike: dec!(1.10),
            maturity: NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
        }
    }

    fn position(code: &str, book_id: &str, quantity: Decimal) -> Position {
        Position {
            instrument_code: code.to_string(),
            book_id: book_id.to_string(),
            quantity,
            purchase_price: dec!(0.02),
        }
    }

    fn desk(book_id: &str, sub_business_unit: &str, book: &str) -> DeskAssignment {
        DeskAssignment {
            book_id: book_id.to_string(),
            business_unit: "Forex".to_string(),
            sub_business_unit: sub_business_unit.to_string(),
            trading_desk: "EMEA Vol".to_string(),
            book: book.to_string(),
        }
    }

    fn analytics(code: &str, pnl: Decimal, vector: &[i64]) -> InstrumentAnalytics {
        InstrumentAnalytics {
            instrument_code: code.to_string(),
            pnl,
            pnl_vector: PnlVector::new(vector.iter().map(|v| Decimal::from(*v)).collect()),
        }
    }

    fn sample_model() -> PortfolioModel {
        PortfolioModel::build(
            vec![instrument("FXO_001"), instrument("FXO_002")],
            vec![
                position("FXO_001", "B_01", dec!(2)),
                position("FXO_002", "B_01", dec!(1)),
                position("FXO_002", "B_02", dec!(-3)),
            ],
            vec![
                desk("B_01", "FX Options", "Book A"),
                desk("B_02", "FX Options", "Book B"),
            ],
        )
        .unwrap()
    }

    fn sample_source() -> AnalyticsSource {
        AnalyticsSource::new(
            "272-day",
            vec![
                analytics("FXO_001", dec!(10), &[10, -20, 30]),
                analytics("FXO_002", dec!(-5), &[1, 2, 3]),
            ],
        )
    }

    #[test]
    fn all_broken_references_are_collected_at_once() {
        let err = PortfolioModel::build(
            vec![instrument("FXO_001")],
            vec![
                position("FXO_001", "B_01", dec!(1)),
                position("GHOST", "B_01", dec!(1)),
                position("FXO_001", "B_99", dec!(1)),
            ],
            vec![desk("B_01", "FX Options", "Book A")],
        )
        .unwrap_err();

        match err {
            ModelError::BrokenReferences(broken) => {
                assert_eq!(
                    broken.unknown_instruments,
                    vec![("GHOST".to_string(), "B_01".to_string())]
                );
                assert_eq!(
                    broken.unknown_books,
                    vec![("FXO_001".to_string(), "B_99".to_string())]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn book_vector_is_quantity_times_instrument_vectors() {
        let model = sample_model();
        let source = sample_source();
        let book_a: NodePath = ["Forex", "FX Options", "EMEA Vol", "Book A"][..].into();
        // 2 × [10,-20,30] + 1 × [1,2,3]
        let vector = model.position_vector(&book_a, &source).unwrap();
        assert_eq!(vector.values(), &[dec!(21), dec!(-38), dec!(63)]);
    }

    #[test]
    fn root_vector_rolls_up_every_book() {
        let model = sample_model();
        let source = sample_source();
        // Book A = [21,-38,63], Book B = -3 × [1,2,3] = [-3,-6,-9]
        let vector = model
            .position_vector(&NodePath::root(), &source)
            .unwrap();
        assert_eq!(vector.values(), &[dec!(18), dec!(-44), dec!(54)]);
    }

    #[test]
    fn quantity_and_previous_day_pnl_aggregate_per_node() {
        let model = sample_model();
        let source = sample_source();
        let root = NodePath::root();
        assert_eq!(model.quantity(&root).unwrap(), dec!(0));
        // 2×10 + 1×(-5) + (-3)×(-5)
        assert_eq!(model.previous_day_pnl(&root, &source).unwrap(), dec!(30));
    }

    #[test]
    fn missing_analytics_rows_are_listed_by_check_source() {
        let model = sample_model();
        let partial = AnalyticsSource::new(
            "partial",
            vec![analytics("FXO_001", dec!(10), &[10, -20, 30])],
        );
        match model.check_source(&partial).unwrap_err() {
            ModelError::MissingAnalytics {
                source_name,
                missing,
            } => {
                assert_eq!(source_name, "partial");
                assert_eq!(missing, vec!["FXO_002".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mismatched_vector_lengths_fail_the_roll_up() {
        let model = sample_model();
        let source = AnalyticsSource::new(
            "bad lengths",
            vec![
                analytics("FXO_001", dec!(1), &[1, 2, 3]),
                analytics("FXO_002", dec!(1), &[1, 2]),
            ],
        );
        let err = model
            .position_vector(&NodePath::root(), &source)
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::Vector(CoreError::VectorLengthMismatch { .. })
        ));
    }

    #[test]
    fn unknown_nodes_and_empty_nodes_are_explicit_errors() {
        let model = sample_model();
        let source = sample_source();
        let bogus: NodePath = ["Rates"][..].into();
        assert!(matches!(
            model.position_vector(&bogus, &source).unwrap_err(),
            ModelError::UnknownNode { .. }
        ));

        // A book with no positions renders VaR undefined, not zero.
        let model = PortfolioModel::build(
            vec![instrument("FXO_001")],
            vec![position("FXO_001", "B_01", dec!(1))],
            vec![
                desk("B_01", "FX Options", "Book A"),
                desk("B_02", "FX Options", "Book Empty"),
            ],
        )
        .unwrap();
        let empty: NodePath = ["Forex", "FX Options", "EMEA Vol", "Book Empty"][..].into();
        assert!(matches!(
            model.position_vector(&empty, &source).unwrap_err(),
            ModelError::EmptyNode { .. }
        ));
    }
}
