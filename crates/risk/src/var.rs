use crate::error::RiskError;
use crate::quantile::lower_tail_quantile;
use core_types::PnlVector;
use portfolio::{AnalyticsSource, ModelError, NodePath, PortfolioModel};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Computes VaR and Marginal VaR over one portfolio model and one analytics
/// source.
///
/// Construction validates the source against the model and rolls up the
/// position vector of every hierarchy node exactly once. Confidence levels
/// are then free to vary: `var` only re-reads a quantile from the cached
/// vectors, never recomputing them. One calculator per analytics source is
/// the scenario grid's data axis.
///
/// A desk-table book with no current positions has no position vector and so
/// no defined VaR. Such nodes are skipped during roll-up rather than failing
/// the source: asking for one directly still returns the `EmptyNode` error,
/// but every other node stays computable.
#[derive(Debug)]
pub struct VarCalculator {
    source_name: String,
    vectors: HashMap<NodePath, PnlVector>,
    empty_nodes: HashSet<NodePath>,
}

impl VarCalculator {
    pub fn new(model: &PortfolioModel, source: &AnalyticsSource) -> Result<Self, RiskError> {
        model.check_source(source)?;

        let mut vectors = HashMap::new();
        let mut empty_nodes = HashSet::new();
        for path in model.tree().paths() {
            match model.position_vector(&path, source) {
                Ok(vector) => {
                    vectors.insert(path, vector);
                }
                Err(ModelError::EmptyNode { .. }) => {
                    tracing::warn!(node = %path, "no positions roll up into node, VaR undefined");
                    empty_nodes.insert(path);
                }
                Err(err) => return Err(err.into()),
            }
        }

        tracing::debug!(
            source = source.name(),
            nodes = vectors.len(),
            skipped = empty_nodes.len(),
            "position vectors rolled up"
        );

        Ok(Self {
            source_name: source.name().to_string(),
            vectors,
            empty_nodes,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Whether the node has a defined position vector (and therefore a VaR).
    pub fn covers(&self, path: &NodePath) -> bool {
        self.vectors.contains_key(path)
    }

    /// The cached position vector of a node.
    pub fn position_vector(&self, path: &NodePath) -> Result<&PnlVector, RiskError> {
        if let Some(vector) = self.vectors.get(path) {
            return Ok(vector);
        }
        if self.empty_nodes.contains(path) {
            Err(ModelError::EmptyNode { path: path.clone() }.into())
        } else {
            Err(ModelError::UnknownNode { path: path.clone() }.into())
        }
    }

    /// VaR of the node at the given confidence: the lower-tail quantile of
    /// its position vector.
    pub fn var(&self, path: &NodePath, confidence: Decimal) -> Result<Decimal, RiskError> {
        let vector = self.position_vector(path)?;
        lower_tail_quantile(vector.values(), confidence)
    }

    /// Marginal VaR of the node: how much the parent's VaR moves when this
    /// node's contribution is removed, i.e. `VaR(parent) − VaR(parent − node)`.
    ///
    /// The root has no parent, so its marginal VaR is `None`. Marginal VaR is
    /// not additive across siblings; that is inherent to quantiles and is not
    /// corrected for.
    pub fn marginal_var(
        &self,
        path: &NodePath,
        confidence: Decimal,
    ) -> Result<Option<Decimal>, RiskError> {
        let Some(parent) = path.parent() else {
            return Ok(None);
        };

        let parent_vector = self.position_vector(&parent)?;
        let node_vector = self.position_vector(path)?;
        let parent_without_node = parent_vector
            .subtract(node_vector)
            .map_err(ModelError::from)?;

        let parent_var = lower_tail_quantile(parent_vector.values(), confidence)?;
        let var_without_node = lower_tail_quantile(parent_without_node.values(), confidence)?;
        Ok(Some(parent_var - var_without_node))
    }
}
