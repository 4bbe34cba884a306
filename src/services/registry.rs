use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ModelSettings;
use crate::core::{Classifier, ScalingMode};
use crate::models::Tier;
use crate::services::LogisticModel;

/// Load state of one tier's model
#[derive(Debug, Clone)]
pub enum TierModel {
    Ready(Arc<dyn Classifier>),
    /// Loading failed; the reason is kept for diagnostics
    Unavailable(String),
}

/// Process-wide, read-only set of loaded classifiers
///
/// Built once during startup. A tier whose artifact fails to load stays
/// unavailable for the life of the process while the other tier keeps
/// serving.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    tiers: HashMap<Tier, TierModel>,
}

impl ModelRegistry {
    /// Registry with every tier unavailable
    pub fn empty() -> Self {
        let tiers = Tier::ALL
            .iter()
            .map(|tier| (*tier, TierModel::Unavailable("not loaded".to_string())))
            .collect();
        Self { tiers }
    }

    /// Load both tier artifacts from the configured paths
    pub async fn load(settings: &ModelSettings, scaling: ScalingMode) -> Self {
        let mut registry = Self::empty();

        for tier in Tier::ALL {
            let path = match tier {
                Tier::Simple => &settings.simple_path,
                Tier::Enhanced => &settings.enhanced_path,
            };

            match LogisticModel::load(path, tier, scaling).await {
                Ok(model) => {
                    tracing::info!("Loaded {} model '{}' from {}", tier, model.model_id, path);
                    registry = registry.with_classifier(tier, Arc::new(model));
                }
                Err(e) => {
                    tracing::error!("Error loading {} model from {}: {}", tier, path, e);
                    registry.tiers.insert(tier, TierModel::Unavailable(e.to_string()));
                }
            }
        }

        registry
    }

    /// Install a classifier for a tier
    pub fn with_classifier(mut self, tier: Tier, classifier: Arc<dyn Classifier>) -> Self {
        self.tiers.insert(tier, TierModel::Ready(classifier));
        self
    }

    /// Classifier for a tier, `None` if it never loaded
    pub fn classifier(&self, tier: Tier) -> Option<&dyn Classifier> {
        match self.tiers.get(&tier) {
            Some(TierModel::Ready(classifier)) => Some(classifier.as_ref()),
            _ => None,
        }
    }

    /// Why a tier failed to load, `None` when it is serving
    pub fn unavailable_reason(&self, tier: Tier) -> Option<&str> {
        match self.tiers.get(&tier) {
            Some(TierModel::Ready(_)) => None,
            Some(TierModel::Unavailable(reason)) => Some(reason.as_str()),
            None => Some("not loaded"),
        }
    }

    pub fn is_available(&self, tier: Tier) -> bool {
        matches!(self.tiers.get(&tier), Some(TierModel::Ready(_)))
    }

    pub fn all_available(&self) -> bool {
        Tier::ALL.iter().all(|tier| self.is_available(*tier))
    }
}
