use serde::{Deserialize, Serialize};

use crate::{Error, LinkClass, Position};

pub const DEFAULT_LEO_HEIGHT: f64 = 45.0;
pub const DEFAULT_MEO_HEIGHT: f64 = 450.0;
pub const DEFAULT_LEO_MAX_REACH: f64 = 75.0;
pub const DEFAULT_MEO_MAX_REACH: f64 = 225.0;

/// How the per-node congestion cost is derived from the containing cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum NodeCostModel {
    /// `last evaluated pair distance * level - 1`
    #[default]
    TrailingDistance,
    /// `factor * level`
    Scaled { factor: f64 },
}

/// Layer constants and cost parameters of a routing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Altitude class of LEO nodes
    pub leo_height: f64,
    /// Altitude class of MEO nodes
    pub meo_height: f64,
    /// Maximum LEO to LEO link distance
    pub leo_max_reach: f64,
    /// Maximum MEO to MEO and LEO to MEO link distance
    pub meo_max_reach: f64,
    pub leo_multiplier: f64,
    pub meo_multiplier: f64,
    pub mixed_multiplier: f64,
    pub node_cost: NodeCostModel,
    /// Endpoints only link to LEO nodes strictly closer than this
    pub max_link_distance: Option<f64>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            leo_height: DEFAULT_LEO_HEIGHT,
            meo_height: DEFAULT_MEO_HEIGHT,
            leo_max_reach: DEFAULT_LEO_MAX_REACH,
            meo_max_reach: DEFAULT_MEO_MAX_REACH,
            leo_multiplier: 2.0,
            meo_multiplier: 1.0,
            mixed_multiplier: 2.5,
            node_cost: NodeCostModel::TrailingDistance,
            max_link_distance: None,
        }
    }
}

impl RoutingConfig {
    /// Checks that layer constants describe two distinct layers with
    /// finite, non-negative reaches and multipliers
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let finite_non_negative = [
            ("leo_max_reach", self.leo_max_reach),
            ("meo_max_reach", self.meo_max_reach),
            ("leo_multiplier", self.leo_multiplier),
            ("meo_multiplier", self.meo_multiplier),
            ("mixed_multiplier", self.mixed_multiplier),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !self.leo_height.is_finite() || !self.meo_height.is_finite() {
            return Err(Error::InvalidConfig(
                "Layer heights must be finite".to_string(),
            ));
        }
        if self.leo_height == self.meo_height {
            return Err(Error::InvalidConfig(format!(
                "LEO and MEO layers share height {}",
                self.leo_height
            )));
        }

        if let NodeCostModel::Scaled { factor } = self.node_cost {
            if !factor.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "Node cost factor must be finite, got {factor}"
                )));
            }
        }

        if let Some(limit) = self.max_link_distance {
            if limit.is_nan() || limit <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "max_link_distance must be positive, got {limit}"
                )));
            }
        }

        Ok(())
    }

    /// Classifies a node pair by the altitude class of both ends
    pub fn classify(&self, a: &Position, b: &Position) -> LinkClass {
        if a.z == self.leo_height && b.z == self.leo_height {
            LinkClass::LeoLeo
        } else if a.z == self.meo_height && b.z == self.meo_height {
            LinkClass::MeoMeo
        } else {
            LinkClass::Mixed
        }
    }

    /// Same-layer links span the 3D distance, cross-layer visibility only
    /// depends on the horizontal separation.
    pub fn link_distance(&self, class: LinkClass, a: &Position, b: &Position) -> f64 {
        match class {
            LinkClass::LeoLeo | LinkClass::MeoMeo => a.distance(b),
            LinkClass::Mixed => a.planar_distance(b),
        }
    }

    pub fn reach(&self, class: LinkClass) -> f64 {
        match class {
            LinkClass::LeoLeo => self.leo_max_reach,
            LinkClass::MeoMeo | LinkClass::Mixed => self.meo_max_reach,
        }
    }

    pub fn multiplier(&self, class: LinkClass) -> f64 {
        match class {
            LinkClass::LeoLeo => self.leo_multiplier,
            LinkClass::MeoMeo => self.meo_multiplier,
            LinkClass::Mixed => self.mixed_multiplier,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails validation.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(RoutingConfig::default().validate().is_ok());
    }

    #[test]
    fn classification() {
        let config = RoutingConfig::default();
        let leo = Position::new(0.0, 0.0, DEFAULT_LEO_HEIGHT);
        let meo = Position::new(0.0, 0.0, DEFAULT_MEO_HEIGHT);
        let ground = Position::ground(0.0, 0.0);

        assert_eq!(config.classify(&leo, &leo), LinkClass::LeoLeo);
        assert_eq!(config.classify(&meo, &meo), LinkClass::MeoMeo);
        assert_eq!(config.classify(&leo, &meo), LinkClass::Mixed);
        assert_eq!(config.classify(&meo, &leo), LinkClass::Mixed);
        assert_eq!(config.classify(&ground, &leo), LinkClass::Mixed);
    }

    #[test]
    fn mixed_links_ignore_altitude() {
        let config = RoutingConfig::default();
        let leo = Position::new(0.0, 0.0, DEFAULT_LEO_HEIGHT);
        let meo = Position::new(30.0, 40.0, DEFAULT_MEO_HEIGHT);

        assert_eq!(config.link_distance(LinkClass::Mixed, &leo, &meo), 50.0);
        assert_eq!(config.reach(LinkClass::Mixed), DEFAULT_MEO_MAX_REACH);
    }

    #[test]
    fn rejects_shared_heights() {
        let config = RoutingConfig {
            meo_height: DEFAULT_LEO_HEIGHT,
            ..RoutingConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_negative_reach() {
        let config = RoutingConfig {
            leo_max_reach: -1.0,
            ..RoutingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = RoutingConfig::from_json(
            r#"{"leo_max_reach": 100.0, "node_cost": {"model": "scaled", "factor": 480.0}}"#,
        )
        .unwrap();

        assert_eq!(config.leo_max_reach, 100.0);
        assert_eq!(config.meo_max_reach, DEFAULT_MEO_MAX_REACH);
        assert_eq!(config.node_cost, NodeCostModel::Scaled { factor: 480.0 });

        let back = RoutingConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
