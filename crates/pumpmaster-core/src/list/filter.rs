//! Categorical filtering for the pump list.

use crate::error::PumpMasterError;
use crate::pump::model::PumpDevice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The two categorical dimensions pumps can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Type,
    Area,
}

impl FilterDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::Type => "type",
            FilterDimension::Area => "area",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = PumpMasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(FilterDimension::Type),
            "area" => Ok(FilterDimension::Area),
            other => Err(PumpMasterError::internal(format!(
                "Unknown filter dimension: {other}"
            ))),
        }
    }
}

/// Filter values serialized into a list query; a key is present only when
/// its set is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<String>>,
}

/// The value universe offered for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub areas: Vec<String>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.areas.is_empty()
    }

    /// Derives options from a loaded page of pumps: distinct values,
    /// sorted. This undercounts the true universe once server-side
    /// pagination is active, so it is only the fallback when no dedicated
    /// options source is available.
    pub fn from_pumps(pumps: &[PumpDevice]) -> Self {
        let types: BTreeSet<String> = pumps.iter().map(|p| p.pump_type.clone()).collect();
        let areas: BTreeSet<String> = pumps.iter().map(|p| p.area_block.clone()).collect();
        Self {
            types: types.into_iter().collect(),
            areas: areas.into_iter().collect(),
        }
    }
}

/// Active filter sets plus the cached option universe.
///
/// Value sets are ordered so query serialization and rendering stay
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    types: BTreeSet<String>,
    areas: BTreeSet<String>,
    options: FilterOptions,
    /// True once options came from the dedicated full-dataset source;
    /// page-derived options never overwrite them.
    static_options: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Type => &mut self.types,
            FilterDimension::Area => &mut self.areas,
        }
    }

    fn set(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Type => &self.types,
            FilterDimension::Area => &self.areas,
        }
    }

    /// Adds the value if absent, removes it if present. Toggling twice
    /// restores the prior state.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) {
        let set = self.set_mut(dimension);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    pub fn is_active(&self, dimension: FilterDimension, value: &str) -> bool {
        self.set(dimension).contains(value)
    }

    pub fn clear_dimension(&mut self, dimension: FilterDimension) {
        self.set_mut(dimension).clear();
    }

    pub fn clear_all(&mut self) {
        self.types.clear();
        self.areas.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.types.is_empty() || !self.areas.is_empty()
    }

    pub fn active_filter_count(&self) -> usize {
        self.types.len() + self.areas.len()
    }

    pub fn active_values(&self, dimension: FilterDimension) -> Vec<String> {
        self.set(dimension).iter().cloned().collect()
    }

    /// The filter portion of a list query. `None` when no filter is
    /// active; inside, each key appears only when its set is non-empty.
    pub fn query_params(&self) -> Option<FilterParams> {
        if !self.has_active_filters() {
            return None;
        }
        Some(FilterParams {
            types: (!self.types.is_empty()).then(|| self.types.iter().cloned().collect()),
            areas: (!self.areas.is_empty()).then(|| self.areas.iter().cloned().collect()),
        })
    }

    /// Installs options from the dedicated full-dataset source.
    pub fn set_static_options(&mut self, options: FilterOptions) {
        self.options = options;
        self.static_options = true;
    }

    /// Refreshes fallback options from the loaded page. A no-op once
    /// static options are installed.
    pub fn absorb_page(&mut self, pumps: &[PumpDevice]) {
        if self.static_options {
            return;
        }
        self.options = FilterOptions::from_pumps(pumps);
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn has_static_options(&self) -> bool {
        self.static_options
    }
}
