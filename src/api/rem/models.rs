use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Home retrofit being modeled.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Serialize)]
pub enum SupportedUpgrade {
    /// Heat pump (SEER 15, HSPF 9) replacing the HVAC system.
    #[serde(rename = "hvac__heat_pump_seer15_hspf9")]
    #[value(name = "hvac-heat-pump-seer15-hspf9")]
    HvacHeatPumpSeer15Hspf9,

    /// High-efficiency heat pump with electric backup.
    #[serde(rename = "high_eff_hp_elec_backup")]
    HighEffHpElecBackup,

    /// Medium-efficiency heat pump with HERS sizing and no thermostat setback.
    #[serde(rename = "med_eff_hp_hers_sizing_no_setback")]
    MedEffHpHersSizingNoSetback,

    /// Basic enclosure package: air sealing, attic and duct insulation.
    #[serde(rename = "basic_enclosure_package")]
    BasicEnclosurePackage,

    /// Heat pump water heater.
    #[serde(rename = "heat_pump_water_heater")]
    HeatPumpWaterHeater,
}

/// Home's current primary heating energy source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingFuel {
    NaturalGas,
    Electricity,
    FuelOil,
    Propane,
}

/// Query of the `rem/address` endpoint.
#[must_use]
#[derive(Clone, Debug, Serialize, Builder)]
pub struct AddressRequest {
    pub upgrade: SupportedUpgrade,

    #[builder(into)]
    pub address: String,

    pub heating_fuel: HeatingFuel,
}

#[must_use]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ModelResponse {
    /// Results per fuel category, including the aggregated [`FuelResults::TOTAL`].
    pub fuel_results: FuelResults,
}

#[must_use]
#[derive(Clone, Debug, Default, Deserialize, derive_more::From)]
pub struct FuelResults(pub BTreeMap<String, FuelResult>);

impl FuelResults {
    pub const TOTAL: &'static str = "total";

    pub fn total(&self) -> Result<&FuelResult> {
        self.0.get(Self::TOTAL).with_context(|| {
            format!("the response contains no `{}` fuel results", Self::TOTAL)
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Builder)]
pub struct FuelResult {
    #[serde(default)]
    pub baseline: Option<Metrics>,

    #[serde(default)]
    pub upgrade: Option<Metrics>,

    pub delta: Metrics,
}

#[derive(Clone, Debug, Default, Deserialize, Builder)]
pub struct Metrics {
    #[serde(default)]
    pub energy: Option<Statistic>,

    #[serde(default)]
    pub emissions: Option<Statistic>,

    #[serde(default)]
    pub cost: Option<Statistic>,
}

impl Metrics {
    pub fn cost(&self) -> Result<&Statistic> {
        self.cost.as_ref().context("the cost is missing")
    }
}

/// Distribution of a modeled quantity over the similar homes.
#[derive(Clone, Debug, Deserialize)]
pub struct Statistic {
    pub mean: Measure,

    #[serde(default)]
    pub median: Option<Measure>,

    #[serde(default)]
    pub percentile_20: Option<Measure>,

    #[serde(default)]
    pub percentile_80: Option<Measure>,
}

#[cfg(test)]
impl From<f64> for Statistic {
    fn from(mean: f64) -> Self {
        Self {
            mean: Measure { value: mean, units: None },
            median: None,
            percentile_20: None,
            percentile_80: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Measure {
    pub value: f64,

    #[serde(default)]
    pub units: Option<String>,
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.units {
            Some(units) => write!(f, "{:.1} {units}", self.value),
            None => write!(f, "{:.1}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn model_response_ok() -> Result {
        // language=json
        let body = r#"{
            "fuel_results": {
                "electricity": {
                    "baseline": {
                        "energy": {"mean": {"value": 9624.2, "units": "kWh"}},
                        "cost": {"mean": {"value": 1535.73, "units": "usd"}}
                    },
                    "upgrade": {
                        "energy": {"mean": {"value": 12112.4, "units": "kWh"}},
                        "cost": {"mean": {"value": 1933.28, "units": "usd"}}
                    },
                    "delta": {
                        "energy": {"mean": {"value": 2488.2, "units": "kWh"}},
                        "emissions": {"mean": {"value": 712.1, "units": "kgCO2e"}},
                        "cost": {"mean": {"value": 397.55, "units": "usd"}}
                    }
                },
                "total": {
                    "delta": {
                        "cost": {
                            "mean": {"value": -1200.4, "units": "usd"},
                            "median": {"value": -1102.0, "units": "usd"},
                            "percentile_20": {"value": -1750.3, "units": "usd"},
                            "percentile_80": {"value": -640.1, "units": "usd"}
                        }
                    }
                }
            },
            "rates": {"electricity": 0.16}
        }"#;
        let response = serde_json::from_str::<ModelResponse>(body)?;
        assert_eq!(response.fuel_results.0.len(), 2);
        let total = response.fuel_results.total()?;
        assert_abs_diff_eq!(total.delta.cost()?.mean.value, -1200.4);
        assert!(total.baseline.is_none());
        let median = total.delta.cost()?.median.as_ref().context("no median")?;
        assert_abs_diff_eq!(median.value, -1102.0);
        Ok(())
    }

    #[test]
    fn missing_total_err() {
        let response = ModelResponse::default();
        let error = response.fuel_results.total().unwrap_err();
        assert_eq!(error.to_string(), "the response contains no `total` fuel results");
    }

    #[test]
    fn request_query_ok() -> Result {
        let request = AddressRequest::builder()
            .upgrade(SupportedUpgrade::HvacHeatPumpSeer15Hspf9)
            .address("1 Main St, Springfield")
            .heating_fuel(HeatingFuel::NaturalGas)
            .build();
        let value = serde_json::to_value(&request)?;
        assert_eq!(value["upgrade"], "hvac__heat_pump_seer15_hspf9");
        assert_eq!(value["heating_fuel"], "natural_gas");
        assert_eq!(value["address"], "1 Main St, Springfield");
        Ok(())
    }
}
