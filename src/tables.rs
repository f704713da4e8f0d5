use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::api::rem::{FuelResults, Statistic};

pub fn build_fuel_results_table(fuel_results: &FuelResults) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec![
        "Fuel",
        "Baseline cost",
        "Upgrade cost",
        "Δ Cost",
        "Δ Energy",
        "Δ Emissions",
    ]);

    // Total goes last:
    let rows = fuel_results
        .0
        .iter()
        .sorted_by_key(|&(fuel, _)| (fuel == FuelResults::TOTAL, fuel));

    for (fuel, result) in rows {
        let is_total = fuel == FuelResults::TOTAL;
        let delta_cost = result.delta.cost.as_ref();
        table.add_row(vec![
            if is_total {
                Cell::new(fuel).add_attribute(Attribute::Bold)
            } else {
                Cell::new(fuel)
            },
            measure_cell(result.baseline.as_ref().and_then(|metrics| metrics.cost.as_ref()))
                .add_attribute(Attribute::Dim),
            measure_cell(result.upgrade.as_ref().and_then(|metrics| metrics.cost.as_ref())),
            measure_cell(delta_cost).fg(delta_cost.map_or(Color::Reset, |cost| {
                if cost.mean.value <= 0.0 { Color::Green } else { Color::Red }
            })),
            measure_cell(result.delta.energy.as_ref()),
            measure_cell(result.delta.emissions.as_ref()),
        ]);
    }
    table
}

fn measure_cell(statistic: Option<&Statistic>) -> Cell {
    statistic
        .map_or_else(|| Cell::new("—"), |statistic| Cell::new(&statistic.mean))
        .set_alignment(CellAlignment::Right)
}
