#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::unwrap_used)]

use openmap::OpenHashMap;
use plotters::prelude::*;
use rand::Rng;

// Fixed table capacity; load is varied through the key count
const TABLE_CAPACITY: usize = 100_000;
// Load factors from 0.1 to 0.85 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;
const MIN_LOAD: f64 = 0.1;
const MAX_LOAD: f64 = 0.85;

// Table states measured at each load factor
const STATES: [&str; 3] = ["Fresh", "Churned", "Compacted"];

/// Chain statistics of one table state at one load factor
struct Sample {
    max_chain: usize,
    mean_chain: f64,
}

fn sample(map: &OpenHashMap<u64, ()>) -> Sample {
    Sample { max_chain: map.max_chain(), mean_chain: map.mean_chain() }
}

/// Fills the map with random keys until it holds `n_keys` live
/// entries, returning the keys that were inserted
fn fill_random(map: &mut OpenHashMap<u64, ()>, n_keys: usize) -> Vec<u64> {
    let mut rng = rand::rng();
    let mut keys = Vec::with_capacity(n_keys);
    while map.len() < n_keys {
        let key: u64 = rng.random_range(1..u64::MAX);
        let (_, inserted) = map.insert(key, ());
        if inserted {
            keys.push(key);
        }
    }
    keys
}

/// Removes every other key and inserts the same number of fresh ones,
/// leaving the table at the same live count but riddled with the
/// tombstones a real delete-heavy workload produces
fn churn(map: &mut OpenHashMap<u64, ()>, keys: &[u64]) {
    let mut rng = rand::rng();
    let mut removed = 0usize;
    for key in keys.iter().step_by(2) {
        if map.remove(key).is_some() {
            removed += 1;
        }
    }

    let mut added = 0usize;
    while added < removed {
        let key: u64 = rng.random_range(1..u64::MAX);
        let (_, inserted) = map.insert(key, ());
        if inserted {
            added += 1;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from MIN_LOAD to MAX_LOAD
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| MIN_LOAD + (MAX_LOAD - MIN_LOAD) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    println!("Load factors: {:?}", load_factors);

    // One series per table state
    let mut max_chains: Vec<Vec<(f64, f64)>> = vec![Vec::new(); STATES.len()];
    let mut mean_chains: Vec<Vec<(f64, f64)>> = vec![Vec::new(); STATES.len()];

    for &load in &load_factors {
        let n_keys = (TABLE_CAPACITY as f64 * load) as usize;
        println!("Testing load factor {:.2} ({} keys)", load, n_keys);

        let mut map: OpenHashMap<u64, ()> = OpenHashMap::with_capacity(TABLE_CAPACITY);
        map.set_max_load_factor(0.95);

        let keys = fill_random(&mut map, n_keys);
        let fresh = sample(&map);

        churn(&mut map, &keys);
        let churned = sample(&map);

        map.compress();
        let compacted = sample(&map);

        for (state_idx, state) in [fresh, churned, compacted].into_iter().enumerate() {
            println!(
                "  {}: max chain = {}, mean chain = {:.2}",
                STATES[state_idx], state.max_chain, state.mean_chain
            );
            max_chains[state_idx].push((load, state.max_chain as f64));
            mean_chains[state_idx].push((load, state.mean_chain));
        }
    }

    // Shared plot configuration
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: longest probe chain per load factor
    let root = BitMapBackend::new("max_chain.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let top = max_chains
        .iter()
        .flat_map(|series| series.iter().map(|&(_, y)| y))
        .fold(0.0, |max: f64, y| max.max(y)) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Longest Probe Chain vs Load Factor", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0f64, 0.0..top)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Longest Chain (slots)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (state_idx, &state) in STATES.iter().enumerate() {
        let color = &colors[state_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(max_chains[state_idx].iter().copied(), line_style))?
            .label(state)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            max_chains[state_idx]
                .iter()
                .map(|&point| Circle::new(point, marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: mean probe chain per load factor
    let root = BitMapBackend::new("mean_chain.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let top = mean_chains
        .iter()
        .flat_map(|series| series.iter().map(|&(_, y)| y))
        .fold(0.0, |max: f64, y| max.max(y)) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Mean Probe Chain vs Load Factor", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0f64, 0.0..top)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Mean Chain (slots)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (state_idx, &state) in STATES.iter().enumerate() {
        let color = &colors[state_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(mean_chains[state_idx].iter().copied(), line_style))?
            .label(state)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            mean_chains[state_idx]
                .iter()
                .map(|&point| Circle::new(point, marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: max_chain.png, mean_chain.png");

    Ok(())
}
