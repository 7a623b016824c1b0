//! Procedural quiz problems with pre-computed solutions.
//!
//! Each template is a pure builder over its drawn parameters, so the worked
//! solution embeds exactly the values that produced the stored answer and
//! tolerance. Ids encode the template and parameters, which keeps repeated
//! generations within a session distinguishable.

use std::f64::consts::PI;

use rand::Rng;

use prep_core::model::{Difficulty, QuizQuestion};

/// Gravitational acceleration used across the hydraulics templates (m/s²).
const GRAVITY: f64 = 9.81;

/// Draw from a stepped uniform range: `min + k·step` for a uniform `k` in
/// `0..=floor((max - min) / step)`, rounded to `decimals` places.
fn stepped_between<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
    step: f64,
    decimals: u32,
) -> f64 {
    let steps = ((max - min) / step).floor() as u64;
    let k = rng.random_range(0..=steps);
    round_to(min + k as f64 * step, decimals)
}

/// Round half away from zero to `decimals` places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format with at most `decimals` places, trimming trailing zeros.
fn fmt(value: f64, decimals: u32) -> String {
    let rendered = format!("{:.*}", decimals as usize, round_to(value, decimals));
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}

/// Pipe discharge from diameter and velocity (Q = A × V).
#[must_use]
pub fn pipe_flow_question(diameter: f64, velocity: f64) -> QuizQuestion {
    let area = PI * diameter * diameter / 4.0;
    let flow = area * velocity * 1000.0;

    QuizQuestion {
        id: format!("dyn-pipe-{}-{}", fmt(diameter, 3), fmt(velocity, 3)),
        topic: "Pipe Flow".to_string(),
        difficulty: Difficulty::Medium,
        question: format!(
            "A {}-mm diameter pipe carries water at a velocity of {} m/s. \
             Calculate the flow rate in L/s.",
            fmt(diameter * 1000.0, 0),
            fmt(velocity, 2)
        ),
        hint: "Use Q = A × V and convert m³/s to L/s.".to_string(),
        solution: format!(
            "Given:\n- Diameter, D = {} mm = {} m\n- Velocity, V = {} m/s\n\n\
             Step 1: Area\n$$A = \\frac{{\\pi D^2}}{{4}} = {} \\text{{ m}}^2$$\n\n\
             Step 2: Flow\n$$Q = A \\times V = {} \\times {} = {} \\text{{ m}}^3/\\text{{s}}$$\n\n\
             Step 3: Convert\n$$Q = {} \\text{{ L/s}}$$",
            fmt(diameter * 1000.0, 0),
            fmt(diameter, 3),
            fmt(velocity, 2),
            fmt(area, 4),
            fmt(area, 4),
            fmt(velocity, 2),
            fmt(area * velocity, 4),
            fmt(flow, 1)
        ),
        answer: round_to(flow, 1),
        tolerance: 0.5,
        unit: "L/s".to_string(),
        key_formula: Some("Q = A × V".to_string()),
        image: None,
        solution_image: None,
    }
}

/// Froude number for a rectangular channel (Fr = V / √(g·y)).
#[must_use]
pub fn froude_question(depth: f64, velocity: f64) -> QuizQuestion {
    let froude = velocity / (GRAVITY * depth).sqrt();

    QuizQuestion {
        id: format!("dyn-froude-{}-{}", fmt(depth, 2), fmt(velocity, 2)),
        topic: "Open Channel Flow".to_string(),
        difficulty: Difficulty::Hard,
        question: format!(
            "A rectangular channel flows at depth {} m with velocity {} m/s. \
             Compute the Froude number.",
            fmt(depth, 2),
            fmt(velocity, 2)
        ),
        hint: "Use Fr = V / √(g × y).".to_string(),
        solution: format!(
            "Given:\n- Depth, y = {} m\n- Velocity, V = {} m/s\n\n\
             $$Fr = \\frac{{V}}{{\\sqrt{{g y}}}} = \\frac{{{}}}{{\\sqrt{{9.81 \\times {}}}}} = {}$$",
            fmt(depth, 2),
            fmt(velocity, 2),
            fmt(velocity, 2),
            fmt(depth, 2),
            fmt(froude, 3)
        ),
        answer: round_to(froude, 3),
        tolerance: 0.02,
        unit: String::new(),
        key_formula: Some("Fr = V / √(g × y)".to_string()),
        image: None,
        solution_image: None,
    }
}

/// Pump input power from discharge, head, and efficiency.
#[must_use]
pub fn pump_power_question(flow: f64, head: f64, efficiency: f64) -> QuizQuestion {
    let power = (1000.0 * GRAVITY * flow * head) / efficiency / 1000.0;

    QuizQuestion {
        id: format!("dyn-pump-{}-{}", fmt(flow, 3), fmt(head, 2)),
        topic: "Pump Calculations".to_string(),
        difficulty: Difficulty::Medium,
        question: format!(
            "A pump delivers {} L/s against a head of {} m with efficiency {}%. \
             Calculate the input power in kW.",
            fmt(flow * 1000.0, 1),
            fmt(head, 1),
            fmt(efficiency * 100.0, 0)
        ),
        hint: "Power = (ρ g Q H) / η.".to_string(),
        solution: format!(
            "Given:\n- Q = {} m³/s\n- H = {} m\n- η = {}\n\n\
             $$P = \\frac{{1000 \\times 9.81 \\times {} \\times {}}}{{{}}} = {} \\text{{ kW}}$$",
            fmt(flow, 3),
            fmt(head, 1),
            fmt(efficiency, 2),
            fmt(flow, 3),
            fmt(head, 1),
            fmt(efficiency, 2),
            fmt(power, 2)
        ),
        answer: round_to(power, 2),
        tolerance: 0.2,
        unit: "kW".to_string(),
        key_formula: Some("P = (ρ × g × Q × H) / η".to_string()),
        image: None,
        solution_image: None,
    }
}

/// Specific weight from density (γ = ρ × g).
#[must_use]
pub fn specific_weight_question(density: f64) -> QuizQuestion {
    let specific_weight = density * GRAVITY;

    QuizQuestion {
        id: format!("dyn-weight-{}", fmt(density, 0)),
        topic: "Fluid Properties".to_string(),
        difficulty: Difficulty::Easy,
        question: format!(
            "Compute the specific weight of a fluid with density {} kg/m³.",
            fmt(density, 0)
        ),
        hint: "γ = ρ × g.".to_string(),
        solution: format!(
            "$$\\gamma = {} \\times 9.81 = {} \\text{{ N/m}}^3$$",
            fmt(density, 0),
            fmt(specific_weight, 1)
        ),
        answer: round_to(specific_weight, 1),
        tolerance: 1.0,
        unit: "N/m³".to_string(),
        key_formula: Some("γ = ρ × g".to_string()),
        image: None,
        solution_image: None,
    }
}

/// Hydrostatic pressure at depth in water (p = γ × h).
#[must_use]
pub fn hydrostatic_pressure_question(depth: f64) -> QuizQuestion {
    let pressure = depth * GRAVITY;

    QuizQuestion {
        id: format!("dyn-pressure-{}", fmt(depth, 0)),
        topic: "Hydrostatics".to_string(),
        difficulty: Difficulty::Easy,
        question: format!(
            "Find the hydrostatic pressure at a depth of {} m in water. \
             Provide answer in kPa.",
            fmt(depth, 0)
        ),
        hint: "p = γ × h (γ = 9.81 kN/m³).".to_string(),
        solution: format!(
            "$$p = 9.81 \\times {} = {} \\text{{ kPa}}$$",
            fmt(depth, 0),
            fmt(pressure, 2)
        ),
        answer: round_to(pressure, 2),
        tolerance: 0.5,
        unit: "kPa".to_string(),
        key_formula: Some("p = γ × h".to_string()),
        image: None,
        solution_image: None,
    }
}

/// Generate one problem per template with freshly drawn parameters.
pub fn generate_dynamic_questions<R: Rng + ?Sized>(rng: &mut R) -> Vec<QuizQuestion> {
    vec![
        pipe_flow_question(
            stepped_between(rng, 0.2, 0.6, 0.05, 3),
            stepped_between(rng, 1.5, 3.5, 0.1, 3),
        ),
        froude_question(
            stepped_between(rng, 1.0, 3.0, 0.25, 2),
            stepped_between(rng, 1.5, 4.0, 0.1, 2),
        ),
        pump_power_question(
            stepped_between(rng, 0.03, 0.08, 0.005, 3),
            stepped_between(rng, 18.0, 35.0, 1.0, 2),
            stepped_between(rng, 0.65, 0.85, 0.05, 2),
        ),
        specific_weight_question(stepped_between(rng, 780.0, 1050.0, 10.0, 0)),
        hydrostatic_pressure_question(stepped_between(rng, 8.0, 25.0, 1.0, 0)),
    ]
}
