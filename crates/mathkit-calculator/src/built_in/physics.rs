//! Physics calculators.
//!
//! Most physics tools evaluate one closed-form formula; those are rows of the
//! [`FORMULAS`] table and share a single plugin implementation. Projectile
//! motion, Ohm's law and the kinematic equations have their own solvers.
//!
//! Every numeric input honours its `<field>_unit` multiplier.

use crate::constants::{COULOMB_CONSTANT, GRAVITATIONAL_CONSTANT, STANDARD_GRAVITY};
use crate::error::{CalcError, CalcResult};
use crate::format::{exponential, fixed, number};
use crate::inputs::CalculatorInputs;
use crate::numeric;
use crate::plugin::{CalculatorPlugin, FieldSpec};
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};

const G: f64 = STANDARD_GRAVITY;

fn nonzero(value: f64, what: &str) -> CalcResult<f64> {
    if value == 0.0 {
        return Err(CalcError::domain(format!("{what} cannot be zero.")));
    }
    Ok(value)
}

fn f4(value: f64) -> String {
    fixed(value, 4)
}

/// A calculator that evaluates a single formula over its fields
///
/// `evaluate` receives the field values, unit multipliers applied, in the
/// order of `fields`.
#[derive(Debug, Clone, Copy)]
pub struct FormulaCalculator {
    pub name: &'static str,
    pub title: &'static str,
    pub formula: &'static str,
    pub fields: &'static [FieldSpec],
    pub evaluate: fn(&[f64]) -> CalcResult<String>,
}

impl CalculatorPlugin for FormulaCalculator {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn required_fields(&self) -> &[FieldSpec] {
        self.fields
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let values = self
            .fields
            .iter()
            .map(|field| inputs.get_unit_float(field.name))
            .collect::<CalcResult<Vec<_>>>()?;
        let text = (self.evaluate)(&values)?;

        let mut steps = vec!["**1. Identify variables:**".to_string()];
        steps.extend(self.fields.iter().zip(&values).map(|(field, v)| format!("   {} = {}", field.name, number(*v))));
        steps.extend(["**2. Apply formula:**".to_string(), format!("   {}", self.formula)]);
        steps.extend(["**3. Result:**".to_string(), format!("   {text}")]);

        Ok(CalculationResult::text(text).with_steps(steps))
    }
}

/// Single-formula physics calculators
pub const FORMULAS: &[FormulaCalculator] = &[
    FormulaCalculator {
        name: "force",
        title: "Force Calculator (Newton's 2nd Law)",
        formula: "F = ma",
        fields: &[FieldSpec::number("mass"), FieldSpec::number("acceleration")],
        evaluate: |v: &[f64]| Ok(format!("F = ma = {} × {} = {}", number(v[0]), number(v[1]), f4(v[0] * v[1]))),
    },
    FormulaCalculator {
        name: "mass",
        title: "Mass Calculator",
        formula: "M = ρV",
        fields: &[FieldSpec::number("density"), FieldSpec::number("volume")],
        evaluate: |v: &[f64]| Ok(format!("M = ρV = {} × {} = {}", number(v[0]), number(v[1]), f4(v[0] * v[1]))),
    },
    FormulaCalculator {
        name: "density",
        title: "Density Calculator",
        formula: "ρ = m/V",
        fields: &[FieldSpec::number("mass"), FieldSpec::number("volume")],
        evaluate: |v: &[f64]| {
            let volume = nonzero(v[1], "Volume")?;
            Ok(format!("ρ = m/V = {} / {} = {}", number(v[0]), number(volume), f4(v[0] / volume)))
        },
    },
    FormulaCalculator {
        name: "momentum",
        title: "Momentum Calculator",
        formula: "p = mv",
        fields: &[FieldSpec::number("mass"), FieldSpec::number("velocity")],
        evaluate: |v: &[f64]| Ok(format!("p = mv = {} × {} = {}", number(v[0]), number(v[1]), f4(v[0] * v[1]))),
    },
    FormulaCalculator {
        name: "kinetic_energy",
        title: "Kinetic Energy Calculator",
        formula: "KE = 0.5mv²",
        fields: &[FieldSpec::number("mass"), FieldSpec::number("velocity")],
        evaluate: |v: &[f64]| {
            let (m, vel) = (v[0], v[1]);
            Ok(format!("KE = 0.5mv² = 0.5 × {} × {}² = {}", number(m), number(vel), f4(0.5 * m * vel * vel)))
        },
    },
    FormulaCalculator {
        name: "potential_energy",
        title: "Potential Energy Calculator",
        formula: "PE = mgh",
        fields: &[FieldSpec::number("mass"), FieldSpec::number("height")],
        evaluate: |v: &[f64]| {
            let (m, h) = (v[0], v[1]);
            Ok(format!("PE = mgh = {} × {} × {} = {}", number(m), fixed(G, 2), number(h), f4(m * G * h)))
        },
    },
    FormulaCalculator {
        name: "work",
        title: "Work Calculator",
        formula: "W = Fd cos(θ)",
        fields: &[FieldSpec::number("force"), FieldSpec::number("distance"), FieldSpec::number("angle")],
        evaluate: |v: &[f64]| {
            let (f, d, angle) = (v[0], v[1], v[2]);
            let w = f * d * angle.to_radians().cos();
            Ok(format!("W = Fd cos(θ) = {} × {} × cos({}°) = {}", number(f), number(d), number(angle), f4(w)))
        },
    },
    FormulaCalculator {
        name: "power",
        title: "Power Calculator",
        formula: "P = W/t",
        fields: &[FieldSpec::number("work"), FieldSpec::number("time")],
        evaluate: |v: &[f64]| {
            let t = nonzero(v[1], "Time")?;
            Ok(format!("P = W/t = {} / {} = {} Watts", number(v[0]), number(t), f4(v[0] / t)))
        },
    },
    FormulaCalculator {
        name: "pressure",
        title: "Pressure Calculator",
        formula: "P = F/A",
        fields: &[FieldSpec::number("force"), FieldSpec::number("area")],
        evaluate: |v: &[f64]| {
            let area = nonzero(v[1], "Area")?;
            Ok(format!("P = F/A = {} / {} = {} Pa", number(v[0]), number(area), f4(v[0] / area)))
        },
    },
    FormulaCalculator {
        name: "torque",
        title: "Torque Calculator",
        formula: "τ = rF sin(θ)",
        fields: &[FieldSpec::number("force"), FieldSpec::number("leverArm"), FieldSpec::number("angle")],
        evaluate: |v: &[f64]| {
            let (f, r, angle) = (v[0], v[1], v[2]);
            let torque = r * f * angle.to_radians().sin();
            Ok(format!("τ = rFsin(θ) = {} × {} × sin({}°) = {} Nm", number(r), number(f), number(angle), f4(torque)))
        },
    },
    FormulaCalculator {
        name: "angular_acceleration",
        title: "Angular Acceleration Calculator",
        formula: "α = (ωf - ωi) / t",
        fields: &[
            FieldSpec::number("initialAngularVelocity"),
            FieldSpec::number("finalAngularVelocity"),
            FieldSpec::number("time"),
        ],
        evaluate: |v: &[f64]| {
            let (w1, w2) = (v[0], v[1]);
            let t = nonzero(v[2], "Time")?;
            Ok(format!(
                "α = (ωf - ωi) / t = ({} - {}) / {} = {} rad/s²",
                number(w2),
                number(w1),
                number(t),
                f4((w2 - w1) / t)
            ))
        },
    },
    FormulaCalculator {
        name: "angular_momentum",
        title: "Angular Momentum Calculator",
        formula: "L = Iω",
        fields: &[FieldSpec::number("momentOfInertia"), FieldSpec::number("angularVelocity")],
        evaluate: |v: &[f64]| {
            Ok(format!("L = Iω = {} × {} = {} kg·m²/s", number(v[0]), number(v[1]), f4(v[0] * v[1])))
        },
    },
    FormulaCalculator {
        name: "velocity",
        title: "Velocity Calculator",
        formula: "v = d/t",
        fields: &[FieldSpec::number("distance"), FieldSpec::number("time")],
        evaluate: |v: &[f64]| {
            let t = nonzero(v[1], "Time")?;
            Ok(format!("v = d/t = {} / {} = {} m/s", number(v[0]), number(t), f4(v[0] / t)))
        },
    },
    FormulaCalculator {
        name: "centrifugal_force",
        title: "Centrifugal Force Calculator",
        formula: "Fc = mv²/r",
        fields: &[FieldSpec::number("mass"), FieldSpec::number("velocity"), FieldSpec::number("radius")],
        evaluate: |v: &[f64]| {
            let (m, vel) = (v[0], v[1]);
            let r = nonzero(v[2], "Radius")?;
            Ok(format!("Fc = mv²/r = {} × {}² / {} = {} N", number(m), number(vel), number(r), f4(m * vel * vel / r)))
        },
    },
    FormulaCalculator {
        name: "coulombs_law",
        title: "Coulomb's Law Calculator",
        formula: "Fe = k|q1q2|/r²",
        fields: &[FieldSpec::number("charge1"), FieldSpec::number("charge2"), FieldSpec::number("distance")],
        evaluate: |v: &[f64]| {
            let (q1, q2) = (v[0], v[1]);
            let r = nonzero(v[2], "Distance")?;
            let force = COULOMB_CONSTANT * (q1 * q2).abs() / (r * r);
            Ok(format!(
                "Fe = k|q1q2|/r² = {} * |{}*{}| / {}² = {} N",
                exponential(COULOMB_CONSTANT, 2),
                number(q1),
                number(q2),
                number(r),
                exponential(force, 4)
            ))
        },
    },
    FormulaCalculator {
        name: "displacement",
        title: "Displacement Calculator",
        formula: "Δx = x - x0",
        fields: &[FieldSpec::number("initialPosition"), FieldSpec::number("finalPosition")],
        evaluate: |v: &[f64]| {
            let (x0, x) = (v[0], v[1]);
            Ok(format!("Δx = x - x0 = {} - {} = {}", number(x), number(x0), f4(x - x0)))
        },
    },
    FormulaCalculator {
        name: "falling_distance",
        title: "Falling Object Distance Calculator",
        formula: "d = v0·t + ½gt²",
        fields: &[FieldSpec::number("initialVelocity"), FieldSpec::number("time")],
        evaluate: |v: &[f64]| {
            let (v0, t) = (v[0], v[1]);
            let d = v0 * t + 0.5 * G * t * t;
            Ok(format!(
                "d = v0*t + 0.5*g*t² = {}*{} + 0.5*{}*{}² = {} m",
                number(v0),
                number(t),
                number(G),
                number(t),
                f4(d)
            ))
        },
    },
    FormulaCalculator {
        name: "friction",
        title: "Friction Calculator",
        formula: "Ff = μN",
        fields: &[FieldSpec::number("normalForce"), FieldSpec::number("frictionCoefficient")],
        evaluate: |v: &[f64]| {
            let (normal, mu) = (v[0], v[1]);
            Ok(format!("Ff = μN = {} × {} = {} N", number(mu), number(normal), f4(mu * normal)))
        },
    },
    FormulaCalculator {
        name: "gravitational_force",
        title: "Gravitational Force Calculator",
        formula: "Fg = G·m1·m2/r²",
        fields: &[FieldSpec::number("mass1"), FieldSpec::number("mass2"), FieldSpec::number("distance")],
        evaluate: |v: &[f64]| {
            let r = nonzero(v[2], "Distance")?;
            let force = GRAVITATIONAL_CONSTANT * v[0] * v[1] / (r * r);
            Ok(format!("Fg = G*m1*m2/r² = {} N", exponential(force, 4)))
        },
    },
    FormulaCalculator {
        name: "heat",
        title: "Heat Calculator",
        formula: "Q = mcΔT",
        fields: &[
            FieldSpec::number("mass"),
            FieldSpec::number("specificHeat"),
            FieldSpec::number("temperatureChange"),
        ],
        evaluate: |v: &[f64]| {
            let (m, c, dt) = (v[0], v[1], v[2]);
            Ok(format!("Q = mcΔT = {} × {} × {} = {} J", number(m), number(c), number(dt), f4(m * c * dt)))
        },
    },
    FormulaCalculator {
        name: "pulley_tension",
        title: "Simple Pulley Tension Calculator",
        formula: "T = mg",
        fields: &[FieldSpec::number("mass")],
        evaluate: |v: &[f64]| {
            Ok(format!("Tension (static) = mg = {} × {} = {} N", number(v[0]), number(G), f4(v[0] * G)))
        },
    },
    FormulaCalculator {
        name: "acceleration",
        title: "Acceleration Calculator",
        formula: "a = (vf - v0)/t",
        fields: &[FieldSpec::number("initialVelocity"), FieldSpec::number("finalVelocity"), FieldSpec::number("time")],
        evaluate: |v: &[f64]| {
            let (v0, vf) = (v[0], v[1]);
            let t = nonzero(v[2], "Time")?;
            Ok(format!(
                "a = (vf - v0)/t = ({} - {}) / {} = {} m/s²",
                number(vf),
                number(v0),
                number(t),
                f4((vf - v0) / t)
            ))
        },
    },
    FormulaCalculator {
        name: "absolute_pressure",
        title: "Absolute Pressure Calculator",
        formula: "Pabs = Pgauge + Patm",
        fields: &[FieldSpec::number("gaugePressure"), FieldSpec::number("atmosphericPressure")],
        evaluate: |v: &[f64]| {
            Ok(format!("Pabs = Pgauge + Patm = {} + {} = {} Pa", number(v[0]), number(v[1]), f4(v[0] + v[1])))
        },
    },
    FormulaCalculator {
        name: "wavelength",
        title: "Wavelength Calculator",
        formula: "λ = v/f",
        fields: &[FieldSpec::number("waveSpeed"), FieldSpec::number("frequency")],
        evaluate: |v: &[f64]| {
            let f = nonzero(v[1], "Frequency")?;
            Ok(format!("λ = v/f = {} / {} = {} m", number(v[0]), number(f), f4(v[0] / f)))
        },
    },
    FormulaCalculator {
        name: "beer_lambert",
        title: "Beer's Lambert Law Calculator",
        formula: "A = εlc",
        fields: &[
            FieldSpec::number("absorptivity"),
            FieldSpec::number("pathLength"),
            FieldSpec::number("concentration"),
        ],
        evaluate: |v: &[f64]| {
            let (e, l, c) = (v[0], v[1], v[2]);
            Ok(format!("Absorbance A = εlc = {} × {} × {} = {}", number(e), number(l), number(c), f4(e * l * c)))
        },
    },
    FormulaCalculator {
        name: "resultant_vector",
        title: "Resultant Vector Calculator",
        formula: "R = √(a² + b² + 2ab cos θ)",
        fields: &[FieldSpec::number("magnitudeA"), FieldSpec::number("magnitudeB"), FieldSpec::number("angle")],
        evaluate: |v: &[f64]| {
            let (a, b, angle) = (v[0], v[1], v[2]);
            let r = (a * a + b * b + 2.0 * a * b * angle.to_radians().cos()).max(0.0).sqrt();
            Ok(format!("Resultant R = √(a² + b² + 2ab cosθ) = {}", f4(r)))
        },
    },
];

/// Flight time, apex and range of a projectile launched above flat ground
#[derive(Debug, Default)]
pub struct ProjectileMotionCalculator;

const PROJECTILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("initialVelocity"),
    FieldSpec::number("launchAngle"),
    FieldSpec::number("initialHeight").optional(),
];

impl CalculatorPlugin for ProjectileMotionCalculator {
    fn name(&self) -> &str {
        "projectile_motion"
    }

    fn title(&self) -> &str {
        "Projectile Motion Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        PROJECTILE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let v0 = inputs.get_unit_float("initialVelocity")?;
        let angle = inputs.get_float("launchAngle")?;
        let h0 = inputs.get_optional_unit_float("initialHeight")?.unwrap_or(0.0);

        let theta = angle.to_radians();
        let (vx, vy) = (v0 * theta.cos(), v0 * theta.sin());

        // y(t) = h0 + vy·t - ½g·t² = 0
        let discriminant = vy * vy + 2.0 * G * h0;
        if discriminant < 0.0 {
            return Err(CalcError::domain("The projectile never reaches the ground."));
        }
        let flight_time = (vy + discriminant.sqrt()) / G;
        let apex_time = (vy / G).max(0.0);
        let max_height = h0 + vy * apex_time - 0.5 * G * apex_time * apex_time;
        let range = vx * flight_time;

        let steps = vec![
            "**1. Components:**".to_string(),
            format!("   vx = {} cos({}°) = {} m/s", number(v0), number(angle), fixed(vx, 2)),
            format!("   vy = {} sin({}°) = {} m/s", number(v0), number(angle), fixed(vy, 2)),
            "**2. Time of Flight:**".to_string(),
            format!("   Solves y(t) = {} + {}t - 4.9t² = 0", number(h0), fixed(vy, 2)),
            format!("   t = {} s", number(flight_time)),
            "**3. Max Height:**".to_string(),
            format!("   Occurs at t = vy/g = {} s", fixed(apex_time, 2)),
            format!("   Max Height = {} m", fixed(max_height, 2)),
        ];

        let mut trajectory: Vec<(f64, f64)> =
            numeric::sample(|t| h0 + vy * t - 0.5 * G * t * t, 0.0, flight_time, flight_time / 50.0)
                .into_iter()
                .map(|(t, y)| (vx * t, y))
                .collect();
        trajectory.push((range, 0.0));

        let plot = PlotSpec::new(PlotType::Line).dataset(
            Dataset::new("Trajectory").points(trajectory).style("borderColor", "orange").style("fill", false),
        );

        Ok(CalculationResult::text(format!(
            "Time of Flight: {} s\nMaximum Height: {} m\nHorizontal Range: {} m",
            fixed(flight_time, 2),
            fixed(max_height, 2),
            fixed(range, 2)
        ))
        .with_steps(steps)
        .with_plot(plot))
    }
}

/// Solves `V = IR` for whichever quantity `solveFor` names
#[derive(Debug, Default)]
pub struct OhmsLawCalculator;

const OHMS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("solveFor").optional(),
    FieldSpec::number("voltage").optional(),
    FieldSpec::number("current").optional(),
    FieldSpec::number("resistance").optional(),
];

impl CalculatorPlugin for OhmsLawCalculator {
    fn name(&self) -> &str {
        "ohms_law"
    }

    fn title(&self) -> &str {
        "Ohm's Law Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        OHMS_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let text = match inputs.get_string_or("solveFor", "resistance").as_str() {
            "voltage" => {
                let i = inputs.get_unit_float("current")?;
                let r = inputs.get_unit_float("resistance")?;
                format!("Voltage = I × R = {} A × {} Ω = {} V", number(i), number(r), f4(i * r))
            }
            "current" => {
                let v = inputs.get_unit_float("voltage")?;
                let r = nonzero(inputs.get_unit_float("resistance")?, "Resistance")?;
                format!("Current = V / R = {} V / {} Ω = {} A", number(v), number(r), f4(v / r))
            }
            _ => {
                let v = inputs.get_unit_float("voltage")?;
                let i = nonzero(inputs.get_unit_float("current")?, "Current")?;
                format!("Resistance = V / I = {} V / {} A = {} Ω", number(v), number(i), f4(v / i))
            }
        };
        Ok(CalculationResult::text(text))
    }
}

/// Constant-acceleration motion (SUVAT) from any three known quantities
#[derive(Debug, Default)]
pub struct KinematicsCalculator;

const KINEMATICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("s").optional(),
    FieldSpec::number("u").optional(),
    FieldSpec::number("v").optional(),
    FieldSpec::number("a").optional(),
    FieldSpec::number("t").optional(),
];

impl CalculatorPlugin for KinematicsCalculator {
    fn name(&self) -> &str {
        "kinematics"
    }

    fn title(&self) -> &str {
        "Kinematic Equations Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        KINEMATICS_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let s = inputs.get_optional_float("s")?;
        let u = inputs.get_optional_float("u")?;
        let v = inputs.get_optional_float("v")?;
        let a = inputs.get_optional_float("a")?;
        let t = inputs.get_optional_float("t")?;

        let known = [s, u, v, a, t].iter().filter(|x| x.is_some()).count();
        if known < 3 {
            return Err(CalcError::range("Please provide at least 3 known variables to solve for the others."));
        }

        let (equations, text) = match (s, u, v, a, t) {
            (_, Some(u), _, Some(a), Some(t)) => {
                let v = u + a * t;
                let s = u * t + 0.5 * a * t * t;
                (
                    ["v = u + at", "s = ut + ½at²"],
                    format!("Final Velocity (v): {}\nDisplacement (s): {}", f4(v), f4(s)),
                )
            }
            (_, Some(u), Some(v), Some(a), None) => {
                if a == 0.0 {
                    return Err(CalcError::domain(if u == v {
                        "Insufficient information: with zero acceleration, provide s or t."
                    } else {
                        "Invalid input: Constant acceleration 0 implies u=v."
                    }));
                }
                let t = (v - u) / a;
                let s = (v * v - u * u) / (2.0 * a);
                (["t = (v - u) / a", "s = (v² - u²) / 2a"], format!("Time (t): {}\nDisplacement (s): {}", f4(t), f4(s)))
            }
            (Some(s), _, Some(v), _, Some(t)) => {
                let t = nonzero(t, "Time")?;
                let u = 2.0 * s / t - v;
                let a = (v - u) / t;
                (
                    ["u = 2s/t - v", "a = (v - u) / t"],
                    format!("Initial Velocity (u): {}\nAcceleration (a): {}", f4(u), f4(a)),
                )
            }
            (Some(s), Some(u), _, Some(a), None) => {
                let v_squared = u * u + 2.0 * a * s;
                if v_squared < 0.0 {
                    return Err(CalcError::domain("No real solution for final velocity."));
                }
                let v = v_squared.sqrt();
                let t = if a == 0.0 { s / nonzero(u, "Initial velocity")? } else { (v - u) / a };
                (
                    ["v² = u² + 2as", "t = (v - u) / a"],
                    format!("Final Velocity (v): ±{}\nTime (t): {} (using +v)", f4(v), f4(t)),
                )
            }
            _ => {
                return Err(CalcError::unsupported(
                    "Solver combination not implemented yet. Try providing u, a, t or u, v, a.",
                ));
            }
        };

        let mut steps = vec!["**1. Known values:**".to_string()];
        for (label, value) in [("s", s), ("u", u), ("v", v), ("a", a), ("t", t)] {
            if let Some(value) = value {
                steps.push(format!("   {label} = {}", number(value)));
            }
        }
        steps.push("**2. Equations used:**".to_string());
        steps.extend(equations.iter().map(|e| format!("   {e}")));
        steps.push("**3. Result:**".to_string());
        steps.extend(text.lines().map(|line| format!("   {line}")));

        Ok(CalculationResult::text(text).with_steps(steps))
    }
}
