//! Tests for line fitting, candidate models and model selection.
//!
//! ## Test Organization
//!
//! 1. **Least Squares** - Line fits and degenerate axes
//! 2. **Candidates** - Linear, quadratic and exponential fits
//! 3. **Selection** - R² ranking and tie-breaking
//! 4. **Formatting** - Formulas and display

use approx::assert_relative_eq;

use prism::internals::algorithms::models::{
    fit_candidates, fit_exponential, fit_linear, fit_quadratic, select_best, Model, ModelFit,
    ModelKind,
};
use prism::internals::algorithms::regression::{fit_line, index_axis};

fn linear_data(n: usize, a: f64, b: f64) -> Vec<f64> {
    (0..n).map(|i| a * i as f64 + b).collect()
}

// ============================================================================
// Least Squares
// ============================================================================

/// Test an exact line.
#[test]
fn test_fit_line_exact() {
    let x = index_axis::<f64>(5);
    let line = fit_line(&x, &[1.0, 3.0, 5.0, 7.0, 9.0]);

    assert!(!line.degenerate);
    assert_relative_eq!(line.slope, 2.0, epsilon = 1e-12);
    assert_relative_eq!(line.intercept, 1.0, epsilon = 1e-12);
    assert_relative_eq!(line.evaluate(10.0), 21.0, epsilon = 1e-12);
}

/// Test that a constant x axis is degenerate.
#[test]
fn test_fit_line_degenerate() {
    let line = fit_line(&[1.0, 1.0, 1.0], &[2.0, 4.0, 6.0]);

    assert!(line.degenerate);
    assert_eq!(line.slope, 0.0);
    assert_relative_eq!(line.intercept, 4.0, epsilon = 1e-12);
}

/// Test the index axis.
#[test]
fn test_index_axis() {
    assert_eq!(index_axis::<f64>(4), vec![0.0, 1.0, 2.0, 3.0]);
    assert!(index_axis::<f32>(0).is_empty());
}

// ============================================================================
// Candidates
// ============================================================================

/// Test that y = 3x + 2 is recovered by the linear fit.
#[test]
fn test_linear_recovery() {
    let y = linear_data(10, 3.0, 2.0);
    let fit = fit_linear(&y).unwrap();

    assert_eq!(fit.kind(), ModelKind::Linear);
    let coeffs = fit.coefficients();
    assert_relative_eq!(coeffs[0], 3.0, epsilon = 1e-12);
    assert_relative_eq!(coeffs[1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
}

/// Test that perfect squares are recovered by the quadratic fit.
///
/// Samples sit at x = 0..n-1, so `[1, 4, 9, 16, 25]` is `(x + 1)²`. Read with
/// x starting at 1 the same data would be `x²` with `b = c = 0`.
#[test]
fn test_quadratic_recovery() {
    let fit = fit_quadratic(&[1.0, 4.0, 9.0, 16.0, 25.0]).unwrap();

    assert_eq!(fit.model, Model::Quadratic { a: 1.0, b: 2.0, c: 1.0 });
    assert_eq!(fit.r_squared, 1.0);
}

/// Test that the quadratic fit needs three samples.
#[test]
fn test_quadratic_too_short() {
    assert!(fit_quadratic(&[1.0, 2.0]).is_none());
}

/// Test that exponential growth is recovered on the log scale.
#[test]
fn test_exponential_recovery() {
    let y: Vec<f64> = (0..10).map(|i| 2.0 * (0.5 * i as f64).exp()).collect();
    let fit = fit_exponential(&y).unwrap();

    let coeffs = fit.coefficients();
    assert_relative_eq!(coeffs[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(coeffs[1], 0.5, epsilon = 1e-9);
    assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-9);
}

/// Test that non-positive samples exclude the exponential model.
#[test]
fn test_exponential_requires_positive() {
    assert!(fit_exponential(&[1.0, 0.0, 2.0, 3.0]).is_none());
    assert!(fit_exponential(&[1.0, -2.0, 3.0]).is_none());

    let kinds: Vec<ModelKind> = fit_candidates(&[1.0, 0.0, 2.0, 3.0])
        .iter()
        .map(|f| f.kind())
        .collect();
    assert_eq!(kinds, vec![ModelKind::Linear, ModelKind::Quadratic]);
}

/// Test that R² stays within bounds for noisy data.
#[test]
fn test_candidates_r_squared_bounds() {
    let y = [3.0, 9.0, 1.0, 7.0, 2.0, 8.0, 4.0];
    for fit in fit_candidates(&y) {
        assert!(fit.r_squared >= 0.0 && fit.r_squared <= 1.0, "{fit}");
    }
}

/// Test that empty input has no candidates.
#[test]
fn test_candidates_empty() {
    let fits = fit_candidates::<f64>(&[]);
    assert!(fits.is_empty());
    assert!(select_best(&fits).is_none());
}

/// Test that a single sample gives degenerate fits with R² of 0.
#[test]
fn test_single_sample() {
    let fits = fit_candidates(&[5.0]);
    assert!(fits.iter().all(|f| f.r_squared == 0.0));

    let best = select_best(&fits).unwrap();
    assert_eq!(best.model, Model::Linear { a: 0.0, b: 5.0 });
}

// ============================================================================
// Selection
// ============================================================================

/// Test that a perfect line selects LINEAR over an equally perfect quadratic.
#[test]
fn test_select_linear_on_tie() {
    let fits = fit_candidates(&linear_data(10, 3.0, 2.0));
    assert_eq!(select_best(&fits).unwrap().kind(), ModelKind::Linear);
}

/// Test that perfect squares select QUADRATIC.
#[test]
fn test_select_quadratic() {
    let fits = fit_candidates(&[1.0, 4.0, 9.0, 16.0, 25.0]);
    assert_eq!(select_best(&fits).unwrap().kind(), ModelKind::Quadratic);
}

/// Test that exponential growth selects EXPONENTIAL.
#[test]
fn test_select_exponential() {
    let y: Vec<f64> = (0..10).map(|i| 2.0 * (0.5 * i as f64).exp()).collect();
    let fits = fit_candidates(&y);
    assert_eq!(select_best(&fits).unwrap().kind(), ModelKind::Exponential);
}

/// Test that constant data selects LINEAR with R² of 1.
#[test]
fn test_select_constant() {
    let fits = fit_candidates(&[4.0, 4.0, 4.0, 4.0]);
    let best = select_best(&fits).unwrap();

    assert_eq!(best.kind(), ModelKind::Linear);
    assert_eq!(best.r_squared, 1.0);
}

/// Test the tie-break order of `beats`.
#[test]
fn test_beats_tie_break() {
    let linear = ModelFit {
        model: Model::Linear { a: 1.0, b: 0.0 },
        r_squared: 0.5,
    };
    let quadratic = ModelFit {
        model: Model::Quadratic { a: 1.0, b: 0.0, c: 0.0 },
        r_squared: 0.5,
    };
    let better = ModelFit {
        model: Model::Exponential { a: 1.0, b: 0.1 },
        r_squared: 0.6,
    };

    assert!(linear.beats(&quadratic));
    assert!(!quadratic.beats(&linear));
    assert!(better.beats(&linear));
    assert!(!linear.beats(&linear));
}

/// Test that equal fits keep the first occurrence.
#[test]
fn test_select_first_occurrence() {
    let first = ModelFit {
        model: Model::Linear { a: 1.0, b: 0.0 },
        r_squared: 0.9,
    };
    let second = ModelFit {
        model: Model::Linear { a: 2.0, b: 0.0 },
        r_squared: 0.9,
    };
    let fits = [first, second];
    assert_eq!(select_best(&fits).unwrap().model, first.model);
}

// ============================================================================
// Formatting
// ============================================================================

/// Test formulas with six decimals.
#[test]
fn test_formulas() {
    assert_eq!(
        Model::Linear { a: 3.0, b: 2.0 }.formula(),
        "y = 3.000000*x +2.000000"
    );
    assert_eq!(
        Model::Linear { a: 1.5, b: -0.25 }.formula(),
        "y = 1.500000*x -0.250000"
    );
    assert_eq!(
        Model::Quadratic { a: 1.0, b: 2.0, c: 1.0 }.formula(),
        "y = 1.000000*x^2 +2.000000*x +1.000000"
    );
    assert_eq!(
        Model::Exponential { a: 2.0, b: 0.5 }.formula(),
        "y = 2.000000 * e^(0.500000*x)"
    );
}

/// Test model evaluation.
#[test]
fn test_evaluate() {
    assert_eq!(Model::Quadratic { a: 1.0, b: 2.0, c: 1.0 }.evaluate(3.0), 16.0);
    assert_eq!(Model::Linear { a: 3.0, b: 2.0 }.predict_indexed(3), vec![2.0, 5.0, 8.0]);
    assert_relative_eq!(
        Model::Exponential { a: 2.0, b: 1.0 }.evaluate(1.0),
        2.0 * std::f64::consts::E,
        epsilon = 1e-12
    );
}

/// Test kind names and the fit display.
#[test]
fn test_display() {
    assert_eq!(ModelKind::Linear.to_string(), "LINEAR");
    assert_eq!(ModelKind::Quadratic.to_string(), "QUADRATIC");
    assert_eq!(ModelKind::Exponential.to_string(), "EXPONENTIAL");

    let fit = ModelFit {
        model: Model::Linear { a: 3.0, b: 2.0 },
        r_squared: 1.0,
    };
    assert_eq!(fit.to_string(), "LINEAR y = 3.000000*x +2.000000 (R^2 = 1.000000)");
}
