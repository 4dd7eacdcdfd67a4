//! Circular placement of dimensions and related helpers.

use crate::color::LinearColorScale;
use crate::interaction::InteractionState;
use crate::model::{DimensionWheelLayout, LayoutPoint, WheelNodeLayout};
use crate::scene::Binding;
use ledger_core::model::SystemDimension;
use ledger_core::{LedgerConfig, Margin};
use std::f64::consts::PI;

/// `n` points on a full circle, the first at `start_angle`, spaced `2π/n` apart.
pub fn radial_positions(n: usize, center: LayoutPoint, radius: f64, start_angle: f64) -> Vec<LayoutPoint> {
    (0..n)
        .map(|i| {
            let angle = start_angle + i as f64 / n as f64 * 2.0 * PI;
            LayoutPoint::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// `n` points on the upper half circle from angle π to 2π, spaced `π/(n-1)` apart.
pub fn half_circle_positions(n: usize, center: LayoutPoint, radius: f64) -> Vec<LayoutPoint> {
    (0..n)
        .map(|i| {
            let angle = if n <= 1 {
                PI
            } else {
                PI + i as f64 * PI / (n as f64 - 1.0)
            };
            LayoutPoint::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// First two whitespace-separated words of a name, one per line.
fn label_lines(name: &str) -> Vec<String> {
    let mut words = name.split(' ');
    vec![
        words.next().unwrap_or_default().to_string(),
        words.next().unwrap_or_default().to_string(),
    ]
}

pub fn layout_dimension_wheel(
    dimensions: &[SystemDimension],
    config: &LedgerConfig,
    state: &InteractionState,
) -> DimensionWheelLayout {
    let width = config.f64_at(&["wheel", "width"], 900.0);
    let height = config.f64_at(&["wheel", "height"], 600.0);
    let margin = Margin::from_config(config, "wheel", 40.0);
    let inner_width = (width - margin.left - margin.right).max(0.0);
    let inner_height = (height - margin.top - margin.bottom).max(0.0);
    let cx = inner_width / 2.0;
    let cy = inner_height / 2.0;
    let radius = inner_width.min(inner_height) * config.f64_at(&["wheel", "radiusFactor"], 0.4);
    let node_radius = config.f64_at(&["wheel", "nodeRadius"], 45.0);
    let hover_radius = config.f64_at(&["wheel", "hoverRadius"], 50.0);

    let scale = LinearColorScale::level_ramp();
    let positions = radial_positions(dimensions.len(), LayoutPoint::new(cx, cy), radius, 0.0);
    let nodes = dimensions
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(i, (dim, p))| {
            let level = dim.level(state.show_transformed);
            let hovered = state.is_hovered(&Binding::Dimension(dim.id.clone()));
            WheelNodeLayout {
                id: dim.id.clone(),
                name: dim.name.clone(),
                level,
                fill: scale.color(level),
                x: p.x,
                y: p.y,
                radius: if hovered { hover_radius } else { node_radius },
                angle: i as f64 / dimensions.len() as f64 * 2.0 * PI,
                label_lines: label_lines(&dim.name),
            }
        })
        .collect();

    DimensionWheelLayout {
        width,
        height,
        margin,
        cx,
        cy,
        radius,
        center_radius: config.f64_at(&["wheel", "centerRadius"], 60.0),
        show_transformed: state.show_transformed,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::Fixtures;

    #[test]
    fn single_half_circle_entity_sits_at_pi() {
        let p = half_circle_positions(1, LayoutPoint::new(0.0, 0.0), 10.0);
        assert!((p[0].x + 10.0).abs() < 1e-9);
        assert!(p[0].y.abs() < 1e-9);
    }

    #[test]
    fn half_circle_ends_on_the_right() {
        let p = half_circle_positions(3, LayoutPoint::new(0.0, 0.0), 10.0);
        assert!((p[1].y + 10.0).abs() < 1e-9, "middle point is on top");
        assert!((p[2].x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn wheel_colours_follow_the_toggle() {
        let dims = Fixtures::default().system_dimensions;
        let cfg = LedgerConfig::default();
        let base = layout_dimension_wheel(&dims, &cfg, &InteractionState::default());
        let transformed = layout_dimension_wheel(
            &dims,
            &cfg,
            &InteractionState {
                show_transformed: true,
                ..InteractionState::default()
            },
        );
        assert_eq!(base.radius, 520.0 * 0.4);
        assert_eq!(base.nodes[0].level, dims[0].baseline_level);
        assert_eq!(transformed.nodes[0].level, dims[0].transformed_level);
        assert_ne!(base.nodes[0].fill, transformed.nodes[0].fill);
    }

    #[test]
    fn hovered_dimension_grows() {
        let dims = Fixtures::default().system_dimensions;
        let state = InteractionState {
            hovered: Some(Binding::Dimension(dims[1].id.clone())),
            ..InteractionState::default()
        };
        let wheel = layout_dimension_wheel(&dims, &LedgerConfig::default(), &state);
        assert_eq!(wheel.nodes[0].radius, 45.0);
        assert_eq!(wheel.nodes[1].radius, 50.0);
    }

    #[test]
    fn labels_split_on_the_first_two_words() {
        assert_eq!(label_lines("Resource Flows"), vec!["Resource", "Flows"]);
        assert_eq!(label_lines("Power"), vec!["Power", ""]);
    }
}
