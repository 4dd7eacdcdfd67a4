#![forbid(unsafe_code)]

//! `ledger` bundles the Empathy Ledger visualizations behind one dependency.
//!
//! # Features
//!
//! - `render`: layouts, scenes and SVG output (`ledger::render`)
//! - `raster`: PNG output via pure-Rust SVG rasterization
//! - `gallery`: the Airtable story gallery (`ledger::gallery`)

pub use ledger_core::*;

#[cfg(feature = "gallery")]
pub use ledger_gallery as gallery;

#[cfg(feature = "render")]
pub mod render {
    pub use ledger_render::gauge::NeedleState;
    pub use ledger_render::sankey::layout_flow;
    pub use ledger_render::interaction::{Action, InteractionState, Tooltip, pointer_at, update};
    pub use ledger_render::scene::{Binding, Scene};
    pub use ledger_render::stepper::{StepCard, Stepper, step_card, step_count};
    pub use ledger_render::svg::{SvgRenderOptions, render_scene_svg};
    pub use ledger_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use ledger_render::{VisualizationKind, VisualizationLayout};

    use ledger_core::{Fixtures, LedgerConfig};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Data(#[from] ledger_core::Error),
        #[error(transparent)]
        Render(#[from] ledger_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Turns an arbitrary string into a conservative SVG `id` token, so several visualizations
    /// can be inlined in one document.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len() + 3);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let trimmed = out.trim_matches('-');
        if trimmed.is_empty() {
            return "el-untitled".to_string();
        }
        if trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            trimmed.to_string()
        } else {
            format!("el-{trimmed}")
        }
    }

    /// Fixtures, config and SVG options bundled for repeated renders. All work is CPU-bound and
    /// synchronous.
    #[derive(Debug, Clone)]
    pub struct HeadlessRenderer {
        pub fixtures: Fixtures,
        pub config: LedgerConfig,
        pub svg: SvgRenderOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            let config = LedgerConfig::default();
            Self {
                fixtures: Fixtures::default(),
                svg: SvgRenderOptions::from_config(&config),
                config,
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
            self.fixtures = fixtures;
            self
        }

        /// Replaces the config and re-derives the SVG options from its `svg` section.
        pub fn with_config(mut self, config: LedgerConfig) -> Self {
            self.svg = SvgRenderOptions::from_config(&config);
            self.config = config;
            self
        }

        /// Fails on broken references in the bundled fixtures.
        pub fn validate(&self) -> Result<()> {
            Ok(ledger_core::validate_fixtures(&self.fixtures)?)
        }

        pub fn layout(&self, kind: VisualizationKind, state: &InteractionState) -> Result<VisualizationLayout> {
            Ok(ledger_render::layout(kind, &self.fixtures, &self.config, state)?)
        }

        pub fn layout_json(&self, kind: VisualizationKind, state: &InteractionState) -> Result<serde_json::Value> {
            Ok(ledger_render::layout_json(kind, &self.fixtures, &self.config, state)?)
        }

        pub fn scene(&self, kind: VisualizationKind, state: &InteractionState) -> Result<Scene> {
            Ok(ledger_render::build_scene(kind, &self.fixtures, &self.config, state)?)
        }

        pub fn render_svg(&self, kind: VisualizationKind, state: &InteractionState) -> Result<String> {
            self.render_svg_with(kind, state, &self.svg)
        }

        pub fn render_svg_with(
            &self,
            kind: VisualizationKind,
            state: &InteractionState,
            svg: &SvgRenderOptions,
        ) -> Result<String> {
            Ok(ledger_render::render_svg(kind, &self.fixtures, &self.config, state, svg)?)
        }

        pub fn render_svg_with_diagram_id(
            &self,
            kind: VisualizationKind,
            state: &InteractionState,
            diagram_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self.render_svg_with(kind, state, &svg)
        }

        /// Applies `action` to `state` and reports whether the view needs redrawing.
        pub fn dispatch(&self, state: &mut InteractionState, action: Action) -> bool {
            update(state, action)
        }

        /// Moves the pointer to `(x, y)` over the scene for `kind`, updating the hover.
        pub fn pointer_move(
            &self,
            kind: VisualizationKind,
            state: &mut InteractionState,
            x: f64,
            y: f64,
        ) -> Result<bool> {
            let scene = self.scene(kind, state)?;
            let mut changed = false;
            for action in pointer_at(&scene, state, x, y) {
                changed |= update(state, action);
            }
            Ok(changed)
        }

        /// Gauge needle released toward the bundled assessment at `now_ms`. Keep it across
        /// renders and call [`NeedleState::set_assessment`] when the fixtures change.
        pub fn needle(&self, now_ms: f64) -> NeedleState {
            NeedleState::for_assessment(self.fixtures.assessment.as_ref(), now_ms)
        }

        /// Points `needle` at the current assessment; returns whether its target moved.
        pub fn sync_needle(&self, needle: &mut NeedleState, now_ms: f64) -> bool {
            needle.set_assessment(now_ms, self.fixtures.assessment.as_ref())
        }

        pub fn step_card(&self, kind: VisualizationKind, state: &InteractionState, step: usize) -> Option<StepCard> {
            step_card(kind, &self.fixtures, state.flow_model, step)
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            kind: VisualizationKind,
            state: &InteractionState,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_svg(kind, state)?;
            raster::svg_to_png(&svg, raster)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn svg_ids_are_sanitized() {
            assert_eq!(sanitize_svg_id("  value flow!  "), "value-flow");
            assert_eq!(sanitize_svg_id("42"), "el-42");
            assert_eq!(sanitize_svg_id("***"), "el-untitled");
        }

        #[test]
        fn diagram_id_lands_on_the_root() {
            let svg = HeadlessRenderer::new()
                .render_svg_with_diagram_id(VisualizationKind::ValueFlow, &InteractionState::default(), "flow 1")
                .expect("svg");
            assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" id="flow-1""#));
        }

        #[test]
        fn pointer_move_hovers_and_unhovers() {
            let renderer = HeadlessRenderer::new();
            let mut state = InteractionState::default();
            let kind = VisualizationKind::SystemsModel;
            let scene = renderer.scene(kind, &state).expect("scene");
            // A dimension whose top edge is not crossed by a loop.
            let anchor = scene
                .bound_nodes()
                .into_iter()
                .filter(|n| matches!(n.binding, Some(Binding::Dimension(_))))
                .filter_map(|n| n.hit.as_ref())
                .map(|h| h.anchor())
                .find(|a| matches!(scene.hit_test(a.x, a.y + 2.0), Some(Binding::Dimension(_))))
                .expect("dimension");

            assert!(renderer.pointer_move(kind, &mut state, anchor.x, anchor.y + 2.0).expect("move"));
            assert!(matches!(state.hovered, Some(Binding::Dimension(_))));
            assert!(renderer.pointer_move(kind, &mut state, -50.0, -50.0).expect("move"));
            assert_eq!(state.hovered, None);
        }

        #[test]
        fn default_fixtures_validate() {
            HeadlessRenderer::new().validate().expect("valid");
        }
    }
}
