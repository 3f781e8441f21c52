/// Linear map from a progress range onto an output range, clamped at the ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframes {
    pub input: (f64, f64),
    pub output: (f64, f64),
}

impl Keyframes {
    pub const fn new(from: f64, to: f64) -> Self {
        Keyframes { input: (0.0, 1.0), output: (from, to) }
    }

    pub fn at(&self, progress: f64) -> f64 {
        let (i0, i1) = self.input;
        let (o0, o1) = self.output;
        if (i1 - i0).abs() < f64::EPSILON {
            return o0;
        }
        let t = ((progress - i0) / (i1 - i0)).clamp(0.0, 1.0);
        o0 + (o1 - o0) * t
    }
}

pub const GALLERY_SCALE: Keyframes = Keyframes::new(1.04, 1.0);
pub const GALLERY_Y: Keyframes = Keyframes::new(6.0, -4.0);
pub const COMPANY_LOGO_SCALE: Keyframes = Keyframes::new(1.08, 0.94);
pub const CONTACT_GLOW_Y: Keyframes = Keyframes::new(8.0, -6.0);
pub const CONTACT_GLOW_OPACITY: Keyframes = Keyframes::new(0.6, 0.4);

/// Where the scroll range starts and ends, as viewport fractions:
/// `start` is reached when the element's top hits `start_at`, `end` when its
/// bottom hits `end_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOffsets {
    pub start_at: f64,
    pub end_at: f64,
}

/// `["start 85%", "end 15%"]`
pub const GRID_PASS: ScrollOffsets = ScrollOffsets { start_at: 0.85, end_at: 0.15 };
/// `["start 80%", "end 20%"]`
pub const COMPANIES_PASS: ScrollOffsets = ScrollOffsets { start_at: 0.80, end_at: 0.20 };

/// Normalized 0..=1 progress of an element through its scroll range.
#[cfg_attr(not(test), allow(dead_code))]
pub fn scroll_progress(element_top: f64, element_height: f64, viewport_height: f64, offsets: ScrollOffsets) -> f64 {
    // Distance the element top travels between the two offset points.
    let start_top = viewport_height * offsets.start_at;
    let end_top = viewport_height * offsets.end_at - element_height;
    let span = start_top - end_top;
    if span <= 0.0 {
        return if element_top <= end_top { 1.0 } else { 0.0 };
    }
    ((start_top - element_top) / span).clamp(0.0, 1.0)
}

/// Resolved style parameters for one element at one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    pub scale: f64,
    pub translate_y: f64,
    pub opacity: f64,
}

impl Default for StyleParams {
    fn default() -> Self {
        StyleParams { scale: 1.0, translate_y: 0.0, opacity: 1.0 }
    }
}

impl StyleParams {
    pub fn transform(&self) -> String {
        format!("translateY({:.2}px) scale({:.3})", self.translate_y, self.scale)
    }

    pub fn to_css(&self) -> String {
        format!("transform:{};opacity:{:.2}", self.transform(), self.opacity)
    }
}

/// Custom properties for a CSS view-timeline that replays `params` between
/// the two offsets. The element starts out at its progress-0 style.
pub fn timeline_style(params: fn(f64) -> StyleParams, offsets: ScrollOffsets) -> String {
    let from = params(0.0);
    let to = params(1.0);
    format!(
        "{};--m-from-t:{};--m-to-t:{};--m-from-o:{:.2};--m-to-o:{:.2};--m-range:cover {:.0}% cover {:.0}%",
        from.to_css(),
        from.transform(),
        to.transform(),
        from.opacity,
        to.opacity,
        (1.0 - offsets.start_at) * 100.0,
        (1.0 - offsets.end_at) * 100.0,
    )
}

pub fn gallery_grid(progress: f64) -> StyleParams {
    StyleParams {
        scale: GALLERY_SCALE.at(progress),
        translate_y: GALLERY_Y.at(progress),
        ..StyleParams::default()
    }
}

pub fn company_logo(progress: f64) -> StyleParams {
    StyleParams { scale: COMPANY_LOGO_SCALE.at(progress), ..StyleParams::default() }
}

pub fn contact_glow(progress: f64) -> StyleParams {
    StyleParams {
        translate_y: CONTACT_GLOW_Y.at(progress),
        opacity: CONTACT_GLOW_OPACITY.at(progress),
        ..StyleParams::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn keyframes_interpolate_and_clamp() {
        assert!(close(GALLERY_Y.at(0.0), 6.0));
        assert!(close(GALLERY_Y.at(0.5), 1.0));
        assert!(close(GALLERY_Y.at(1.0), -4.0));
        assert!(close(GALLERY_Y.at(-3.0), 6.0));
        assert!(close(GALLERY_Y.at(7.0), -4.0));
    }

    #[test]
    fn degenerate_input_range_holds_first_value() {
        let k = Keyframes { input: (0.5, 0.5), output: (2.0, 3.0) };
        assert!(close(k.at(0.9), 2.0));
    }

    #[test]
    fn progress_runs_from_enter_to_exit() {
        // 1000px viewport, 200px element, offsets 85% / 15%
        assert!(close(scroll_progress(850.0, 200.0, 1000.0, GRID_PASS), 0.0));
        assert!(close(scroll_progress(-50.0, 200.0, 1000.0, GRID_PASS), 1.0));
        assert!(close(scroll_progress(400.0, 200.0, 1000.0, GRID_PASS), 0.5));
        assert!(close(scroll_progress(2000.0, 200.0, 1000.0, GRID_PASS), 0.0));
    }

    #[test]
    fn presets_at_rest() {
        let g = gallery_grid(0.0);
        assert!(close(g.scale, 1.04) && close(g.translate_y, 6.0) && close(g.opacity, 1.0));
        assert!(close(company_logo(1.0).scale, 0.94));
        let c = contact_glow(1.0);
        assert!(close(c.translate_y, -6.0) && close(c.opacity, 0.4));
    }

    #[test]
    fn css_output() {
        assert_eq!(
            gallery_grid(0.0).to_css(),
            "transform:translateY(6.00px) scale(1.040);opacity:1.00"
        );
    }

    #[test]
    fn timeline_vars_cover_both_ends() {
        let css = timeline_style(contact_glow, GRID_PASS);
        assert!(css.starts_with("transform:translateY(8.00px) scale(1.000);opacity:0.60;"));
        assert!(css.contains("--m-to-t:translateY(-6.00px) scale(1.000)"));
        assert!(css.contains("--m-to-o:0.40"));
        assert!(css.ends_with("--m-range:cover 15% cover 85%"));
    }
}
