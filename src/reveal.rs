/// Explicit readiness/accessibility context passed to every reveal render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionContext {
    pub reduced_motion: bool,
    /// False while a splash overlay is still up; nothing gets hidden then.
    pub app_ready: bool,
}

impl Default for MotionContext {
    fn default() -> Self {
        MotionContext { reduced_motion: false, app_ready: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Visible fraction needed to count as intersecting.
    pub threshold: f64,
    /// Bottom root margin as a fraction of viewport height; negative shrinks it.
    pub margin_bottom: f64,
    pub once: bool,
    pub direction: Direction,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            threshold: 0.15,
            margin_bottom: -0.05,
            once: true,
            direction: Direction::Up,
        }
    }
}

impl RevealConfig {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn repeat(mut self) -> Self {
        self.once = false;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Element geometry relative to the viewport, in px. Browser-side input:
/// the server renders the initial phase and CSS drives the rest.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

#[cfg_attr(not(test), allow(dead_code))]
impl Viewport {
    /// Fraction of the element inside the viewport once the bottom margin is applied.
    pub fn visible_fraction(&self, margin_bottom: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let root_bottom = self.viewport_height * (1.0 + margin_bottom);
        let top = self.top.max(0.0);
        let bottom = (self.top + self.height).min(root_bottom);
        ((bottom - top).max(0.0) / self.height).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Unobserved,
    Watching,
    Revealed,
}

/// Per-element entrance-animation gate.
#[derive(Debug, Clone)]
pub struct Reveal {
    config: RevealConfig,
    phase: RevealPhase,
    observing: bool,
}

const SHOWN: &str = "reveal reveal-shown";

impl Reveal {
    pub fn new(config: RevealConfig) -> Self {
        Reveal { config, phase: RevealPhase::Unobserved, observing: false }
    }

    /// Reduced motion skips straight to a terminal Revealed.
    pub fn mount(&mut self, ctx: &MotionContext) {
        if self.phase != RevealPhase::Unobserved {
            return;
        }
        if ctx.reduced_motion {
            self.phase = RevealPhase::Revealed;
            self.observing = false;
        } else {
            self.phase = RevealPhase::Watching;
            self.observing = true;
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn observe(&mut self, geometry: &Viewport) -> RevealPhase {
        if !self.observing {
            return self.phase;
        }
        let fraction = geometry.visible_fraction(self.config.margin_bottom);
        let intersecting = fraction > 0.0 && fraction >= self.config.threshold;

        match self.phase {
            RevealPhase::Watching if intersecting => {
                self.phase = RevealPhase::Revealed;
                if self.config.once {
                    self.observing = false;
                }
            }
            RevealPhase::Revealed if !intersecting && !self.config.once => {
                self.phase = RevealPhase::Watching;
            }
            _ => {}
        }
        self.phase
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn classes(&self, ctx: &MotionContext) -> &'static str {
        if !ctx.app_ready {
            return "";
        }
        if self.phase == RevealPhase::Revealed {
            return SHOWN;
        }
        match self.config.direction {
            Direction::Up => "reveal reveal-up",
            Direction::Left => "reveal reveal-left",
            Direction::Right => "reveal reveal-right",
        }
    }

    /// Inline custom properties read by the stylesheet's view-timeline rules.
    pub fn style_vars(&self) -> String {
        format!(
            "--reveal-threshold:{}%;--reveal-margin:{}%;--reveal-iterations:{}",
            fmt_pct(self.config.threshold),
            fmt_pct(self.config.margin_bottom),
            if self.config.once { "1" } else { "infinite" }
        )
    }
}

fn fmt_pct(fraction: f64) -> String {
    let v = (fraction * 1000.0).round() / 10.0;
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
