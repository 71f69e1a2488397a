// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deciding whether the tracked element is "in view".
//!
//! Two rules apply, chosen by the element's height relative to the visibility
//! fraction `p = pct_in_view / 100` of the viewport height `h`:
//!
//! - **Full**: if the element is shorter than `h * p`, it must be entirely
//!   inside the viewport (`top >= 0` and `bottom <= h`).
//! - **Band**: otherwise it must span the central band of the viewport,
//!   `top <= h * (1 - p)` and `bottom >= h * p`.
//!
//! Only geometric intersection is considered; content overlapping the element
//! is not detected.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_attention::VisibilityEvaluator;
//!
//! let eval = VisibilityEvaluator::new(50.0);
//!
//! // A 100px element inside a 1000px viewport must be fully visible.
//! assert!(eval.is_in_view(Some(Rect::new(0.0, 10.0, 300.0, 110.0)), 1000.0, None));
//! assert!(!eval.is_in_view(Some(Rect::new(0.0, -10.0, 300.0, 90.0)), 1000.0, None));
//!
//! // A 1200px element only needs to cover the line at 500px.
//! assert!(eval.is_in_view(Some(Rect::new(0.0, -600.0, 300.0, 600.0)), 1000.0, None));
//! assert!(!eval.is_in_view(Some(Rect::new(0.0, 501.0, 300.0, 1701.0)), 1000.0, None));
//! ```

use kurbo::Rect;

/// Band thresholds derived from the viewport height and `pct_in_view`.
///
/// Tall elements count as in view when they reach above [`top`](Self::top) and
/// below [`bottom`](Self::bottom).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBand {
    /// `viewport_height * (1 - pct_in_view / 100)`.
    pub top: f64,
    /// `viewport_height * (pct_in_view / 100)`.
    pub bottom: f64,
}

/// Which visibility rule applies to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityRule {
    /// The element must be entirely inside the viewport.
    Full,
    /// The element must span the viewport's central band.
    Band,
}

/// Evaluates the in-view test for a configured visibility percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEvaluator {
    pct_in_view: f64,
}

impl VisibilityEvaluator {
    /// Creates an evaluator for a percentage in `0..=100`.
    #[must_use]
    pub fn new(pct_in_view: f64) -> Self {
        Self { pct_in_view }
    }

    /// Returns the configured percentage.
    #[must_use]
    pub fn pct_in_view(&self) -> f64 {
        self.pct_in_view
    }

    fn fraction(&self) -> f64 {
        self.pct_in_view / 100.0
    }

    /// Computes the band thresholds for a viewport height.
    #[must_use]
    pub fn band(&self, viewport_height: f64) -> ViewportBand {
        let fraction = self.fraction();
        ViewportBand {
            top: viewport_height * (1.0 - fraction),
            bottom: viewport_height * fraction,
        }
    }

    /// Returns the rule that applies to an element of the given height.
    #[must_use]
    pub fn rule(&self, element_height: f64, viewport_height: f64) -> VisibilityRule {
        if element_height < viewport_height * self.fraction() {
            VisibilityRule::Full
        } else {
            VisibilityRule::Band
        }
    }

    /// Returns `true` if `element` counts as in view.
    ///
    /// `band` is the cached band from the last viewport measurement; when it
    /// is `None` the band is derived from `viewport_height`. A missing
    /// element, a non-finite rectangle, or a non-positive viewport all fail
    /// closed and report "not in view".
    #[must_use]
    pub fn is_in_view(
        &self,
        element: Option<Rect>,
        viewport_height: f64,
        band: Option<ViewportBand>,
    ) -> bool {
        let Some(rect) = element else {
            return false;
        };
        if !rect.is_finite() || !viewport_height.is_finite() || viewport_height <= 0.0 {
            return false;
        }
        let rect = rect.abs();
        match self.rule(rect.height(), viewport_height) {
            VisibilityRule::Full => rect.y0 >= 0.0 && rect.y1 <= viewport_height,
            VisibilityRule::Band => {
                let band = band.unwrap_or_else(|| self.band(viewport_height));
                rect.y0 <= band.top && rect.y1 >= band.bottom
            }
        }
    }
}
