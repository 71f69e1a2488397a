// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry reads for the tracked element and the viewport.

use kurbo::Rect;

/// Supplies the tracked element's bounds and the viewport height.
///
/// Both are read fresh on every call; the host document may change layout
/// between calls, so implementations should not cache.
///
/// Coordinates are viewport-relative, matching a DOM bounding client rect:
/// `y0` is the element's top edge and `y1` its bottom edge, with `0.0` at the
/// top of the viewport.
pub trait GeometryProvider {
    /// Returns the element's bounds, or `None` if the element is no longer
    /// part of the document.
    fn element_bounds(&self) -> Option<Rect>;

    /// Returns the viewport height.
    fn viewport_height(&self) -> f64;
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn element_bounds(&self) -> Option<Rect> {
        (**self).element_bounds()
    }

    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }
}

/// Geometry pushed by the host.
///
/// Hosts that already receive layout notifications can update this value
/// (through [`AttentionTracker::geometry_mut`](crate::AttentionTracker::geometry_mut))
/// instead of implementing [`GeometryProvider`] against live layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedGeometry {
    /// Element bounds, or `None` if the element is absent.
    pub element: Option<Rect>,
    /// Viewport height.
    pub viewport_height: f64,
}

impl FixedGeometry {
    /// Creates geometry for an element at `element` inside a viewport of the
    /// given height.
    #[must_use]
    pub fn new(element: Rect, viewport_height: f64) -> Self {
        Self {
            element: Some(element),
            viewport_height,
        }
    }

    /// Moves the element so that its top edge sits at `top`, keeping its size.
    ///
    /// This is what scrolling the document looks like from the element's
    /// point of view. Has no effect if the element is absent.
    pub fn scroll_to(&mut self, top: f64) {
        if let Some(rect) = self.element.as_mut() {
            let height = rect.height();
            rect.y0 = top;
            rect.y1 = top + height;
        }
    }

    /// Removes the element.
    pub fn detach(&mut self) {
        self.element = None;
    }
}

impl GeometryProvider for FixedGeometry {
    fn element_bounds(&self) -> Option<Rect> {
        self.element
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_to_keeps_height() {
        let mut geometry = FixedGeometry::new(Rect::new(0.0, 100.0, 300.0, 250.0), 800.0);
        geometry.scroll_to(-40.0);
        assert_eq!(
            geometry.element_bounds(),
            Some(Rect::new(0.0, -40.0, 300.0, 110.0))
        );
    }

    #[test]
    fn detached_element_has_no_bounds() {
        let mut geometry = FixedGeometry::new(Rect::new(0.0, 0.0, 10.0, 10.0), 800.0);
        geometry.detach();
        geometry.scroll_to(5.0);
        assert_eq!(geometry.element_bounds(), None);
        assert_eq!(geometry.viewport_height(), 800.0);
    }
}
