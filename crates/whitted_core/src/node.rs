//! Transformable scene nodes and their debug adornments.
//!
//! Every object in a scene owns a [`Node`]: a world transform plus the
//! cosmetic state used when drawing wireframes (display color, optional
//! axes, bounding-box flag). None of this affects intersection except
//! the transform itself.

use whitted_math::{DVec3, HomogeneousVector, RigidTransform};

use crate::material::Color;

/// Length of the axes adornment.
const AXIS_LENGTH: f64 = 10.0;

/// A world-space line segment produced by wireframe rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: DVec3,
    pub to: DVec3,
    pub color: Color,
}

/// Receiver for wireframe output.
pub trait LineSink {
    fn line(&mut self, from: DVec3, to: DVec3, color: Color);
}

impl LineSink for Vec<Line> {
    fn line(&mut self, from: DVec3, to: DVec3, color: Color) {
        self.push(Line { from, to, color });
    }
}

/// Draw the segment `a`-`b` (object space) through `transform`.
pub(crate) fn emit_line(
    sink: &mut dyn LineSink,
    transform: &RigidTransform,
    a: HomogeneousVector,
    b: HomogeneousVector,
    color: Color,
) {
    let a = transform.apply(a).cartesian();
    let b = transform.apply(b).cartesian();
    sink.line(a, b, color);
}

/// World transform plus display state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    state: RigidTransform,
    /// Display color
    pub color: Color,
    /// Color of the axes adornment, if this node carries one
    axes: Option<Color>,
    show_axes: bool,
    show_box: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Color::ZERO)
    }
}

impl Node {
    pub fn new(color: Color) -> Self {
        Self {
            state: RigidTransform::IDENTITY,
            color,
            axes: None,
            show_axes: false,
            show_box: false,
        }
    }

    /// Attach an axes adornment drawn in `color`.
    pub fn with_axes(mut self, color: Color) -> Self {
        self.axes = Some(color);
        self
    }

    pub fn with_state(mut self, state: RigidTransform) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> RigidTransform {
        self.state
    }

    pub fn set_state(&mut self, state: RigidTransform) {
        self.state = state;
    }

    pub fn shows_axes(&self) -> bool {
        self.show_axes
    }

    pub fn shows_box(&self) -> bool {
        self.show_box
    }

    // Global frame: the new transform is applied after the current one.

    pub fn rotate(&mut self, theta: f64, axis: DVec3) {
        self.state = RigidTransform::rotate(theta, HomogeneousVector::from_vector3(axis)) * self.state;
    }

    pub fn scale(&mut self, s: f64) {
        self.state = RigidTransform::scale(s) * self.state;
    }

    pub fn translate(&mut self, offset: DVec3) {
        self.state = RigidTransform::translate(offset.x, offset.y, offset.z) * self.state;
    }

    // Local frame: the new transform is applied before the current one.

    pub fn rotate_local(&mut self, theta: f64, axis: DVec3) {
        self.state *= RigidTransform::rotate(theta, HomogeneousVector::from_vector3(axis));
    }

    pub fn scale_local(&mut self, s: f64) {
        self.state *= RigidTransform::scale(s);
    }

    pub fn translate_local(&mut self, offset: DVec3) {
        self.state *= RigidTransform::translate(offset.x, offset.y, offset.z);
    }

    /// `parent * state`, the transform used to draw this node.
    pub fn compose(&self, parent: &RigidTransform) -> RigidTransform {
        *parent * self.state
    }

    /// Emit the axes adornment if it exists and is switched on.
    pub fn render_axes(&self, transform: &RigidTransform, sink: &mut dyn LineSink) {
        let Some(color) = self.axes else {
            return;
        };
        if !self.show_axes {
            return;
        }
        let origin = HomogeneousVector::ORIGIN;
        for tip in [
            HomogeneousVector::point(AXIS_LENGTH, 0.0, 0.0),
            HomogeneousVector::point(0.0, AXIS_LENGTH, 0.0),
            HomogeneousVector::point(0.0, 0.0, AXIS_LENGTH),
        ] {
            emit_line(sink, transform, origin, tip, color);
        }
    }
}

/// Something that owns a [`Node`].
///
/// The transform and adornment methods have default implementations acting on
/// the node. Composite objects override the `on_*` hooks to forward adornment
/// changes to their children, or the transform methods to redirect them.
pub trait Transformable {
    fn node(&self) -> &Node;
    fn node_mut(&mut self) -> &mut Node;

    fn state(&self) -> RigidTransform {
        self.node().state()
    }

    fn set_color(&mut self, color: Color) {
        self.node_mut().color = color;
    }

    fn rotate(&mut self, theta: f64, axis: DVec3) {
        self.node_mut().rotate(theta, axis);
    }

    fn scale(&mut self, s: f64) {
        self.node_mut().scale(s);
    }

    fn translate(&mut self, offset: DVec3) {
        self.node_mut().translate(offset);
    }

    fn rotate_local(&mut self, theta: f64, axis: DVec3) {
        self.node_mut().rotate_local(theta, axis);
    }

    fn scale_local(&mut self, s: f64) {
        self.node_mut().scale_local(s);
    }

    fn translate_local(&mut self, offset: DVec3) {
        self.node_mut().translate_local(offset);
    }

    fn on_set_axes(&mut self) {}
    fn on_unset_axes(&mut self) {}
    fn on_set_box(&mut self) {}
    fn on_unset_box(&mut self) {}

    fn set_axes(&mut self) {
        self.node_mut().show_axes = true;
        self.on_set_axes();
    }

    fn unset_axes(&mut self) {
        self.node_mut().show_axes = false;
        self.on_unset_axes();
    }

    /// Flip the axes flag and return the new value.
    fn toggle_axes(&mut self) -> bool {
        if self.node().show_axes {
            self.unset_axes();
        } else {
            self.set_axes();
        }
        self.node().show_axes
    }

    fn set_box(&mut self) {
        self.node_mut().show_box = true;
        self.on_set_box();
    }

    fn unset_box(&mut self) {
        self.node_mut().show_box = false;
        self.on_unset_box();
    }

    /// Flip the bounding-box flag and return the new value.
    fn toggle_box(&mut self) -> bool {
        if self.node().show_box {
            self.unset_box();
        } else {
            self.set_box();
        }
        self.node().show_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    struct Probe {
        node: Node,
        axes_events: usize,
    }

    impl Transformable for Probe {
        fn node(&self) -> &Node {
            &self.node
        }

        fn node_mut(&mut self) -> &mut Node {
            &mut self.node
        }

        fn on_set_axes(&mut self) {
            self.axes_events += 1;
        }
    }

    #[test]
    fn test_global_vs_local_translation() {
        // rotate then translate globally: translation is not rotated
        let mut global = Node::default();
        global.rotate(FRAC_PI_2, DVec3::Z);
        global.translate(DVec3::X);

        // rotate then translate locally: translation follows the rotated frame
        let mut local = Node::default();
        local.rotate(FRAC_PI_2, DVec3::Z);
        local.translate_local(DVec3::X);

        let origin = HomogeneousVector::ORIGIN;
        assert!((global.state() * origin).abs_diff_eq(&HomogeneousVector::point(1.0, 0.0, 0.0), 1e-12));
        assert!((local.state() * origin).abs_diff_eq(&HomogeneousVector::point(0.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_scale_then_translate() {
        let mut node = Node::default();
        node.scale(2.0);
        node.translate(DVec3::new(0.0, 0.0, -3.0));
        let p = node.state() * HomogeneousVector::point(1.0, 0.0, 0.0);
        assert!(p.abs_diff_eq(&HomogeneousVector::point(2.0, 0.0, -3.0), 1e-12));
    }

    #[test]
    fn test_toggle_hooks() {
        let mut probe = Probe {
            node: Node::default(),
            axes_events: 0,
        };
        assert!(probe.toggle_axes());
        assert!(!probe.toggle_axes());
        assert!(probe.toggle_box());
        assert_eq!(probe.axes_events, 1);
        assert!(probe.node().shows_box());
    }

    #[test]
    fn test_render_axes_only_when_enabled() {
        let mut node = Node::default().with_axes(Color::new(0.0, 1.0, 1.0));
        let mut lines: Vec<Line> = Vec::new();

        node.render_axes(&RigidTransform::IDENTITY, &mut lines);
        assert!(lines.is_empty());

        node.show_axes = true;
        node.render_axes(&RigidTransform::translate(1.0, 0.0, 0.0), &mut lines);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].from, DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(lines[0].to, DVec3::new(11.0, 0.0, 0.0));
    }
}
