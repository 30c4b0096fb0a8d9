//! Site and circle event handlers.

use tracing::{debug, trace};

use super::{FortuneError, FortunesAlgorithm};
use crate::beachline::{BeachlineError, NodeId, Side};
use crate::event::{Event, EventId};
use crate::geometry::{circle_through, round_coord, Arc, Point, Ray};

impl FortunesAlgorithm {
    pub(super) fn site_event(&mut self, site: Point) -> Result<(), FortuneError> {
        let d = self.directrix;
        let (found, side) = self.beachline.find_arc(site.y, d);
        let Some(leaf) = found else {
            let root = self.beachline.insert_root(Arc::new(site))?;
            trace!(%root, %site, "first arc");
            return Ok(());
        };

        let old = self.beachline.arc(leaf)?;
        self.drop_circle_event(leaf);
        let new_arc = Arc::new(site);

        let new = if old.on_directrix(d) {
            // Both foci on the sweep line: their bisector is horizontal and
            // reaches back to the canvas's left edge.
            let mid = round_coord((old.focus.y + site.y) as f64 / 2.0);
            let (lower, upper) = if site.y > old.focus.y {
                (old, new_arc)
            } else {
                (new_arc, old)
            };
            let ray = Ray::new(
                Point::new(0, mid),
                Arc::bisector_direction(&lower, &upper),
            );
            self.beachline
                .split_leaf_on_sweep(leaf, side, new_arc, ray)?
        } else {
            let ip = Point::new(old.x(site.y, d)?, site.y);
            let tangent = old.tangent(site.y, d)?;
            self.beachline
                .split_leaf(
                    leaf,
                    side,
                    new_arc,
                    Ray::new(ip, -tangent),
                    Ray::new(ip, tangent),
                )?
                .new
        };

        if let Some(lower) = self.beachline.find_next_arc(Side::Left, new) {
            if let Some(further) = self.beachline.find_next_arc(Side::Left, lower) {
                self.probe(further, lower, new)?;
            }
        }
        if let Some(upper) = self.beachline.find_next_arc(Side::Right, new) {
            if let Some(further) = self.beachline.find_next_arc(Side::Right, upper) {
                self.probe(new, upper, further)?;
            }
        }
        Ok(())
    }

    pub(super) fn circle_event(&mut self, id: EventId, event: &Event) -> Result<(), FortuneError> {
        let Some(leaf) = event.arc else {
            return Ok(());
        };
        let linked = self.beachline.leaf(leaf).and_then(|l| l.circle_event);
        if linked != Some(id) {
            debug!(%leaf, center = %event.point, "stale circle event");
            return Ok(());
        }

        let center = event.point;
        let vanishing = self.beachline.arc(leaf)?;
        let removal = self.beachline.remove_arc(leaf, center)?;
        self.drop_circle_event(removal.lower);
        self.drop_circle_event(removal.upper);

        let travel = [
            Arc::bisector_direction(&self.beachline.arc(removal.lower)?, &vanishing),
            Arc::bisector_direction(&vanishing, &self.beachline.arc(removal.upper)?),
        ];
        for (ray, direction) in removal.closed.into_iter().zip(travel) {
            let mut edge = ray.edge();
            edge.finish(center)?;
            if edge.is_degenerate() {
                trace!(%edge, "drop zero-length edge");
                continue;
            }
            // A breakpoint born on the canvas edge can meet its vertex
            // behind that edge; nothing of it lies on the canvas.
            if !Ray::new(ray.start, direction).heads_towards(center) {
                trace!(%edge, "drop edge ending behind its start");
                continue;
            }
            trace!(%edge, "edge complete");
            self.complete.insert(edge);
        }

        let (lower, upper) = (removal.lower, removal.upper);
        if let Some(further) = self.beachline.find_next_arc(Side::Left, lower) {
            self.probe(further, lower, upper)?;
        }
        if let Some(further) = self.beachline.find_next_arc(Side::Right, upper) {
            self.probe(lower, upper, further)?;
        }
        Ok(())
    }

    /// Queue the circle event in which `middle` vanishes between `lower` and
    /// `upper`, if their breakpoints converge.
    fn probe(&mut self, lower: NodeId, middle: NodeId, upper: NodeId) -> Result<(), FortuneError> {
        let a = self.beachline.arc(lower)?;
        let b = self.beachline.arc(middle)?;
        let c = self.beachline.arc(upper)?;
        if a.focus == c.focus || Point::turn(a.focus, b.focus, c.focus) >= 0 {
            trace!(lower = %a.focus, middle = %b.focus, upper = %c.focus, "no convergence");
            return Ok(());
        }

        let (center, radius) = circle_through(b.focus, a.focus, c.focus)?;
        // Rightmost point of the circle; never behind the sweep line.
        let key = (center.x + radius).max(self.directrix as f64);
        let center = Point::from_vector(center);
        let id = self.queue.push(Event::circle(key, center, middle));
        let leaf = self
            .beachline
            .leaf_mut(middle)
            .ok_or(BeachlineError::NoSuchLeaf(middle))?;
        if let Some(previous) = leaf.circle_event.replace(id) {
            self.queue.invalidate(previous);
        }
        trace!(%middle, %center, key, "circle event queued");
        Ok(())
    }

    /// Deactivate the circle event `leaf` would vanish in, if any.
    fn drop_circle_event(&mut self, leaf: NodeId) {
        if let Some(id) = self
            .beachline
            .leaf_mut(leaf)
            .and_then(|l| l.circle_event.take())
        {
            self.queue.invalidate(id);
        }
    }
}
