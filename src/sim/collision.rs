//! Contact detection between the body box and obstacle rectangles
//!
//! Two independent tests run against every obstacle:
//! - support: the body's bottom edge sits in a shallow band just below an
//!   obstacle's top while the horizontal extents overlap
//! - climbing: the body box overlaps the obstacle box at all
//!
//! Both are evaluated on the candidate (unresolved) box so the result does
//! not depend on the order obstacles are visited, except for which support
//! surface wins when several match.

use super::rect::Rect;

/// Body's bottom edge is inside `[top, top + tolerance]` of `obstacle`
/// and the horizontal extents overlap
#[inline]
pub fn is_standing_on(body: &Rect, obstacle: &Rect, tolerance: f32) -> bool {
    let bottom = body.bottom();
    bottom >= obstacle.top()
        && bottom <= obstacle.top() + tolerance
        && body.overlaps_horizontally(obstacle)
}

/// Body box overlaps the obstacle box
#[inline]
pub fn is_climbing(body: &Rect, obstacle: &Rect) -> bool {
    body.intersects(obstacle)
}

/// Contacts found for one candidate box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contacts {
    /// Obstacle the body lands on. When several qualify this is the last
    /// one in iteration order.
    pub support: Option<Rect>,
    pub climbing: bool,
}

/// Run both contact tests against every obstacle
pub fn detect_contacts<'a, I>(body: &Rect, obstacles: I, tolerance: f32) -> Contacts
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut contacts = Contacts::default();
    for obstacle in obstacles {
        if is_standing_on(body, obstacle, tolerance) {
            contacts.support = Some(*obstacle);
        }
        if is_climbing(body, obstacle) {
            contacts.climbing = true;
        }
    }
    contacts
}
