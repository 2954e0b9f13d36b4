//! Collision predicates
//!
//! Circle vs axis-aligned rectangle and circle vs circle. All tests are
//! strict (`<`) with no epsilon, so touching at exactly the radius is a miss.

use glam::Vec2;

use super::state::{Player, Rect};

/// Closest point on `rect` to `point` (per-axis clamped projection)
#[inline]
pub fn closest_point_on_rect(point: Vec2, rect: &Rect) -> Vec2 {
    Vec2::new(
        point.x.min(rect.right()).max(rect.x),
        point.y.min(rect.bottom()).max(rect.y),
    )
}

/// Check overlap between a circle and a rectangle
pub fn circle_vs_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = closest_point_on_rect(center, rect);
    let dx = center.x - closest.x;
    let dy = center.y - closest.y;
    dx * dx + dy * dy < radius * radius
}

/// Check overlap between two circles
pub fn circle_vs_circle(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    (c1 - c2).length() < r1 + r2
}

/// Player lands on a platform: overlapping, not moving up, and center above
/// the platform's midline. Rising through or touching from the side never lands.
pub fn platform_landing(player: &Player, rect: &Rect) -> bool {
    circle_vs_rect(player.pos, player.radius, rect)
        && player.vel.y >= 0.0
        && player.pos.y < rect.mid_y()
}

/// Player touches an enemy from any direction
pub fn enemy_contact(player: &Player, rect: &Rect) -> bool {
    circle_vs_rect(player.pos, player.radius, rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        let mut player = Player::new(&GameConfig::default());
        player.pos = Vec2::new(x, y);
        player.vel = Vec2::new(0.0, vy);
        player
    }

    #[test]
    fn test_circle_vs_rect_inside_and_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);

        // Center inside
        assert!(circle_vs_rect(Vec2::new(50.0, 10.0), 5.0, &rect));
        // Just above the top edge
        assert!(circle_vs_rect(Vec2::new(50.0, -4.9), 5.0, &rect));
        // Exactly touching is not an overlap
        assert!(!circle_vs_rect(Vec2::new(50.0, -5.0), 5.0, &rect));
        // Off to the side
        assert!(!circle_vs_rect(Vec2::new(110.0, 10.0), 5.0, &rect));
    }

    #[test]
    fn test_circle_vs_rect_corner() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Distance to corner (10,10) is sqrt(18) ~ 4.24
        assert!(circle_vs_rect(Vec2::new(13.0, 13.0), 4.5, &rect));
        assert!(!circle_vs_rect(Vec2::new(13.0, 13.0), 4.0, &rect));
    }

    #[test]
    fn test_circle_vs_circle() {
        assert!(circle_vs_circle(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circle_vs_circle(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circle_vs_circle(Vec2::ZERO, 5.0, Vec2::new(8.0, 8.0), 5.0));
    }

    #[test]
    fn test_landing_requires_falling_from_above() {
        let rect = Rect::new(0.0, 300.0, 200.0, 20.0);

        // Falling onto the top surface
        assert!(platform_landing(&player_at(100.0, 285.0, 3.0), &rect));
        // Resting (vy == 0) still lands
        assert!(platform_landing(&player_at(100.0, 285.0, 0.0), &rect));
        // Rising through the platform
        assert!(!platform_landing(&player_at(100.0, 285.0, -3.0), &rect));
        // Center below the midline (approaching from underneath)
        assert!(!platform_landing(&player_at(100.0, 315.0, 3.0), &rect));
    }

    #[test]
    fn test_enemy_contact_has_no_direction_guard() {
        let rect = Rect::new(0.0, 500.0, 30.0, 30.0);
        assert!(enemy_contact(&player_at(15.0, 490.0, -5.0), &rect));
        assert!(enemy_contact(&player_at(15.0, 540.0, 5.0), &rect));
        assert!(enemy_contact(&player_at(-10.0, 515.0, 0.0), &rect));
        assert!(!enemy_contact(&player_at(-30.0, 515.0, 0.0), &rect));
    }
}
