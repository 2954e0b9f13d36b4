//! Draw-list construction
//!
//! Turns a `GameState` into a flat list of colored primitives in world
//! coordinates. Reads state only; rendering a paused game yields the same
//! scene every frame.

use glam::Vec2;

use crate::sim::{GameState, PlatformKind};

const SKY: &str = "#87CEEB";
const GROUND: &str = "#2ecc71";
const LEDGE: &str = "#27ae60";
const GRASS: &str = "#229954";
const COIN: &str = "#FFD700";
const WHITE: &str = "#FFF";
const BLACK: &str = "#000";
const ENEMY: &str = "#e74c3c";
const PLAYER: &str = "#FF6B6B";
const PLAYER_SHINE: &str = "rgba(255,255,255,0.5)";
const FLAG_POLE: &str = "#f1c40f";
const FLAG: &str = "#ff4757";

/// Spacing of grass tufts along a platform top
const GRASS_SPACING: f32 = 10.0;

/// A filled primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
    Triangle {
        points: [Vec2; 3],
        color: &'static str,
    },
}

impl Shape {
    /// Horizontal extent in world space
    fn x_range(&self) -> (f32, f32) {
        match *self {
            Shape::Rect { x, w, .. } => (x, x + w),
            Shape::Circle { center, radius, .. } => (center.x - radius, center.x + radius),
            Shape::Triangle { points, .. } => {
                let min = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
                let max = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
                (min, max)
            }
        }
    }
}

/// One frame's worth of drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Viewport size (screen space)
    pub width: f32,
    pub height: f32,
    pub background: &'static str,
    /// World-space shapes are drawn translated by `-camera_x`
    pub camera_x: f32,
    /// Back to front
    pub shapes: Vec<Shape>,
}

/// Build the scene for the current state, culled to the visible viewport
pub fn build_scene(state: &GameState) -> Scene {
    let width = state.config.world_width;
    let height = state.config.world_height;
    let camera_x = state.camera.x;
    let view = (camera_x, camera_x + width);

    let mut shapes = Vec::new();
    let mut push = |shape: Shape| {
        let (min, max) = shape.x_range();
        if max >= view.0 && min <= view.1 {
            shapes.push(shape);
        }
    };

    for platform in &state.platforms {
        let r = platform.rect;
        let color = match platform.kind {
            PlatformKind::Ground => GROUND,
            PlatformKind::Ledge => LEDGE,
        };
        push(Shape::Rect {
            x: r.x,
            y: r.y,
            w: r.width,
            h: r.height,
            color,
        });

        // Only tufts on screen; the ground is several screens wide
        let start = ((view.0 - r.x) / GRASS_SPACING).floor().max(0.0) as u32;
        let mut gx = r.x + start as f32 * GRASS_SPACING;
        while gx < r.right() && gx <= view.1 {
            push(Shape::Rect {
                x: gx,
                y: r.y,
                w: 2.0,
                h: 5.0,
                color: GRASS,
            });
            gx += GRASS_SPACING;
        }
    }

    for item in state.collectibles.iter().filter(|c| !c.collected) {
        push(Shape::Circle {
            center: item.pos,
            radius: item.radius,
            color: COIN,
        });
        push(Shape::Circle {
            center: item.pos - Vec2::splat(3.0),
            radius: 3.0,
            color: WHITE,
        });
    }

    for enemy in state.enemies.iter().filter(|e| e.is_active()) {
        let r = enemy.rect;
        push(Shape::Rect {
            x: r.x,
            y: r.y,
            w: r.width,
            h: r.height,
            color: ENEMY,
        });
        for (eye_x, pupil_x) in [(5.0, 8.0), (17.0, 20.0)] {
            push(Shape::Rect {
                x: r.x + eye_x,
                y: r.y + 5.0,
                w: 8.0,
                h: 8.0,
                color: WHITE,
            });
            push(Shape::Rect {
                x: r.x + pupil_x,
                y: r.y + 8.0,
                w: 3.0,
                h: 3.0,
                color: BLACK,
            });
        }
    }

    // Level-end flag
    let end = state.level_end_x;
    let top = height - 150.0;
    push(Shape::Rect {
        x: end - 10.0,
        y: top,
        w: 10.0,
        h: 100.0,
        color: FLAG_POLE,
    });
    push(Shape::Triangle {
        points: [
            Vec2::new(end, top),
            Vec2::new(end + 40.0, top + 20.0),
            Vec2::new(end, top + 40.0),
        ],
        color: FLAG,
    });

    let player = &state.player;
    push(Shape::Circle {
        center: player.pos,
        radius: player.radius,
        color: PLAYER,
    });
    push(Shape::Circle {
        center: player.pos - Vec2::splat(6.0),
        radius: 6.0,
        color: PLAYER_SHINE,
    });

    Scene {
        width,
        height,
        background: SKY,
        camera_x,
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{EnemyState, RunPhase};

    fn count(scene: &Scene, color: &str) -> usize {
        scene
            .shapes
            .iter()
            .filter(|s| match s {
                Shape::Rect { color: c, .. }
                | Shape::Circle { color: c, .. }
                | Shape::Triangle { color: c, .. } => *c == color,
            })
            .count()
    }

    #[test]
    fn test_player_drawn_last() {
        let state = GameState::new(GameConfig::default(), 1).unwrap();
        let scene = build_scene(&state);
        assert_eq!(scene.background, SKY);
        assert_eq!(scene.camera_x, 0.0);
        assert_eq!(
            scene.shapes[scene.shapes.len() - 2],
            Shape::Circle {
                center: state.player.pos,
                radius: 20.0,
                color: PLAYER,
            }
        );
    }

    #[test]
    fn test_collected_and_defeated_are_hidden() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        let coins = count(&build_scene(&state), COIN);
        let enemies = count(&build_scene(&state), ENEMY);
        assert!(coins > 0);
        assert!(enemies > 0);

        for item in state.collectibles.iter_mut() {
            item.collected = true;
        }
        for enemy in state.enemies.iter_mut() {
            enemy.state = EnemyState::Defeated;
        }
        let scene = build_scene(&state);
        assert_eq!(count(&scene, COIN), 0);
        assert_eq!(count(&scene, ENEMY), 0);
    }

    #[test]
    fn test_culls_offscreen_content() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        let scene = build_scene(&state);
        // Level-end flag at x=2400 is off screen at the start
        assert_eq!(count(&scene, FLAG), 0);

        state.player.pos.x = 2300.0;
        state.camera.follow(2300.0, state.config.world_width);
        let scene = build_scene(&state);
        assert_eq!(count(&scene, FLAG), 1);
        // Every drawn shape overlaps the viewport
        for shape in &scene.shapes {
            let (min, max) = shape.x_range();
            assert!(max >= scene.camera_x && min <= scene.camera_x + scene.width);
        }
    }

    #[test]
    fn test_paused_scene_is_stable() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        state.phase = RunPhase::Paused;
        assert_eq!(build_scene(&state), build_scene(&state));
    }
}
