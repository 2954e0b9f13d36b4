//! Level content generation
//!
//! Each call is self-contained: the only inputs are the level number, the
//! world size and the supplied random source. Positions advance
//! monotonically with the index and jitter within fixed bounds.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, Enemy, EnemyState, Platform, PlatformKind, Rect};

/// Ground spans this many world widths
pub const GROUND_WIDTHS: f32 = 4.0;
pub const GROUND_HEIGHT: f32 = 50.0;

pub const LEDGE_HEIGHT: f32 = 20.0;
pub const LEDGE_MIN_WIDTH: f32 = 100.0;
pub const LEDGE_WIDTH_JITTER: f32 = 100.0;
/// Ledges sit at least this far above the world bottom
pub const LEDGE_FLOOR_OFFSET: f32 = 150.0;
/// Vertical band ledges are spread across
pub const LEDGE_BAND: f32 = 300.0;

pub const COLLECTIBLE_RADIUS: f32 = 10.0;
pub const COLLECTIBLE_VALUE: u64 = 10;

pub const ENEMY_SIZE: f32 = 30.0;
pub const ENEMY_SPEED: f32 = 2.0;
/// Half-width of an enemy's patrol range around its spawn x
pub const ENEMY_PATROL_RANGE: f32 = 100.0;

/// Everything that gets replaced on level advance
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub enemies: Vec<Enemy>,
}

/// Number of ledges (excluding the ground) on a level
pub fn platform_count(level: u32) -> usize {
    (10 + 3 * level) as usize
}

pub fn collectible_count(level: u32) -> usize {
    (20 + 5 * level) as usize
}

pub fn enemy_count(level: u32) -> usize {
    (3 + level) as usize
}

/// Generate the full content of a level
pub fn generate_level<R: Rng + ?Sized>(
    level: u32,
    world_width: f32,
    world_height: f32,
    rng: &mut R,
) -> LevelLayout {
    let platforms = generate_platforms(level, world_width, world_height, rng);
    let collectibles = generate_collectibles(level, rng);
    let enemies = generate_enemies(level, world_height);
    LevelLayout {
        platforms,
        collectibles,
        enemies,
    }
}

/// Ground first, then ledges in increasing x
pub fn generate_platforms<R: Rng + ?Sized>(
    level: u32,
    world_width: f32,
    world_height: f32,
    rng: &mut R,
) -> Vec<Platform> {
    let count = platform_count(level);
    let mut platforms = Vec::with_capacity(count + 1);

    platforms.push(Platform {
        rect: Rect::new(
            0.0,
            world_height - GROUND_HEIGHT,
            world_width * GROUND_WIDTHS,
            GROUND_HEIGHT,
        ),
        kind: PlatformKind::Ground,
    });

    for i in 0..count {
        let x = 200.0 + i as f32 * 300.0 + rng.random::<f32>() * 100.0;
        let y = world_height - LEDGE_FLOOR_OFFSET - rng.random::<f32>() * LEDGE_BAND;
        let width = LEDGE_MIN_WIDTH + rng.random::<f32>() * LEDGE_WIDTH_JITTER;
        platforms.push(Platform {
            rect: Rect::new(x, y, width, LEDGE_HEIGHT),
            kind: PlatformKind::Ledge,
        });
    }

    platforms
}

pub fn generate_collectibles<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<Collectible> {
    (0..collectible_count(level))
        .map(|i| {
            let x = 300.0 + i as f32 * 150.0 + rng.random::<f32>() * 100.0;
            let y = 100.0 + rng.random::<f32>() * 300.0;
            Collectible {
                pos: Vec2::new(x, y),
                radius: COLLECTIBLE_RADIUS,
                value: COLLECTIBLE_VALUE,
                collected: false,
            }
        })
        .collect()
}

/// Enemies are evenly spaced on the ground line; no randomness
pub fn generate_enemies(level: u32, world_height: f32) -> Vec<Enemy> {
    (0..enemy_count(level))
        .map(|i| {
            let x = 500.0 + i as f32 * 400.0;
            Enemy {
                rect: Rect::new(x, world_height - 100.0, ENEMY_SIZE, ENEMY_SIZE),
                vx: ENEMY_SPEED,
                min_x: x - ENEMY_PATROL_RANGE,
                max_x: x + ENEMY_PATROL_RANGE,
                state: EnemyState::Active,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_platform_layout_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        for level in 1..6 {
            let platforms = generate_platforms(level, 800.0, 600.0, &mut rng);
            assert_eq!(platforms.len(), 1 + platform_count(level));

            let ground = &platforms[0];
            assert_eq!(ground.kind, PlatformKind::Ground);
            assert_eq!(ground.rect, Rect::new(0.0, 550.0, 3200.0, 50.0));

            for (i, p) in platforms[1..].iter().enumerate() {
                let base_x = 200.0 + i as f32 * 300.0;
                assert_eq!(p.kind, PlatformKind::Ledge);
                assert!(p.rect.x >= base_x && p.rect.x <= base_x + 100.0);
                assert!(p.rect.y <= 450.0 && p.rect.y >= 150.0);
                assert!(p.rect.width >= 100.0 && p.rect.width <= 200.0);
                assert_eq!(p.rect.height, 20.0);
            }
        }
    }

    #[test]
    fn test_collectible_layout() {
        let mut rng = Pcg32::seed_from_u64(3);
        let items = generate_collectibles(2, &mut rng);
        assert_eq!(items.len(), 30);
        for (i, item) in items.iter().enumerate() {
            let base_x = 300.0 + i as f32 * 150.0;
            assert!(item.pos.x >= base_x && item.pos.x <= base_x + 100.0);
            assert!(item.pos.y >= 100.0 && item.pos.y <= 400.0);
            assert_eq!(item.radius, 10.0);
            assert_eq!(item.value, 10);
            assert!(!item.collected);
        }
    }

    #[test]
    fn test_enemy_layout() {
        let enemies = generate_enemies(1, 600.0);
        assert_eq!(enemies.len(), 4);
        for (i, enemy) in enemies.iter().enumerate() {
            let x = 500.0 + i as f32 * 400.0;
            assert_eq!(enemy.rect, Rect::new(x, 500.0, 30.0, 30.0));
            assert_eq!(enemy.vx, 2.0);
            assert_eq!(enemy.min_x, x - 100.0);
            assert_eq!(enemy.max_x, x + 100.0);
            assert!(enemy.is_active());
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_level(3, 800.0, 600.0, &mut Pcg32::seed_from_u64(99));
        let b = generate_level(3, 800.0, 600.0, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.collectibles, b.collectibles);
        assert_eq!(a.enemies, b.enemies);

        let c = generate_level(3, 800.0, 600.0, &mut Pcg32::seed_from_u64(100));
        assert_ne!(a.platforms, c.platforms);
    }
}
