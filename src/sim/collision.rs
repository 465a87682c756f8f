//! Collision detection and scoring consequences
//!
//! All checks are strict AABB overlaps against the player's body. Collected
//! entities are only marked dead here; the tick purges them afterwards.

use super::body::Body;
use super::entity::{Crop, Crow, PowerUp, PowerUpKind};
use crate::consts::{CROW_PENALTY, SCYTHE_RADIUS};

/// Crops consumed in one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Harvest {
    pub count: usize,
    pub points: u32,
}

impl Harvest {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn take(&mut self, crop: &mut Crop) {
        crop.body.alive = false;
        self.count += 1;
        self.points += crop.points;
    }
}

/// Mark every live crop the player overlaps as collected
pub fn collect_crops(player: &Body, crops: &mut [Crop]) -> Harvest {
    let mut harvest = Harvest::default();
    for crop in crops.iter_mut() {
        if crop.body.alive && player.overlaps(&crop.body) {
            harvest.take(crop);
        }
    }
    harvest
}

/// Scythe sweep: collect every live crop whose corner lies within the radius of the player's
pub fn scythe_sweep(player: &Body, crops: &mut [Crop]) -> Harvest {
    let mut harvest = Harvest::default();
    for crop in crops.iter_mut() {
        if crop.body.alive && crop.body.corner_distance(player) < SCYTHE_RADIUS {
            harvest.take(crop);
        }
    }
    harvest
}

/// Mark overlapped power-ups as collected, returning their kinds in list order
pub fn collect_power_ups(player: &Body, power_ups: &mut [PowerUp]) -> Vec<PowerUpKind> {
    power_ups
        .iter_mut()
        .filter(|p| p.body.alive && player.overlaps(&p.body))
        .map(|p| {
            p.body.alive = false;
            p.kind
        })
        .collect()
}

/// Number of crows currently overlapping the player
pub fn crow_hits(player: &Body, crows: &[Crow]) -> u32 {
    crows
        .iter()
        .filter(|c| c.body.alive && player.overlaps(&c.body))
        .count() as u32
}

/// Score after each overlapping crow takes its cut, floored at zero
#[inline]
pub fn apply_crow_penalty(score: u32, hits: u32) -> u32 {
    score.saturating_sub(CROW_PENALTY.saturating_mul(hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::CropKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn crop_at(x: f32, y: f32, kind: CropKind) -> Crop {
        Crop::of_kind(Vec2::new(x, y), kind)
    }

    #[test]
    fn test_collect_two_crops_same_tick() {
        let player = Body::new(100.0, 100.0, 34.0, 34.0);
        let mut crops = vec![
            crop_at(110.0, 110.0, CropKind::Pumpkin),
            crop_at(90.0, 90.0, CropKind::Wheat),
            crop_at(400.0, 400.0, CropKind::GoldenApple),
        ];

        let harvest = collect_crops(&player, &mut crops);
        assert_eq!(harvest, Harvest { count: 2, points: 4 });
        assert!(!crops[0].body.alive);
        assert!(!crops[1].body.alive);
        assert!(crops[2].body.alive);
    }

    #[test]
    fn test_dead_crops_not_collected_twice() {
        let player = Body::new(100.0, 100.0, 34.0, 34.0);
        let mut crops = vec![crop_at(110.0, 110.0, CropKind::GoldenApple)];
        assert_eq!(collect_crops(&player, &mut crops).points, 5);
        assert!(collect_crops(&player, &mut crops).is_empty());
    }

    #[test]
    fn test_scythe_sweep_radius() {
        let mut crops = vec![
            crop_at(199.0, 100.0, CropKind::Pumpkin), // 99 away
            crop_at(100.0, 200.0, CropKind::Wheat),   // exactly 100: outside
            crop_at(160.0, 180.0, CropKind::GoldenApple), // 100 away (60, 80)
            crop_at(130.0, 140.0, CropKind::GoldenApple), // 50 away
        ];
        crops[3].body.alive = false;

        let player = Body::new(100.0, 100.0, 34.0, 34.0);
        let harvest = scythe_sweep(&player, &mut crops);
        assert_eq!(harvest, Harvest { count: 1, points: 3 });
        assert!(!crops[0].body.alive);
        assert!(crops[1].body.alive);
        assert!(crops[2].body.alive);
    }

    #[test]
    fn test_collect_power_ups() {
        let player = Body::new(0.0, 0.0, 34.0, 34.0);
        let mut power_ups = vec![
            PowerUp::new(Vec2::new(20.0, 20.0), PowerUpKind::Scythe),
            PowerUp::new(Vec2::new(34.0, 0.0), PowerUpKind::Speed), // touching only
        ];
        let kinds = collect_power_ups(&player, &mut power_ups);
        assert_eq!(kinds, vec![PowerUpKind::Scythe]);
        assert!(!power_ups[0].body.alive);
        assert!(power_ups[1].body.alive);
    }

    #[test]
    fn test_crow_penalty() {
        let player = Body::new(100.0, 100.0, 34.0, 34.0);
        let one = [Crow::new(110.0, 110.0, Vec2::ZERO)];
        let two = [
            Crow::new(110.0, 110.0, Vec2::ZERO),
            Crow::new(90.0, 90.0, Vec2::ZERO),
        ];

        assert_eq!(apply_crow_penalty(5, crow_hits(&player, &one)), 3);
        assert_eq!(apply_crow_penalty(5, crow_hits(&player, &two)), 1);
        assert_eq!(apply_crow_penalty(1, crow_hits(&player, &one)), 0);
        assert_eq!(apply_crow_penalty(7, crow_hits(&player, &[])), 7);
    }

    fn body_strategy() -> impl Strategy<Value = Body> {
        (-50.0f32..950.0, -50.0f32..600.0, 0.5f32..120.0, 0.5f32..120.0)
            .prop_map(|(x, y, w, h)| Body::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in body_strategy(), b in body_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_body_overlaps_itself(a in body_strategy()) {
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn prop_edge_neighbours_never_overlap(a in body_strategy(), h in 0.5f32..120.0) {
            let right = Body::new(a.right(), a.pos.y, 10.0, h);
            prop_assert!(!a.overlaps(&right));
            prop_assert!(!right.overlaps(&a));
        }

        #[test]
        fn prop_penalty_never_underflows(score in 0u32..1000, hits in 0u32..50) {
            let after = apply_crow_penalty(score, hits);
            prop_assert!(after <= score);
            prop_assert_eq!(after, score.saturating_sub(2 * hits));
        }
    }
}
