//! Constant-gravity integration
//!
//! Simple semi-implicit Euler step in field units per tick. Velocity is
//! clamped after each step to bound how fast anything can leave the field.

use super::entity::Entity;
use super::weather::WeatherEffect;

/// Velocity limits applied after integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    pub max_vx: f32,
    pub max_vy: f32,
}

/// Advance one airborne entity by a single tick
#[inline]
pub fn integrate(entity: &mut Entity, weather: WeatherEffect, limits: SpeedLimits) {
    if !entity.is_airborne() {
        return;
    }
    entity.vel.y += entity.gravity * weather.gravity;
    entity.pos += entity.vel * weather.speed;
    entity.vel.x = entity.vel.x.clamp(-limits.max_vx, limits.max_vx);
    entity.vel.y = entity.vel.y.clamp(-limits.max_vy, limits.max_vy);
}

/// Advance every airborne entity in the pool
pub fn integrate_all(entities: &mut [Entity], weather: WeatherEffect, limits: SpeedLimits) {
    for entity in entities.iter_mut() {
        integrate(entity, weather, limits);
    }
}
