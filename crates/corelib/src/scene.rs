//! Animated scenes: bodies in a [`World`] driven by [`AppState`] on each tick.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::{
    ecs::{Entity, MeshId, Renderable, World},
    input::AppState,
    transform::{Transform, orbit_offset},
};

/// Base self-rotation rate: 90 degrees per second.
pub const SPIN_RATE: f32 = FRAC_PI_2;
pub const PLANET_ORBIT_RADIUS: f32 = 4.0;
pub const PLANET_ORBIT_RATE: f32 = FRAC_PI_2;
pub const MOON_ORBIT_RADIUS: f32 = 3.0;
pub const MOON_ORBIT_RATE: f32 = PI;

pub trait Scene {
    /// Advance the animation by `dt` seconds.
    fn tick(&mut self, dt: f32, state: &AppState);
    fn world(&self) -> &World;
}

/// A planet orbiting the origin while a moon orbits the planet.
pub struct OrbitScene {
    world: World,
    planet: Entity,
    moon: Entity,
    planet_angle: f32,
    moon_angle: f32,
    spin_angle: f32,
}

impl OrbitScene {
    /// Both bodies draw `mesh`.
    pub fn new(mesh: MeshId) -> Self {
        let mut world = World::new();
        let planet = world.spawn(Transform::identity(), Some(Renderable { mesh }));
        let moon = world.spawn(Transform::identity(), Some(Renderable { mesh }));
        let mut scene = Self {
            world,
            planet,
            moon,
            planet_angle: 0.0,
            moon_angle: 0.0,
            spin_angle: 0.0,
        };
        scene.apply();
        scene
    }

    pub fn planet(&self) -> Entity {
        self.planet
    }

    pub fn moon(&self) -> Entity {
        self.moon
    }

    fn apply(&mut self) {
        let planet_pos = orbit_offset(PLANET_ORBIT_RADIUS, self.planet_angle);
        if let Some(t) = self.world.transform_mut(self.planet) {
            *t = Transform::from_translation_yaw(planet_pos, self.spin_angle);
        }
        let moon_pos = planet_pos + orbit_offset(MOON_ORBIT_RADIUS, self.moon_angle);
        if let Some(t) = self.world.transform_mut(self.moon) {
            *t = Transform::from_translation_yaw(moon_pos, 0.0);
        }
    }
}

impl Scene for OrbitScene {
    fn tick(&mut self, dt: f32, state: &AppState) {
        self.planet_angle += dt * PLANET_ORBIT_RATE * state.orbit.sign();
        self.moon_angle += dt * MOON_ORBIT_RATE;
        if state.rotating {
            self.spin_angle += dt * SPIN_RATE * state.spin.sign() * state.speed;
        }
        self.apply();
    }

    fn world(&self) -> &World {
        &self.world
    }
}

/// A single mesh spinning about +Y at the origin.
pub struct TurntableScene {
    world: World,
    body: Entity,
    angle: f32,
}

impl TurntableScene {
    pub fn new(mesh: MeshId) -> Self {
        let mut world = World::new();
        let body = world.spawn(Transform::identity(), Some(Renderable { mesh }));
        Self {
            world,
            body,
            angle: 0.0,
        }
    }

    pub fn body(&self) -> Entity {
        self.body
    }
}

impl Scene for TurntableScene {
    fn tick(&mut self, dt: f32, _state: &AppState) {
        self.angle += dt * SPIN_RATE;
        if let Some(t) = self.world.transform_mut(self.body) {
            t.rotation_euler.y = self.angle;
        }
    }

    fn world(&self) -> &World {
        &self.world
    }
}
