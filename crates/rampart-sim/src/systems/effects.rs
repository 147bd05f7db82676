//! Floating damage numbers: drift, gravity, fade.

use hecs::World;

use rampart_core::components::DamageNumber;
use rampart_core::constants::{DAMAGE_NUMBER_DECAY, DAMAGE_NUMBER_GRAVITY};
use rampart_core::types::{Position, Velocity};

pub fn run(world: &mut World) {
    for (_, (number, pos, vel)) in
        world.query_mut::<(&mut DamageNumber, &mut Position, &mut Velocity)>()
    {
        *pos = pos.advanced(vel);
        vel.y += DAMAGE_NUMBER_GRAVITY;
        number.life -= DAMAGE_NUMBER_DECAY;
    }
}
