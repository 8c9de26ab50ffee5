use foundation::math::Vec3;

pub const STAR_COUNT: u32 = 1500;
/// Edge length of the cube the stars are scattered in.
pub const STAR_EXTENT: f64 = 120.0;
pub const STAR_MIN_SIZE: f64 = 0.015;
pub const STAR_SIZE_RANGE: f64 = 0.06;
/// Starfield spin about Y (rad/s).
pub const STAR_SPIN: f64 = 0.005;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub size: f64,
}

/// 32-bit integer mix (non-linear) to avoid visible correlation patterns.
pub fn hash_u32(x_in: u32) -> u32 {
    let mut x = x_in;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

pub fn hash01(x: u32) -> f64 {
    hash_u32(x) as f64 / u32::MAX as f64
}

/// Deterministic star placement, uniform in a cube centered on the origin.
pub fn starfield(count: u32, extent: f64) -> Vec<Star> {
    (0..count)
        .map(|i| {
            let k = i.wrapping_mul(4);
            let position = Vec3::new(
                (hash01(k ^ 0x68bc_21eb) - 0.5) * extent,
                (hash01(k.wrapping_add(1) ^ 0x02e5_be93) - 0.5) * extent,
                (hash01(k.wrapping_add(2) ^ 0x9e37_79b9) - 0.5) * extent,
            );
            let size = hash01(k.wrapping_add(3) ^ 0x85eb_ca6b) * STAR_SIZE_RANGE + STAR_MIN_SIZE;
            Star { position, size }
        })
        .collect()
}
