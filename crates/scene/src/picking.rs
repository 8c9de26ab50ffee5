use content::WorldId;
use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

/// A pickable world body: a bounding sphere in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickTarget {
    pub world: WorldId,
    pub center: Vec3,
    pub radius: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub world: WorldId,
    pub distance: f64,
    pub point: Vec3,
}

/// Deterministic ray picking over world bodies.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Equal distances resolve to the world that comes first in [`WorldId::ALL`].
/// - A ray starting inside a body hits it at distance 0.
pub fn pick_world(targets: &[PickTarget], ray: Ray) -> Option<PickHit> {
    let dir = normalize(ray.dir)?;
    if !ray.origin.is_finite() {
        return None;
    }

    let mut best: Option<(f64, WorldId)> = None;
    for target in targets {
        let Some(t) = ray_sphere_hit_t(ray.origin, dir, target.center, target.radius) else {
            continue;
        };
        best = match best {
            None => Some((t, target.world)),
            Some((bt, bw)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| target.world.cmp(&bw));
                if ord.is_lt() {
                    Some((t, target.world))
                } else {
                    Some((bt, bw))
                }
            }
        };
    }

    let (distance, world) = best?;
    Some(PickHit {
        world,
        distance,
        point: ray.origin + dir * distance,
    })
}

fn normalize(v: Vec3) -> Option<Vec3> {
    let len = v.length();
    if !len.is_finite() || len <= 0.0 {
        return None;
    }
    Some(v * (1.0 / len))
}

/// Entry distance along a unit-length `dir`, or `None` on a miss.
fn ray_sphere_hit_t(origin: Vec3, dir: Vec3, center: Vec3, radius: f64) -> Option<f64> {
    if !(radius.is_finite() && radius > 0.0) {
        return None;
    }
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}
