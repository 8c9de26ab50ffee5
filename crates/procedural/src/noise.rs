use foundation::math::Vec3;

// Simplex skew/unskew factors for three dimensions.
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;
// Gradient lattice spacing on the 7x7 grid.
const N7: f64 = 1.0 / 7.0;

fn mod289(x: f64) -> f64 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f64) -> f64 {
    mod289((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: f64) -> f64 {
    1.79284291400159 - 0.85373472095314 * r
}

fn step(edge: f64, x: f64) -> f64 {
    if x < edge { 0.0 } else { 1.0 }
}

fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 3D simplex noise with the permutation polynomial and gradient lattice used
/// by the surface shaders. Continuous, deterministic, range roughly `[-1, 1]`.
pub fn snoise3(v: Vec3) -> f64 {
    let s = (v.x + v.y + v.z) * F3;
    let i = [(v.x + s).floor(), (v.y + s).floor(), (v.z + s).floor()];
    let t = (i[0] + i[1] + i[2]) * G3;
    let x0 = [v.x - i[0] + t, v.y - i[1] + t, v.z - i[2] + t];

    // Corner ordering inside the simplex.
    let g = [step(x0[1], x0[0]), step(x0[2], x0[1]), step(x0[0], x0[2])];
    let l = [1.0 - g[0], 1.0 - g[1], 1.0 - g[2]];
    let i1 = [g[0].min(l[2]), g[1].min(l[0]), g[2].min(l[1])];
    let i2 = [g[0].max(l[2]), g[1].max(l[0]), g[2].max(l[1])];

    let offsets = [[0.0; 3], i1, i2, [1.0; 3]];
    let im = [mod289(i[0]), mod289(i[1]), mod289(i[2])];
    let ns = [2.0 * N7, 0.5 * N7 - 1.0];

    let mut sum = 0.0;
    for (k, o) in offsets.iter().enumerate() {
        let corner_shift = k as f64 * G3;
        let xk = [
            x0[0] - o[0] + corner_shift,
            x0[1] - o[1] + corner_shift,
            x0[2] - o[2] + corner_shift,
        ];

        let m = (0.6 - dot3(xk, xk)).max(0.0);
        if m == 0.0 {
            continue;
        }

        let p = permute(permute(permute(im[2] + o[2]) + im[1] + o[1]) + im[0] + o[0]);

        // `p` is an integer in [0, 289); split it into 7x7 cells exactly.
        let j = p - 49.0 * (p / 49.0).floor();
        let gx_cell = (j / 7.0).floor();
        let gy_cell = j - 7.0 * gx_cell;
        let gx = gx_cell * ns[0] + ns[1];
        let gy = gy_cell * ns[0] + ns[1];
        let h = 1.0 - gx.abs() - gy.abs();

        let sh = if h <= 0.0 { -1.0 } else { 0.0 };
        let grad = [
            gx + (gx.floor() * 2.0 + 1.0) * sh,
            gy + (gy.floor() * 2.0 + 1.0) * sh,
            h,
        ];
        let norm = taylor_inv_sqrt(dot3(grad, grad));

        let m2 = m * m;
        sum += m2 * m2 * norm * dot3(grad, xk);
    }
    42.0 * sum
}

#[cfg(test)]
mod tests {
    use super::snoise3;
    use foundation::math::Vec3;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn matches_reference_field() {
        let golden = [
            (Vec3::new(0.0, 0.0, 0.0), -0.41219879874047005),
            (Vec3::new(0.5, 0.5, 0.5), -0.21205890007491676),
            (Vec3::new(1.2, 0.4, -0.8), 0.432346205106627),
            (Vec3::new(3.7, -2.2, 0.9), 0.5988699369420089),
        ];
        for (p, expected) in golden {
            assert_close(snoise3(p), expected);
        }
    }

    #[test]
    fn lattice_cells_on_multiples_of_seven_stay_on_the_grid() {
        // Permutation value 245 = 5 * 49 at one corner.
        assert_close(snoise3(Vec3::new(10.25, -4.5, 7.125)), -0.0976096185871739);
        // A corner whose lattice index is a multiple of 7.
        assert_close(snoise3(Vec3::new(-2.0, -1.21, 2.12)), -0.04874656963217743);
    }

    #[test]
    fn dense_sweep_stays_bounded() {
        let mut worst: f64 = 0.0;
        for x in 0..40 {
            for y in 0..40 {
                for z in 0..45 {
                    let p = Vec3::new(
                        x as f64 * 0.61 - 12.0,
                        y as f64 * 0.47 - 9.0,
                        z as f64 * 0.53 - 11.0,
                    );
                    worst = worst.max(snoise3(p).abs());
                }
            }
        }
        assert!(worst <= 1.05, "noise reached {worst}");
    }

    fn grid() -> impl Iterator<Item = Vec3> {
        (0..12).flat_map(|x| {
            (0..12).flat_map(move |y| {
                (0..6).map(move |z| {
                    Vec3::new(x as f64 * 0.37 - 2.0, y as f64 * 0.29 - 1.5, z as f64 * 0.53)
                })
            })
        })
    }

    #[test]
    fn is_deterministic() {
        for p in grid() {
            assert_eq!(snoise3(p).to_bits(), snoise3(p).to_bits());
        }
    }

    #[test]
    fn stays_in_unit_range() {
        for p in grid() {
            let n = snoise3(p);
            assert!(n.is_finite());
            assert!((-1.05..=1.05).contains(&n), "{n} at {p:?}");
        }
    }

    #[test]
    fn varies_and_is_continuous() {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for p in grid() {
            let n = snoise3(p);
            min = min.min(n);
            max = max.max(n);

            let q = p + Vec3::splat(1e-5);
            assert!((snoise3(q) - n).abs() < 1e-3);
        }
        assert!(max - min > 0.5, "noise field is nearly flat: [{min}, {max}]");
    }
}
