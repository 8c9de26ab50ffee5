//! WGSL sources. Every fragment stage mirrors a function in `procedural`;
//! change both together.

use scene::components::{Drawable, MaterialKind, MeshKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderKind {
    Surface,
    Clouds,
    Atmosphere,
    Ring,
    Lit,
    Basic,
    Stars,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 7] = [
        ShaderKind::Surface,
        ShaderKind::Clouds,
        ShaderKind::Atmosphere,
        ShaderKind::Ring,
        ShaderKind::Lit,
        ShaderKind::Basic,
        ShaderKind::Stars,
    ];

    pub fn for_drawable(drawable: &Drawable) -> Self {
        if let MeshKind::Starfield { .. } = drawable.mesh {
            return ShaderKind::Stars;
        }
        match drawable.material {
            MaterialKind::Surface { .. } => ShaderKind::Surface,
            MaterialKind::Clouds { .. } => ShaderKind::Clouds,
            MaterialKind::Atmosphere { .. } => ShaderKind::Atmosphere,
            MaterialKind::Ring { .. } => ShaderKind::Ring,
            MaterialKind::Lit { .. } => ShaderKind::Lit,
            MaterialKind::Basic { .. } => ShaderKind::Basic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Surface => "solar-surface-shader",
            ShaderKind::Clouds => "solar-clouds-shader",
            ShaderKind::Atmosphere => "solar-atmosphere-shader",
            ShaderKind::Ring => "solar-ring-shader",
            ShaderKind::Lit => "solar-lit-shader",
            ShaderKind::Basic => "solar-basic-shader",
            ShaderKind::Stars => "solar-stars-shader",
        }
    }

    /// Stars draw as a point list; everything else is indexed triangles.
    pub fn is_point_list(self) -> bool {
        self == ShaderKind::Stars
    }

    /// Full module source: shared prelude plus this shader's stages.
    pub fn source(self) -> String {
        let (noise, vertex, fragment) = match self {
            ShaderKind::Surface => (true, SURFACE_VS, SURFACE_FS),
            ShaderKind::Clouds => (true, MESH_VS, CLOUDS_FS),
            ShaderKind::Atmosphere => (false, MESH_VS, ATMOSPHERE_FS),
            ShaderKind::Ring => (false, MESH_VS, RING_FS),
            ShaderKind::Lit => (false, MESH_VS, LIT_FS),
            ShaderKind::Basic => (false, MESH_VS, BASIC_FS),
            ShaderKind::Stars => (false, STARS_VS, STARS_FS),
        };
        let mut src = String::from(PRELUDE);
        if noise {
            src.push_str(NOISE);
        }
        src.push_str(vertex);
        src.push_str(fragment);
        src
    }
}

const PRELUDE: &str = r#"
struct FrameUniforms {
    view_proj: mat4x4<f32>,
    // xyz: eye position, w: scene time (s)
    camera_pos: vec4<f32>,
    // xyz: toward the key light, w: intensity
    key_dir: vec4<f32>,
    key_color: vec4<f32>,
    fill_dir: vec4<f32>,
    // rgb: fill color, w: key wrap
    fill_color: vec4<f32>,
    // rgb: ambient tint, w: ambient intensity
    ambient: vec4<f32>,
    // rgb: hemisphere sky color, w: hemisphere intensity
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    // x: fill weight, yz: viewport size
    params: vec4<f32>,
};

struct DrawUniforms {
    model: mat4x4<f32>,
    // rgb: base color, a: opacity or intensity
    color: vec4<f32>,
    // rgb: emissive, w: world type
    emissive: vec4<f32>,
    // noise scale, displacement, roughness, metalness
    surface: vec4<f32>,
    // x: rim boost
    extra: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: FrameUniforms;

@group(1) @binding(0)
var<uniform> per_draw: DrawUniforms;

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    // Object-space position, or the noise sample point for surfaces.
    @location(3) local_pos: vec3<f32>,
};

fn view_dir(world_pos: vec3<f32>) -> vec3<f32> {
    return normalize(globals.camera_pos.xyz - world_pos);
}

fn shade(
    albedo: vec3<f32>,
    n_in: vec3<f32>,
    v_in: vec3<f32>,
    roughness: f32,
    metalness: f32,
    rim_boost: f32,
) -> vec3<f32> {
    let n = normalize(n_in);
    let v = normalize(v_in);
    let l1 = globals.key_dir.xyz;
    let l2 = globals.fill_dir.xyz;
    let wrap = globals.fill_color.w;

    let wrapped = clamp((dot(n, l1) + wrap) / (1.0 + wrap), 0.0, 1.0);
    let h = normalize(l1 + v);
    let spec = pow(max(dot(n, h), 0.0), mix(128.0, 12.0, roughness)) * mix(0.04, 0.35, metalness);
    var key = globals.key_color.rgb * (globals.key_dir.w * (wrapped + spec));

    if (rim_boost > 0.0) {
        let rim = pow(1.0 - max(dot(n, v), 0.0), 3.0);
        key = key + globals.key_color.rgb * (rim * rim_boost * globals.key_dir.w);
    }

    let fill = globals.fill_color.rgb
        * (globals.fill_dir.w * max(dot(n, l2), 0.0) * globals.params.x);
    let hemi = mix(globals.hemi_ground.rgb, globals.hemi_sky.rgb, 0.5 * n.y + 0.5) * globals.hemi_sky.w;
    let ambient = globals.ambient.rgb * globals.ambient.w + hemi;
    return albedo * (key + fill + ambient);
}
"#;

const NOISE: &str = r#"
fn mod289_3(x: vec3<f32>) -> vec3<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn mod289_4(x: vec4<f32>) -> vec4<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn permute4(x: vec4<f32>) -> vec4<f32> {
    return mod289_4(((x * 34.0) + 1.0) * x);
}

fn taylor_inv_sqrt4(r: vec4<f32>) -> vec4<f32> {
    return 1.79284291400159 - 0.85373472095314 * r;
}

fn snoise(v: vec3<f32>) -> f32 {
    let c = vec2<f32>(1.0 / 6.0, 1.0 / 3.0);
    let d = vec4<f32>(0.0, 0.5, 1.0, 2.0);

    var i = floor(v + dot(v, c.yyy));
    let x0 = v - i + dot(i, c.xxx);

    let g = step(x0.yzx, x0.xyz);
    let l = 1.0 - g;
    let i1 = min(g.xyz, l.zxy);
    let i2 = max(g.xyz, l.zxy);

    let x1 = x0 - i1 + c.xxx;
    let x2 = x0 - i2 + c.yyy;
    let x3 = x0 - d.yyy;

    i = mod289_3(i);
    let p = permute4(permute4(permute4(
        i.z + vec4<f32>(0.0, i1.z, i2.z, 1.0))
        + i.y + vec4<f32>(0.0, i1.y, i2.y, 1.0))
        + i.x + vec4<f32>(0.0, i1.x, i2.x, 1.0));

    let n_ = 0.142857142857;
    let ns = n_ * d.wyz - d.xzx;

    let j = p - 49.0 * floor(p * ns.z * ns.z);
    let x_ = floor(j * ns.z);
    let y_ = floor(j - 7.0 * x_);

    let x = x_ * ns.x + ns.yyyy;
    let y = y_ * ns.x + ns.yyyy;
    let h = 1.0 - abs(x) - abs(y);

    let b0 = vec4<f32>(x.xy, y.xy);
    let b1 = vec4<f32>(x.zw, y.zw);
    let s0 = floor(b0) * 2.0 + 1.0;
    let s1 = floor(b1) * 2.0 + 1.0;
    let sh = -step(h, vec4<f32>(0.0));

    let a0 = b0.xzyw + s0.xzyw * sh.xxyy;
    let a1 = b1.xzyw + s1.xzyw * sh.zzww;

    var p0 = vec3<f32>(a0.xy, h.x);
    var p1 = vec3<f32>(a0.zw, h.y);
    var p2 = vec3<f32>(a1.xy, h.z);
    var p3 = vec3<f32>(a1.zw, h.w);

    let norm = taylor_inv_sqrt4(vec4<f32>(dot(p0, p0), dot(p1, p1), dot(p2, p2), dot(p3, p3)));
    p0 = p0 * norm.x;
    p1 = p1 * norm.y;
    p2 = p2 * norm.z;
    p3 = p3 * norm.w;

    var m = max(0.6 - vec4<f32>(dot(x0, x0), dot(x1, x1), dot(x2, x2), dot(x3, x3)), vec4<f32>(0.0));
    m = m * m;
    return 42.0 * dot(m * m, vec4<f32>(dot(p0, x0), dot(p1, x1), dot(p2, x2), dot(p3, x3)));
}

fn fbm(p: vec3<f32>) -> f32 {
    return snoise(p) * 0.5 + snoise(p * 2.0) * 0.25 + snoise(p * 4.0) * 0.125;
}
"#;

const MESH_VS: &str = r#"
@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VsOut {
    let world = per_draw.model * vec4<f32>(position, 1.0);
    var vo: VsOut;
    vo.clip = globals.view_proj * world;
    vo.world_pos = world.xyz;
    vo.world_normal = normalize((per_draw.model * vec4<f32>(normal, 0.0)).xyz);
    vo.uv = uv;
    vo.local_pos = position;
    return vo;
}
"#;

const SURFACE_VS: &str = r#"
const GRADIENT_EPS: f32 = 0.01;

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VsOut {
    let t = globals.camera_pos.w;
    let noise_scale = per_draw.surface.x;
    let displacement = per_draw.surface.y;

    let sp = position * noise_scale + vec3<f32>(0.0, t * 0.02, 0.0);
    let n = fbm(sp);
    let e = GRADIENT_EPS;
    let grad = vec3<f32>(
        fbm(sp + vec3<f32>(e, 0.0, 0.0)) - fbm(sp - vec3<f32>(e, 0.0, 0.0)),
        fbm(sp + vec3<f32>(0.0, e, 0.0)) - fbm(sp - vec3<f32>(0.0, e, 0.0)),
        fbm(sp + vec3<f32>(0.0, 0.0, e)) - fbm(sp - vec3<f32>(0.0, 0.0, e)),
    ) / (2.0 * e);

    let displaced = position + normal * (n * displacement);
    let bent = normalize(normal - grad * (displacement * noise_scale));

    let world = per_draw.model * vec4<f32>(displaced, 1.0);
    var vo: VsOut;
    vo.clip = globals.view_proj * world;
    vo.world_pos = world.xyz;
    vo.world_normal = normalize((per_draw.model * vec4<f32>(bent, 0.0)).xyz);
    vo.uv = uv;
    vo.local_pos = sp;
    return vo;
}
"#;

const SURFACE_FS: &str = r#"
fn ramp_noise(sp: vec3<f32>) -> f32 {
    let p = sp * 0.35;
    let n = snoise(p) * 0.5 + snoise(p * 2.1) * 0.25 + snoise(p * 4.3) * 0.125;
    return n * 0.5 + 0.5;
}

@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    let t = globals.camera_pos.w;
    let n = normalize(frag.world_normal);
    let v = view_dir(frag.world_pos);

    let base = per_draw.color.rgb;
    let dark = base * 0.3;
    let light = mix(base, vec3<f32>(1.0), 0.35);

    let rn = ramp_noise(frag.local_pos);
    var col = light;
    if (rn < 0.38) {
        col = mix(dark, base, rn / 0.38);
    } else if (rn < 0.68) {
        col = mix(base, light, (rn - 0.38) / 0.30);
    }

    // 0 personal, 1 skills, 2 projects, 3 experience
    let world_type = u32(per_draw.emissive.w + 0.5);
    var band_freq = 0.0;
    if (world_type == 1u) {
        band_freq = 18.0;
    } else if (world_type == 3u) {
        band_freq = 22.0;
    }
    if (band_freq > 0.0) {
        let bands = smoothstep(0.2, 0.9, sin(abs(n.y) * band_freq + t * 0.1) * 0.5 + 0.5);
        col = mix(col, light, bands * 0.12);
        if (world_type == 3u) {
            col = mix(col, dark * 1.2, bands * 0.06);
        }
    }
    if (world_type == 2u) {
        let ridged = 1.0 - abs(snoise(frag.local_pos * 0.8));
        col = col * (0.9 + ridged * 0.12);
    }

    let lit = shade(col, n, v, per_draw.surface.z, per_draw.surface.w, per_draw.extra.x);
    return vec4<f32>(lit, 1.0);
}
"#;

const CLOUDS_FS: &str = r#"
@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    let t = globals.camera_pos.w;
    let sp = frag.local_pos * 3.0 + vec3<f32>(t * 0.04, t * 0.015, 0.0);
    let n = snoise(sp) * 0.5 + snoise(sp * 2.2) * 0.25;
    let cover = smoothstep(0.1, 0.6, n * 0.5 + 0.5);
    let rim = pow(max(dot(normalize(frag.world_normal), view_dir(frag.world_pos)), 0.0), 0.8);
    return vec4<f32>(per_draw.color.rgb, cover * rim * 0.06);
}
"#;

const ATMOSPHERE_FS: &str = r#"
@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    let f = pow(1.0 - max(dot(normalize(frag.world_normal), view_dir(frag.world_pos)), 0.0), 3.0);
    let intensity = per_draw.color.a;
    return vec4<f32>(per_draw.color.rgb * (f * intensity), f * intensity * 0.35);
}
"#;

const RING_FS: &str = r#"
const TAU: f32 = 6.28318530718;

@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    let r = frag.uv.x;
    let a = frag.uv.y;

    var band = 0.5 + 0.3 * sin(r * 120.0);
    band = band * (0.6 + 0.4 * sin(r * 50.0 + 1.3));
    band = band * (0.7 + 0.3 * sin(r * 18.0 + 2.7));
    band = band * (0.85 + 0.15 * sin(a * TAU * 8.0 + r * 20.0));
    let gap = (r - 0.58) * 18.0;
    band = band * (1.0 - 0.7 * exp(-(gap * gap)));

    let inner = smoothstep(0.0, 0.12, r);
    let outer = 1.0 - smoothstep(0.78, 1.0, r);
    return vec4<f32>(per_draw.color.rgb * (0.7 + 0.5 * r), band * inner * outer * 0.7);
}
"#;

const LIT_FS: &str = r#"
@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    let lit = shade(
        per_draw.color.rgb,
        frag.world_normal,
        view_dir(frag.world_pos),
        per_draw.surface.z,
        per_draw.surface.w,
        0.0,
    );
    return vec4<f32>(lit + per_draw.emissive.rgb, 1.0);
}
"#;

const BASIC_FS: &str = r#"
@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    return per_draw.color;
}
"#;

const STARS_VS: &str = r#"
@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VsOut {
    let world = per_draw.model * vec4<f32>(position, 1.0);
    var vo: VsOut;
    vo.clip = globals.view_proj * world;
    vo.world_pos = world.xyz;
    vo.world_normal = normal;
    vo.uv = uv;
    vo.local_pos = position;
    return vo;
}
"#;

const STARS_FS: &str = r#"
@fragment
fn fs_main(frag: VsOut) -> @location(0) vec4<f32> {
    // Points rasterize at one pixel; size drives brightness instead.
    let brightness = clamp((frag.uv.x - 0.015) / 0.06, 0.0, 1.0) * 0.6 + 0.4;
    return vec4<f32>(per_draw.color.rgb, per_draw.color.a * brightness);
}
"#;

#[cfg(test)]
mod tests {
    use super::ShaderKind;
    use scene::components::{Drawable, MaterialKind, MeshKind, PassState};
    use foundation::Rgb;

    #[test]
    fn every_module_has_both_entry_points_and_bindings() {
        for kind in ShaderKind::ALL {
            let src = kind.source();
            assert!(src.contains("fn vs_main"), "{kind:?}");
            assert!(src.contains("fn fs_main"), "{kind:?}");
            assert!(src.contains("var<uniform> globals"), "{kind:?}");
            assert!(src.contains("var<uniform> per_draw"), "{kind:?}");
            assert_eq!(src.matches("fn vs_main").count(), 1, "{kind:?}");
        }
    }

    #[test]
    fn noise_is_only_linked_where_sampled() {
        assert!(ShaderKind::Surface.source().contains("fn snoise"));
        assert!(ShaderKind::Clouds.source().contains("fn snoise"));
        assert!(!ShaderKind::Basic.source().contains("fn snoise"));
    }

    #[test]
    fn starfield_mesh_selects_point_shader() {
        let stars = Drawable::new(
            MeshKind::Starfield {
                count: 10,
                extent: 5.0,
            },
            MaterialKind::Basic {
                color: Rgb::WHITE,
                opacity: 0.85,
            },
            PassState::TRANSPARENT,
        );
        let kind = ShaderKind::for_drawable(&stars);
        assert_eq!(kind, ShaderKind::Stars);
        assert!(kind.is_point_list());
    }
}
