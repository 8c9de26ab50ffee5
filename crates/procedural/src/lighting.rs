use foundation::Rgb;
use foundation::math::{Vec3, easing::clamp01, easing::lerp};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vec3,
    pub color: Rgb,
    pub intensity: f64,
}

impl DirectionalLight {
    pub fn new(toward_light: Vec3, color: Rgb, intensity: f64) -> Self {
        Self {
            direction: toward_light.normalize(),
            color,
            intensity,
        }
    }
}

/// Sky/ground gradient keyed on how far the normal faces up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HemisphereLight {
    pub sky: Rgb,
    pub ground: Rgb,
    pub intensity: f64,
}

impl HemisphereLight {
    pub fn irradiance(&self, normal: Vec3) -> Rgb {
        let t = 0.5 * normal.normalize().y + 0.5;
        self.ground.lerp(self.sky, t).scale(self.intensity)
    }
}

/// Lights shared by every lit surface in the scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneLights {
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
    pub ambient_color: Rgb,
    pub ambient_intensity: f64,
    pub hemisphere: HemisphereLight,
    /// Terminator softening applied to the key light.
    pub wrap: f64,
    /// Diffuse weight of the fill light.
    pub fill_weight: f64,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            key: DirectionalLight::new(
                Vec3::new(10.0, 14.0, 8.0),
                Rgb::from_rgb8(0xfe, 0xf3, 0xc7),
                1.8,
            ),
            fill: DirectionalLight::new(
                Vec3::new(-8.0, 6.0, -6.0),
                Rgb::from_rgb8(0xa5, 0xb4, 0xfc),
                0.4,
            ),
            ambient_color: Rgb::from_rgb8(0xcb, 0xd5, 0xe1),
            ambient_intensity: 0.25,
            hemisphere: HemisphereLight {
                sky: Rgb::from_rgb8(0x47, 0x55, 0x69),
                ground: Rgb::from_rgb8(0x0f, 0x17, 0x2a),
                intensity: 0.35,
            },
            wrap: 0.25,
            fill_weight: 0.6,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub roughness: f64,
    pub metalness: f64,
}

impl Material {
    /// Blinn-Phong exponent: glossy at roughness 0, broad at 1.
    pub fn specular_power(&self) -> f64 {
        lerp(128.0, 12.0, self.roughness)
    }

    pub fn specular_weight(&self) -> f64 {
        lerp(0.04, 0.35, self.metalness)
    }
}

/// Key (wrapped diffuse + specular) and fill (diffuse) lighting plus tinted
/// ambient and the hemisphere gradient.
///
/// `rim_boost` scales an extra key-colored term that grows toward the
/// silhouette; pass 0 for no rim. Output is final color, no tone curve.
pub fn shade(
    albedo: Rgb,
    normal: Vec3,
    view: Vec3,
    material: &Material,
    lights: &SceneLights,
    rim_boost: f64,
) -> Rgb {
    let n = normal.normalize();
    let v = view.normalize();
    let l1 = lights.key.direction;
    let l2 = lights.fill.direction;

    let wrapped = clamp01((n.dot(l1) + lights.wrap) / (1.0 + lights.wrap));
    let h = (l1 + v).normalize();
    let spec = n.dot(h).max(0.0).powf(material.specular_power()) * material.specular_weight();
    let mut key = lights.key.color.scale(lights.key.intensity * (wrapped + spec));

    if rim_boost > 0.0 {
        let rim = (1.0 - n.dot(v).max(0.0)).powi(3);
        key = key.add(lights.key.color.scale(rim * rim_boost * lights.key.intensity));
    }

    let fill = lights
        .fill
        .color
        .scale(lights.fill.intensity * n.dot(l2).max(0.0) * lights.fill_weight);

    let ambient = lights
        .ambient_color
        .scale(lights.ambient_intensity)
        .add(lights.hemisphere.irradiance(n));
    albedo.mul(key.add(fill).add(ambient))
}

#[cfg(test)]
mod tests {
    use super::{Material, SceneLights, shade};
    use pretty_assertions::assert_eq;
    use foundation::Rgb;
    use foundation::math::Vec3;

    const MAT: Material = Material {
        roughness: 0.5,
        metalness: 0.1,
    };

    #[test]
    fn lit_side_is_brighter_than_dark_side() {
        let lights = SceneLights::default();
        let toward = lights.key.direction;
        let lit = shade(Rgb::WHITE, toward, toward, &MAT, &lights, 0.0);
        let dark = shade(Rgb::WHITE, -toward, toward, &MAT, &lights, 0.0);
        assert!(lit.r > dark.r && lit.g > dark.g);
    }

    #[test]
    fn fully_unlit_point_keeps_ambient() {
        let lights = SceneLights::default();
        // Facing away from both key and fill.
        let n = -(lights.key.direction + lights.fill.direction).normalize();
        let c = shade(Rgb::WHITE, n, n, &MAT, &lights, 0.0);
        let floor = lights.ambient_color.scale(lights.ambient_intensity);
        assert!(c.r >= floor.r - 1e-12 && c.b >= floor.b - 1e-12);
    }

    #[test]
    fn hemisphere_lifts_upward_normals_more() {
        let lights = SceneLights::default();
        let hemi = lights.hemisphere;
        let sky = hemi.irradiance(Vec3::Y);
        assert!((sky.b - hemi.sky.b * 0.35).abs() < 1e-12);
        assert_eq!(hemi.irradiance(-Vec3::Y), hemi.ground.scale(0.35));

        // Key and fill switched off leave ambient plus hemisphere.
        let mut dark = lights;
        dark.key.intensity = 0.0;
        dark.fill.intensity = 0.0;
        let up = shade(Rgb::WHITE, Vec3::Y, Vec3::Y, &MAT, &dark, 0.0);
        let down = shade(Rgb::WHITE, -Vec3::Y, Vec3::Y, &MAT, &dark, 0.0);
        assert!(up.b > down.b);
        let expected = 0.25 * (0xe1 as f64 / 255.0) + 0.35 * (0x69 as f64 / 255.0);
        assert!((up.b - expected).abs() < 1e-12);
    }

    #[test]
    fn rim_boost_only_brightens() {
        let lights = SceneLights::default();
        let n = Vec3::new(1.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 0.0, 1.0);
        let base = Rgb::new(0.2, 0.4, 0.9);
        let plain = shade(base, n, v, &MAT, &lights, 0.0);
        let icy = shade(base, n, v, &MAT, &lights, 0.15);
        assert!(icy.r > plain.r && icy.b > plain.b);
    }
}
