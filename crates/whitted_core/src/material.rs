//! Phong material parameters and light sources.

use glam::DVec3;
use whitted_math::HomogeneousVector;

/// Color type alias (RGB, unclamped)
pub type Color = DVec3;

/// Display colors used by selection highlighting.
pub mod palette {
    use super::Color;

    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
}

/// Phong surface description.
///
/// `reflective_weight` and `refractive_weight` scale the contribution of the
/// secondary rays; a weight of exactly zero disables that ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f64,
    pub refractive_index: f64,
    pub reflective_weight: f64,
    pub refractive_weight: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::ONE,
            diffuse: Color::ONE,
            specular: Color::ONE,
            shininess: 0.0,
            refractive_index: 0.0,
            reflective_weight: 0.0,
            refractive_weight: 0.0,
        }
    }
}

impl Material {
    /// Fixed ambient coefficient applied to every surface.
    pub const AMBIENT_COEFFICIENT: Color = Color::splat(0.3);

    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            ..Default::default()
        }
    }

    pub fn with_reflection(mut self, weight: f64) -> Self {
        self.reflective_weight = weight;
        self
    }

    pub fn with_refraction(mut self, index: f64, weight: f64) -> Self {
        self.refractive_index = index;
        self.refractive_weight = weight;
        self
    }

    pub fn is_reflective(&self) -> bool {
        self.reflective_weight != 0.0
    }

    pub fn is_refractive(&self) -> bool {
        self.refractive_weight != 0.0
    }

    /// Ambient term.
    pub fn phong_ambient(&self) -> Color {
        self.ambient * Self::AMBIENT_COEFFICIENT
    }

    /// Diffuse and specular contribution of one light at `vertex`.
    ///
    /// `dir` is the incoming ray direction. The normal is flipped to face the
    /// viewer first, so back faces are lit like front faces. Nothing is
    /// clamped; several lights may push a channel above 1.
    pub fn phong(
        &self,
        dir: HomogeneousVector,
        light: &Light,
        vertex: HomogeneousVector,
        normal: HomogeneousVector,
    ) -> Color {
        let light_dir = light.direction_from(vertex);
        let view = -dir.normalize();
        let normal = if normal.dot(&view) < 0.0 { -normal } else { normal };

        let n_dot_l = normal.dot(&light_dir);
        if n_dot_l <= 0.0 {
            return Color::ZERO;
        }

        let mut color = self.diffuse * light.color * n_dot_l;

        let halfway = (light_dir + view).normalize();
        let n_dot_h = normal.dot(&halfway);
        if n_dot_h > 0.0 {
            color += self.specular * light.color * n_dot_h.powf(self.shininess);
        }
        color
    }
}

/// A point or directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Location if a point (`w != 0`), direction towards the light if a vector.
    pub position: HomogeneousVector,
    pub color: Color,
}

impl Light {
    pub fn point(position: DVec3, color: Color) -> Self {
        Self {
            position: HomogeneousVector::from_point3(position),
            color,
        }
    }

    /// A light infinitely far away in `direction`.
    pub fn directional(direction: DVec3, color: Color) -> Self {
        Self {
            position: HomogeneousVector::from_vector3(direction),
            color,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.position.is_vector()
    }

    /// Unit vector from `vertex` towards the light (zero if undefined).
    pub fn direction_from(&self, vertex: HomogeneousVector) -> HomogeneousVector {
        if self.position.is_point() {
            (self.position - vertex).normalize()
        } else {
            self.position.normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Material {
        Material::new(Color::ONE, Color::ONE, Color::ONE, 1.0)
    }

    #[test]
    fn test_phong_head_on() {
        let light = Light::point(DVec3::new(0.0, 0.0, 5.0), Color::ONE);
        let color = white().phong(
            HomogeneousVector::vector(0.0, 0.0, -1.0),
            &light,
            HomogeneousVector::point(0.0, 0.0, 1.0),
            HomogeneousVector::vector(0.0, 0.0, 1.0),
        );
        // Diffuse 1 plus specular 1
        assert!((color - Color::splat(2.0)).length() < 1e-12);
    }

    #[test]
    fn test_phong_flips_back_facing_normal() {
        let light = Light::point(DVec3::new(0.0, 0.0, 5.0), Color::ONE);
        let front = white().phong(
            HomogeneousVector::vector(0.0, 0.0, -1.0),
            &light,
            HomogeneousVector::point(0.0, 0.0, 1.0),
            HomogeneousVector::vector(0.0, 0.0, 1.0),
        );
        let back = white().phong(
            HomogeneousVector::vector(0.0, 0.0, -1.0),
            &light,
            HomogeneousVector::point(0.0, 0.0, 1.0),
            HomogeneousVector::vector(0.0, 0.0, -1.0),
        );
        assert_eq!(front, back);
    }

    #[test]
    fn test_phong_light_behind_surface() {
        let light = Light::directional(DVec3::new(0.0, 0.0, -1.0), Color::ONE);
        let color = white().phong(
            HomogeneousVector::vector(0.0, 0.0, -1.0),
            &light,
            HomogeneousVector::point(0.0, 0.0, 1.0),
            HomogeneousVector::vector(0.0, 0.0, 1.0),
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_phong_light_at_vertex_contributes_nothing() {
        let light = Light::point(DVec3::new(0.0, 0.0, 1.0), Color::ONE);
        let color = white().phong(
            HomogeneousVector::vector(0.0, 0.0, -1.0),
            &light,
            HomogeneousVector::point(0.0, 0.0, 1.0),
            HomogeneousVector::vector(0.0, 0.0, 1.0),
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_ambient_term() {
        let m = Material::new(Color::new(1.0, 0.5, 0.0), Color::ZERO, Color::ZERO, 1.0);
        assert!((m.phong_ambient() - Color::new(0.3, 0.15, 0.0)).length() < 1e-12);
    }
}
