//! Scene file reader.
//!
//! ```text
//! <lights> <spheres> <meshes>
//! L <type> x y z r g b
//! S tx ty tz scale <material>
//! M <mesh file> scale rx ry rz tx ty tz <material>
//! ```
//!
//! with `<material>` being
//! `ar ag ab dr dg db sr sg sb ka kd ks shininess index k_reflective k_refractive`.
//! Lights come first, then spheres, then meshes. Light type 1 is a point
//! light at `(x, y, z)`, type 0 a directional light shining from `(x, y, z)`.
//! Mesh rotations are in degrees and applied about x, then y, then z.

use std::path::Path;

use whitted_math::{DVec3, HomogeneousVector};

use super::mesh_file::load_mesh;
use super::tokens::Tokens;
use super::{read_file, LoadError, LoadResult};
use crate::material::{Color, Light, Material};
use crate::mesh::Mesh;
use crate::node::Transformable;
use crate::scene::Scene;
use crate::surface::Surface;

/// Read a scene file. Mesh paths are resolved against the scene file's
/// directory.
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let scene = parse_scene(&content, |name| load_mesh(base.join(name)))?;
    log::info!(
        "Loaded scene {}: {} lights, {} spheres, {} meshes",
        path.display(),
        scene.lights().len(),
        scene.num_spheres(),
        scene.num_meshes()
    );
    Ok(scene)
}

/// Parse scene file contents, loading meshes through `resolve_mesh`.
pub fn parse_scene<F>(content: &str, mut resolve_mesh: F) -> LoadResult<Scene>
where
    F: FnMut(&str) -> LoadResult<Mesh>,
{
    let mut tokens = Tokens::new(content);
    let num_lights: usize = tokens.next_value("light count")?;
    let num_spheres: usize = tokens.next_value("sphere count")?;
    let num_meshes: usize = tokens.next_value("mesh count")?;
    log::debug!(
        "Scene header: {} lights, {} spheres, {} meshes",
        num_lights,
        num_spheres,
        num_meshes
    );

    let mut scene = Scene::new();

    for _ in 0..num_lights {
        tokens.expect_tag("L")?;
        scene.add_light(parse_light(&mut tokens)?);
    }

    for _ in 0..num_spheres {
        tokens.expect_tag("S")?;
        let [tx, ty, tz] = tokens.next_triple("sphere position")?;
        let scale = parse_scale(&mut tokens)?;
        let mut sphere = Surface::sphere(parse_material(&mut tokens)?);
        sphere.scale(scale);
        sphere.translate(DVec3::new(tx, ty, tz));
        scene.add_surface(sphere);
    }

    for _ in 0..num_meshes {
        tokens.expect_tag("M")?;
        let (_, name) = tokens.next_token("mesh file name")?;
        let scale = parse_scale(&mut tokens)?;
        let [rx, ry, rz] = tokens.next_triple("mesh rotation")?;
        let [tx, ty, tz] = tokens.next_triple("mesh position")?;
        let material = parse_material(&mut tokens)?;

        let mut mesh = Surface::mesh(resolve_mesh(name)?, material);
        mesh.scale(scale);
        mesh.rotate(rx.to_radians(), DVec3::X);
        mesh.rotate(ry.to_radians(), DVec3::Y);
        mesh.rotate(rz.to_radians(), DVec3::Z);
        mesh.translate(DVec3::new(tx, ty, tz));
        scene.add_surface(mesh);
    }

    if !tokens.is_empty() {
        log::warn!("Ignoring trailing input from line {}", tokens.line());
    }

    Ok(scene)
}

fn parse_light(tokens: &mut Tokens) -> LoadResult<Light> {
    let line = tokens.line();
    let kind: i64 = tokens.next_value("light type")?;
    let [x, y, z] = tokens.next_triple("light position")?;
    let [r, g, b] = tokens.next_triple("light color")?;
    let color = Color::new(r, g, b);
    match kind {
        0 => Ok(Light::directional(DVec3::new(x, y, z), color)),
        1 => Ok(Light {
            position: HomogeneousVector::point(x, y, z),
            color,
        }),
        _ => Err(LoadError::UnknownLightType { line, kind }),
    }
}

fn parse_scale(tokens: &mut Tokens) -> LoadResult<f64> {
    let line = tokens.line();
    let scale = tokens.next_f64("scale")?;
    if scale == 0.0 || !scale.is_finite() {
        return Err(LoadError::DegenerateScale { line, scale });
    }
    Ok(scale)
}

/// Colors are stored pre-multiplied by their coefficients.
fn parse_material(tokens: &mut Tokens) -> LoadResult<Material> {
    let ambient = Color::from_array(tokens.next_triple("ambient color")?);
    let diffuse = Color::from_array(tokens.next_triple("diffuse color")?);
    let specular = Color::from_array(tokens.next_triple("specular color")?);
    let [ka, kd, ks] = tokens.next_triple("lighting coefficient")?;
    let shininess = tokens.next_f64("shininess")?;
    let index = tokens.next_f64("refractive index")?;
    let k_reflective = tokens.next_f64("reflective weight")?;
    let k_refractive = tokens.next_f64("refractive weight")?;

    Ok(Material::new(ambient * ka, diffuse * kd, specular * ks, shininess)
        .with_reflection(k_reflective)
        .with_refraction(index, k_refractive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Shape;
    use std::cell::RefCell;

    fn no_meshes(name: &str) -> LoadResult<Mesh> {
        panic!("unexpected mesh lookup: {}", name)
    }

    fn unit_triangle(_: &str) -> LoadResult<Mesh> {
        crate::loader::parse_mesh("v -1 -1 0\nv 1 -1 0\nv 0 1 0\nf 1 2 3\n")
    }

    #[test]
    fn test_parse_lights_and_spheres() {
        let content = "\
2 1 0
L 1 0 0 5 1 1 1
L 0 0 1 0 0.5 0.5 0.5
S 0 0 -3 2  1 0 0  0 1 0  0 0 1  0.5 1 2  10 1.5 0.25 0.75
";
        let scene = parse_scene(content, no_meshes).expect("valid scene");

        assert_eq!(scene.lights().len(), 2);
        assert!(!scene.lights()[0].is_directional());
        assert!(scene.lights()[1].is_directional());
        assert_eq!(scene.lights()[1].color, Color::splat(0.5));

        let sphere = scene.get_surface(0).expect("one sphere");
        let m = sphere.material;
        assert_eq!(m.ambient, Color::new(0.5, 0.0, 0.0));
        assert_eq!(m.diffuse, Color::new(0.0, 1.0, 0.0));
        assert_eq!(m.specular, Color::new(0.0, 0.0, 2.0));
        assert_eq!(m.shininess, 10.0);
        assert_eq!(m.refractive_index, 1.5);
        assert_eq!(m.reflective_weight, 0.25);
        assert_eq!(m.refractive_weight, 0.75);

        // translate * scale: unit x lands at (2, 0, -3)
        let p = sphere.state() * HomogeneousVector::point(1.0, 0.0, 0.0);
        assert!(p.abs_diff_eq(&HomogeneousVector::point(2.0, 0.0, -3.0), 1e-12));
    }

    #[test]
    fn test_parse_mesh_record() {
        let requested = RefCell::new(Vec::new());
        let content = "0 0 1\nM tri.obj 2 0 0 90 1 0 0  1 1 1 1 1 1 1 1 1 1 1 1 5 1 0 0\n";
        let scene = parse_scene(content, |name| {
            requested.borrow_mut().push(name.to_string());
            unit_triangle(name)
        })
        .expect("valid scene");

        assert_eq!(requested.into_inner(), vec!["tri.obj".to_string()]);
        let mesh = scene.get_surface(0).expect("one mesh");
        assert!(matches!(mesh.shape(), Shape::Mesh(_)));

        // scale 2, rotate 90 degrees about z, then move by +x
        let p = mesh.state() * HomogeneousVector::point(1.0, 0.0, 0.0);
        assert!(p.abs_diff_eq(&HomogeneousVector::point(1.0, 2.0, 0.0), 1e-12));
    }

    #[test]
    fn test_unknown_light_type() {
        let err = parse_scene("1 0 0\nL 2 0 0 0 1 1 1\n", no_meshes).unwrap_err();
        assert!(matches!(err, LoadError::UnknownLightType { line: 2, kind: 2 }));
    }

    #[test]
    fn test_wrong_record_order() {
        let err = parse_scene("1 1 0\nS 0 0 0 1 1 1 1 1 1 1 1 1 1 1 1 1 1 0 0 0\n", no_meshes).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedTag { line: 2, .. }));
    }

    #[test]
    fn test_truncated_sphere() {
        let err = parse_scene("0 1 0\nS 0 0 0 1 1 1 1\n", no_meshes).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let err = parse_scene("0 1 0\nS 0 0 0 0 1 1 1 1 1 1 1 1 1 1 1 1 1 0 0 0\n", no_meshes).unwrap_err();
        assert!(matches!(err, LoadError::DegenerateScale { line: 2, .. }));
    }

    #[test]
    fn test_mesh_error_propagates() {
        let content = "0 0 1\nM broken.obj 1 0 0 0 0 0 0  1 1 1 1 1 1 1 1 1 1 1 1 5 1 0 0\n";
        let err = parse_scene(content, |name| {
            Err(LoadError::Mesh {
                path: name.into(),
                source: Box::new(LoadError::UnexpectedEof {
                    line: 1,
                    expected: "vertex coordinate",
                }),
            })
        })
        .unwrap_err();
        assert!(err.to_string().contains("broken.obj"));
    }
}
